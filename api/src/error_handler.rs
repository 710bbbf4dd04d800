use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use answer_engine::{AskError, ContractViolation};

/// Public application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // --- IO / network / server ---
    #[error("failed to bind listener")]
    Bind(#[source] std::io::Error),

    #[error("server error")]
    Server(#[source] std::io::Error),

    // --- Request pipeline ---
    #[error(transparent)]
    Ask(#[from] AskError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Ask(err) => ask_error_response(err),
            other => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "server_error", "details": other.to_string() })),
            )
                .into_response(),
        }
    }
}

/// Map pipeline failures to the documented wire shapes.
///
/// Contract violations are 5xx but still carry the full diagnostic payload
/// (raw or parsed model output, candidates used, latency) so a failure can
/// be reconstructed from the response alone.
fn ask_error_response(err: AskError) -> Response {
    match err {
        AskError::EmptyQuestion => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "question required" })),
        )
            .into_response(),

        AskError::QuestionTooLong { .. } => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "question too long" })),
        )
            .into_response(),

        AskError::Provider(e) => (
            StatusCode::BAD_GATEWAY,
            Json(json!({ "error": "server_error", "details": e.to_string() })),
        )
            .into_response(),

        AskError::Contract {
            violation,
            used_contexts,
            latency_ms,
        } => {
            let body = match violation {
                ContractViolation::NotJson { raw, parse_error } => json!({
                    "error": "model_response_not_json",
                    "raw": raw,
                    "parse_error": parse_error,
                    "used_contexts": used_contexts,
                    "latency_ms": latency_ms,
                }),
                ContractViolation::InvalidShape { parsed } => json!({
                    "error": "invalid_model_json_shape",
                    "parsed": parsed,
                    "used_contexts": used_contexts,
                    "latency_ms": latency_ms,
                }),
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use answer_engine::UsedContext;
    use serde_json::Value;

    async fn body_json(resp: Response) -> Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .expect("read body");
        serde_json::from_slice(&bytes).expect("json body")
    }

    #[tokio::test]
    async fn empty_question_maps_to_400() {
        let resp = AppError::from(AskError::EmptyQuestion).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(resp).await["error"], "question required");
    }

    #[tokio::test]
    async fn too_long_question_maps_to_400() {
        let resp = AppError::from(AskError::QuestionTooLong { max: 2000 }).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(resp).await["error"], "question too long");
    }

    #[tokio::test]
    async fn not_json_violation_keeps_diagnostics() {
        let err = AskError::Contract {
            violation: ContractViolation::NotJson {
                raw: "oops".into(),
                parse_error: "expected value".into(),
            },
            used_contexts: vec![UsedContext {
                doc: "a.txt".into(),
                chunk_index: 1,
                score: 0.4,
                re_rank_score: 0.42,
            }],
            latency_ms: 7,
        };
        let resp = AppError::from(err).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let v = body_json(resp).await;
        assert_eq!(v["error"], "model_response_not_json");
        assert_eq!(v["raw"], "oops");
        assert_eq!(v["used_contexts"][0]["chunkIndex"], 1);
        assert_eq!(v["latency_ms"], 7);
    }

    #[tokio::test]
    async fn invalid_shape_violation_carries_parsed_value() {
        let err = AskError::Contract {
            violation: ContractViolation::InvalidShape {
                parsed: json!({"foo": 1}),
            },
            used_contexts: vec![],
            latency_ms: 3,
        };
        let resp = AppError::from(err).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let v = body_json(resp).await;
        assert_eq!(v["error"], "invalid_model_json_shape");
        assert_eq!(v["parsed"]["foo"], 1);
    }
}
