//! Response mapper keeping the error surface JSON-only.
//!
//! Axum's built-in extractors reject malformed request bodies with
//! plain-text responses (400/415/422). Handlers in this crate always answer
//! with a JSON error envelope, so the built-in rejections are rewritten
//! into the same shape before leaving the server.

use axum::{
    body::Body,
    http::{Request, StatusCode, header},
    middleware::Next,
    response::Response,
};
use serde_json::json;

pub async fn json_error_mapper(req: Request<Body>, next: Next) -> Response {
    let res = next.run(req).await;
    wrap_rejection(res).await
}

/// Rewrite a plain-text extractor rejection into the JSON error envelope.
///
/// Responses from our own handlers are already `application/json` and pass
/// through untouched, as does every status outside the extractor-rejection
/// range.
async fn wrap_rejection(res: Response) -> Response {
    let status = res.status();
    if !(status == StatusCode::BAD_REQUEST
        || status == StatusCode::UNSUPPORTED_MEDIA_TYPE
        || status == StatusCode::UNPROCESSABLE_ENTITY)
    {
        return res;
    }

    let already_json = res
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"));
    if already_json {
        return res;
    }

    let (mut parts, body) = res.into_parts();
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .unwrap_or_default();
    let reason = String::from_utf8_lossy(&bytes);

    let envelope = json!({
        "error": "invalid request body",
        "details": reason.trim(),
    });
    let body = serde_json::to_vec(&envelope).unwrap_or_else(|_| bytes.to_vec());

    // The body changed; the stale length header must not survive.
    parts.headers.remove(header::CONTENT_LENGTH);
    parts.headers.insert(
        header::CONTENT_TYPE,
        header::HeaderValue::from_static("application/json"),
    );

    Response::from_parts(parts, Body::from(body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn plain(status: StatusCode, text: &str) -> Response {
        Response::builder()
            .status(status)
            .header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
            .body(Body::from(text.to_string()))
            .expect("response")
    }

    async fn body_json(res: Response) -> Value {
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .expect("read body");
        serde_json::from_slice(&bytes).expect("json body")
    }

    #[tokio::test]
    async fn plain_text_rejection_becomes_json_envelope() {
        let rejection = plain(
            StatusCode::UNPROCESSABLE_ENTITY,
            "Failed to deserialize the JSON body into the target type",
        );
        let res = wrap_rejection(rejection).await;

        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            res.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        let v = body_json(res).await;
        assert_eq!(v["error"], "invalid request body");
        assert!(v["details"].as_str().unwrap().contains("deserialize"));
    }

    #[tokio::test]
    async fn missing_content_type_rejection_is_wrapped_too() {
        let rejection = plain(
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            "Expected request with `Content-Type: application/json`",
        );
        let res = wrap_rejection(rejection).await;

        assert_eq!(res.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(body_json(res).await["error"], "invalid request body");
    }

    #[tokio::test]
    async fn handler_json_errors_pass_through_untouched() {
        let own = Response::builder()
            .status(StatusCode::BAD_REQUEST)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"error":"question required"}"#))
            .expect("response");
        let res = wrap_rejection(own).await;

        assert_eq!(body_json(res).await["error"], "question required");
    }

    #[tokio::test]
    async fn success_responses_are_not_rewritten() {
        let ok = plain(StatusCode::OK, "ok");
        let res = wrap_rejection(ok).await;

        assert_eq!(res.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .expect("read body");
        assert_eq!(&bytes[..], b"ok");
    }
}
