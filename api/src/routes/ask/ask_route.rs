//! POST /ask — answers a question from the loaded document collection.

use std::sync::Arc;

use axum::{Json, extract::State};
use tracing::{debug, info};

use crate::{
    core::app_state::AppState,
    error_handler::AppError,
    routes::ask::ask_request::{AskRequest, AskResponse},
};

/// Handler: POST /ask
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:8080/ask \
///   -H 'content-type: application/json' \
///   -d '{"question":"What does simple.txt say about onboarding?"}'
/// ```
pub async fn ask_question(
    State(state): State<Arc<AppState>>,
    Json(body): Json<AskRequest>,
) -> Result<Json<AskResponse>, AppError> {
    debug!(target: "api::ask", "ask_question: start");

    let success =
        answer_engine::ask(&state.llm, &state.store, &body.question, &state.options).await?;

    info!(
        target: "api::ask",
        contexts = success.used_contexts.len(),
        latency_ms = success.latency_ms,
        "ask_question: success"
    );

    Ok(Json(AskResponse {
        answer: success.answer,
        sources: success.sources,
        used_contexts: success.used_contexts,
        latency_ms: success.latency_ms,
    }))
}
