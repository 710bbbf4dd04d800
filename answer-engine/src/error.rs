//! Typed error for the answer-engine crate.

use thiserror::Error;

use crate::api_types::UsedContext;
use crate::contract::ContractViolation;
use ai_llm_service::error_handler::AiLlmError;

/// Failure taxonomy for one ask request.
///
/// Client-input variants are produced before any external call is made.
/// `Contract` carries the full diagnostic payload (violation detail plus the
/// candidate set that was fed to the model) so the HTTP layer can surface
/// what happened without server-side log correlation.
#[derive(Debug, Error)]
pub enum AskError {
    /// Question was missing or blank after trimming.
    #[error("question required")]
    EmptyQuestion,

    /// Question exceeded the configured maximum length.
    #[error("question too long (limit {max} characters)")]
    QuestionTooLong { max: usize },

    /// The embedding or generation provider failed.
    #[error(transparent)]
    Provider(#[from] AiLlmError),

    /// The model produced output that failed contract validation.
    #[error("model output violated the answer contract")]
    Contract {
        violation: ContractViolation,
        used_contexts: Vec<UsedContext>,
        latency_ms: u128,
    },
}
