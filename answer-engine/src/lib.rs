//! Retrieval + generation pipeline with a single public entry point.
//!
//! Public API: [`ask`]. It validates the question, embeds it, retrieves the
//! raw top-K from the store, ranks the candidates (mention boost, threshold
//! with fallback, doc-frequency re-rank), builds the contract prompt, calls
//! the generation provider, and validates the model output against the
//! strict answer schema.
//!
//! All stages except the two provider calls are pure and synchronous; each
//! request owns its own candidate list and shares nothing with other
//! requests beyond the read-only store.

pub mod cfg;
mod contract;
mod error;
mod prompt;
pub mod rank;

mod api_types;

pub use api_types::{AskSuccess, UsedContext};
pub use contract::{AnswerObject, ContractViolation, parse_and_validate};
pub use error::AskError;
pub use prompt::{INSTRUCTION, Prompt, REFUSAL_LITERAL, build_prompt};

use std::time::Instant;

use tracing::{debug, info};

use ai_llm_service::service_profiles::LlmServiceProfiles;
use doc_store::DocStore;

use cfg::AskOptions;

/// Answer a question from the loaded document collection.
///
/// The stages form a strict sequential chain; the first failing stage
/// terminates the request. Client-input failures are raised before any
/// provider call. A contract violation is still a structured result: the
/// error carries the raw diagnostic payload and the candidate set used, so
/// callers can surface what happened without server-side log correlation.
///
/// # Errors
/// - [`AskError::EmptyQuestion`] / [`AskError::QuestionTooLong`] on invalid input
/// - [`AskError::Provider`] if embedding or generation fails
/// - [`AskError::Contract`] if the model output fails contract validation
pub async fn ask(
    llm: &LlmServiceProfiles,
    store: &DocStore,
    question: &str,
    opts: &AskOptions,
) -> Result<AskSuccess, AskError> {
    let started = Instant::now();

    // 1) Validate input. No external calls happen on violation.
    let question = validate_question(question, opts.max_question_chars)?;
    info!(
        target: "answer_engine::ask",
        question_chars = question.chars().count(),
        "ask: start"
    );

    // 2) Embed the question.
    let query_embedding = llm.embed(question).await?;

    // 3) Retrieve raw top-K.
    let raw = store.top_k(&query_embedding, opts.top_k);
    debug!(
        target: "answer_engine::ask",
        raw = raw.len(),
        top_k = opts.top_k,
        "retrieved raw candidates"
    );

    // 4) Rank: mention boost, threshold/fallback, doc-frequency re-rank.
    let ranked = rank::rank(question, raw, &opts.rank);
    let used_contexts: Vec<UsedContext> = ranked.iter().map(UsedContext::from).collect();

    // 5) Build the contract prompt and generate.
    let prompt = build_prompt(question, &ranked);
    let raw_output = llm
        .generate(Some(prompt.instruction.as_str()), &prompt.context)
        .await?;

    // 6) Validate model output against the contract.
    match parse_and_validate(&raw_output) {
        Ok(obj) => {
            let latency_ms = started.elapsed().as_millis();
            info!(
                target: "answer_engine::ask",
                contexts = used_contexts.len(),
                latency_ms,
                "ask: success"
            );
            Ok(AskSuccess {
                answer: obj.answer,
                sources: obj.sources,
                used_contexts,
                latency_ms,
            })
        }
        Err(violation) => Err(AskError::Contract {
            violation,
            used_contexts,
            latency_ms: started.elapsed().as_millis(),
        }),
    }
}

/// Trim and bound the question. Returns the trimmed text on success.
fn validate_question(question: &str, max_chars: usize) -> Result<&str, AskError> {
    let trimmed = question.trim();
    if trimmed.is_empty() {
        return Err(AskError::EmptyQuestion);
    }
    if trimmed.chars().count() > max_chars {
        return Err(AskError::QuestionTooLong { max: max_chars });
    }
    Ok(trimmed)
}
