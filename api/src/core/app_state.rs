use std::sync::Arc;

use ai_llm_service::service_profiles::LlmServiceProfiles;
use answer_engine::cfg::AskOptions;
use doc_store::DocStore;

/// Shared state for all HTTP handlers.
///
/// The store and LLM profiles are built once at startup and injected here;
/// handlers only ever read them. Per-request state lives entirely inside
/// the pipeline call.
#[derive(Clone)]
pub struct AppState {
    /// Read-only vector collection, loaded at process start.
    pub store: Arc<DocStore>,
    /// Generation + embedding provider profiles.
    pub llm: Arc<LlmServiceProfiles>,
    /// Pipeline knobs (top-K, threshold, boosts, question limit).
    pub options: AskOptions,
}

impl AppState {
    pub fn new(store: Arc<DocStore>, llm: Arc<LlmServiceProfiles>, options: AskOptions) -> Self {
        Self {
            store,
            llm,
            options,
        }
    }
}
