use crate::config::llm_provider::LlmProvider;

/// Configuration for one LLM model invocation profile.
///
/// Covers both general and provider-specific parameters; unused fields are
/// simply `None` for a given provider (e.g. `api_key` for Ollama).
#[derive(Debug, Clone, PartialEq)]
pub struct LlmModelConfig {
    /// The LLM provider/backend.
    pub provider: LlmProvider,

    /// Model identifier string (e.g. `"qwen3:14b"`, `"gpt-4o-mini"`).
    pub model: String,

    /// Inference endpoint (local server or remote API base URL).
    pub endpoint: String,

    /// Optional API key for providers that require authentication.
    pub api_key: Option<String>,

    /// Maximum number of tokens to generate.
    pub max_tokens: Option<u32>,

    /// Sampling temperature. The Q&A pipeline pins this to 0.0 so repeated
    /// runs over the same context are reproducible.
    pub temperature: Option<f32>,

    /// Nucleus sampling parameter.
    pub top_p: Option<f32>,

    /// Optional request timeout (in seconds).
    pub timeout_secs: Option<u64>,
}
