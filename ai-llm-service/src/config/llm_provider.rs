/// Backend used for LLM inference and embeddings.
///
/// Adding a provider (e.g. a hosted API with an OpenAI-compatible surface)
/// means extending this enum and giving it a service in `services/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LlmProvider {
    /// Local Ollama runtime for on-device inference.
    Ollama,
    /// OpenAI REST API.
    OpenAI,
}
