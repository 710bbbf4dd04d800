//! Shared LLM service for the document Q&A backend.
//!
//! Providers (Ollama/OpenAI) are exposed behind two logical profiles:
//! **generation** (chat-style, non-streaming, deterministic) and
//! **embedding** (text → fixed-length vector). Both are opaque to the
//! retrieval core: it only sees `generate(system, user)` and `embed(text)`.

pub mod config;
pub mod error_handler;
pub mod service_profiles;
pub mod services;
pub mod telemetry;
