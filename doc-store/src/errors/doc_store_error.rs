//! Unified error type for the doc-store crate.

use thiserror::Error;

/// Errors produced while loading the persisted chunk collection.
///
/// All variants are startup-time failures: a store that fails to load is
/// fatal and the process should exit instead of serving traffic.
#[derive(Debug, Error)]
pub enum DocStoreError {
    /// Underlying I/O error (missing or unreadable collection file).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A line in the collection file is not a well-formed chunk record.
    #[error("malformed chunk record at line {line}: {source}")]
    MalformedRecord {
        line: usize,
        source: serde_json::Error,
    },

    /// Two records share the same chunk id.
    #[error("duplicate chunk id '{id}' at line {line}")]
    DuplicateId { id: String, line: usize },

    /// A record's embedding length differs from the rest of the collection.
    #[error("embedding dimension mismatch at line {line}: expected {expected}, got {got}")]
    DimensionMismatch {
        line: usize,
        expected: usize,
        got: usize,
    },

    /// A record carries an empty embedding, which can never be scored.
    #[error("empty embedding at line {line}")]
    EmptyEmbedding { line: usize },
}
