//! Data types for the persisted chunk collection and per-query scoring.

use serde::{Deserialize, Serialize};

/// One persisted chunk record, immutable after load.
///
/// `id` is unique within a collection; `embedding` has the same length for
/// every record (the collection's embedding dimensionality). Both are
/// validated eagerly by the loader.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkRecord {
    /// Unique chunk id within the collection.
    pub id: String,
    /// Source document filename, e.g. `"simple.txt"`.
    pub doc: String,
    /// Zero-based position of this chunk within its document.
    #[serde(rename = "chunkIndex")]
    pub chunk_index: u32,
    /// Chunk text fed to the prompt as context.
    pub text: String,
    /// Embedding vector produced by the offline pipeline.
    pub embedding: Vec<f32>,
}

/// A chunk scored against a query embedding.
///
/// Created fresh per query as an independent copy of the stored record
/// (minus the embedding, which is not needed downstream), so callers may
/// mutate `score` without affecting the store.
#[derive(Debug, Clone)]
pub struct ScoredCandidate {
    pub id: String,
    pub doc: String,
    pub chunk_index: u32,
    pub text: String,
    /// Cosine similarity against the query, later adjusted by ranking boosts.
    pub score: f32,
}

impl ScoredCandidate {
    /// Build a scored copy of a stored record.
    pub fn from_record(record: &ChunkRecord, score: f32) -> Self {
        Self {
            id: record.id.clone(),
            doc: record.doc.clone(),
            chunk_index: record.chunk_index,
            text: record.text.clone(),
            score,
        }
    }
}
