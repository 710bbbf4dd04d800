//! Async JSONL reader for the persisted chunk collection.
//!
//! One JSON chunk record per line. Unlike ingestion flows that tolerate
//! noise, this reader is strict: a malformed line, a duplicate id, or an
//! embedding whose length disagrees with the rest of the collection fails
//! the whole load. The collection is the single source of truth for the
//! process, so a partially loaded store is worse than no store.

use std::collections::HashSet;
use std::path::Path;

use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::errors::doc_store_error::DocStoreError;
use crate::structs::chunk::ChunkRecord;

/// Read the entire collection file and validate it eagerly.
///
/// Blank lines are allowed and skipped. An empty file yields an empty
/// collection (degenerate but legal: `top_k` then returns nothing).
///
/// # Errors
/// - [`DocStoreError::Io`] if the file is missing or unreadable
/// - [`DocStoreError::MalformedRecord`] on a line that does not parse
/// - [`DocStoreError::DuplicateId`] / [`DocStoreError::DimensionMismatch`] /
///   [`DocStoreError::EmptyEmbedding`] on invariant violations
pub async fn read_collection<P: AsRef<Path>>(path: P) -> Result<Vec<ChunkRecord>, DocStoreError> {
    let file = File::open(path).await?;
    let reader = BufReader::new(file);
    let mut lines = reader.lines();

    let mut records: Vec<ChunkRecord> = Vec::new();
    let mut seen_ids: HashSet<String> = HashSet::new();
    let mut dim: Option<usize> = None;
    let mut line_no = 0usize;

    while let Some(line) = lines.next_line().await? {
        line_no += 1;
        if line.trim().is_empty() {
            continue;
        }

        let record: ChunkRecord = serde_json::from_str(&line)
            .map_err(|source| DocStoreError::MalformedRecord {
                line: line_no,
                source,
            })?;

        if record.embedding.is_empty() {
            return Err(DocStoreError::EmptyEmbedding { line: line_no });
        }
        match dim {
            None => dim = Some(record.embedding.len()),
            Some(expected) if expected != record.embedding.len() => {
                return Err(DocStoreError::DimensionMismatch {
                    line: line_no,
                    expected,
                    got: record.embedding.len(),
                });
            }
            Some(_) => {}
        }
        if !seen_ids.insert(record.id.clone()) {
            return Err(DocStoreError::DuplicateId {
                id: record.id,
                line: line_no,
            });
        }

        records.push(record);
    }

    Ok(records)
}
