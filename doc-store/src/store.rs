//! Exhaustive cosine-similarity store over the loaded collection.

use std::cmp::Ordering;
use std::path::Path;

use tracing::info;

use crate::errors::doc_store_error::DocStoreError;
use crate::jsonl_reader::read_collection;
use crate::structs::chunk::{ChunkRecord, ScoredCandidate};

/// Read-only vector store, loaded once at process start.
///
/// Scoring is an exhaustive linear scan: O(n·d) per query plus the sort.
/// That is the intended trade-off for small-to-medium corpora; there is no
/// ANN index here by design.
#[derive(Debug)]
pub struct DocStore {
    records: Vec<ChunkRecord>,
}

impl DocStore {
    /// Load and validate the collection from a JSONL file.
    ///
    /// # Errors
    /// Propagates [`DocStoreError`] from the reader; any failure here is
    /// fatal for the process.
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self, DocStoreError> {
        let records = read_collection(&path).await?;
        info!(
            target: "doc_store::load",
            chunks = records.len(),
            dim = records.first().map(|r| r.embedding.len()).unwrap_or(0),
            path = %path.as_ref().display(),
            "collection loaded"
        );
        Ok(Self { records })
    }

    /// Build a store directly from records, bypassing the file loader.
    ///
    /// Intended for fixture collections in tests and for callers that
    /// already hold a validated collection in memory.
    pub fn from_records(records: Vec<ChunkRecord>) -> Self {
        Self { records }
    }

    /// Number of chunks in the collection.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Score every stored chunk against `query` by cosine similarity and
    /// return the best `k` as independent scored copies.
    ///
    /// Results are sorted by descending score; ties keep insertion order
    /// (stable sort) so output is deterministic. The returned list is at
    /// most `min(k, len)` long, and empty for an empty collection.
    pub fn top_k(&self, query: &[f32], k: usize) -> Vec<ScoredCandidate> {
        let mut scored: Vec<ScoredCandidate> = self
            .records
            .iter()
            .map(|r| ScoredCandidate::from_record(r, cosine_similarity(query, &r.embedding)))
            .collect();

        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        scored.truncate(k.min(self.records.len()));
        scored
    }
}

/// Normalized dot product of two vectors.
///
/// Zero-norm inputs (or a length mismatch against a degenerate query) score
/// 0.0 rather than dividing by zero.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn chunk(id: &str, doc: &str, idx: u32, embedding: Vec<f32>) -> ChunkRecord {
        ChunkRecord {
            id: id.to_string(),
            doc: doc.to_string(),
            chunk_index: idx,
            text: format!("text of {id}"),
            embedding,
        }
    }

    #[test]
    fn top_k_sorted_and_bounded() {
        let store = DocStore::from_records(vec![
            chunk("a", "a.txt", 0, vec![1.0, 0.0]),
            chunk("b", "b.txt", 0, vec![0.0, 1.0]),
            chunk("c", "c.txt", 0, vec![0.7, 0.7]),
        ]);

        let hits = store.top_k(&[1.0, 0.0], 2);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].id, "a");
        assert_eq!(hits[1].id, "c");
        assert!(hits[0].score >= hits[1].score);

        // k larger than the collection clamps to collection size.
        let all = store.top_k(&[1.0, 0.0], 10);
        assert_eq!(all.len(), 3);
        assert!(all.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn ties_keep_insertion_order() {
        let store = DocStore::from_records(vec![
            chunk("first", "a.txt", 0, vec![1.0, 0.0]),
            chunk("second", "b.txt", 0, vec![1.0, 0.0]),
            chunk("third", "c.txt", 0, vec![2.0, 0.0]), // same direction, same cosine
        ]);

        let hits = store.top_k(&[1.0, 0.0], 3);
        assert_eq!(hits[0].id, "first");
        assert_eq!(hits[1].id, "second");
        assert_eq!(hits[2].id, "third");
    }

    #[test]
    fn empty_collection_returns_empty() {
        let store = DocStore::from_records(Vec::new());
        assert!(store.top_k(&[1.0, 0.0], 5).is_empty());
    }

    #[test]
    fn zero_norm_vectors_score_zero() {
        let store = DocStore::from_records(vec![chunk("z", "z.txt", 0, vec![0.0, 0.0])]);
        let hits = store.top_k(&[1.0, 0.0], 1);
        assert_eq!(hits[0].score, 0.0);
    }

    #[test]
    fn returned_candidates_are_independent_copies() {
        let store = DocStore::from_records(vec![chunk("a", "a.txt", 0, vec![1.0, 0.0])]);
        let mut hits = store.top_k(&[1.0, 0.0], 1);
        hits[0].score += 100.0;

        // A fresh query is unaffected by the caller's mutation.
        let again = store.top_k(&[1.0, 0.0], 1);
        assert!((again[0].score - 1.0).abs() < 1e-6);
    }

    fn write_jsonl(lines: &[&str]) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().expect("temp file");
        for line in lines {
            writeln!(f, "{line}").expect("write line");
        }
        f
    }

    #[tokio::test]
    async fn load_reads_valid_collection() {
        let f = write_jsonl(&[
            r#"{"id":"a:0","doc":"a.txt","chunkIndex":0,"text":"alpha","embedding":[1.0,0.0]}"#,
            "",
            r#"{"id":"a:1","doc":"a.txt","chunkIndex":1,"text":"beta","embedding":[0.0,1.0]}"#,
        ]);
        let store = DocStore::load(f.path()).await.expect("load");
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn load_fails_on_missing_file() {
        let err = DocStore::load("definitely/not/here.jsonl").await.unwrap_err();
        assert!(matches!(err, DocStoreError::Io(_)));
    }

    #[tokio::test]
    async fn load_fails_on_malformed_line() {
        let f = write_jsonl(&[
            r#"{"id":"a:0","doc":"a.txt","chunkIndex":0,"text":"alpha","embedding":[1.0]}"#,
            "not json at all",
        ]);
        let err = DocStore::load(f.path()).await.unwrap_err();
        assert!(matches!(err, DocStoreError::MalformedRecord { line: 2, .. }));
    }

    #[tokio::test]
    async fn load_fails_on_dimension_mismatch() {
        let f = write_jsonl(&[
            r#"{"id":"a:0","doc":"a.txt","chunkIndex":0,"text":"alpha","embedding":[1.0,0.0]}"#,
            r#"{"id":"a:1","doc":"a.txt","chunkIndex":1,"text":"beta","embedding":[1.0]}"#,
        ]);
        let err = DocStore::load(f.path()).await.unwrap_err();
        assert!(matches!(
            err,
            DocStoreError::DimensionMismatch {
                line: 2,
                expected: 2,
                got: 1
            }
        ));
    }

    #[tokio::test]
    async fn load_fails_on_duplicate_id() {
        let f = write_jsonl(&[
            r#"{"id":"a:0","doc":"a.txt","chunkIndex":0,"text":"alpha","embedding":[1.0]}"#,
            r#"{"id":"a:0","doc":"b.txt","chunkIndex":0,"text":"beta","embedding":[0.5]}"#,
        ]);
        let err = DocStore::load(f.path()).await.unwrap_err();
        assert!(matches!(err, DocStoreError::DuplicateId { line: 2, .. }));
    }
}
