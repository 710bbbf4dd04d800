//! Result types returned to callers of [`crate::ask`].

use serde::Serialize;
use serde_json::Value;

use crate::rank::RankedCandidate;

/// A validated, successful answer with its audit trail.
#[derive(Debug, Serialize)]
pub struct AskSuccess {
    /// Model answer text (may be the fixed refusal).
    pub answer: String,
    /// Model-reported sources, passed through unvalidated per the contract.
    pub sources: Vec<Value>,
    /// The full ranked candidate set that was fed to the model.
    pub used_contexts: Vec<UsedContext>,
    /// Wall-clock time of the whole pipeline run.
    pub latency_ms: u128,
}

/// One entry of the audit trail: where a context chunk came from and how it
/// was scored before and after re-ranking.
#[derive(Debug, Clone, Serialize)]
pub struct UsedContext {
    pub doc: String,
    #[serde(rename = "chunkIndex")]
    pub chunk_index: u32,
    pub score: f32,
    #[serde(rename = "reRankScore")]
    pub re_rank_score: f32,
}

impl From<&RankedCandidate> for UsedContext {
    fn from(c: &RankedCandidate) -> Self {
        Self {
            doc: c.doc.clone(),
            chunk_index: c.chunk_index,
            score: c.score,
            re_rank_score: c.re_rank_score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn used_context_wire_names_are_camel_case() {
        let ctx = UsedContext {
            doc: "a.txt".into(),
            chunk_index: 2,
            score: 0.5,
            re_rank_score: 0.52,
        };
        let json = serde_json::to_value(&ctx).expect("serialize");
        assert_eq!(json["doc"], "a.txt");
        assert_eq!(json["chunkIndex"], 2);
        assert!(json.get("chunk_index").is_none());
        assert!((json["reRankScore"].as_f64().unwrap() - 0.52).abs() < 1e-6);
    }
}
