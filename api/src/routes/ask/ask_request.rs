use serde::{Deserialize, Serialize};
use serde_json::Value;

use answer_engine::UsedContext;

/// Request payload for /ask.
///
/// `question` defaults to empty when the field is missing so a missing
/// field and a blank question produce the same "question required" failure.
#[derive(Debug, Deserialize)]
pub struct AskRequest {
    #[serde(default)]
    pub question: String,
}

/// Response payload for /ask.
#[derive(Debug, Serialize)]
pub struct AskResponse {
    /// Final validated model answer.
    pub answer: String,
    /// Model-reported sources, passed through as-is.
    pub sources: Vec<Value>,
    /// The ranked candidate set actually fed to the model (audit trail).
    pub used_contexts: Vec<UsedContext>,
    /// Wall-clock latency of the pipeline run.
    pub latency_ms: u128,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_question_defaults_to_empty() {
        let req: AskRequest = serde_json::from_str("{}").expect("deserialize");
        assert!(req.question.is_empty());
    }

    #[test]
    fn response_uses_snake_case_top_level_and_camel_case_contexts() {
        let resp = AskResponse {
            answer: "x".into(),
            sources: vec![],
            used_contexts: vec![UsedContext {
                doc: "a.txt".into(),
                chunk_index: 0,
                score: 0.5,
                re_rank_score: 0.52,
            }],
            latency_ms: 12,
        };
        let v = serde_json::to_value(&resp).expect("serialize");
        assert_eq!(v["latency_ms"], 12);
        assert_eq!(v["used_contexts"][0]["chunkIndex"], 0);
        assert!(v["used_contexts"][0]["reRankScore"].is_number());
    }
}
