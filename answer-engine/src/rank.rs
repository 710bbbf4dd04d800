//! Candidate ranking: exact-mention boost, threshold filter with fallback,
//! and document-frequency re-rank.
//!
//! This pass never fails: non-empty input always yields a non-empty output
//! (thanks to the fallback), and empty input yields empty output.

use std::cmp::Ordering;
use std::collections::HashMap;

use regex::Regex;
use tracing::{debug, warn};

use doc_store::structs::chunk::ScoredCandidate;

/// Knobs for the ranking passes. Defaults match the documented behavior:
/// threshold 0.20, mention boost 0.6, doc-frequency unit 0.02, fallback 3.
#[derive(Debug, Clone)]
pub struct RankOptions {
    /// Minimum (boosted) similarity a candidate needs to survive filtering.
    pub score_threshold: f32,
    /// Added to a candidate's score when the question names its document.
    pub exact_mention_boost: f32,
    /// Per-extra-chunk bonus for documents contributing multiple candidates.
    pub doc_frequency_boost: f32,
    /// How many head-of-list candidates to keep when everything is filtered.
    pub fallback_count: usize,
}

impl Default for RankOptions {
    fn default() -> Self {
        Self {
            score_threshold: 0.20,
            exact_mention_boost: 0.6,
            doc_frequency_boost: 0.02,
            fallback_count: 3,
        }
    }
}

/// A candidate that survived filtering, with its final re-rank score.
#[derive(Debug, Clone)]
pub struct RankedCandidate {
    pub id: String,
    pub doc: String,
    pub chunk_index: u32,
    pub text: String,
    /// Similarity score after the exact-mention boost.
    pub score: f32,
    /// `score` plus the document-frequency bonus; final ordering key.
    pub re_rank_score: f32,
}

/// Rank the raw top-K candidates for `question`.
///
/// Passes, in order:
/// 1. If the question contains a filename-like token (`name.ext` with a
///    recognized document extension), boost every candidate whose `doc`
///    matches it case-insensitively. Only the first such token governs.
///    The boost lands on the raw scores, before thresholding, so an exact
///    mention can rescue a borderline semantic match.
/// 2. Retain candidates with boosted score >= threshold. If none survive,
///    fall back to the first `fallback_count` candidates in the original
///    top-K order; the pipeline always gets some context, and the prompt
///    licenses the model to refuse if that context is irrelevant.
/// 3. Count chunks per document among survivors and add
///    `doc_frequency_boost * (count - 1)` to each candidate's score as its
///    re-rank score, then sort by descending re-rank score (stable).
pub fn rank(
    question: &str,
    mut raw: Vec<ScoredCandidate>,
    opts: &RankOptions,
) -> Vec<RankedCandidate> {
    if raw.is_empty() {
        return Vec::new();
    }

    // 1) Exact filename mention boost.
    if let Some(mention) = first_filename_mention(question) {
        let mut boosted = 0usize;
        for c in raw.iter_mut() {
            if c.doc.eq_ignore_ascii_case(&mention) {
                c.score += opts.exact_mention_boost;
                boosted += 1;
            }
        }
        debug!(
            target: "answer_engine::rank",
            mention = %mention,
            boosted,
            "applied exact filename mention boost"
        );
    }

    // 2) Threshold filter with fallback to the head of the raw order.
    let mut surviving: Vec<ScoredCandidate> = raw
        .iter()
        .filter(|c| c.score >= opts.score_threshold)
        .cloned()
        .collect();
    if surviving.is_empty() {
        let take = opts.fallback_count.min(raw.len());
        warn!(
            target: "answer_engine::rank",
            take,
            threshold = opts.score_threshold,
            "all candidates below threshold; falling back to raw top-K head"
        );
        surviving = raw[..take].to_vec();
    }

    // 3) Document-frequency re-rank.
    let mut doc_counts: HashMap<&str, usize> = HashMap::new();
    for c in &surviving {
        *doc_counts.entry(c.doc.as_str()).or_insert(0) += 1;
    }

    let mut ranked: Vec<RankedCandidate> = surviving
        .iter()
        .map(|c| {
            let count = doc_counts[c.doc.as_str()];
            RankedCandidate {
                id: c.id.clone(),
                doc: c.doc.clone(),
                chunk_index: c.chunk_index,
                text: c.text.clone(),
                score: c.score,
                re_rank_score: c.score + opts.doc_frequency_boost * ((count - 1) as f32),
            }
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.re_rank_score
            .partial_cmp(&a.re_rank_score)
            .unwrap_or(Ordering::Equal)
    });
    ranked
}

/// First filename-like token in the question, if any.
///
/// Recognized document extensions: txt, text, md, markdown, pdf. When the
/// question names several files, only the first one governs the boost.
fn first_filename_mention(question: &str) -> Option<String> {
    let re = Regex::new(r"(?i)\b[\w\-]+\.(?:txt|text|md|markdown|pdf)\b").ok()?;
    re.find(question).map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(id: &str, doc: &str, score: f32) -> ScoredCandidate {
        ScoredCandidate {
            id: id.to_string(),
            doc: doc.to_string(),
            chunk_index: 0,
            text: format!("text of {id}"),
            score,
        }
    }

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn exact_mention_boost_rescues_borderline_candidate() {
        let raw = vec![
            candidate("a", "other.txt", 0.5),
            candidate("b", "simple.txt", 0.1), // below threshold before boost
        ];
        let opts = RankOptions::default();
        let ranked = rank("What does Simple.txt say about onboarding?", raw, &opts);

        let simple = ranked
            .iter()
            .find(|c| c.doc == "simple.txt")
            .expect("boosted candidate survives filtering");
        assert!(approx(simple.score, 0.7)); // 0.1 + 0.6, exactly the boost
    }

    #[test]
    fn only_first_filename_mention_governs() {
        let raw = vec![
            candidate("a", "first.txt", 0.3),
            candidate("b", "second.txt", 0.3),
        ];
        let ranked = rank(
            "compare first.txt and second.txt",
            raw,
            &RankOptions::default(),
        );

        let first = ranked.iter().find(|c| c.doc == "first.txt").unwrap();
        let second = ranked.iter().find(|c| c.doc == "second.txt").unwrap();
        assert!(approx(first.score, 0.9));
        assert!(approx(second.score, 0.3));
    }

    #[test]
    fn fallback_returns_head_of_raw_order() {
        let raw = vec![
            candidate("a", "a.txt", 0.05),
            candidate("b", "b.txt", 0.04),
            candidate("c", "c.txt", 0.03),
            candidate("d", "d.txt", 0.02),
        ];
        let ranked = rank("unrelated question", raw, &RankOptions::default());

        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0].id, "a");
        assert_eq!(ranked[1].id, "b");
        assert_eq!(ranked[2].id, "c");
    }

    #[test]
    fn doc_frequency_rerank_orders_by_adjusted_score() {
        let raw = vec![
            candidate("a1", "A", 0.5),
            candidate("a2", "A", 0.4),
            candidate("b1", "B", 0.45),
        ];
        let ranked = rank("no mention here", raw, &RankOptions::default());

        assert!(approx(ranked[0].re_rank_score, 0.52));
        assert!(approx(ranked[1].re_rank_score, 0.45));
        assert!(approx(ranked[2].re_rank_score, 0.42));
        assert_eq!(ranked[0].doc, "A");
        assert_eq!(ranked[1].doc, "B");
        assert_eq!(ranked[2].doc, "A");
    }

    #[test]
    fn reranking_ranked_output_is_stable() {
        let raw = vec![
            candidate("a1", "A", 0.5),
            candidate("a2", "A", 0.4),
            candidate("b1", "B", 0.45),
        ];
        let opts = RankOptions::default();
        let once = rank("no mention here", raw, &opts);

        let as_scored: Vec<ScoredCandidate> = once
            .iter()
            .map(|c| ScoredCandidate {
                id: c.id.clone(),
                doc: c.doc.clone(),
                chunk_index: c.chunk_index,
                text: c.text.clone(),
                score: c.score,
            })
            .collect();
        let twice = rank("no mention here", as_scored, &opts);

        let order_once: Vec<&str> = once.iter().map(|c| c.id.as_str()).collect();
        let order_twice: Vec<&str> = twice.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(order_once, order_twice);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(rank("anything", Vec::new(), &RankOptions::default()).is_empty());
    }
}
