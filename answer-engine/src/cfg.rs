//! Runtime configuration for the ask pipeline, loaded from environment
//! variables with documented defaults.

use crate::rank::RankOptions;

/// Knobs for one ask pipeline. All fields have defaults via [`Default`] and
/// [`AskOptions::from_env`].
#[derive(Debug, Clone)]
pub struct AskOptions {
    /// Retrieval breadth: how many raw candidates to pull from the store.
    pub top_k: usize,
    /// Maximum question length in characters (after trimming).
    pub max_question_chars: usize,
    /// Ranking knobs applied to the raw top-K.
    pub rank: RankOptions,
}

impl Default for AskOptions {
    fn default() -> Self {
        Self {
            top_k: 5,
            max_question_chars: 2000,
            rank: RankOptions::default(),
        }
    }
}

impl AskOptions {
    /// Build from environment variables with sensible defaults.
    ///
    /// Recognized vars: `TOP_K` (5), `MAX_QUESTION_CHARS` (2000),
    /// `SCORE_THRESHOLD` (0.20), `EXACT_MENTION_BOOST` (0.6),
    /// `DOC_FREQUENCY_BOOST` (0.02), `FALLBACK_COUNT` (3).
    pub fn from_env() -> Self {
        Self {
            top_k: parse("TOP_K", 5usize),
            max_question_chars: parse("MAX_QUESTION_CHARS", 2000usize),
            rank: RankOptions {
                score_threshold: parse("SCORE_THRESHOLD", 0.20f32),
                exact_mention_boost: parse("EXACT_MENTION_BOOST", 0.6f32),
                doc_frequency_boost: parse("DOC_FREQUENCY_BOOST", 0.02f32),
                fallback_count: parse("FALLBACK_COUNT", 3usize),
            },
        }
    }
}

fn parse<T: std::str::FromStr>(k: &str, dflt: T) -> T {
    std::env::var(k)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(dflt)
}
