//! Strict parsing and validation of raw model output.
//!
//! Two-stage validation with a tagged result: text that is not JSON at all
//! is distinguished from JSON of the wrong shape, and neither is ever
//! silently coerced into a default answer. Both failure kinds keep enough
//! payload for the caller to surface a full diagnostic.

use serde_json::Value;
use thiserror::Error;

/// The only shape considered valid model output.
///
/// Additional fields on the model's object are ignored, not rejected, and
/// `sources` entries pass through without per-entry validation: the model is
/// trusted to follow the instruction for element shape.
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerObject {
    pub answer: String,
    pub sources: Vec<Value>,
}

/// Classification of contract failures.
#[derive(Debug, Error)]
pub enum ContractViolation {
    /// The trimmed output did not parse as JSON.
    #[error("model response is not valid JSON: {parse_error}")]
    NotJson { raw: String, parse_error: String },

    /// Parsed JSON that is not an object with a string `answer` and an
    /// array `sources`.
    #[error("model JSON does not match the required answer shape")]
    InvalidShape { parsed: Value },
}

/// Parse and validate raw model output against the answer contract.
///
/// Steps, in order:
/// 1. Trim whitespace; if the result is not parseable JSON, fail with
///    [`ContractViolation::NotJson`] carrying the raw text and parse error.
/// 2. If parsed but not an object, or `answer` is not a string, or
///    `sources` is not an array, fail with
///    [`ContractViolation::InvalidShape`] carrying the parsed value.
/// 3. Otherwise succeed.
pub fn parse_and_validate(raw_text: &str) -> Result<AnswerObject, ContractViolation> {
    let trimmed = raw_text.trim();

    let parsed: Value = match serde_json::from_str(trimmed) {
        Ok(v) => v,
        Err(e) => {
            return Err(ContractViolation::NotJson {
                raw: raw_text.to_string(),
                parse_error: e.to_string(),
            });
        }
    };

    let mut obj = match parsed {
        Value::Object(map) => map,
        other => return Err(ContractViolation::InvalidShape { parsed: other }),
    };

    match (obj.remove("answer"), obj.remove("sources")) {
        (Some(Value::String(answer)), Some(Value::Array(sources))) => {
            Ok(AnswerObject { answer, sources })
        }
        (answer, sources) => {
            // Restore removed fields so the diagnostic payload is complete.
            if let Some(a) = answer {
                obj.insert("answer".to_string(), a);
            }
            if let Some(s) = sources {
                obj.insert("sources".to_string(), s);
            }
            Err(ContractViolation::InvalidShape {
                parsed: Value::Object(obj),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::REFUSAL_LITERAL;
    use serde_json::json;

    #[test]
    fn plain_text_is_not_json() {
        let err = parse_and_validate("not json").unwrap_err();
        match err {
            ContractViolation::NotJson { raw, parse_error } => {
                assert_eq!(raw, "not json");
                assert!(!parse_error.is_empty());
            }
            other => panic!("expected NotJson, got {other:?}"),
        }
    }

    #[test]
    fn wrong_shape_is_invalid() {
        let err = parse_and_validate(r#"{"foo":1}"#).unwrap_err();
        match err {
            ContractViolation::InvalidShape { parsed } => {
                assert_eq!(parsed, json!({"foo": 1}));
            }
            other => panic!("expected InvalidShape, got {other:?}"),
        }
    }

    #[test]
    fn non_object_json_is_invalid_shape() {
        assert!(matches!(
            parse_and_validate("[1,2,3]"),
            Err(ContractViolation::InvalidShape { .. })
        ));
        assert!(matches!(
            parse_and_validate(r#""just a string""#),
            Err(ContractViolation::InvalidShape { .. })
        ));
    }

    #[test]
    fn invalid_shape_keeps_full_parsed_payload() {
        let err = parse_and_validate(r#"{"answer":42,"sources":[]}"#).unwrap_err();
        match err {
            ContractViolation::InvalidShape { parsed } => {
                assert_eq!(parsed, json!({"answer": 42, "sources": []}));
            }
            other => panic!("expected InvalidShape, got {other:?}"),
        }
    }

    #[test]
    fn minimal_valid_object_succeeds() {
        let obj = parse_and_validate(r#"{"answer":"x","sources":[]}"#).expect("valid");
        assert_eq!(obj.answer, "x");
        assert!(obj.sources.is_empty());
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let obj = parse_and_validate("  \n {\"answer\":\"x\",\"sources\":[]} \n").expect("valid");
        assert_eq!(obj.answer, "x");
    }

    #[test]
    fn extra_fields_are_ignored() {
        let obj = parse_and_validate(r#"{"answer":"x","sources":[],"confidence":0.9}"#)
            .expect("extra fields are not rejected");
        assert_eq!(obj.answer, "x");
    }

    #[test]
    fn source_entries_pass_through_unvalidated() {
        let obj = parse_and_validate(
            r#"{"answer":"x","sources":[{"doc":"a.txt","chunkIndex":0,"score":0.9},"loose entry"]}"#,
        )
        .expect("lenient on element shape");
        assert_eq!(obj.sources.len(), 2);
    }

    #[test]
    fn refusal_literal_is_valid_output() {
        let obj = parse_and_validate(REFUSAL_LITERAL).expect("refusal parses");
        assert_eq!(obj.answer, "I don't know based on the provided documents.");
        assert!(obj.sources.is_empty());
    }
}
