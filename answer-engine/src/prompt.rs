//! Prompt builder: contract instructions + indexed context block.

use crate::rank::RankedCandidate;

/// The only legitimate "no answer" output. The model produces this literal
/// itself when the context is insufficient; the pipeline never substitutes
/// it for a contract violation.
pub const REFUSAL_LITERAL: &str =
    r#"{"answer":"I don't know based on the provided documents.","sources":[]}"#;

/// System instructions committing the generator to the answer contract.
///
/// Keep this short and absolute: a single JSON object, exactly two required
/// fields, the fixed refusal when the context does not contain the answer,
/// and no prose outside the object.
pub const INSTRUCTION: &str = r#"You answer questions using ONLY the provided context.
Respond with a single valid JSON object of exactly this shape and nothing else:
{"answer": string, "sources": [{"doc": string, "chunkIndex": number, "score": number}]}
Each listed source must be a context block you actually used.
If the answer cannot be derived from the context, respond with exactly:
{"answer":"I don't know based on the provided documents.","sources":[]}
Do not output any prose, markdown, or code fences outside the JSON object."#;

/// The two prompt halves handed to the generation provider.
#[derive(Debug)]
pub struct Prompt {
    /// System message: the contract instructions.
    pub instruction: String,
    /// User message: indexed context blocks followed by the question.
    pub context: String,
}

/// Build the final prompt pair. Pure string construction, deterministic for
/// a given question and candidate list.
///
/// Each context entry renders as an indexed header naming its source
/// document and chunk index, followed by the chunk text, in ranked order.
pub fn build_prompt(question: &str, candidates: &[RankedCandidate]) -> Prompt {
    let mut out = String::new();

    if !candidates.is_empty() {
        out.push_str("Context:\n");
        for (i, c) in candidates.iter().enumerate() {
            out.push_str(&format!("==[{}]== {}#{}\n", i + 1, c.doc, c.chunk_index));
            out.push_str(c.text.trim());
            out.push_str("\n\n");
        }
    }

    out.push_str("Question:\n");
    out.push_str(question.trim());
    out.push('\n');

    Prompt {
        instruction: INSTRUCTION.to_string(),
        context: out,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranked(doc: &str, idx: u32, text: &str) -> RankedCandidate {
        RankedCandidate {
            id: format!("{doc}:{idx}"),
            doc: doc.to_string(),
            chunk_index: idx,
            text: text.to_string(),
            score: 0.5,
            re_rank_score: 0.5,
        }
    }

    #[test]
    fn context_blocks_are_indexed_in_ranked_order() {
        let cands = vec![ranked("a.txt", 0, "alpha"), ranked("b.md", 3, "beta")];
        let p = build_prompt("what is alpha?", &cands);

        let first = p.context.find("==[1]== a.txt#0").expect("first block");
        let second = p.context.find("==[2]== b.md#3").expect("second block");
        assert!(first < second);
        assert!(p.context.contains("alpha"));
        assert!(p.context.contains("Question:\nwhat is alpha?"));
    }

    #[test]
    fn instruction_pins_the_refusal_literal() {
        let p = build_prompt("q", &[]);
        assert!(p.instruction.contains(REFUSAL_LITERAL));
        assert!(!p.context.contains("Context:"));
    }

    #[test]
    fn build_is_deterministic() {
        let cands = vec![ranked("a.txt", 0, "alpha")];
        let p1 = build_prompt("q", &cands);
        let p2 = build_prompt("q", &cands);
        assert_eq!(p1.context, p2.context);
        assert_eq!(p1.instruction, p2.instruction);
    }
}
