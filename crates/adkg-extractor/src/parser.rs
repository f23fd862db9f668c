//! Parse LLM output into triples

use crate::error::ExtractorError;
use adkg_domain::{RawTriple, Triple};
use serde_json::Value;
use tracing::warn;

/// Parse an LLM response into validated triples
///
/// Elements that are not objects with non-empty string `subject`,
/// `relation` and `object` are logged and dropped. The whole response is
/// rejected only when it is not a JSON array.
pub fn parse_llm_response(response: &str) -> Result<Vec<Triple>, ExtractorError> {
    // LLMs sometimes wrap JSON in markdown code blocks
    let json_str = extract_json(response);

    let json: Value = serde_json::from_str(json_str)?;
    let items = json
        .as_array()
        .ok_or_else(|| ExtractorError::InvalidFormat("Expected JSON array".to_string()))?;

    let mut triples = Vec::with_capacity(items.len());
    for (idx, item) in items.iter().enumerate() {
        match raw_triple(item).validate() {
            Ok(triple) => triples.push(triple),
            Err(e) => warn!("Dropping triple {}: {}", idx, e),
        }
    }

    Ok(triples)
}

/// Return the body of the first markdown code block, or the trimmed response
///
/// The fence may appear anywhere, after prose the model added. A language
/// tag on the opening fence (```` ```json ````) is skipped; a missing
/// closing fence takes the rest of the response.
fn extract_json(response: &str) -> &str {
    let Some(start) = response.find("```") else {
        return response.trim();
    };

    let after_fence = &response[start + 3..];
    // Skip the language tag up to the end of the opening line
    let body = match after_fence.find('\n') {
        Some(nl) if after_fence[..nl].chars().all(|c| c.is_ascii_alphanumeric()) => {
            &after_fence[nl + 1..]
        }
        _ => after_fence.strip_prefix("json").unwrap_or(after_fence),
    };

    match body.find("```") {
        Some(end) => body[..end].trim(),
        None => body.trim(),
    }
}

fn raw_triple(item: &Value) -> RawTriple {
    let field = |name: &str| item.get(name).and_then(Value::as_str).map(str::to_string);

    RawTriple {
        subject: field("subject"),
        relation: field("relation"),
        object: field("object"),
        evidence: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_json() {
        let response = r#"[
            {"subject": "APOE4 allele", "relation": "impairs", "object": "clearance of amyloid-beta"}
        ]"#;

        let triples = parse_llm_response(response).unwrap();
        assert_eq!(triples.len(), 1);
        assert_eq!(triples[0].subject, "APOE4 allele");
        assert_eq!(triples[0].relation, "impairs");
        assert_eq!(triples[0].object, "clearance of amyloid-beta");
        assert_eq!(triples[0].evidence, None);
    }

    #[test]
    fn test_parse_json_with_markdown_wrapper() {
        let response = "```json\n[{\"subject\": \"tau\", \"relation\": \"spreads to\", \"object\": \"cortex\"}]\n```";

        let triples = parse_llm_response(response).unwrap();
        assert_eq!(triples.len(), 1);
        assert_eq!(triples[0].subject, "tau");
    }

    #[test]
    fn test_fence_after_prose() {
        let response = "Here are the triples:\n```json\n[]\n```\nLet me know if you need more.";
        assert!(parse_llm_response(response).unwrap().is_empty());
    }

    #[test]
    fn test_fence_without_language() {
        assert_eq!(extract_json("```\n[1]\n```"), "[1]");
    }

    #[test]
    fn test_fence_on_one_line() {
        assert_eq!(extract_json("```json[]```"), "[]");
    }

    #[test]
    fn test_unclosed_fence() {
        assert_eq!(extract_json("```json\n[]\n"), "[]");
    }

    #[test]
    fn test_parse_empty_array() {
        assert!(parse_llm_response("[]").unwrap().is_empty());
    }

    #[test]
    fn test_parse_invalid_json() {
        let result = parse_llm_response("I could not find any triples.");
        assert!(matches!(result, Err(ExtractorError::InvalidFormat(_))));
    }

    #[test]
    fn test_parse_json_not_array() {
        let result = parse_llm_response(r#"{"subject": "APOE4"}"#);
        assert!(matches!(result, Err(ExtractorError::InvalidFormat(_))));
    }

    #[test]
    fn test_parse_partial_success() {
        let response = r#"[
            {"subject": "APOE4", "relation": "raises risk of", "object": "AD"},
            {"subject": "APOE4", "relation": "impairs"},
            {"subject": "", "relation": "binds", "object": "LRP1"},
            {"subject": "APOE4", "relation": 7, "object": "LRP1"},
            "not an object",
            {"subject": "amyloid-beta", "relation": "forms", "object": "plaques"}
        ]"#;

        let triples = parse_llm_response(response).unwrap();
        assert_eq!(triples.len(), 2);
        assert_eq!(triples[0].relation, "raises risk of");
        assert_eq!(triples[1].subject, "amyloid-beta");
    }
}
