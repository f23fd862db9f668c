//! Evidence module - provenance snippets attached to relation edges

/// Hard upper bound for evidence length, in characters
pub const MAX_EVIDENCE_LEN: usize = 250;

/// Default evidence length, in characters
pub const DEFAULT_EVIDENCE_LEN: usize = 180;

/// Placeholder evidence used when no source text is available
pub const NO_EVIDENCE: &str = "No evidence available";

/// Truncate evidence to at most `max_chars` characters
///
/// Counts Unicode scalar values, so a multi-byte character is never split.
///
/// # Examples
///
/// ```
/// use adkg_domain::truncate_evidence;
///
/// assert_eq!(truncate_evidence("amyloid-β", 8), "amyloid-");
/// assert_eq!(truncate_evidence("short", 180), "short");
/// ```
pub fn truncate_evidence(evidence: &str, max_chars: usize) -> String {
    match evidence.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => evidence[..byte_idx].to_string(),
        None => evidence.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncates_to_exact_length() {
        let long = "a".repeat(500);
        let truncated = truncate_evidence(&long, DEFAULT_EVIDENCE_LEN);
        assert_eq!(truncated.chars().count(), DEFAULT_EVIDENCE_LEN);
    }

    #[test]
    fn test_short_evidence_unchanged() {
        assert_eq!(truncate_evidence("APOE4 impairs clearance", 180), "APOE4 impairs clearance");
    }

    #[test]
    fn test_exact_length_unchanged() {
        let exact = "b".repeat(MAX_EVIDENCE_LEN);
        assert_eq!(truncate_evidence(&exact, MAX_EVIDENCE_LEN), exact);
    }

    #[test]
    fn test_multibyte_boundary() {
        let text = "β".repeat(10);
        let truncated = truncate_evidence(&text, 3);
        assert_eq!(truncated, "βββ");
    }

    #[test]
    fn test_zero_length() {
        assert_eq!(truncate_evidence("anything", 0), "");
    }
}
