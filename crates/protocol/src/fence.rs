//! Code-fence normalization.
//!
//! Models frequently wrap the JSON envelope in a markdown fence even when
//! told not to. Stripping happens once, before validation — the validator
//! and parser only ever see bare JSON candidates.

/// Strip a leading ```` ```json ```` / trailing ```` ``` ```` wrapper.
///
/// Both delimiters must be present for anything to be removed; surrounding
/// whitespace is trimmed either way. Idempotent: a bare envelope passes
/// through unchanged, and stripped output never re-qualifies for stripping.
pub fn strip_json_wrapper(raw: &str) -> &str {
    let trimmed = raw.trim();
    if let Some(rest) = trimmed.strip_prefix("```json")
        && let Some(inner) = rest.strip_suffix("```")
    {
        return inner.trim();
    }
    trimmed
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENVELOPE: &str = r#"{"Actions":[{"Action":"Clock","Action Input":""}]}"#;

    #[test]
    fn strips_fenced_envelope() {
        let fenced = format!("```json\n{ENVELOPE}\n```");
        assert_eq!(strip_json_wrapper(&fenced), ENVELOPE);
    }

    #[test]
    fn bare_envelope_passes_through() {
        assert_eq!(strip_json_wrapper(ENVELOPE), ENVELOPE);
    }

    #[test]
    fn stripping_is_idempotent() {
        let fenced = format!("```json\n{ENVELOPE}\n```");
        let once = strip_json_wrapper(&fenced);
        assert_eq!(strip_json_wrapper(once), once);
    }

    #[test]
    fn leading_fence_alone_is_left_intact() {
        let partial = format!("```json\n{ENVELOPE}");
        assert_eq!(strip_json_wrapper(&partial), partial.trim());
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let padded = format!("  \n```json\n{ENVELOPE}\n```  \n");
        assert_eq!(strip_json_wrapper(&padded), ENVELOPE);
    }
}
