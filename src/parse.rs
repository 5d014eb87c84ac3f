//! Extracts a well-formed grouping structure from whatever text the
//! classifier returned. Responses are expected to be a bare JSON object but
//! routinely arrive wrapped in prose or markdown code fences, so extraction
//! runs in stages: strip fences, locate the first `{`, scan to its matching
//! `}`, strict-parse the candidate substring, then validate the structure.

use serde::Deserialize;
use thiserror::Error;

/// One proposed group as returned by the classifier: a title plus positional
/// indices into the prompt's item enumeration. Indices are kept as `i64` so a
/// hallucinated negative index is dropped during resolution instead of
/// failing the whole response.
#[derive(Debug, Clone, Deserialize)]
pub struct ProposedGroup {
    pub title: String,
    pub indices: Vec<i64>,
}

#[derive(Debug, Error)]
pub enum ClassificationParseError {
    #[error("no opening brace in classifier response")]
    NoOpeningBrace,
    #[error("unbalanced braces in classifier response")]
    UnbalancedBraces,
    #[error("classifier response is not valid JSON: {0}")]
    JsonParse(#[source] serde_json::Error),
    #[error("classifier response has no `groups` array")]
    MissingGroupsArray,
}

/// Parse an untrusted classifier response into proposed groups.
pub fn parse_grouping(raw: &str) -> Result<Vec<ProposedGroup>, ClassificationParseError> {
    let text = strip_code_fences(raw.trim());
    let candidate = extract_balanced_object(text)?;

    let value: serde_json::Value =
        serde_json::from_str(candidate).map_err(ClassificationParseError::JsonParse)?;

    // Only `groups` is accepted; the `group` spelling some models produce is
    // treated as a missing array and takes the fallback path.
    let groups = value
        .get("groups")
        .and_then(|g| g.as_array())
        .ok_or(ClassificationParseError::MissingGroupsArray)?;

    groups
        .iter()
        .map(|g| serde_json::from_value(g.clone()).map_err(ClassificationParseError::JsonParse))
        .collect()
}

/// Strip a single leading and trailing code-fence marker, tolerating an
/// optional language tag in any case ("```json", "```JSON", bare "```").
fn strip_code_fences(s: &str) -> &str {
    let mut t = s;
    if let Some(rest) = t.strip_prefix("```") {
        let rest = rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric());
        t = rest.trim_start();
    }
    if let Some(rest) = t.trim_end().strip_suffix("```") {
        t = rest.trim_end();
    }
    t
}

/// Return the substring from the first `{` to the `}` that balances it.
/// Nested objects must not terminate the scan early.
fn extract_balanced_object(text: &str) -> Result<&str, ClassificationParseError> {
    let start = text.find('{').ok_or(ClassificationParseError::NoOpeningBrace)?;

    let mut depth = 0usize;
    for (off, ch) in text[start..].char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(&text[start..=start + off]);
                }
            }
            _ => {}
        }
    }
    Err(ClassificationParseError::UnbalancedBraces)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_bare_json_object() {
        let groups =
            parse_grouping(r#"{"groups":[{"title":"A","indices":[0,2]}]}"#).unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].title, "A");
        assert_eq!(groups[0].indices, vec![0, 2]);
    }

    #[test]
    fn strips_fences_and_leading_prose() {
        let raw = "Sure! ```json\n{\"groups\":[{\"title\":\"A\",\"indices\":[0]}]}\n```";
        let groups = parse_grouping(raw).unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].title, "A");
        assert_eq!(groups[0].indices, vec![0]);
    }

    #[test]
    fn fence_language_tag_is_case_insensitive() {
        let raw = "```JSON\n{\"groups\":[]}\n```";
        assert!(parse_grouping(raw).unwrap().is_empty());
    }

    #[test]
    fn matches_the_balancing_brace_not_the_first_one() {
        let raw = concat!(
            "Here is the grouping you asked for:\n",
            r#"{"groups":[{"title":"{nested}","indices":[0]}]}"#,
            "\nLet me know if you need anything else."
        );
        let groups = parse_grouping(raw).unwrap();
        assert_eq!(groups[0].title, "{nested}");
    }

    #[test]
    fn trailing_prose_after_the_object_is_ignored() {
        let raw = r#"{"groups":[{"title":"A","indices":[1]}]} hope that helps!"#;
        assert_eq!(parse_grouping(raw).unwrap().len(), 1);
    }

    #[test]
    fn no_opening_brace_is_its_own_stage() {
        let err = parse_grouping("I could not group anything, sorry.").unwrap_err();
        assert!(matches!(err, ClassificationParseError::NoOpeningBrace));
    }

    #[test]
    fn unbalanced_braces_are_detected() {
        let err = parse_grouping(r#"{"groups":[{"title":"A","indices":[0]}]"#).unwrap_err();
        assert!(matches!(err, ClassificationParseError::UnbalancedBraces));
    }

    #[test]
    fn invalid_json_inside_balanced_braces_fails_parse() {
        let err = parse_grouping(r#"{"groups": [}"#).unwrap_err();
        assert!(matches!(err, ClassificationParseError::JsonParse(_)));
    }

    #[test]
    fn missing_groups_array_is_rejected() {
        let err = parse_grouping(r#"{"clusters":[]}"#).unwrap_err();
        assert!(matches!(err, ClassificationParseError::MissingGroupsArray));
    }

    #[test]
    fn alternate_group_key_is_unsupported() {
        let err =
            parse_grouping(r#"{"group":[{"title":"A","indices":[0]}]}"#).unwrap_err();
        assert!(matches!(err, ClassificationParseError::MissingGroupsArray));
    }

    #[test]
    fn groups_must_be_an_array() {
        let err = parse_grouping(r#"{"groups":"A"}"#).unwrap_err();
        assert!(matches!(err, ClassificationParseError::MissingGroupsArray));
    }

    #[test]
    fn negative_indices_survive_parsing() {
        let groups = parse_grouping(r#"{"groups":[{"title":"A","indices":[-1,0]}]}"#).unwrap();
        assert_eq!(groups[0].indices, vec![-1, 0]);
    }
}
