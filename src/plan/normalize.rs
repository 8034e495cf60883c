//! Pulls a JSON value out of unstructured model output.
//!
//! The model often wraps its answer in prose or code fences. Strategies are
//! tried in order; the first one that yields well-formed JSON wins:
//! 1. a fenced block tagged `json`,
//! 2. any fenced block,
//! 3. the first parseable brace-delimited value anywhere in the text,
//! 4. the whole text as-is.
//!
//! Strategy 3 anchors serde_json's own parser at each `{`, so nested
//! objects parse to their real closing brace instead of being truncated at
//! the first `}`.

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

use crate::error::AppError;

lazy_static! {
    static ref JSON_FENCE_RE: Regex = Regex::new(r"(?s)```json\s*\n(.*?)\n\s*```").unwrap();
    static ref ANY_FENCE_RE: Regex = Regex::new(r"(?s)```\s*\n(.*?)\n\s*```").unwrap();
}

/// Extracts the first well-formed JSON value from `raw`.
///
/// Callers on the generation path substitute a fallback value on
/// [`AppError::UnparseableResponse`] instead of surfacing it.
pub fn extract_json(raw: &str) -> Result<Value, AppError> {
    for re in [&*JSON_FENCE_RE, &*ANY_FENCE_RE] {
        if let Some(caps) = re.captures(raw) {
            if let Ok(value) = serde_json::from_str(caps[1].trim()) {
                return Ok(value);
            }
        }
    }

    for (offset, _) in raw.char_indices().filter(|(_, c)| *c == '{') {
        let mut stream = serde_json::Deserializer::from_str(&raw[offset..]).into_iter::<Value>();
        if let Some(Ok(value)) = stream.next() {
            return Ok(value);
        }
    }

    serde_json::from_str(raw.trim()).map_err(|_| AppError::UnparseableResponse)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_from_tagged_fence() {
        let raw = "Here you go:\n```json\n{\"calories\":500}\n```";
        let value = extract_json(raw).expect("extract");
        assert_eq!(value["calories"], 500);
    }

    #[test]
    fn extracts_from_untagged_fence() {
        let raw = "Sure!\n```\n{\"protein\": 42}\n```\nEnjoy.";
        let value = extract_json(raw).expect("extract");
        assert_eq!(value["protein"], 42);
    }

    #[test]
    fn prefers_tagged_fence_over_untagged() {
        let raw = "```\n{\"which\":\"plain\"}\n```\n```json\n{\"which\":\"tagged\"}\n```";
        let value = extract_json(raw).expect("extract");
        assert_eq!(value["which"], "tagged");
    }

    #[test]
    fn finds_nested_object_in_prose() {
        let raw = r#"The plan is {"totals": {"calories": 1470, "fat": 58}} as requested."#;
        let value = extract_json(raw).expect("extract");
        // nested braces survive; a non-greedy regex span would stop at the inner }
        assert_eq!(value["totals"]["calories"], 1470);
        assert_eq!(value["totals"]["fat"], 58);
    }

    #[test]
    fn skips_stray_brace_before_real_object() {
        let raw = r#"weird { not json. {"ok": true}"#;
        let value = extract_json(raw).expect("extract");
        assert_eq!(value["ok"], true);
    }

    #[test]
    fn parses_whole_text_when_bare_json() {
        let value = extract_json("  {\"fat\": 70}  ").expect("extract");
        assert_eq!(value["fat"], 70);
        let value = extract_json("[1, 2, 3]").expect("extract");
        assert_eq!(value[2], 3);
    }

    #[test]
    fn fails_on_text_without_json() {
        let err = extract_json("I could not generate a plan today, sorry.").unwrap_err();
        assert!(matches!(err, AppError::UnparseableResponse));
    }

    #[test]
    fn fence_with_broken_json_falls_through_to_brace_scan() {
        let raw = "```json\n{oops\n```\nbut also {\"salvaged\": 1}";
        let value = extract_json(raw).expect("extract");
        assert_eq!(value["salvaged"], 1);
    }
}
