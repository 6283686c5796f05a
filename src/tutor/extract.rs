//! Pull a JSON object out of a model reply and type it.
//!
//! Models sometimes wrap the requested JSON in conversational text
//! ("Sure! {...} Hope that helps!").  The candidate object is everything from
//! the first `{` to the last `}` inclusive.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::gemini::Schema;

use super::error::ErrorKind;

/// Characters of context shown on each side of a parse error position.
const SNIPPET_RADIUS: usize = 20;
/// Fallback snippet length when the error position cannot be located.
const SNIPPET_FALLBACK_LEN: usize = 50;

/// Locate the candidate JSON object inside `raw`.
///
/// # Errors
/// * [`ErrorKind::EmptyResponse`] — `raw` is empty or whitespace.
/// * [`ErrorKind::MalformedResponse`] — no `{`, no `}`, or the last `}` comes
///   before the first `{`.
///
/// ```rust
/// use fluent_flow::tutor::extract_json_object;
///
/// let raw = r#"Sure! {"scenario":"You order coffee at a cafe."} Hope that helps!"#;
/// assert_eq!(
///     extract_json_object(raw).unwrap(),
///     r#"{"scenario":"You order coffee at a cafe."}"#
/// );
/// ```
pub fn extract_json_object(raw: &str) -> Result<&str, ErrorKind> {
    if raw.trim().is_empty() {
        return Err(ErrorKind::EmptyResponse);
    }

    match (raw.find('{'), raw.rfind('}')) {
        (Some(first), Some(last)) if first < last => Ok(&raw[first..=last]),
        _ => Err(ErrorKind::MalformedResponse {
            raw: raw.to_string(),
        }),
    }
}

/// Extract and structurally parse the candidate object.
///
/// # Errors
/// Everything [`extract_json_object`] returns, plus [`ErrorKind::Parse`]
/// carrying the parser message and the offending snippet.
pub fn parse_json_object(raw: &str) -> Result<Value, ErrorKind> {
    let extracted = extract_json_object(raw)?;
    serde_json::from_str(extracted).map_err(|e| ErrorKind::Parse {
        message: e.to_string(),
        snippet: error_snippet(extracted, e.line(), e.column()),
        extracted: extracted.to_string(),
    })
}

/// Extract, parse, check required keys, then deserialize into `T`.
///
/// # Errors
/// Everything [`parse_json_object`] returns, plus
/// [`ErrorKind::SchemaMismatch`] when a key declared by `schema` is missing
/// or a field has the wrong JSON type.
pub fn parse_record<T: DeserializeOwned>(raw: &str, schema: &Schema) -> Result<T, ErrorKind> {
    let value = parse_json_object(raw)?;

    let missing = schema.missing_keys(&value);
    if !missing.is_empty() {
        return Err(ErrorKind::SchemaMismatch {
            message: format!("AI response is missing required field(s): {}", missing.join(", ")),
            missing,
        });
    }

    serde_json::from_value(value).map_err(|e| ErrorKind::SchemaMismatch {
        missing: Vec::new(),
        message: format!("AI response does not match the expected shape: {e}"),
    })
}

/// Text around a 1-based `line`/`column` position, or the head of `text`.
///
/// `column` counts bytes, as `serde_json` reports it.
fn error_snippet(text: &str, line: usize, column: usize) -> String {
    let around = line
        .checked_sub(1)
        .and_then(|idx| text.lines().nth(idx))
        .map(|l| {
            let mut byte = column.saturating_sub(1).min(l.len());
            while !l.is_char_boundary(byte) {
                byte -= 1;
            }
            let start = l[..byte].chars().count().saturating_sub(SNIPPET_RADIUS);
            l.chars().skip(start).take(2 * SNIPPET_RADIUS).collect::<String>()
        })
        .filter(|s| !s.trim().is_empty());

    around.unwrap_or_else(|| text.chars().take(SNIPPET_FALLBACK_LEN).collect())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Scenario {
        scenario: String,
    }

    fn scenario_schema() -> Schema {
        Schema::object([("scenario", Schema::string())])
    }

    // ---- extract_json_object -----------------------------------------------

    #[test]
    fn extracts_object_surrounded_by_prose() {
        let raw = "Here you go:\n{\"a\": {\"b\": [1, 2]}}\nLet me know!";
        assert_eq!(extract_json_object(raw).unwrap(), "{\"a\": {\"b\": [1, 2]}}");
    }

    #[test]
    fn bare_object_is_returned_whole() {
        let raw = "{\"scenario\":\"x\"}";
        assert_eq!(extract_json_object(raw).unwrap(), raw);
    }

    #[test]
    fn extraction_handles_multibyte_prose() {
        let raw = "¡Claro! {\"scenario\":\"Pides un café\"} ¡Suerte! ☕";
        assert_eq!(
            extract_json_object(raw).unwrap(),
            "{\"scenario\":\"Pides un café\"}"
        );
    }

    #[test]
    fn empty_reply_is_empty_response() {
        assert!(matches!(extract_json_object(""), Err(ErrorKind::EmptyResponse)));
        assert!(matches!(extract_json_object(" \n\t"), Err(ErrorKind::EmptyResponse)));
    }

    #[test]
    fn missing_open_brace_is_malformed() {
        assert!(matches!(
            extract_json_object("no json here }"),
            Err(ErrorKind::MalformedResponse { .. })
        ));
    }

    #[test]
    fn missing_close_brace_is_malformed() {
        assert!(matches!(
            extract_json_object("{ \"scenario\": \"cut off"),
            Err(ErrorKind::MalformedResponse { .. })
        ));
    }

    #[test]
    fn close_before_open_is_malformed() {
        let err = extract_json_object("} backwards {").unwrap_err();
        match err {
            ErrorKind::MalformedResponse { raw } => assert_eq!(raw, "} backwards {"),
            other => panic!("expected MalformedResponse, got {other:?}"),
        }
    }

    // ---- parse_json_object -------------------------------------------------

    #[test]
    fn invalid_json_is_parse_error_with_snippet() {
        let raw = "Result: {\"scenario\": \"ok\", \"broken\": } done";
        match parse_json_object(raw).unwrap_err() {
            ErrorKind::Parse {
                snippet, extracted, ..
            } => {
                assert_eq!(extracted, "{\"scenario\": \"ok\", \"broken\": }");
                assert!(!snippet.is_empty());
                assert!(extracted.contains(&snippet), "snippet {snippet:?} not in extracted");
            }
            other => panic!("expected Parse, got {other:?}"),
        }
    }

    #[test]
    fn two_objects_with_prose_between_is_parse_error() {
        let raw = "{\"a\":1} and also {\"b\":2}";
        assert!(matches!(parse_json_object(raw), Err(ErrorKind::Parse { .. })));
    }

    // ---- parse_record ------------------------------------------------------

    #[test]
    fn wrapped_scenario_parses_into_record() {
        let raw = r#"Sure! {"scenario":"You order coffee at a cafe."} Hope that helps!"#;
        let record: Scenario = parse_record(raw, &scenario_schema()).unwrap();
        assert_eq!(record.scenario, "You order coffee at a cafe.");
    }

    #[test]
    fn missing_required_key_is_schema_mismatch() {
        let raw = r#"{"situation":"At the bakery."}"#;
        match parse_record::<Scenario>(raw, &scenario_schema()).unwrap_err() {
            ErrorKind::SchemaMismatch { missing, message } => {
                assert_eq!(missing, vec!["scenario"]);
                assert!(message.contains("scenario"));
            }
            other => panic!("expected SchemaMismatch, got {other:?}"),
        }
    }

    #[test]
    fn wrong_field_type_is_schema_mismatch() {
        let raw = r#"{"scenario": 42}"#;
        match parse_record::<Scenario>(raw, &scenario_schema()).unwrap_err() {
            ErrorKind::SchemaMismatch { missing, .. } => assert!(missing.is_empty()),
            other => panic!("expected SchemaMismatch, got {other:?}"),
        }
    }

    #[test]
    fn extra_keys_are_tolerated() {
        let raw = r#"{"note":"extra","scenario":"At the station."}"#;
        let record: Scenario = parse_record(raw, &scenario_schema()).unwrap();
        assert_eq!(record.scenario, "At the station.");
    }

    // ---- error_snippet -----------------------------------------------------

    #[test]
    fn snippet_falls_back_to_head_of_text() {
        let text = "x".repeat(80);
        assert_eq!(error_snippet(&text, 0, 0).len(), SNIPPET_FALLBACK_LEN);
        assert_eq!(error_snippet(&text, 9, 1).len(), SNIPPET_FALLBACK_LEN);
    }

    #[test]
    fn snippet_column_is_byte_offset_in_multibyte_text() {
        let phrase = "今日はいい天気ですね。".repeat(4);
        let raw = format!(r#"{{"word": "{phrase}", "x": }}"#);
        match parse_json_object(&raw).unwrap_err() {
            ErrorKind::Parse { snippet, .. } => {
                assert!(snippet.contains(r#""x": }"#), "snippet {snippet:?}");
                assert!(!snippet.starts_with(r#"{"word""#), "snippet {snippet:?}");
            }
            other => panic!("expected Parse, got {other:?}"),
        }
    }

    #[test]
    fn snippet_column_inside_multibyte_char_rounds_down() {
        let text = "ab日本語cd";
        // Column 4 is byte 3, inside '日' (bytes 2..5).
        assert_eq!(error_snippet(text, 1, 4), text);
    }
}
