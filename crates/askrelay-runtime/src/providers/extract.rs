//! Answer extraction from provider responses.
//!
//! Upstream response schemas drift between API versions, so each provider
//! owns an ordered list of extractors. Each extractor either recognizes
//! its shape and returns the answer, or returns `None`; the first match
//! wins. When nothing matches, the raw JSON is returned as text.

use serde_json::Value as JsonValue;

/// Pure function recognizing one response shape.
pub type Extractor = fn(&JsonValue) -> Option<String>;

/// Gemini shapes, tried in order.
pub const GEMINI_EXTRACTORS: &[Extractor] = &[
    candidates_output,
    outputs_content,
    top_level_output,
    top_level_text,
];

/// Hugging Face shapes, tried in order.
pub const HUGGINGFACE_EXTRACTORS: &[Extractor] = &[first_generated_text];

/// Apply extractors in order, falling back to the serialized JSON.
pub fn extract_or_raw(value: &JsonValue, extractors: &[Extractor]) -> String {
    extractors
        .iter()
        .find_map(|extract| extract(value))
        .unwrap_or_else(|| value.to_string())
}

/// Decode a success body. Bodies that are not JSON come back verbatim.
pub fn decode_answer(body: &str, extractors: &[Extractor]) -> String {
    match serde_json::from_str::<JsonValue>(body) {
        Ok(value) => extract_or_raw(&value, extractors),
        Err(_) => body.to_string(),
    }
}

/// Strings as-is, anything else as compact JSON.
fn as_text(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// `{"candidates": [{"output": "..."}]}`
fn candidates_output(value: &JsonValue) -> Option<String> {
    let first = value.get("candidates")?.as_array()?.first()?;
    let output = first.as_object()?.get("output")?.as_str()?;
    Some(output.trim().to_string())
}

/// `{"outputs": [{"content": [{"text": "..."}, ...] | "..."}]}`
fn outputs_content(value: &JsonValue) -> Option<String> {
    let first = value.get("outputs")?.as_array()?.first()?;
    let content = first.as_object()?.get("content")?;

    let text = match content {
        JsonValue::Array(parts) => parts
            .iter()
            .map(|part| match part {
                JsonValue::Object(fields) => fields.get("text").map(as_text).unwrap_or_default(),
                other => as_text(other),
            })
            .collect::<String>(),
        other => as_text(other),
    };

    Some(text.trim().to_string())
}

/// `{"output": "..."}`
fn top_level_output(value: &JsonValue) -> Option<String> {
    value
        .as_object()?
        .get("output")
        .map(|output| as_text(output).trim().to_string())
}

/// `{"text": "..."}`
fn top_level_text(value: &JsonValue) -> Option<String> {
    value
        .as_object()?
        .get("text")
        .map(|text| as_text(text).trim().to_string())
}

/// `[{"generated_text": "..."}]`
fn first_generated_text(value: &JsonValue) -> Option<String> {
    let first = value.as_array()?.first()?.as_object()?;
    first.get("generated_text").map(as_text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn gemini(value: JsonValue) -> String {
        extract_or_raw(&value, GEMINI_EXTRACTORS)
    }

    #[test]
    fn test_candidates_output() {
        assert_eq!(gemini(json!({"candidates": [{"output": " Paris\n"}]})), "Paris");
    }

    #[test]
    fn test_candidates_take_first() {
        let value = json!({"candidates": [{"output": "first"}, {"output": "second"}]});
        assert_eq!(gemini(value), "first");
    }

    #[test]
    fn test_candidate_without_output_falls_through() {
        let value = json!({"candidates": [{"safetyRatings": []}], "text": "from text"});
        assert_eq!(gemini(value), "from text");
    }

    #[test]
    fn test_null_candidate_output_falls_through() {
        let value = json!({"candidates": [{"output": null}], "text": "fallback"});
        assert_eq!(gemini(value), "fallback");
    }

    #[test]
    fn test_empty_candidates_fall_through() {
        let value = json!({"candidates": [], "output": "top level"});
        assert_eq!(gemini(value), "top level");
    }

    #[test]
    fn test_outputs_content_fragments_concatenated() {
        let value = json!({
            "outputs": [{"content": [{"text": "Par"}, {"text": "is"}, {"other": 1}, "!"]}]
        });
        assert_eq!(gemini(value), "Paris!");
    }

    #[test]
    fn test_outputs_content_plain_string() {
        let value = json!({"outputs": [{"content": "  Lyon  "}]});
        assert_eq!(gemini(value), "Lyon");
    }

    #[test]
    fn test_candidates_win_over_outputs() {
        let value = json!({
            "candidates": [{"output": "candidate"}],
            "outputs": [{"content": "outputs"}]
        });
        assert_eq!(gemini(value), "candidate");
    }

    #[test]
    fn test_output_wins_over_text() {
        let value = json!({"output": "out", "text": "txt"});
        assert_eq!(gemini(value), "out");
    }

    #[test]
    fn test_unrecognized_shape_returns_raw_json() {
        let value = json!({"unexpected": {"nested": true}});
        assert_eq!(gemini(value), r#"{"unexpected":{"nested":true}}"#);
    }

    #[test]
    fn test_non_object_returns_raw_json() {
        assert_eq!(gemini(json!([1, 2])), "[1,2]");
    }

    #[test]
    fn test_generated_text() {
        let value = json!([{"generated_text": "Paris"}]);
        assert_eq!(extract_or_raw(&value, HUGGINGFACE_EXTRACTORS), "Paris");
    }

    #[test]
    fn test_generated_text_missing_returns_raw_json() {
        let value = json!([{"score": 0.5}]);
        assert_eq!(
            extract_or_raw(&value, HUGGINGFACE_EXTRACTORS),
            r#"[{"score":0.5}]"#
        );
    }

    #[test]
    fn test_huggingface_error_object_returns_raw_json() {
        let value = json!({"estimated_time": 20.0});
        assert_eq!(
            extract_or_raw(&value, HUGGINGFACE_EXTRACTORS),
            r#"{"estimated_time":20.0}"#
        );
    }

    #[test]
    fn test_decode_answer_non_json_body() {
        assert_eq!(decode_answer("plain text answer", GEMINI_EXTRACTORS), "plain text answer");
    }

    #[test]
    fn test_decode_answer_json_body() {
        let body = r#"{"candidates":[{"output":"Paris"}]}"#;
        assert_eq!(decode_answer(body, GEMINI_EXTRACTORS), "Paris");
    }
}
