//! Pulls generated text out of a chat-completion response.
//!
//! The response shape is not trusted. Each strategy looks for text in one known
//! shape; they run in order and the first hit wins. When nothing matches, the
//! whole response is rendered as JSON text instead of failing.

use serde_json::Value;
use tracing::{debug, warn};

type Strategy = fn(&Value) -> Option<String>;

const STRATEGIES: &[(&str, Strategy)] = &[
    ("message_content_text", message_content_text),
    ("message_content_object", message_content_object),
    ("choice_text", choice_text),
    ("output_text", output_text),
    ("raw_text", raw_text),
];

fn first_choice(response: &Value) -> Option<&Value> {
    response.get("choices")?.as_array()?.first()
}

fn message_content(response: &Value) -> Option<&Value> {
    first_choice(response)?.get("message")?.get("content")
}

/// `choices[0].message.content` holding plain text.
fn message_content_text(response: &Value) -> Option<String> {
    message_content(response)?
        .as_str()
        .filter(|text| !text.is_empty())
        .map(ToString::to_string)
}

/// `choices[0].message.content` holding an object with `text` or `parts`.
fn message_content_object(response: &Value) -> Option<String> {
    let content = message_content(response)?;
    let object = content.as_object()?;

    if let Some(text) = object.get("text").and_then(Value::as_str)
        && !text.is_empty()
    {
        return Some(text.to_string());
    }

    if let Some(parts) = object.get("parts").and_then(Value::as_array) {
        let joined = parts
            .iter()
            .filter_map(|part| {
                part.as_str()
                    .or_else(|| part.get("text").and_then(Value::as_str))
            })
            .collect::<Vec<_>>()
            .join(" ");
        if !joined.is_empty() {
            return Some(joined);
        }
    }

    Some(content.to_string())
}

/// Bare completion text on the choice itself.
fn choice_text(response: &Value) -> Option<String> {
    let choice = first_choice(response)?;
    ["text", "message_content"]
        .iter()
        .filter_map(|key| choice.get(*key).and_then(Value::as_str))
        .find(|text| !text.is_empty())
        .map(ToString::to_string)
}

/// Responses-API style `output_text` at the top level.
fn output_text(response: &Value) -> Option<String> {
    response
        .get("output_text")
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
        .map(ToString::to_string)
}

/// A body that was not JSON at all, kept as its raw text.
fn raw_text(response: &Value) -> Option<String> {
    response.as_str().map(ToString::to_string)
}

/// Extract the generated text, never failing.
#[must_use]
pub fn extract_text(response: &Value) -> String {
    for (name, strategy) in STRATEGIES {
        if let Some(text) = strategy(response) {
            debug!("Extracted response text using strategy {}", name);
            return text;
        }
    }

    warn!("Unrecognised response shape, rendering the whole response as text");
    response.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extracts_plain_message_content() {
        let response = json!({
            "choices": [{"message": {"role": "assistant", "content": "Hello there"}}]
        });
        assert_eq!(extract_text(&response), "Hello there");
    }

    #[test]
    fn test_extracts_text_field_of_content_object() {
        let response = json!({
            "choices": [{"message": {"content": {"text": "from text field"}}}]
        });
        assert_eq!(extract_text(&response), "from text field");
    }

    #[test]
    fn test_joins_content_parts() {
        let response = json!({
            "choices": [{"message": {"content": {"parts": ["one", {"text": "two"}, 3]}}}]
        });
        assert_eq!(extract_text(&response), "one two");
    }

    #[test]
    fn test_renders_unknown_content_object() {
        let response = json!({
            "choices": [{"message": {"content": {"weird": true}}}]
        });
        assert_eq!(extract_text(&response), r#"{"weird":true}"#);
    }

    #[test]
    fn test_falls_back_to_choice_text() {
        let response = json!({
            "choices": [{"message": {"content": null}, "text": "legacy completion"}]
        });
        assert_eq!(extract_text(&response), "legacy completion");
    }

    #[test]
    fn test_falls_back_to_output_text() {
        let response = json!({"output_text": "responses api"});
        assert_eq!(extract_text(&response), "responses api");
    }

    #[test]
    fn test_renders_whole_response_when_nothing_matches() {
        let response = json!({"choices": []});
        assert_eq!(extract_text(&response), r#"{"choices":[]}"#);

        let response = json!(42);
        assert_eq!(extract_text(&response), "42");
    }

    #[test]
    fn test_returns_non_json_body_verbatim() {
        let response = json!("Plain text summary, not JSON");
        assert_eq!(extract_text(&response), "Plain text summary, not JSON");
    }

    #[test]
    fn test_empty_message_content_falls_through_to_later_shapes() {
        let response = json!({
            "choices": [{"message": {"content": ""}, "text": "from choice text"}]
        });
        assert_eq!(extract_text(&response), "from choice text");

        let response = json!({
            "choices": [{"message": {"content": ""}}],
            "output_text": "from output text"
        });
        assert_eq!(extract_text(&response), "from output text");
    }

    #[test]
    fn test_plain_content_wins_over_later_shapes() {
        let response = json!({
            "choices": [{"message": {"content": "first"}, "text": "second"}],
            "output_text": "third"
        });
        assert_eq!(extract_text(&response), "first");
    }
}
