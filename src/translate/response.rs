//! Translate completed backend responses into the Firebender envelope.
//!
//! Streamed responses never pass through here; the relay forwards those at
//! the chunk level.

use super::firebender_types::MessagesResponse;
use super::openai_types::ChatCompletionResponse;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Result of reshaping a backend payload. Payloads without choices (error
/// bodies, unexpected shapes) are returned unchanged rather than reshaped.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum TranslatedResponse {
    Translated(MessagesResponse),
    Passthrough(Value),
}

/// Translate a backend chat-completion payload into a Firebender response.
/// Pure function. The escape hatch: if `choices` is absent, not an array,
/// empty, or the payload otherwise fails to parse, the raw value is passed
/// through unmodified.
#[must_use]
pub fn openai_to_firebender(raw: Value, base_model: &str) -> TranslatedResponse {
    let has_choices = raw
        .get("choices")
        .and_then(Value::as_array)
        .is_some_and(|c| !c.is_empty());

    if !has_choices {
        return TranslatedResponse::Passthrough(raw);
    }

    let resp = match ChatCompletionResponse::deserialize(&raw) {
        Ok(r) => r,
        Err(e) => {
            tracing::debug!(error = %e, "Backend payload not a chat completion, passing through");
            return TranslatedResponse::Passthrough(raw);
        }
    };

    // Non-empty by the check above
    let content = resp
        .choices
        .first()
        .map(|c| c.message.content.clone())
        .unwrap_or_default();

    TranslatedResponse::Translated(MessagesResponse {
        id: resp.id,
        response_type: "chat.completion".to_string(),
        role: "assistant".to_string(),
        content,
        model: resp.model.unwrap_or_else(|| base_model.to_string()),
        created: resp.created,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_well_formed_response_translates() {
        let raw = json!({
            "id": "x",
            "model": "m",
            "created": 1,
            "choices": [{"message": {"content": "hello"}}]
        });

        let result = openai_to_firebender(raw, "gpt-4o");

        let expected = MessagesResponse {
            id: "x".to_string(),
            response_type: "chat.completion".to_string(),
            role: "assistant".to_string(),
            content: "hello".to_string(),
            model: "m".to_string(),
            created: 1,
        };
        assert_eq!(result, TranslatedResponse::Translated(expected));
    }

    #[test]
    fn test_translated_serialization_shape() {
        let raw = json!({
            "id": "x",
            "model": "m",
            "created": 1,
            "choices": [{"message": {"content": "hello"}}]
        });

        let result = openai_to_firebender(raw, "gpt-4o");
        let serialized = serde_json::to_value(&result).unwrap();

        assert_eq!(
            serialized,
            json!({
                "id": "x",
                "type": "chat.completion",
                "role": "assistant",
                "content": "hello",
                "model": "m",
                "created": 1
            })
        );
    }

    #[test]
    fn test_missing_choices_passes_through() {
        let raw = json!({"error": {"message": "boom", "type": "server_error"}});

        let result = openai_to_firebender(raw.clone(), "gpt-4o");
        assert_eq!(result, TranslatedResponse::Passthrough(raw));
    }

    #[test]
    fn test_empty_choices_passes_through() {
        let raw = json!({"id": "x", "choices": []});

        let result = openai_to_firebender(raw.clone(), "gpt-4o");
        assert_eq!(result, TranslatedResponse::Passthrough(raw));
    }

    #[test]
    fn test_missing_model_and_created_default() {
        let raw = json!({"id": "y", "choices": [{"message": {"content": "hi"}}]});

        match openai_to_firebender(raw, "gpt-4o") {
            TranslatedResponse::Translated(resp) => {
                assert_eq!(resp.model, "gpt-4o");
                assert_eq!(resp.created, 0);
                assert_eq!(resp.content, "hi");
            }
            TranslatedResponse::Passthrough(_) => panic!("expected translation"),
        }
    }

    #[test]
    fn test_non_object_payload_passes_through() {
        let raw = json!([1, 2, 3]);

        let result = openai_to_firebender(raw.clone(), "gpt-4o");
        assert_eq!(result, TranslatedResponse::Passthrough(raw));
    }
}
