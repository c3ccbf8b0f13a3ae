//! Translate Firebender message requests into backend chat-completion requests.

use super::firebender_types::MessagesRequest;
use super::openai_types::{ChatCompletionRequest, ChatMessage};

/// Translate a Firebender request into the backend schema. Pure function:
/// the resolved model comes from the model table, everything else is a
/// field-by-field remap with message order preserved.
#[must_use]
pub fn firebender_to_openai(req: &MessagesRequest, resolved_model: &str) -> ChatCompletionRequest {
    let messages = req
        .messages
        .iter()
        .map(|m| ChatMessage {
            role: m.role.clone(),
            content: m.content.clone(),
        })
        .collect();

    ChatCompletionRequest {
        model: resolved_model.to_string(),
        messages,
        max_tokens: req.max_tokens,
        temperature: req.temperature,
        stream: req.stream,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_request_translates_with_defaults() {
        let req: MessagesRequest = serde_json::from_str(
            r#"{"messages":[{"role":"user","content":"hi"}]}"#,
        )
        .unwrap();

        let result = firebender_to_openai(&req, "gpt-4o");

        assert_eq!(result.model, "gpt-4o");
        assert_eq!(result.max_tokens, 4097);
        assert!((result.temperature - 0.7).abs() < f64::EPSILON);
        assert!(!result.stream);
        assert_eq!(result.messages.len(), 1);
        assert_eq!(result.messages[0].role, "user");
        assert_eq!(result.messages[0].content, "hi");
    }

    #[test]
    fn test_message_order_and_roles_preserved() {
        let req: MessagesRequest = serde_json::from_str(
            r#"{
                "model": "claude-3.5-sonnet",
                "messages": [
                    {"role": "system", "content": "be brief"},
                    {"role": "user", "content": "one"},
                    {"role": "assistant", "content": "two"},
                    {"role": "narrator", "content": "three"}
                ],
                "max_tokens": 10,
                "temperature": 0.1,
                "stream": true
            }"#,
        )
        .unwrap();

        let result = firebender_to_openai(&req, "claude-3-7-sonnet");

        assert_eq!(result.max_tokens, 10);
        assert!(result.stream);
        let roles: Vec<&str> = result.messages.iter().map(|m| m.role.as_str()).collect();
        assert_eq!(roles, vec!["system", "user", "assistant", "narrator"]);
        let contents: Vec<&str> = result.messages.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["be brief", "one", "two", "three"]);
    }

    #[test]
    fn test_message_missing_fields_defaulted() {
        let req: MessagesRequest =
            serde_json::from_str(r#"{"messages":[{},{"content":"x"}]}"#).unwrap();

        let result = firebender_to_openai(&req, "gpt-4o");

        assert_eq!(result.messages[0].role, "user");
        assert_eq!(result.messages[0].content, "");
        assert_eq!(result.messages[1].role, "user");
        assert_eq!(result.messages[1].content, "x");
    }
}
