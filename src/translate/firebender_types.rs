//! Type definitions for the caller-facing Firebender message API.
//!
//! Defaulting happens here, at the deserialization boundary: optional fields
//! take their documented defaults when missing so downstream translation
//! never has to reason about absence.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Request types (what Firebender clients send TO us)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagesRequest {
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u64,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default)]
    pub stream: bool,
}

/// A single chat message. Roles are free-form strings: "user", "assistant",
/// "system" and anything else the caller supplies pass through verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    #[serde(default = "default_role")]
    pub role: String,
    #[serde(default)]
    pub content: String,
}

fn default_max_tokens() -> u64 {
    4097
}

fn default_temperature() -> f64 {
    0.7
}

fn default_role() -> String {
    "user".to_string()
}

// ---------------------------------------------------------------------------
// Response types (what we send BACK to Firebender clients)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MessagesResponse {
    pub id: String,
    #[serde(rename = "type")]
    pub response_type: String, // "chat.completion"
    pub role: String,          // "assistant"
    pub content: String,
    pub model: String,
    pub created: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_request_gets_defaults() {
        let req: MessagesRequest = serde_json::from_str(
            r#"{"messages":[{"role":"user","content":"hi"}]}"#,
        )
        .unwrap();

        assert_eq!(req.max_tokens, 4097);
        assert!((req.temperature - 0.7).abs() < f64::EPSILON);
        assert!(!req.stream);
        assert_eq!(req.model, "");
        assert_eq!(req.messages.len(), 1);
    }

    #[test]
    fn test_message_defaults() {
        let msg: ChatMessage = serde_json::from_str("{}").unwrap();
        assert_eq!(msg.role, "user");
        assert_eq!(msg.content, "");
    }

    #[test]
    fn test_custom_role_passes_through() {
        let msg: ChatMessage =
            serde_json::from_str(r#"{"role":"critic","content":"no"}"#).unwrap();
        assert_eq!(msg.role, "critic");
    }
}
