//! Request/response types for the messages API.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single message in a conversation.
#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub role: &'static str,
    pub content: String,
}

/// Request body for the messages API.
#[derive(Debug, Serialize)]
pub struct MessagesRequest {
    pub model: String,
    pub max_tokens: u32,
    pub messages: Vec<Message>,
}

/// Response body from the messages API.
#[derive(Debug, Deserialize)]
pub struct MessagesResponse {
    pub content: Vec<ContentBlock>,
}

/// A content block in a response.
#[derive(Debug, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub block_type: String,
    #[serde(default)]
    pub text: String,
}

impl MessagesResponse {
    /// Concatenated text of all text blocks.
    #[must_use]
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter(|b| b.block_type == "text")
            .map(|b| b.text.as_str())
            .collect()
    }
}

/// A priced unit suggestion, parsed from model output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestedUnit {
    pub label: String,
    pub price: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_text_skips_non_text_blocks() {
        let json = r#"{
            "content": [
                {"type": "text", "text": "Fresh "},
                {"type": "tool_use"},
                {"type": "text", "text": "turmeric."}
            ]
        }"#;

        let response: MessagesResponse = serde_json::from_str(json).expect("parse");
        assert_eq!(response.text(), "Fresh turmeric.");
    }

    #[test]
    fn test_suggested_unit_parse() {
        let json = r#"[{"label": "5 kg bag", "price": "450.00"}]"#;
        let units: Vec<SuggestedUnit> = serde_json::from_str(json).expect("parse");
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].label, "5 kg bag");
    }
}
