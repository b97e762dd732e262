//! Wire formats for the three provider request schemas.
//!
//! All four providers consume the same shared transcript; the
//! `*_messages` functions here relabel it into each provider's schema
//! without ever filtering by origin:
//!
//! - [`flat_messages`] — `{role, content: string}` with a leading
//!   synthetic system message (ChatGPT, DeepSeek)
//! - [`block_messages`] — same roles, every content wrapped as
//!   `[{type: "text", text}]`, system message included (Azure OpenAI)
//! - [`plain_messages`] — user/assistant turns only; the system
//!   instruction travels as a separate top-level field (Claude)

use serde::{Deserialize, Serialize};

use groupchat_core::transcript::Turn;

use crate::traits::ProviderError;

// ─────────────────────────────────────────────
// Flat-content schema (ChatGPT, DeepSeek)
// ─────────────────────────────────────────────

/// A `{role, content}` message with plain string content.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        ChatMessage {
            role: role.into(),
            content: content.into(),
        }
    }
}

/// Request body for an OpenAI-compatible chat completions API.
///
/// The token ceiling travels under different names per provider
/// (`max_tokens` for DeepSeek/Azure, `max_completion_tokens` for
/// newer OpenAI models), so both fields exist and the client sets
/// exactly one.
#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_completion_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
}

/// Chat completions response (flat and Azure schemas both answer in
/// this shape).
#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
pub struct AssistantMessage {
    pub content: Option<String>,
}

impl ChatCompletionResponse {
    /// Extract the first choice's message content.
    pub fn reply_text(self) -> Result<String, ProviderError> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(ProviderError::EmptyResponse)
    }
}

/// Render the shared transcript as flat messages, led by the system
/// instruction.
pub fn flat_messages(system_prompt: &str, transcript: &[Turn]) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(transcript.len() + 1);
    messages.push(ChatMessage::new("system", system_prompt));
    for turn in transcript {
        messages.push(ChatMessage::new(turn.role.as_str(), turn.content.clone()));
    }
    messages
}

// ─────────────────────────────────────────────
// Structured-content schema (Azure OpenAI)
// ─────────────────────────────────────────────

/// One part of a structured message content list.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum ContentBlock {
    #[serde(rename = "text")]
    Text { text: String },
}

/// A message whose content is a list of typed blocks.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct BlockMessage {
    pub role: String,
    pub content: Vec<ContentBlock>,
}

impl BlockMessage {
    pub fn text(role: impl Into<String>, text: impl Into<String>) -> Self {
        BlockMessage {
            role: role.into(),
            content: vec![ContentBlock::Text { text: text.into() }],
        }
    }
}

/// Request body for the Azure OpenAI chat completions API.
#[derive(Debug, Serialize)]
pub struct BlockChatRequest {
    pub messages: Vec<BlockMessage>,
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency_penalty: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presence_penalty: Option<f64>,
}

/// Render the shared transcript as block messages, system instruction
/// included as the first entry.
pub fn block_messages(system_prompt: &str, transcript: &[Turn]) -> Vec<BlockMessage> {
    let mut messages = Vec::with_capacity(transcript.len() + 1);
    messages.push(BlockMessage::text("system", system_prompt));
    for turn in transcript {
        messages.push(BlockMessage::text(turn.role.as_str(), turn.content.clone()));
    }
    messages
}

// ─────────────────────────────────────────────
// Messages API schema (Anthropic)
// ─────────────────────────────────────────────

/// Request body for the Anthropic Messages API. The system
/// instruction is a top-level field, not a message.
#[derive(Debug, Serialize)]
pub struct MessagesRequest {
    pub model: String,
    pub system: String,
    pub max_tokens: u32,
    pub messages: Vec<ChatMessage>,
}

/// Response from the Anthropic Messages API.
#[derive(Debug, Deserialize)]
pub struct MessagesResponse {
    pub content: Vec<ResponseBlock>,
}

/// A content block in a Messages API response. Non-text block types
/// deserialize with an empty `text` and are skipped during extraction.
#[derive(Debug, Deserialize)]
pub struct ResponseBlock {
    #[serde(rename = "type")]
    pub block_type: String,
    #[serde(default)]
    pub text: String,
}

impl MessagesResponse {
    /// Extract the first text block.
    pub fn reply_text(self) -> Result<String, ProviderError> {
        self.content
            .into_iter()
            .find(|block| block.block_type == "text")
            .map(|block| block.text)
            .ok_or(ProviderError::EmptyResponse)
    }
}

/// Render the shared transcript as user/assistant messages only.
pub fn plain_messages(transcript: &[Turn]) -> Vec<ChatMessage> {
    transcript
        .iter()
        .map(|turn| ChatMessage::new(turn.role.as_str(), turn.content.clone()))
        .collect()
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use groupchat_core::transcript::Turn;
    use serde_json::json;

    const SYSTEM: &str = "You are a helpful assistant.";

    fn shared_transcript() -> Vec<Turn> {
        vec![Turn::user("hi"), Turn::assistant("hello", "chatgpt")]
    }

    // ── Shaping: every schema reproduces the shared transcript ──

    #[test]
    fn test_flat_messages_lead_with_system() {
        let messages = flat_messages(SYSTEM, &shared_transcript());

        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0], ChatMessage::new("system", SYSTEM));
        assert_eq!(messages[1], ChatMessage::new("user", "hi"));
        assert_eq!(messages[2], ChatMessage::new("assistant", "hello"));
    }

    #[test]
    fn test_block_messages_wrap_every_content() {
        let messages = block_messages(SYSTEM, &shared_transcript());

        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].role, "system");
        assert_eq!(
            messages[0].content,
            vec![ContentBlock::Text {
                text: SYSTEM.to_string()
            }]
        );
        assert_eq!(messages[1].role, "user");
        assert_eq!(
            messages[1].content,
            vec![ContentBlock::Text {
                text: "hi".to_string()
            }]
        );
        assert_eq!(messages[2].role, "assistant");
        assert_eq!(
            messages[2].content,
            vec![ContentBlock::Text {
                text: "hello".to_string()
            }]
        );
    }

    #[test]
    fn test_plain_messages_carry_no_system() {
        let messages = plain_messages(&shared_transcript());

        assert_eq!(messages.len(), 2);
        assert!(messages.iter().all(|m| m.role != "system"));
        assert_eq!(messages[0], ChatMessage::new("user", "hi"));
        assert_eq!(messages[1], ChatMessage::new("assistant", "hello"));
    }

    #[test]
    fn test_shaping_never_filters_by_origin() {
        // A provider must see assistant turns other providers produced.
        let transcript = vec![
            Turn::user("first"),
            Turn::assistant("from claude", "claude"),
            Turn::user("second"),
            Turn::assistant("from deepseek", "deepseek"),
        ];

        assert_eq!(flat_messages(SYSTEM, &transcript).len(), 5);
        assert_eq!(block_messages(SYSTEM, &transcript).len(), 5);
        assert_eq!(plain_messages(&transcript).len(), 4);
    }

    // ── Serialization shapes ──

    #[test]
    fn test_flat_request_serialization() {
        let request = ChatCompletionRequest {
            model: "deepseek-chat".to_string(),
            messages: vec![ChatMessage::new("user", "hi")],
            max_tokens: Some(1024),
            max_completion_tokens: None,
            temperature: None,
            top_p: None,
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "deepseek-chat");
        assert_eq!(value["max_tokens"], 1024);
        assert_eq!(value["messages"][0]["content"], "hi");
        assert!(value.get("max_completion_tokens").is_none());
        assert!(value.get("temperature").is_none());
    }

    #[test]
    fn test_completion_tokens_field_serialization() {
        let request = ChatCompletionRequest {
            model: "gpt-5-nano".to_string(),
            messages: vec![],
            max_tokens: None,
            max_completion_tokens: Some(1024),
            temperature: None,
            top_p: None,
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["max_completion_tokens"], 1024);
        assert!(value.get("max_tokens").is_none());
    }

    #[test]
    fn test_block_request_serialization() {
        let request = BlockChatRequest {
            messages: block_messages(SYSTEM, &[Turn::user("hi")]),
            max_tokens: 1638,
            temperature: Some(0.7),
            top_p: Some(0.95),
            frequency_penalty: Some(0.0),
            presence_penalty: Some(0.0),
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["max_tokens"], 1638);
        assert_eq!(value["messages"][0]["content"][0]["type"], "text");
        assert_eq!(value["messages"][0]["content"][0]["text"], SYSTEM);
        assert_eq!(value["messages"][1]["content"][0]["text"], "hi");
    }

    #[test]
    fn test_messages_request_serialization() {
        let request = MessagesRequest {
            model: "claude-haiku-4-5-20251001".to_string(),
            system: SYSTEM.to_string(),
            max_tokens: 1024,
            messages: plain_messages(&[Turn::user("hi")]),
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["system"], SYSTEM);
        assert_eq!(value["messages"].as_array().unwrap().len(), 1);
        assert_eq!(value["messages"][0]["role"], "user");
    }

    // ── Reply extraction ──

    #[test]
    fn test_chat_reply_extraction() {
        let resp: ChatCompletionResponse = serde_json::from_value(json!({
            "choices": [{ "message": { "content": "4" } }]
        }))
        .unwrap();

        assert_eq!(resp.reply_text().unwrap(), "4");
    }

    #[test]
    fn test_chat_reply_empty_choices() {
        let resp: ChatCompletionResponse =
            serde_json::from_value(json!({ "choices": [] })).unwrap();

        assert!(matches!(
            resp.reply_text(),
            Err(ProviderError::EmptyResponse)
        ));
    }

    #[test]
    fn test_chat_reply_null_content() {
        let resp: ChatCompletionResponse = serde_json::from_value(json!({
            "choices": [{ "message": { "content": null } }]
        }))
        .unwrap();

        assert!(matches!(
            resp.reply_text(),
            Err(ProviderError::EmptyResponse)
        ));
    }

    #[test]
    fn test_messages_reply_extraction() {
        let resp: MessagesResponse = serde_json::from_value(json!({
            "content": [{ "type": "text", "text": "hello from claude" }]
        }))
        .unwrap();

        assert_eq!(resp.reply_text().unwrap(), "hello from claude");
    }

    #[test]
    fn test_messages_reply_skips_non_text_blocks() {
        let resp: MessagesResponse = serde_json::from_value(json!({
            "content": [
                { "type": "thinking", "thinking": "..." },
                { "type": "text", "text": "the answer" }
            ]
        }))
        .unwrap();

        assert_eq!(resp.reply_text().unwrap(), "the answer");
    }

    #[test]
    fn test_messages_reply_empty_content() {
        let resp: MessagesResponse =
            serde_json::from_value(json!({ "content": [] })).unwrap();

        assert!(matches!(
            resp.reply_text(),
            Err(ProviderError::EmptyResponse)
        ));
    }
}
