//! Anthropic Messages API client.
//!
//! Claude does not take the system instruction inside the message
//! list; it travels as a top-level `system` field and the list holds
//! only user/assistant turns. Replies come back as content blocks
//! rather than completion choices.

use std::time::Duration;

use tracing::{debug, error};

use groupchat_core::config::schema::ClaudeSettings;
use groupchat_core::transcript::Turn;
use groupchat_core::utils::truncate_string;

use crate::registry::ProviderSpec;
use crate::traits::{ChatProvider, ProviderError};
use crate::wire::{plain_messages, MessagesRequest, MessagesResponse};

const ANTHROPIC_VERSION: &str = "2023-06-01";

pub struct AnthropicProvider {
    client: reqwest::Client,
    spec: &'static ProviderSpec,
    api_base: String,
    api_key: String,
    model: String,
    system_prompt: String,
    max_tokens: u32,
}

impl std::fmt::Debug for AnthropicProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnthropicProvider")
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .finish()
    }
}

impl AnthropicProvider {
    pub fn new(
        spec: &'static ProviderSpec,
        settings: &ClaudeSettings,
        system_prompt: &str,
        timeout_secs: u64,
    ) -> Self {
        let api_base = settings
            .api_base
            .clone()
            .or_else(|| spec.default_api_base.map(String::from))
            .unwrap_or_else(|| "https://api.anthropic.com".to_string());

        let model = settings
            .model
            .clone()
            .or_else(|| spec.default_model.map(String::from))
            .unwrap_or_default();

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .expect("failed to build HTTP client");

        AnthropicProvider {
            client,
            spec,
            api_base,
            api_key: settings.api_key.clone(),
            model,
            system_prompt: system_prompt.to_string(),
            max_tokens: settings.max_tokens.unwrap_or(spec.default_max_tokens),
        }
    }

    fn messages_url(&self) -> String {
        let base = self.api_base.trim_end_matches('/');
        format!("{}/v1/messages", base)
    }
}

#[async_trait::async_trait]
impl ChatProvider for AnthropicProvider {
    async fn complete(&self, transcript: &[Turn]) -> Result<String, ProviderError> {
        let request = MessagesRequest {
            model: self.model.clone(),
            system: self.system_prompt.clone(),
            max_tokens: self.max_tokens,
            messages: plain_messages(transcript),
        };

        debug!(
            provider = self.spec.name,
            model = %self.model,
            turns = transcript.len(),
            "calling messages API"
        );

        let response = self
            .client
            .post(self.messages_url())
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read error body".to_string());
            error!(
                provider = self.spec.name,
                status = %status,
                body = %truncate_string(&body, 200),
                "API error"
            );
            return Err(ProviderError::Status { status, body });
        }

        let parsed: MessagesResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;
        parsed.reply_text()
    }

    fn name(&self) -> &'static str {
        self.spec.name
    }

    fn display_name(&self) -> &'static str {
        self.spec.display_name
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::find_by_name;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn make_provider(api_base: Option<&str>) -> AnthropicProvider {
        let settings = ClaudeSettings {
            api_key: "sk-ant-key".to_string(),
            api_base: api_base.map(String::from),
            ..Default::default()
        };
        AnthropicProvider::new(
            find_by_name("claude").unwrap(),
            &settings,
            "You are a helpful assistant.",
            5,
        )
    }

    #[test]
    fn test_spec_defaults_applied() {
        let provider = make_provider(None);
        assert_eq!(provider.api_base, "https://api.anthropic.com");
        assert_eq!(provider.model, "claude-haiku-4-5-20251001");
        assert_eq!(provider.max_tokens, 1024);
        assert_eq!(provider.messages_url(), "https://api.anthropic.com/v1/messages");
    }

    #[tokio::test]
    async fn test_complete_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .and(header("x-api-key", "sk-ant-key"))
            .and(header("anthropic-version", "2023-06-01"))
            .and(body_partial_json(serde_json::json!({
                "model": "claude-haiku-4-5-20251001",
                "system": "You are a helpful assistant.",
                "max_tokens": 1024,
                "messages": [{ "role": "user", "content": "hi" }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "content": [{ "type": "text", "text": "hello from claude" }]
            })))
            .mount(&mock_server)
            .await;

        let provider = make_provider(Some(&mock_server.uri()));
        let reply = provider.complete(&[Turn::user("hi")]).await.unwrap();
        assert_eq!(reply, "hello from claude");
    }

    #[tokio::test]
    async fn test_system_never_in_message_list() {
        let mock_server = MockServer::start().await;

        // Matcher pins the full messages array: no system entry even
        // with a mixed multi-provider transcript.
        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .and(body_partial_json(serde_json::json!({
                "messages": [
                    { "role": "user", "content": "hi" },
                    { "role": "assistant", "content": "hello" },
                    { "role": "user", "content": "and you?" }
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "content": [{ "type": "text", "text": "fine" }]
            })))
            .mount(&mock_server)
            .await;

        let provider = make_provider(Some(&mock_server.uri()));
        let transcript = vec![
            Turn::user("hi"),
            Turn::assistant("hello", "chatgpt"),
            Turn::user("and you?"),
        ];
        let reply = provider.complete(&transcript).await.unwrap();
        assert_eq!(reply, "fine");
    }

    #[tokio::test]
    async fn test_complete_api_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .respond_with(ResponseTemplate::new(529).set_body_string("overloaded"))
            .mount(&mock_server)
            .await;

        let provider = make_provider(Some(&mock_server.uri()));
        let err = provider.complete(&[Turn::user("hi")]).await.unwrap_err();
        assert!(matches!(
            err,
            ProviderError::Status { status, .. } if status.as_u16() == 529
        ));
    }

    #[tokio::test]
    async fn test_complete_empty_content() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "content": [] })),
            )
            .mount(&mock_server)
            .await;

        let provider = make_provider(Some(&mock_server.uri()));
        let err = provider.complete(&[Turn::user("hi")]).await.unwrap_err();
        assert!(matches!(err, ProviderError::EmptyResponse));
    }
}
