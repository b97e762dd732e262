//! OpenAI-compatible chat completions client.
//!
//! ChatGPT and DeepSeek speak the same flat-content schema over
//! `/chat/completions` with Bearer authentication; both routes are
//! instances of this one client with different specs. The only wire
//! difference between them is the name of the token-ceiling field.

use std::time::Duration;

use tracing::{debug, error};

use groupchat_core::config::schema::OpenAiCompatSettings;
use groupchat_core::transcript::Turn;
use groupchat_core::utils::truncate_string;

use crate::registry::ProviderSpec;
use crate::traits::{ChatProvider, ProviderError};
use crate::wire::{flat_messages, ChatCompletionRequest, ChatCompletionResponse};

/// Which request field carries the token ceiling.
#[derive(Clone, Copy, Debug)]
pub enum TokenLimitField {
    /// `max_tokens` — DeepSeek and most compatible endpoints.
    MaxTokens,
    /// `max_completion_tokens` — required by newer OpenAI models.
    MaxCompletionTokens,
}

/// A provider instance talking to one OpenAI-compatible endpoint.
pub struct OpenAiCompatProvider {
    /// HTTP client (shared, connection-pooled).
    client: reqwest::Client,
    spec: &'static ProviderSpec,
    api_base: String,
    api_key: String,
    model: String,
    system_prompt: String,
    token_field: TokenLimitField,
    max_tokens: u32,
    temperature: Option<f64>,
    top_p: Option<f64>,
}

impl std::fmt::Debug for OpenAiCompatProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiCompatProvider")
            .field("provider", &self.spec.name)
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .finish()
    }
}

impl OpenAiCompatProvider {
    /// Build a client from the static spec and loaded settings.
    ///
    /// Resolution order for base URL, model, and token ceiling:
    /// config value > spec default.
    pub fn new(
        spec: &'static ProviderSpec,
        settings: &OpenAiCompatSettings,
        system_prompt: &str,
        timeout_secs: u64,
        token_field: TokenLimitField,
    ) -> Self {
        let api_base = settings
            .api_base
            .clone()
            .or_else(|| spec.default_api_base.map(String::from))
            .unwrap_or_else(|| "https://api.openai.com/v1".to_string());

        let model = settings
            .model
            .clone()
            .or_else(|| spec.default_model.map(String::from))
            .unwrap_or_default();

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .expect("failed to build HTTP client");

        OpenAiCompatProvider {
            client,
            spec,
            api_base,
            api_key: settings.api_key.clone(),
            model,
            system_prompt: system_prompt.to_string(),
            token_field,
            max_tokens: settings.max_tokens.unwrap_or(spec.default_max_tokens),
            temperature: settings.temperature,
            top_p: settings.top_p,
        }
    }

    /// Build the full chat completions URL.
    fn completions_url(&self) -> String {
        let base = self.api_base.trim_end_matches('/');
        format!("{}/chat/completions", base)
    }
}

#[async_trait::async_trait]
impl ChatProvider for OpenAiCompatProvider {
    async fn complete(&self, transcript: &[Turn]) -> Result<String, ProviderError> {
        let messages = flat_messages(&self.system_prompt, transcript);

        let (max_tokens, max_completion_tokens) = match self.token_field {
            TokenLimitField::MaxTokens => (Some(self.max_tokens), None),
            TokenLimitField::MaxCompletionTokens => (None, Some(self.max_tokens)),
        };

        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages,
            max_tokens,
            max_completion_tokens,
            temperature: self.temperature,
            top_p: self.top_p,
        };

        debug!(
            provider = self.spec.name,
            model = %self.model,
            turns = transcript.len(),
            "calling chat completions"
        );

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
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

        let parsed: ChatCompletionResponse = response
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
