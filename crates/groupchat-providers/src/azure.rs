//! Azure OpenAI chat completions client.
//!
//! Azure differs from the flat-content providers in three ways: the
//! deployment name is part of the URL instead of the request body,
//! authentication uses an `api-key` header instead of a Bearer token,
//! and every message content is wrapped in `{type: "text"}` blocks.
//! The response still carries plain string content, so extraction is
//! shared with the flat schema.

use std::time::Duration;

use tracing::{debug, error};

use groupchat_core::config::schema::AzureSettings;
use groupchat_core::transcript::Turn;
use groupchat_core::utils::truncate_string;

use crate::registry::ProviderSpec;
use crate::traits::{ChatProvider, ProviderError};
use crate::wire::{block_messages, BlockChatRequest, ChatCompletionResponse};

const DEFAULT_TEMPERATURE: f64 = 0.7;
const DEFAULT_TOP_P: f64 = 0.95;

pub struct AzureOpenAiProvider {
    client: reqwest::Client,
    spec: &'static ProviderSpec,
    endpoint: String,
    deployment: String,
    api_version: String,
    api_key: String,
    system_prompt: String,
    max_tokens: u32,
    temperature: f64,
    top_p: f64,
    frequency_penalty: f64,
    presence_penalty: f64,
}

impl std::fmt::Debug for AzureOpenAiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AzureOpenAiProvider")
            .field("endpoint", &self.endpoint)
            .field("deployment", &self.deployment)
            .field("api_version", &self.api_version)
            .finish()
    }
}

impl AzureOpenAiProvider {
    pub fn new(
        spec: &'static ProviderSpec,
        settings: &AzureSettings,
        system_prompt: &str,
        timeout_secs: u64,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .expect("failed to build HTTP client");

        AzureOpenAiProvider {
            client,
            spec,
            endpoint: settings.endpoint.clone(),
            deployment: settings.deployment.clone(),
            api_version: settings.api_version.clone(),
            api_key: settings.api_key.clone(),
            system_prompt: system_prompt.to_string(),
            max_tokens: settings.max_tokens.unwrap_or(spec.default_max_tokens),
            temperature: settings.temperature.unwrap_or(DEFAULT_TEMPERATURE),
            top_p: settings.top_p.unwrap_or(DEFAULT_TOP_P),
            frequency_penalty: settings.frequency_penalty.unwrap_or(0.0),
            presence_penalty: settings.presence_penalty.unwrap_or(0.0),
        }
    }

    /// Build the deployment-scoped chat completions URL (without the
    /// `api-version` query parameter, which is attached per request).
    fn completions_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions",
            self.endpoint.trim_end_matches('/'),
            self.deployment
        )
    }
}

#[async_trait::async_trait]
impl ChatProvider for AzureOpenAiProvider {
    async fn complete(&self, transcript: &[Turn]) -> Result<String, ProviderError> {
        let request = BlockChatRequest {
            messages: block_messages(&self.system_prompt, transcript),
            max_tokens: self.max_tokens,
            temperature: Some(self.temperature),
            top_p: Some(self.top_p),
            frequency_penalty: Some(self.frequency_penalty),
            presence_penalty: Some(self.presence_penalty),
        };

        debug!(
            provider = self.spec.name,
            deployment = %self.deployment,
            turns = transcript.len(),
            "calling chat completions"
        );

        let response = self
            .client
            .post(self.completions_url())
            .query(&[("api-version", self.api_version.as_str())])
            .header("api-key", &self.api_key)
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
