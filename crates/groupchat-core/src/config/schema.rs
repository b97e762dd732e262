//! Configuration schema — one settings block per provider.
//!
//! JSON on disk uses **camelCase** keys; Rust uses snake_case.
//! We use `#[serde(rename_all = "camelCase")]` to handle the conversion.
//!
//! Values left unset here fall back to per-provider defaults in the
//! provider registry (config > registry default), so a minimal setup
//! only needs the API keys from the environment.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────
// Environment variable names
// ─────────────────────────────────────────────

pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const DEEPSEEK_API_KEY: &str = "DEEPSEEK_API_KEY";
pub const AZURE_OPENAI_API_KEY: &str = "AZURE_OPENAI_API_KEY";
pub const AZURE_ENDPOINT_URL: &str = "ENDPOINT_URL";
pub const AZURE_DEPLOYMENT_NAME: &str = "DEPLOYMENT_NAME";
pub const ANTHROPIC_CLAUDE_API_KEY: &str = "ANTHROPIC_CLAUDE_API_KEY";

/// Behavioral instruction sent to every provider.
pub const DEFAULT_SYSTEM_PROMPT: &str =
    "You are a helpful assistant to provide accurate information as much as you can.";

// ─────────────────────────────────────────────
// Root Config
// ─────────────────────────────────────────────

/// Root configuration — loaded from `~/.groupchat/config.json` + env vars.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// System instruction shared by all providers.
    pub system_prompt: String,
    /// Per-request HTTP timeout, in seconds.
    pub timeout_secs: u64,
    pub providers: ProvidersConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            timeout_secs: 60,
            providers: ProvidersConfig::default(),
        }
    }
}

// ─────────────────────────────────────────────
// Providers
// ─────────────────────────────────────────────

/// All provider settings blocks.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProvidersConfig {
    pub chatgpt: OpenAiCompatSettings,
    pub deepseek: OpenAiCompatSettings,
    pub azure_openai: AzureSettings,
    pub claude: ClaudeSettings,
}

/// Settings for an OpenAI-compatible chat completions endpoint
/// (ChatGPT, DeepSeek).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OpenAiCompatSettings {
    /// API key for Bearer authentication.
    pub api_key: String,
    /// Custom API base URL (overrides the registry default).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
    /// Model identifier (overrides the registry default).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Token ceiling for the reply.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
}

impl OpenAiCompatSettings {
    /// Whether this provider has a configured API key.
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }
}

/// Settings for an Azure OpenAI deployment.
///
/// Azure needs three values where the others need one: the API key,
/// the resource endpoint, and the deployment name.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AzureSettings {
    pub api_key: String,
    /// Resource endpoint URL (e.g. `https://my-resource.openai.azure.com`).
    pub endpoint: String,
    /// Deployment name, doubles as the model identifier.
    pub deployment: String,
    pub api_version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency_penalty: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presence_penalty: Option<f64>,
}

impl Default for AzureSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            endpoint: String::new(),
            deployment: String::new(),
            api_version: "2025-01-01-preview".to_string(),
            max_tokens: None,
            temperature: None,
            top_p: None,
            frequency_penalty: None,
            presence_penalty: None,
        }
    }
}

impl AzureSettings {
    /// The first missing required value, named by its environment
    /// variable, or `None` when fully configured.
    pub fn missing_env(&self) -> Option<&'static str> {
        if self.api_key.is_empty() {
            Some(AZURE_OPENAI_API_KEY)
        } else if self.endpoint.is_empty() {
            Some(AZURE_ENDPOINT_URL)
        } else if self.deployment.is_empty() {
            Some(AZURE_DEPLOYMENT_NAME)
        } else {
            None
        }
    }

    pub fn is_configured(&self) -> bool {
        self.missing_env().is_none()
    }
}

/// Settings for the Anthropic Messages API.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClaudeSettings {
    pub api_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl ClaudeSettings {
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
