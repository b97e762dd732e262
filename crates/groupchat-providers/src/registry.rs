//! Provider registry — static specs for the four group-chat providers.
//!
//! Each [`ProviderSpec`] carries the mention prefix the router matches
//! on, the display name used in reply framing, and the wire defaults
//! applied when the corresponding config value is unset.
//!
//! [`build_routes`] turns loaded configuration into one route per
//! provider. A provider with missing configuration gets its route
//! built anyway, holding the reason instead of a client — a missing
//! DeepSeek credential must never block ChatGPT routing.

use thiserror::Error;

use groupchat_core::config::schema::{
    ANTHROPIC_CLAUDE_API_KEY, AZURE_OPENAI_API_KEY, DEEPSEEK_API_KEY, OPENAI_API_KEY,
};
use groupchat_core::config::Config;

use crate::anthropic::AnthropicProvider;
use crate::azure::AzureOpenAiProvider;
use crate::openai_compat::{OpenAiCompatProvider, TokenLimitField};
use crate::traits::ChatProvider;

// ─────────────────────────────────────────────
// ProviderSpec — static metadata for one provider
// ─────────────────────────────────────────────

/// Static specification describing one provider route.
#[derive(Clone, Debug)]
pub struct ProviderSpec {
    /// Internal name, also the transcript origin tag (e.g. `"deepseek"`).
    pub name: &'static str,
    /// Human-readable name for reply framing (e.g. `"Azure OpenAI"`).
    pub display_name: &'static str,
    /// Mention prefix including the trailing space (e.g. `"@deepseek "`).
    pub mention: &'static str,
    /// Default API base URL (`None` for Azure, whose endpoint is
    /// config-only).
    pub default_api_base: Option<&'static str>,
    /// Default model identifier (`None` for Azure, which addresses a
    /// deployment instead).
    pub default_model: Option<&'static str>,
    /// Default reply token ceiling.
    pub default_max_tokens: u32,
}

/// All four providers, in dispatch order.
pub static PROVIDERS: &[ProviderSpec] = &[
    ProviderSpec {
        name: "deepseek",
        display_name: "DeepSeek",
        mention: "@deepseek ",
        default_api_base: Some("https://api.deepseek.com/v1"),
        default_model: Some("deepseek-chat"),
        default_max_tokens: 1024,
    },
    ProviderSpec {
        name: "chatgpt",
        display_name: "ChatGPT",
        mention: "@chatgpt ",
        default_api_base: Some("https://api.openai.com/v1"),
        default_model: Some("gpt-5-nano"),
        default_max_tokens: 1024,
    },
    ProviderSpec {
        name: "azureopenai",
        display_name: "Azure OpenAI",
        mention: "@azureopenai ",
        default_api_base: None,
        default_model: None,
        default_max_tokens: 1638,
    },
    ProviderSpec {
        name: "claude",
        display_name: "Claude",
        mention: "@claude ",
        default_api_base: Some("https://api.anthropic.com"),
        default_model: Some("claude-haiku-4-5-20251001"),
        default_max_tokens: 1024,
    },
];

/// Find a provider spec by exact name.
pub fn find_by_name(name: &str) -> Option<&'static ProviderSpec> {
    PROVIDERS.iter().find(|spec| spec.name == name)
}

// ─────────────────────────────────────────────
// Route building
// ─────────────────────────────────────────────

/// A required configuration value is absent for one provider.
///
/// Scoped: this never aborts startup or disables other providers, it
/// only surfaces when the affected provider is addressed.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{provider} is not configured: set {env_key}")]
pub struct MissingConfiguration {
    pub provider: &'static str,
    pub env_key: &'static str,
}

/// One dispatchable route: a spec plus either a ready client or the
/// reason it could not be built.
pub struct Route {
    pub spec: &'static ProviderSpec,
    pub client: Result<Box<dyn ChatProvider>, MissingConfiguration>,
}

/// Build all routes from loaded configuration.
pub fn build_routes(config: &Config) -> Vec<Route> {
    PROVIDERS
        .iter()
        .map(|spec| Route {
            spec,
            client: build_client(spec, config),
        })
        .collect()
}

fn build_client(
    spec: &'static ProviderSpec,
    config: &Config,
) -> Result<Box<dyn ChatProvider>, MissingConfiguration> {
    let system_prompt = &config.system_prompt;
    let timeout = config.timeout_secs;

    match spec.name {
        "deepseek" => {
            let settings = &config.providers.deepseek;
            if !settings.is_configured() {
                return Err(MissingConfiguration {
                    provider: spec.display_name,
                    env_key: DEEPSEEK_API_KEY,
                });
            }
            Ok(Box::new(OpenAiCompatProvider::new(
                spec,
                settings,
                system_prompt,
                timeout,
                TokenLimitField::MaxTokens,
            )))
        }
        "chatgpt" => {
            let settings = &config.providers.chatgpt;
            if !settings.is_configured() {
                return Err(MissingConfiguration {
                    provider: spec.display_name,
                    env_key: OPENAI_API_KEY,
                });
            }
            Ok(Box::new(OpenAiCompatProvider::new(
                spec,
                settings,
                system_prompt,
                timeout,
                TokenLimitField::MaxCompletionTokens,
            )))
        }
        "azureopenai" => {
            let settings = &config.providers.azure_openai;
            if let Some(env_key) = settings.missing_env() {
                return Err(MissingConfiguration {
                    provider: spec.display_name,
                    env_key,
                });
            }
            Ok(Box::new(AzureOpenAiProvider::new(
                spec,
                settings,
                system_prompt,
                timeout,
            )))
        }
        "claude" => {
            let settings = &config.providers.claude;
            if !settings.is_configured() {
                return Err(MissingConfiguration {
                    provider: spec.display_name,
                    env_key: ANTHROPIC_CLAUDE_API_KEY,
                });
            }
            Ok(Box::new(AnthropicProvider::new(
                spec,
                settings,
                system_prompt,
                timeout,
            )))
        }
        other => unreachable!("unknown provider spec: {other}"),
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
