//! Config loader — reads `~/.groupchat/config.json` and merges env vars.
//!
//! # Loading precedence
//! 1. Defaults (from `Config::default()`)
//! 2. JSON file at `~/.groupchat/config.json`
//! 3. Environment variables (override JSON)
//!
//! The env var names match the original deployment surface: one
//! credential variable per provider, plus the Azure endpoint and
//! deployment name. A missing variable leaves that provider
//! unconfigured without affecting the others.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::schema::{
    Config, ANTHROPIC_CLAUDE_API_KEY, AZURE_DEPLOYMENT_NAME, AZURE_ENDPOINT_URL,
    AZURE_OPENAI_API_KEY, DEEPSEEK_API_KEY, OPENAI_API_KEY,
};

/// Default config file path.
pub fn get_config_path() -> PathBuf {
    crate::utils::get_data_path().join("config.json")
}

/// Load configuration from the default path + env vars.
///
/// Falls back to `Config::default()` if the file doesn't exist or can't
/// be parsed — a broken config file never aborts the session.
pub fn load_config(path: Option<&Path>) -> Config {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);
    let config = load_config_from_path(&config_path);
    apply_env_from(config, |key| std::env::var(key).ok())
}

/// Load config from a specific file path, without env overrides.
fn load_config_from_path(path: &Path) -> Config {
    if !path.exists() {
        info!("No config file found at {}, using defaults", path.display());
        return Config::default();
    }

    debug!("Loading config from {}", path.display());

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to read config file {}: {}", path.display(), e);
            return Config::default();
        }
    };

    match serde_json::from_str(&content) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to parse config JSON: {}", e);
            Config::default()
        }
    }
}

/// Apply environment variable overrides on top of a loaded config.
///
/// The lookup is injected so tests can drive it from a map instead of
/// mutating process state.
pub fn apply_env_from(
    mut config: Config,
    lookup: impl Fn(&str) -> Option<String>,
) -> Config {
    if let Some(key) = lookup(OPENAI_API_KEY) {
        config.providers.chatgpt.api_key = key;
    }
    if let Some(key) = lookup(DEEPSEEK_API_KEY) {
        config.providers.deepseek.api_key = key;
    }
    if let Some(key) = lookup(AZURE_OPENAI_API_KEY) {
        config.providers.azure_openai.api_key = key;
    }
    if let Some(endpoint) = lookup(AZURE_ENDPOINT_URL) {
        config.providers.azure_openai.endpoint = endpoint;
    }
    if let Some(deployment) = lookup(AZURE_DEPLOYMENT_NAME) {
        config.providers.azure_openai.deployment = deployment;
    }
    if let Some(key) = lookup(ANTHROPIC_CLAUDE_API_KEY) {
        config.providers.claude.api_key = key;
    }
    config
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
