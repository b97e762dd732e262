//! LLM provider layer for the groupchat CLI.
//!
//! Four providers, three wire formats:
//!
//! - [`openai_compat::OpenAiCompatProvider`] — flat-content chat
//!   completions (ChatGPT and DeepSeek are two instances of it)
//! - [`azure::AzureOpenAiProvider`] — chat completions with every
//!   message content wrapped in `{type: "text"}` blocks
//! - [`anthropic::AnthropicProvider`] — Messages API with a top-level
//!   `system` field
//!
//! [`registry`] holds the static spec table (mention prefix, display
//! name, defaults) and the builder that turns loaded configuration
//! into routes, recording a per-provider missing-configuration reason
//! instead of failing the whole startup.

pub mod anthropic;
pub mod azure;
pub mod openai_compat;
pub mod registry;
pub mod traits;
pub mod wire;

// Re-export main types for convenience
pub use registry::{build_routes, MissingConfiguration, ProviderSpec, Route, PROVIDERS};
pub use traits::{ChatProvider, ProviderError};
