//! The provider seam — one trait, four backends.

use async_trait::async_trait;
use thiserror::Error;

use groupchat_core::transcript::Turn;

/// What went wrong talking to a provider.
///
/// Transport failures, non-success statuses, and unreadable bodies all
/// end up here; the router treats every variant the same way (report,
/// roll back the pending user turn, keep the session alive). No retries.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The request never completed (DNS, connect, timeout, TLS).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("API returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// The body arrived but did not match the expected shape.
    #[error("could not parse response: {0}")]
    MalformedResponse(String),

    /// A well-formed body with no completion in it.
    #[error("response contained no completion")]
    EmptyResponse,
}

/// A chat-completion backend.
///
/// `complete` receives the full shared transcript — the newest user
/// message is already its last turn — renders it into this provider's
/// wire format, and returns the reply text.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    async fn complete(&self, transcript: &[Turn]) -> Result<String, ProviderError>;

    /// Internal name, also the transcript origin tag (e.g. `"deepseek"`).
    fn name(&self) -> &'static str;

    /// Human-readable name for reply framing and logs (e.g. `"DeepSeek"`).
    fn display_name(&self) -> &'static str;
}

impl std::fmt::Debug for dyn ChatProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatProvider")
            .field("name", &self.name())
            .finish()
    }
}
