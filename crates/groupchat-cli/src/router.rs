//! Command router — mention parsing, dispatch, and the transcript's
//! consistency guarantee.
//!
//! The router owns the shared transcript. Every user turn that stays
//! in it has a matching assistant reply: the user turn is appended
//! just before the provider call and rolled back if that call fails,
//! uniformly for all providers. Validation rejections (unknown
//! mention, empty payload, unconfigured provider) never touch the
//! transcript at all.

use thiserror::Error;
use tracing::{debug, warn};

use groupchat_core::transcript::{Transcript, Turn};
use groupchat_providers::registry::{MissingConfiguration, Route};
use groupchat_providers::traits::ProviderError;

/// Input line that ends the session.
pub const QUIT_SENTINEL: &str = "Q";

/// Why an input line produced no reply.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error(
        "please start your message with @deepseek, @chatgpt, @azureopenai, or @claude"
    )]
    UnrecognizedCommand,

    #[error("please provide a message after @{provider}")]
    MissingPayload { provider: &'static str },

    #[error(transparent)]
    NotConfigured(#[from] MissingConfiguration),

    #[error("error communicating with {provider}: {source}")]
    CallFailed {
        provider: &'static str,
        #[source]
        source: ProviderError,
    },
}

/// Result of routing one input line.
#[derive(Debug)]
pub enum RouterOutcome {
    /// The sentinel was read; end the session.
    Quit,
    /// A provider answered.
    Reply {
        display_name: &'static str,
        text: String,
    },
    /// The line was rejected; the transcript is unchanged.
    Rejected(RouteError),
}

/// Dispatches mention-prefixed lines to provider routes and records
/// the exchange in the shared transcript.
pub struct Router {
    routes: Vec<Route>,
    transcript: Transcript,
}

impl Router {
    pub fn new(routes: Vec<Route>) -> Self {
        Router {
            routes,
            transcript: Transcript::new(),
        }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Process one input line.
    pub async fn handle_line(&mut self, line: &str) -> RouterOutcome {
        if line == QUIT_SENTINEL {
            return RouterOutcome::Quit;
        }

        let Some(index) = self
            .routes
            .iter()
            .position(|route| line.starts_with(route.spec.mention))
        else {
            return RouterOutcome::Rejected(RouteError::UnrecognizedCommand);
        };

        let route = &self.routes[index];
        let payload = line[route.spec.mention.len()..].trim();
        if payload.is_empty() {
            return RouterOutcome::Rejected(RouteError::MissingPayload {
                provider: route.spec.name,
            });
        }

        let client = match &route.client {
            Ok(client) => client,
            Err(missing) => {
                return RouterOutcome::Rejected(RouteError::NotConfigured(missing.clone()));
            }
        };

        self.transcript.append(Turn::user(payload));
        debug!(provider = route.spec.name, "dispatching");

        match client.complete(self.transcript.snapshot()).await {
            Ok(text) => {
                self.transcript
                    .append(Turn::assistant(text.clone(), route.spec.name));
                RouterOutcome::Reply {
                    display_name: route.spec.display_name,
                    text,
                }
            }
            Err(source) => {
                // Drop the unanswered user turn so the shared context
                // stays reply-paired for every provider.
                self.transcript.rollback_last();
                warn!(provider = route.spec.name, error = %source, "provider call failed");
                RouterOutcome::Rejected(RouteError::CallFailed {
                    provider: route.spec.display_name,
                    source,
                })
            }
        }
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
