//! groupchat CLI — entry point.
//!
//! # Commands
//!
//! - `groupchat [chat] [--logs]` — interactive group-chat session
//! - `groupchat status` — show configuration and provider readiness

mod helpers;
mod repl;
mod router;
mod status;

use anyhow::Result;
use clap::{Parser, Subcommand};

use groupchat_core::config::load_config;
use groupchat_providers::registry::build_routes;

use crate::router::Router;

// ─────────────────────────────────────────────
// CLI definition
// ─────────────────────────────────────────────

/// Talk with DeepSeek, ChatGPT, Azure OpenAI, and Claude in one shared conversation
#[derive(Parser)]
#[command(name = "groupchat", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive chat session (default)
    Chat {
        /// Enable debug logging
        #[arg(long, default_value_t = false)]
        logs: bool,
    },

    /// Show configuration and provider readiness
    Status,
}

// ─────────────────────────────────────────────
// Entrypoint
// ─────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Credentials may live in a local .env file.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Chat { logs: false }) {
        Commands::Chat { logs } => {
            init_logging(logs);
            run_chat().await
        }
        Commands::Status => status::run(),
    }
}

async fn run_chat() -> Result<()> {
    let config = load_config(None);
    let router = Router::new(build_routes(&config));
    repl::run(router).await
}

/// Initialize tracing/logging.
fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("groupchat=debug,info")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
