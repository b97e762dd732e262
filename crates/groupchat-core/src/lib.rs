//! Core types for the groupchat CLI.
//!
//! - [`transcript`] — the shared conversation transcript that every
//!   provider sees, regardless of which provider produced a turn.
//! - [`config`] — configuration schema and loader (JSON file + env vars).
//! - [`utils`] — path helpers.

pub mod config;
pub mod transcript;
pub mod utils;

pub use transcript::{Role, Transcript, Turn};
