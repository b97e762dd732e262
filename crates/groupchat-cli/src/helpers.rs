//! Shared CLI helpers — banner and output framing.

use colored::Colorize;

use groupchat_providers::registry::PROVIDERS;

/// Frame a provider reply the way the session prints it.
pub fn format_reply(display_name: &str, text: &str) -> String {
    format!("[{}] >>>> {} <<<<", display_name, text)
}

/// Print a framed provider reply.
pub fn print_reply(display_name: &str, text: &str) {
    println!();
    println!("{}", format_reply(display_name, text).cyan());
    println!();
}

/// Print a routing/validation/provider error. The session continues.
pub fn print_error(message: &str) {
    println!();
    println!("{} {}", "Error:".red().bold(), message);
}

/// Print the banner shown at session start.
pub fn print_banner() {
    let version = env!("CARGO_PKG_VERSION");
    println!();
    println!(
        "{}  v{}",
        "Group chat".cyan().bold(),
        version.dimmed()
    );
    println!(
        "{}",
        "Talk with DeepSeek, ChatGPT, Azure OpenAI, and Claude in one conversation."
    );
    println!();
    for spec in PROVIDERS {
        println!(
            "  {:<15} {}",
            format!("{}<message>", spec.mention).bold(),
            format!("talk with {}", spec.display_name).dimmed()
        );
    }
    println!(
        "  {:<15} {}",
        "Q".bold(),
        "end the session".dimmed()
    );
    println!();
    println!("{}", "All providers share the same conversation context.".dimmed());
    println!();
}

/// Print the goodbye line on session end.
pub fn print_goodbye() {
    println!();
    println!("{}", "Goodbye! Chat session ended.".dimmed());
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
