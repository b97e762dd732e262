//! `groupchat status` — show configuration and provider readiness.

use anyhow::Result;
use colored::Colorize;

use groupchat_core::config::{get_config_path, load_config};
use groupchat_providers::registry::build_routes;

/// Run the status command.
pub fn run() -> Result<()> {
    let config = load_config(None);
    let config_path = get_config_path();

    println!();
    println!("{}", "Group chat status".cyan().bold());
    println!();

    let config_exists = config_path.exists();
    println!(
        "  {:<18} {} {}",
        "Config:".bold(),
        config_path.display(),
        if config_exists {
            "✓".green().to_string()
        } else {
            "(not found)".dimmed().to_string()
        }
    );
    println!(
        "  {:<18} {}s",
        "Timeout:".bold(),
        config.timeout_secs
    );

    println!();
    println!("  {}", "Providers:".bold());
    for route in build_routes(&config) {
        let status = match &route.client {
            Ok(_) => format!("{} (key set)", "✓".green()),
            Err(missing) => format!(
                "{} set {}",
                "·".dimmed(),
                missing.env_key.dimmed()
            ),
        };
        println!("    {:<15} {}", route.spec.display_name, status);
    }
    println!();

    Ok(())
}
