//! Interactive session loop.
//!
//! Uses `rustyline` for readline-style editing with persistent
//! history. One line is fully processed — including the blocking
//! provider call — before the next is read; provider failures print
//! and return control to the prompt.

use anyhow::Result;
use rustyline::config::Configurer;
use rustyline::history::DefaultHistory;
use rustyline::{DefaultEditor, Editor};
use tracing::debug;

use crate::helpers;
use crate::router::{Router, RouterOutcome};

/// Run the interactive session until the sentinel is read.
pub async fn run(mut router: Router) -> Result<()> {
    helpers::print_banner();

    let mut editor = create_editor()?;

    loop {
        let input = match editor.readline("Your message: ") {
            Ok(line) => line,
            Err(rustyline::error::ReadlineError::Interrupted) => {
                // Ctrl-C — exit cleanly
                break;
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                // Ctrl-D — exit cleanly
                break;
            }
            Err(e) => {
                eprintln!("Input error: {e}");
                break;
            }
        };

        if input.trim().is_empty() {
            continue;
        }

        let _ = editor.add_history_entry(&input);

        match router.handle_line(&input).await {
            RouterOutcome::Quit => break,
            RouterOutcome::Reply { display_name, text } => {
                helpers::print_reply(display_name, &text);
            }
            RouterOutcome::Rejected(err) => {
                helpers::print_error(&err.to_string());
            }
        }
    }

    helpers::print_goodbye();
    save_history(&mut editor);

    Ok(())
}

/// Create a rustyline editor with history.
fn create_editor() -> Result<Editor<(), DefaultHistory>> {
    let mut editor = DefaultEditor::new()?;
    editor.set_max_history_size(1000)?;

    let history_path = history_path();
    if history_path.exists() {
        let _ = editor.load_history(&history_path);
        debug!("loaded session history from {}", history_path.display());
    }

    Ok(editor)
}

/// Save history to disk.
fn save_history(editor: &mut Editor<(), DefaultHistory>) {
    let path = history_path();
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    if let Err(e) = editor.save_history(&path) {
        debug!("failed to save history: {e}");
    }
}

/// Path to the history file.
fn history_path() -> std::path::PathBuf {
    groupchat_core::utils::get_data_path().join("history")
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
