//! `clearsight init` — generate a starter config file.
//!
//! Creates a `.clearsight.yaml` in the current directory that records
//! decisions to a local JSONL table. Switch the `store:` block to `rest`
//! to use a remote table.

use crate::config::{starter_yaml, CONFIG_FILE_NAME};
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;

/// Run the `clearsight init` command.
pub fn run_init(assistant_id: Option<&str>, output_path: Option<&str>) -> Result<()> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let output_file = output_path
        .map(PathBuf::from)
        .unwrap_or_else(|| cwd.join(CONFIG_FILE_NAME));

    if output_file.exists() {
        println!(
            "{} A config file already exists at {}",
            "⚠".yellow(),
            output_file.display()
        );
        println!("  Edit it directly, or remove it and run init again.");
        return Ok(());
    }

    // Default the assistant to the directory name
    let assistant_id = assistant_id.map(str::to_string).unwrap_or_else(|| {
        cwd.file_name()
            .map(|n| n.to_string_lossy().to_string())
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| "assistant".to_string())
    });

    std::fs::write(&output_file, starter_yaml(&assistant_id))
        .with_context(|| format!("Failed to write config file: {}", output_file.display()))?;

    println!();
    println!(
        "  {} Created {}",
        "✓".green().bold(),
        output_file.display().to_string().bold()
    );
    println!("  Assistant: {}", assistant_id.cyan());
    println!();
    println!("  {} Next steps:", "→".blue());
    println!(
        "    1. Record a decision: {}",
        "clearsight record --message m1 --type tool_choice --reasoning \"...\" --confidence 0.9"
            .dimmed()
    );
    println!(
        "    2. Review decisions:  {}",
        "clearsight show --session <id>".dimmed()
    );
    println!();

    Ok(())
}
