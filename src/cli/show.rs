//! `clearsight show` — list the decisions of a session.
//!
//! Newest first, optionally narrowed to one message. `--json` prints the
//! raw rows for piping into other tools.

use crate::cli::GlobalOptions;
use crate::decision::format::{format_entry, format_factors};
use crate::decision::DecisionSummary;
use anyhow::{Context, Result};
use colored::Colorize;

/// Run the `clearsight show` command.
pub async fn run_show(
    global: &GlobalOptions,
    message_id: Option<&str>,
    limit: Option<usize>,
    json: bool,
    summary_only: bool,
) -> Result<()> {
    let logger = global.open_logger(true)?;
    let entries = logger
        .get_decision_logs(message_id)
        .await
        .context("Failed to read decisions")?;

    let shown = &entries[..limit.unwrap_or(entries.len()).min(entries.len())];

    if json {
        println!("{}", serde_json::to_string_pretty(shown)?);
        return Ok(());
    }

    let context = logger.context();
    if entries.is_empty() {
        println!();
        println!("  {} No decisions recorded for this session.", "ℹ".blue());
        println!(
            "  Assistant: {} | Session: {}",
            context.assistant_id.cyan(),
            context.session_id.cyan()
        );
        println!();
        return Ok(());
    }

    let summary = DecisionSummary::from_entries(&entries);

    if summary_only {
        println!();
        println!("  Session: {}", context.session_id.cyan());
        println!("  Assistant: {}", context.assistant_id);
        println!();
        println!("  {} decisions", summary.total.to_string().bold());
        for (decision_type, count) in &summary.by_type {
            println!("    {:<24} {}", decision_type, count);
        }
        if let Some(mean) = summary.mean_confidence {
            println!("  Mean confidence: {:.2}", mean);
        }
        if let (Some(oldest), Some(newest)) = (summary.oldest, summary.newest) {
            println!("  Span: {}", format_duration((newest - oldest).num_seconds()));
        }
        println!();
        return Ok(());
    }

    println!();
    println!(
        "  Session: {} | Assistant: {}",
        context.session_id.cyan(),
        context.assistant_id
    );
    println!();
    for entry in shown {
        println!("  {}", format_entry(entry));
        if let Some(factors) = format_factors(entry) {
            println!("      {}", factors.dimmed());
        }
    }
    println!();
    println!(
        "  {} {}",
        "─".repeat(40).dimmed(),
        summary.one_line().dimmed()
    );
    println!();

    Ok(())
}

fn format_duration(seconds: i64) -> String {
    if seconds < 60 {
        format!("{}s", seconds)
    } else if seconds < 3600 {
        format!("{}m {}s", seconds / 60, seconds % 60)
    } else {
        format!("{}h {}m", seconds / 3600, (seconds % 3600) / 60)
    }
}
