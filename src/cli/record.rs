//! `clearsight record` — log one decision.

use crate::cli::GlobalOptions;
use anyhow::{Context, Result};
use colored::Colorize;

/// What to record.
#[derive(Debug, Clone)]
pub struct RecordOptions {
    pub message_id: String,
    pub decision_type: String,
    pub reasoning: String,
    pub confidence_score: f64,
    /// Raw JSON text for `input_factors`
    pub factors: Option<String>,
    /// Trace failures instead of reporting them
    pub best_effort: bool,
}

/// Run the `clearsight record` command.
pub async fn run_record(global: &GlobalOptions, options: RecordOptions) -> Result<()> {
    let input_factors = options
        .factors
        .as_deref()
        .map(|f| serde_json::from_str::<serde_json::Value>(f))
        .transpose()
        .context("--factors must be valid JSON")?;

    let logger = global.open_logger(false)?;

    if options.best_effort {
        logger
            .log_decision_best_effort(
                &options.message_id,
                &options.decision_type,
                &options.reasoning,
                options.confidence_score,
                input_factors,
            )
            .await;
    } else {
        logger
            .log_decision(
                &options.message_id,
                &options.decision_type,
                &options.reasoning,
                options.confidence_score,
                input_factors,
            )
            .await
            .context("Failed to record decision")?;
        println!(
            "  {} Recorded {} for message {}",
            "✓".green().bold(),
            options.decision_type.bold(),
            options.message_id.cyan()
        );
    }

    println!("  Session: {}", logger.context().session_id.dimmed());
    Ok(())
}
