//! Terminal formatting for decision entries.

use crate::decision::types::DecisionLogEntry;
use colored::Colorize;

/// Pretty-print a decision for terminal display.
pub fn format_entry(entry: &DecisionLogEntry) -> String {
    let timestamp = entry.created_at.format("%H:%M:%S").to_string();
    let confidence = format!("{:.2}", entry.confidence_score);
    let confidence = if entry.confidence_score >= 0.75 {
        confidence.green().to_string()
    } else if entry.confidence_score >= 0.4 {
        confidence.yellow().to_string()
    } else {
        confidence.red().to_string()
    };

    format!(
        "[{}] {} {} ({}) {}",
        timestamp.dimmed(),
        entry.decision_type.bold(),
        confidence,
        entry.message_id.cyan(),
        truncate(&entry.reasoning, 72)
    )
}

/// One-line rendering of the input factors, or `None` when there are none.
pub fn format_factors(entry: &DecisionLogEntry) -> Option<String> {
    match entry.input_factors {
        serde_json::Value::Null => None,
        serde_json::Value::Object(ref map) if map.is_empty() => None,
        ref factors => Some(truncate(&factors.to_string(), 72)),
    }
}

/// Shorten to at most `max` characters, marking the cut with "...".
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
