//! Decision panel: the bound session's decisions, newest first.

use crate::decision::format::{format_entry, format_factors};
use crate::decision::{BoundContext, DecisionLogEntry, DecisionLogger, DecisionSummary};
use crate::page::Panel;
use std::io::{self, Write};

/// A snapshot of decisions taken when the panel was loaded.
#[derive(Debug, Clone)]
pub struct DecisionPanel {
    context: BoundContext,
    message_id: Option<String>,
    entries: Vec<DecisionLogEntry>,
}

impl DecisionPanel {
    /// Load the panel through the logger. A failed read shows as an empty panel.
    pub async fn load(logger: &DecisionLogger, message_id: Option<&str>) -> Self {
        let entries = logger.decision_logs_or_empty(message_id).await;
        Self::from_entries(logger.context().clone(), message_id, entries)
    }

    pub fn from_entries(
        context: BoundContext,
        message_id: Option<&str>,
        entries: Vec<DecisionLogEntry>,
    ) -> Self {
        Self {
            context,
            message_id: message_id.map(str::to_string),
            entries,
        }
    }

    pub fn entries(&self) -> &[DecisionLogEntry] {
        &self.entries
    }
}

impl Panel for DecisionPanel {
    fn render(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(
            out,
            "  Assistant: {} | Session: {}",
            self.context.assistant_id, self.context.session_id
        )?;
        if let Some(ref message_id) = self.message_id {
            writeln!(out, "  Message:   {}", message_id)?;
        }
        writeln!(out)?;

        if self.entries.is_empty() {
            writeln!(out, "  No decisions recorded yet.")?;
            return Ok(());
        }

        for entry in &self.entries {
            writeln!(out, "  {}", format_entry(entry))?;
            if let Some(factors) = format_factors(entry) {
                writeln!(out, "      factors: {}", factors)?;
            }
        }

        writeln!(out)?;
        writeln!(
            out,
            "  {}",
            DecisionSummary::from_entries(&self.entries).one_line()
        )
    }
}
