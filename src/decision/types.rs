//! Types for the decision log.
//!
//! One entry per decision an assistant makes while answering a message.
//! Entries are written once and never updated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// The (assistant, session) pair a logger is bound to.
/// Every read and write of a `DecisionLogger` is scoped to this pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundContext {
    pub assistant_id: String,
    pub session_id: String,
}

impl BoundContext {
    pub fn new(assistant_id: impl Into<String>, session_id: impl Into<String>) -> Self {
        Self {
            assistant_id: assistant_id.into(),
            session_id: session_id.into(),
        }
    }
}

/// A row as it is inserted. The store assigns `created_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewDecision {
    pub assistant_id: String,
    pub session_id: String,
    pub message_id: String,
    pub decision_type: String,
    pub reasoning: String,
    pub confidence_score: f64,
    pub input_factors: Value,
}

impl NewDecision {
    /// Stamp the row with its creation time, producing the stored entry.
    pub fn into_entry(self, created_at: DateTime<Utc>) -> DecisionLogEntry {
        DecisionLogEntry {
            assistant_id: self.assistant_id,
            session_id: self.session_id,
            message_id: self.message_id,
            decision_type: self.decision_type,
            reasoning: self.reasoning,
            confidence_score: self.confidence_score,
            input_factors: self.input_factors,
            created_at,
        }
    }
}

/// A single stored decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionLogEntry {
    /// Which assistant instance made the decision
    pub assistant_id: String,

    /// Conversation session the decision belongs to
    pub session_id: String,

    /// The message the decision relates to
    pub message_id: String,

    /// Category label (e.g., "tool_choice", "refusal", "clarification")
    pub decision_type: String,

    /// Free-text explanation of the decision
    pub reasoning: String,

    /// Confidence reported by the assistant. No bounds are enforced.
    pub confidence_score: f64,

    /// Whatever context influenced the decision
    #[serde(default = "empty_factors")]
    pub input_factors: Value,

    /// Assigned by the store; the ordering key for reads
    pub created_at: DateTime<Utc>,
}

/// Default value for `input_factors` when a caller supplies none.
pub fn empty_factors() -> Value {
    Value::Object(serde_json::Map::new())
}

/// Row filter for a select. Results are always newest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionQuery {
    pub assistant_id: String,
    pub session_id: String,
    pub message_id: Option<String>,
}

impl DecisionQuery {
    /// Query every entry of a bound context, optionally narrowed to one message.
    pub fn for_context(context: &BoundContext, message_id: Option<&str>) -> Self {
        Self {
            assistant_id: context.assistant_id.clone(),
            session_id: context.session_id.clone(),
            message_id: message_id.map(str::to_string),
        }
    }

    /// Exact match on every field the query constrains.
    pub fn matches(&self, entry: &DecisionLogEntry) -> bool {
        if entry.assistant_id != self.assistant_id || entry.session_id != self.session_id {
            return false;
        }
        match self.message_id {
            Some(ref message_id) => entry.message_id == *message_id,
            None => true,
        }
    }
}

/// Sort newest first. The sort is stable, so rows with equal timestamps keep
/// their relative order; callers pass rows newest-written first.
pub fn sort_newest_first(entries: &mut [DecisionLogEntry]) {
    entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

/// Summary statistics for a set of decisions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DecisionSummary {
    pub total: usize,
    pub by_type: BTreeMap<String, usize>,
    pub mean_confidence: Option<f64>,
    pub oldest: Option<DateTime<Utc>>,
    pub newest: Option<DateTime<Utc>>,
}

impl DecisionSummary {
    pub fn from_entries(entries: &[DecisionLogEntry]) -> Self {
        let mut summary = DecisionSummary {
            total: entries.len(),
            ..Default::default()
        };

        let mut confidence_sum = 0.0;
        for entry in entries {
            *summary.by_type.entry(entry.decision_type.clone()).or_default() += 1;
            confidence_sum += entry.confidence_score;
            summary.oldest = Some(match summary.oldest {
                Some(t) if t <= entry.created_at => t,
                _ => entry.created_at,
            });
            summary.newest = Some(match summary.newest {
                Some(t) if t >= entry.created_at => t,
                _ => entry.created_at,
            });
        }

        if !entries.is_empty() {
            summary.mean_confidence = Some(confidence_sum / entries.len() as f64);
        }

        summary
    }

    /// Format as a human-readable one-liner for terminal output.
    pub fn one_line(&self) -> String {
        let types = self
            .by_type
            .iter()
            .map(|(t, n)| format!("{} {}", n, t))
            .collect::<Vec<_>>()
            .join(", ");
        match self.mean_confidence {
            Some(mean) => format!(
                "{} decisions | {} | mean confidence {:.2}",
                self.total, types, mean
            ),
            None => "0 decisions".to_string(),
        }
    }
}
