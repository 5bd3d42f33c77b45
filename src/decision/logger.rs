//! Decision logger — the read/write client bound to one assistant session.
//!
//! Every call is scoped to the `BoundContext` given at construction.
//! `log_decision` and `get_decision_logs` return explicit results; the
//! `*_best_effort` / `*_or_empty` wrappers absorb failures for callers that
//! must never be interrupted by audit logging.

use crate::decision::types::{empty_factors, BoundContext, DecisionLogEntry, DecisionQuery, NewDecision};
use crate::store::{DecisionStore, StoreError};
use serde_json::Value;
use std::sync::Arc;

/// Reads and writes decision rows for one (assistant, session) pair.
#[derive(Clone)]
pub struct DecisionLogger {
    context: BoundContext,
    store: Arc<dyn DecisionStore>,
}

impl DecisionLogger {
    pub fn new(context: BoundContext, store: Arc<dyn DecisionStore>) -> Self {
        Self { context, store }
    }

    /// The context every call is scoped to.
    pub fn context(&self) -> &BoundContext {
        &self.context
    }

    /// Record one decision. `input_factors` defaults to `{}`.
    pub async fn log_decision(
        &self,
        message_id: &str,
        decision_type: &str,
        reasoning: &str,
        confidence_score: f64,
        input_factors: Option<Value>,
    ) -> Result<(), StoreError> {
        require_text("message_id", message_id)?;
        require_text("decision_type", decision_type)?;
        require_text("reasoning", reasoning)?;
        require_finite("confidence_score", confidence_score)?;

        let row = NewDecision {
            assistant_id: self.context.assistant_id.clone(),
            session_id: self.context.session_id.clone(),
            message_id: message_id.to_string(),
            decision_type: decision_type.to_string(),
            reasoning: reasoning.to_string(),
            confidence_score,
            input_factors: input_factors.unwrap_or_else(empty_factors),
        };
        self.store.insert(&row).await
    }

    /// Decisions of the bound session, newest first, optionally for one message.
    pub async fn get_decision_logs(
        &self,
        message_id: Option<&str>,
    ) -> Result<Vec<DecisionLogEntry>, StoreError> {
        let query = DecisionQuery::for_context(&self.context, message_id);
        self.store.select(&query).await
    }

    /// Like `log_decision`, but a failure is only traced.
    pub async fn log_decision_best_effort(
        &self,
        message_id: &str,
        decision_type: &str,
        reasoning: &str,
        confidence_score: f64,
        input_factors: Option<Value>,
    ) {
        if let Err(e) = self
            .log_decision(message_id, decision_type, reasoning, confidence_score, input_factors)
            .await
        {
            tracing::warn!(
                error = %e,
                assistant_id = %self.context.assistant_id,
                session_id = %self.context.session_id,
                message_id,
                "Error logging decision"
            );
        }
    }

    /// Like `get_decision_logs`, but a failure reads as no decisions.
    pub async fn decision_logs_or_empty(&self, message_id: Option<&str>) -> Vec<DecisionLogEntry> {
        match self.get_decision_logs(message_id).await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    assistant_id = %self.context.assistant_id,
                    session_id = %self.context.session_id,
                    "Error fetching decision logs"
                );
                Vec::new()
            }
        }
    }
}

fn require_text(field: &'static str, value: &str) -> Result<(), StoreError> {
    if value.trim().is_empty() {
        return Err(StoreError::InvalidInput {
            field,
            reason: "must not be empty",
        });
    }
    Ok(())
}

/// JSON has no NaN or infinity; such a score would be stored as `null`.
pub(crate) fn require_finite(field: &'static str, value: f64) -> Result<(), StoreError> {
    if !value.is_finite() {
        return Err(StoreError::InvalidInput {
            field,
            reason: "must be a finite number",
        });
    }
    Ok(())
}
