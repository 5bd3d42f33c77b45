//! In-process decision table. Used by tests and `kind: memory` configs.

use crate::decision::types::{sort_newest_first, DecisionLogEntry, DecisionQuery, NewDecision};
use crate::store::{DecisionStore, StoreError};
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

/// Decision rows held in memory, in insertion order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: Mutex<Vec<DecisionLogEntry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the table with rows that already carry a `created_at`.
    pub fn with_rows(rows: Vec<DecisionLogEntry>) -> Self {
        Self {
            rows: Mutex::new(rows),
        }
    }

    /// Number of rows across every context.
    pub async fn len(&self) -> usize {
        self.rows.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.lock().await.is_empty()
    }
}

#[async_trait]
impl DecisionStore for MemoryStore {
    async fn insert(&self, row: &NewDecision) -> Result<(), StoreError> {
        let mut rows = self.rows.lock().await;
        rows.push(row.clone().into_entry(Utc::now()));
        Ok(())
    }

    async fn select(&self, query: &DecisionQuery) -> Result<Vec<DecisionLogEntry>, StoreError> {
        let rows = self.rows.lock().await;
        let mut matched: Vec<DecisionLogEntry> =
            rows.iter().rev().filter(|e| query.matches(e)).cloned().collect();
        sort_newest_first(&mut matched);
        Ok(matched)
    }
}
