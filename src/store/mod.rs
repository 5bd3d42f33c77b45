//! Decision table backends.
//!
//! A store is a table of decision rows that supports exactly two operations:
//! insert one row, and select rows by context (newest first). Nothing is
//! ever updated or deleted through this interface.

pub mod file;
pub mod memory;
pub mod rest;

use crate::decision::types::{DecisionLogEntry, DecisionQuery, NewDecision};
use async_trait::async_trait;
use std::path::PathBuf;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use rest::{RestStore, RestStoreConfig};

/// Trait for decision table backends.
/// Implementations can be a remote REST table, a local JSONL file, memory, etc.
#[async_trait]
pub trait DecisionStore: Send + Sync {
    /// Append one row. The store assigns `created_at`.
    async fn insert(&self, row: &NewDecision) -> Result<(), StoreError>;

    /// Rows matching `query`, ordered by `created_at` descending.
    async fn select(&self, query: &DecisionQuery) -> Result<Vec<DecisionLogEntry>, StoreError>;
}

/// A store operation failed.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Transport error talking to the remote table.
    #[error("HTTP error during {operation}: {source}")]
    Http {
        operation: &'static str,
        source: reqwest::Error,
    },
    /// The remote table answered with a non-2xx status.
    #[error("{operation} returned {status}: {body}")]
    Api {
        operation: &'static str,
        status: u16,
        body: String,
    },
    /// The remote table answered with rows we could not parse.
    #[error("failed to decode {operation} response: {source}")]
    Decode {
        operation: &'static str,
        source: reqwest::Error,
    },
    /// Local table file could not be read or written.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// A row could not be serialized.
    #[error("failed to serialize decision row: {0}")]
    Serialize(#[from] serde_json::Error),
    /// A stored line is not a valid decision row.
    #[error("corrupt decision row at line {line} of {}: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        line: usize,
        source: serde_json::Error,
    },
    /// A field value the table cannot hold.
    #[error("{field} {reason}")]
    InvalidInput {
        field: &'static str,
        reason: &'static str,
    },
    /// The store is misconfigured.
    #[error("store configuration error: {0}")]
    Config(String),
}
