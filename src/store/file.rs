//! Local decision table — append-only JSONL file.
//!
//! One JSON object per line, written in insertion order and flushed after
//! every insert. Defaults to `~/.clearsight/decisions.jsonl`.

use crate::decision::logger::require_finite;
use crate::decision::types::{sort_newest_first, DecisionLogEntry, DecisionQuery, NewDecision};
use crate::store::{DecisionStore, StoreError};
use anyhow::Context;
use async_trait::async_trait;
use chrono::Utc;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

/// Append-only decision table stored as a JSONL file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    /// Held by inserts and selects so a read never sees a half-written line
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Create a store writing to a specific path.
    /// The file and its parent directory are created on first insert.
    pub fn with_path(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    /// Create a store at the default location (~/.clearsight/decisions.jsonl).
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self::with_path(Self::default_path()?))
    }

    /// Get the default table path.
    pub fn default_path() -> anyhow::Result<PathBuf> {
        let home = dirs::home_dir().context("Could not determine home directory")?;
        Ok(home.join(".clearsight").join("decisions.jsonl"))
    }

    /// Get the path to the table file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    /// Read every row in file order. A missing file is an empty table.
    async fn read_all(&self) -> Result<Vec<DecisionLogEntry>, StoreError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.io_error(e)),
        };

        content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| {
                serde_json::from_str(line).map_err(|source| StoreError::Corrupt {
                    path: self.path.clone(),
                    line: i + 1,
                    source,
                })
            })
            .collect()
    }
}

#[async_trait]
impl DecisionStore for FileStore {
    async fn insert(&self, row: &NewDecision) -> Result<(), StoreError> {
        // A non-finite score serializes as `null` and would poison every later read
        require_finite("confidence_score", row.confidence_score)?;
        let _guard = self.write_lock.lock().await;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| self.io_error(e))?;
            }
        }

        let entry = row.clone().into_entry(Utc::now());
        let mut line = serde_json::to_string(&entry)?;
        line.push('\n');

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| self.io_error(e))?;
        file.write_all(line.as_bytes())
            .await
            .map_err(|e| self.io_error(e))?;
        file.flush().await.map_err(|e| self.io_error(e))?;

        tracing::debug!(path = %self.path.display(), message_id = %row.message_id, "decision appended");
        Ok(())
    }

    async fn select(&self, query: &DecisionQuery) -> Result<Vec<DecisionLogEntry>, StoreError> {
        let rows = {
            let _guard = self.write_lock.lock().await;
            self.read_all().await?
        };
        let mut matched: Vec<DecisionLogEntry> =
            rows.into_iter().rev().filter(|e| query.matches(e)).collect();
        sort_newest_first(&mut matched);
        Ok(matched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn row(session_id: &str, message_id: &str) -> NewDecision {
        NewDecision {
            assistant_id: "asst".to_string(),
            session_id: session_id.to_string(),
            message_id: message_id.to_string(),
            decision_type: "tool_choice".to_string(),
            reasoning: "selected search tool".to_string(),
            confidence_score: 0.87,
            input_factors: json!({"candidates": 3}),
        }
    }

    fn query(session_id: &str, message_id: Option<&str>) -> DecisionQuery {
        DecisionQuery {
            assistant_id: "asst".to_string(),
            session_id: session_id.to_string(),
            message_id: message_id.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_write_and_read_back() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::with_path(tmp.path().join("nested/decisions.jsonl"));

        store.insert(&row("s1", "m1")).await.unwrap();

        let content = std::fs::read_to_string(store.path()).unwrap();
        let parsed: DecisionLogEntry = serde_json::from_str(content.trim()).unwrap();
        assert_eq!(parsed.message_id, "m1");
        assert_eq!(parsed.input_factors, json!({"candidates": 3}));

        let rows = store.select(&query("s1", Some("m1"))).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].confidence_score, 0.87);
    }

    #[tokio::test]
    async fn test_append_only() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::with_path(tmp.path().join("decisions.jsonl"));

        for i in 0..3 {
            store.insert(&row("s1", &format!("m{}", i))).await.unwrap();
        }

        let content = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(content.trim().lines().count(), 3);

        let rows = store.select(&query("s1", None)).await.unwrap();
        let ids: Vec<&str> = rows.iter().map(|e| e.message_id.as_str()).collect();
        assert_eq!(ids, vec!["m2", "m1", "m0"]);
    }

    #[tokio::test]
    async fn test_missing_file_is_empty_table() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::with_path(tmp.path().join("absent.jsonl"));
        assert!(store.select(&query("s1", None)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_other_sessions_filtered_out() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::with_path(tmp.path().join("decisions.jsonl"));
        store.insert(&row("s1", "m1")).await.unwrap();
        store.insert(&row("s2", "m1")).await.unwrap();

        let rows = store.select(&query("s1", None)).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].session_id, "s1");
    }

    #[tokio::test]
    async fn test_unbounded_scores_round_trip() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::with_path(tmp.path().join("decisions.jsonl"));

        for (i, score) in [-3.5, 0.0, 42.0, f64::MAX].into_iter().enumerate() {
            let mut decision = row("s1", &format!("m{}", i));
            decision.confidence_score = score;
            store.insert(&decision).await.unwrap();
        }

        let rows = store.select(&query("s1", None)).await.unwrap();
        let scores: Vec<f64> = rows.iter().map(|e| e.confidence_score).collect();
        assert_eq!(scores, vec![f64::MAX, 42.0, 0.0, -3.5]);
    }

    #[tokio::test]
    async fn test_non_finite_score_never_reaches_the_file() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::with_path(tmp.path().join("decisions.jsonl"));
        store.insert(&row("s2", "m1")).await.unwrap();

        for score in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let mut decision = row("s1", "m1");
            decision.confidence_score = score;
            let err = store.insert(&decision).await.unwrap_err();
            assert!(matches!(err, StoreError::InvalidInput { field: "confidence_score", .. }));
        }

        let content = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(content.trim().lines().count(), 1);
        assert_eq!(store.select(&query("s2", None)).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_selects_never_see_partial_rows() {
        let tmp = TempDir::new().unwrap();
        let store = std::sync::Arc::new(FileStore::with_path(tmp.path().join("decisions.jsonl")));
        let big = json!({"context": "x".repeat(256 * 1024)});

        let writer = {
            let store = store.clone();
            let big = big.clone();
            tokio::spawn(async move {
                for i in 0..8 {
                    let mut decision = row("s1", &format!("m{}", i));
                    decision.input_factors = big.clone();
                    store.insert(&decision).await.unwrap();
                }
            })
        };
        for _ in 0..32 {
            store.select(&query("s1", None)).await.unwrap();
            tokio::task::yield_now().await;
        }
        writer.await.unwrap();

        assert_eq!(store.select(&query("s1", None)).await.unwrap().len(), 8);
    }

    #[tokio::test]
    async fn test_corrupt_line_reports_line_number() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("decisions.jsonl");
        let store = FileStore::with_path(&path);
        store.insert(&row("s1", "m1")).await.unwrap();

        let mut content = std::fs::read_to_string(&path).unwrap();
        content.push_str("{not json\n");
        std::fs::write(&path, content).unwrap();

        match store.select(&query("s1", None)).await {
            Err(StoreError::Corrupt { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected corrupt row error, got {:?}", other),
        }
    }
}
