//! Remote decision table over a PostgREST-style HTTP API.
//!
//! Inserts go to `POST {url}/rest/v1/{table}`; selects use
//! `GET {url}/rest/v1/{table}?assistant_id=eq.…&session_id=eq.…&order=created_at.desc`.
//! The server assigns `created_at`. No retries: one request per call.

use crate::decision::types::{DecisionLogEntry, DecisionQuery, NewDecision};
use crate::store::{DecisionStore, StoreError};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use std::time::Duration;

/// Default table name for decision rows.
pub const DEFAULT_TABLE: &str = "ai_decision_logs";

/// Connection settings for a REST decision table.
#[derive(Debug, Clone)]
pub struct RestStoreConfig {
    /// Project URL (e.g., `https://project.example.co`)
    pub base_url: String,
    /// API key, sent both as `apikey` and as a bearer token
    pub api_key: String,
    /// Table holding decision rows
    pub table: String,
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
}

impl RestStoreConfig {
    /// Create a configuration with the default table and timeout.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            table: DEFAULT_TABLE.to_string(),
            timeout_secs: 30,
        }
    }
}

/// HTTP client for a remote decision table.
#[derive(Debug, Clone)]
pub struct RestStore {
    client: reqwest::Client,
    table_url: String,
}

impl RestStore {
    pub fn new(config: RestStoreConfig) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers({
                let mut headers = HeaderMap::new();
                let key = HeaderValue::from_str(&config.api_key)
                    .map_err(|_| StoreError::Config("invalid API key characters".into()))?;
                let bearer = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
                    .map_err(|_| StoreError::Config("invalid API key characters".into()))?;
                headers.insert("apikey", key);
                headers.insert(AUTHORIZATION, bearer);
                headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
                headers
            })
            .build()
            .map_err(|e| StoreError::Http {
                operation: "client_init",
                source: e,
            })?;

        let table_url = format!(
            "{}/rest/v1/{}",
            config.base_url.trim_end_matches('/'),
            config.table
        );
        Ok(Self { client, table_url })
    }

    /// Full URL of the decision table endpoint.
    pub fn table_url(&self) -> &str {
        &self.table_url
    }

    /// Send a request and turn transport failures and non-2xx statuses into errors.
    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        operation: &'static str,
    ) -> Result<reqwest::Response, StoreError> {
        let resp = request
            .send()
            .await
            .map_err(|source| StoreError::Http { operation, source })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(StoreError::Api {
                operation,
                status: status.as_u16(),
                body,
            });
        }

        Ok(resp)
    }
}

/// PostgREST filter parameters for a query.
fn query_params(query: &DecisionQuery) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("select", "*".to_string()),
        ("assistant_id", format!("eq.{}", query.assistant_id)),
        ("session_id", format!("eq.{}", query.session_id)),
    ];
    if let Some(ref message_id) = query.message_id {
        params.push(("message_id", format!("eq.{}", message_id)));
    }
    params.push(("order", "created_at.desc".to_string()));
    params
}

#[async_trait]
impl DecisionStore for RestStore {
    async fn insert(&self, row: &NewDecision) -> Result<(), StoreError> {
        let request = self
            .client
            .post(&self.table_url)
            .header("Prefer", "return=minimal")
            .json(row);
        self.send(request, "insert").await?;
        tracing::debug!(table = %self.table_url, message_id = %row.message_id, "decision inserted");
        Ok(())
    }

    async fn select(&self, query: &DecisionQuery) -> Result<Vec<DecisionLogEntry>, StoreError> {
        let request = self.client.get(&self.table_url).query(&query_params(query));
        let resp = self.send(request, "select").await?;
        let rows: Vec<DecisionLogEntry> = resp.json().await.map_err(|source| StoreError::Decode {
            operation: "select",
            source,
        })?;
        tracing::debug!(table = %self.table_url, rows = rows.len(), "decisions selected");
        Ok(rows)
    }
}
