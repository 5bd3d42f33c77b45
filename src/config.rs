//! YAML configuration for clearsight.
//!
//! Names the assistant whose decisions are recorded and the table they go to.
//!
//! # Example config file:
//! ```yaml
//! assistant_id: support-bot
//! store:
//!   kind: rest
//!   url: https://project.example.co
//!   table: ai_decision_logs
//!   api_key_env: CLEARSIGHT_API_KEY
//! ```

use crate::decision::BoundContext;
use crate::store::rest::{RestStoreConfig, DEFAULT_TABLE};
use crate::store::{DecisionStore, FileStore, MemoryStore, RestStore};
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// File name searched for when no `--config` is given.
pub const CONFIG_FILE_NAME: &str = ".clearsight.yaml";

/// Default environment variable holding the REST API key.
pub const DEFAULT_API_KEY_ENV: &str = "CLEARSIGHT_API_KEY";

/// Raw YAML representation before validation.
#[derive(Debug, Deserialize)]
struct RawConfig {
    assistant_id: String,
    #[serde(default)]
    session_id: Option<String>,
    #[serde(default)]
    store: Option<RawStore>,
}

/// The `store:` block as it appears in the YAML file.
#[derive(Debug, Deserialize)]
struct RawStore {
    kind: String,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    table: Option<String>,
    #[serde(default)]
    api_key_env: Option<String>,
    #[serde(default)]
    timeout_secs: Option<u64>,
    #[serde(default)]
    path: Option<String>,
}

/// Validated configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub assistant_id: String,
    pub session_id: Option<String>,
    pub store: StoreConfig,
}

/// Which decision table to use.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreConfig {
    Rest {
        url: String,
        table: String,
        api_key_env: String,
        timeout_secs: u64,
    },
    File {
        path: Option<PathBuf>,
    },
    Memory,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig::File { path: None }
    }
}

/// Parse a YAML config file from a file path.
pub fn parse_config_file(path: impl AsRef<Path>) -> Result<Config> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    parse_config_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Parse a YAML config string.
pub fn parse_config_str(yaml: &str) -> Result<Config> {
    let raw: RawConfig = serde_yaml::from_str(yaml).context("Invalid YAML syntax in config file")?;

    if raw.assistant_id.trim().is_empty() {
        bail!("Config must have a non-empty 'assistant_id'");
    }
    if let Some(ref session) = raw.session_id {
        if session.trim().is_empty() {
            bail!("'session_id' must not be empty when given");
        }
    }

    let store = match raw.store {
        Some(raw_store) => convert_store(raw_store).context("Invalid 'store' block")?,
        None => StoreConfig::default(),
    };

    Ok(Config {
        assistant_id: raw.assistant_id,
        session_id: raw.session_id,
        store,
    })
}

fn convert_store(raw: RawStore) -> Result<StoreConfig> {
    match raw.kind.to_lowercase().trim() {
        "rest" | "postgrest" | "remote" => {
            let url = match raw.url {
                Some(url) if !url.trim().is_empty() => url,
                _ => bail!("A 'rest' store needs a 'url'"),
            };
            if !url.starts_with("http://") && !url.starts_with("https://") {
                bail!("Store url must start with http:// or https://, got '{}'", url);
            }
            Ok(StoreConfig::Rest {
                url,
                table: raw.table.unwrap_or_else(|| DEFAULT_TABLE.to_string()),
                api_key_env: raw
                    .api_key_env
                    .unwrap_or_else(|| DEFAULT_API_KEY_ENV.to_string()),
                timeout_secs: raw.timeout_secs.unwrap_or(30),
            })
        }
        "file" | "jsonl" | "local" => Ok(StoreConfig::File {
            path: raw.path.map(|p| expand_home(&p)),
        }),
        "memory" => Ok(StoreConfig::Memory),
        other => bail!(
            "Unknown store kind '{}'. Valid kinds: rest, file, memory",
            other
        ),
    }
}

/// Replace a leading `~/` with the home directory.
fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Find `.clearsight.yaml` walking up the directory tree.
pub fn find_config_walking_up(start: &Path) -> Option<PathBuf> {
    let mut dir = start.to_path_buf();
    loop {
        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.exists() {
            return Some(candidate);
        }
        if !dir.pop() {
            return None;
        }
    }
}

impl Config {
    /// Bound context for this config. The session comes from the override,
    /// then the config file, then a fresh UUID.
    pub fn bound_context(&self, session_override: Option<&str>) -> BoundContext {
        let session_id = session_override
            .map(str::to_string)
            .or_else(|| self.session_id.clone())
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        BoundContext::new(self.assistant_id.clone(), session_id)
    }

    /// Open the configured decision table.
    pub fn open_store(&self) -> Result<Arc<dyn DecisionStore>> {
        match self.store {
            StoreConfig::Rest {
                ref url,
                ref table,
                ref api_key_env,
                timeout_secs,
            } => {
                let api_key = std::env::var(api_key_env).with_context(|| {
                    format!("{} environment variable not set (needed for the rest store)", api_key_env)
                })?;
                let store = RestStore::new(RestStoreConfig {
                    base_url: url.clone(),
                    api_key,
                    table: table.clone(),
                    timeout_secs,
                })?;
                Ok(Arc::new(store))
            }
            StoreConfig::File { ref path } => {
                let store = match path {
                    Some(path) => FileStore::with_path(path),
                    None => FileStore::new()?,
                };
                Ok(Arc::new(store))
            }
            StoreConfig::Memory => Ok(Arc::new(MemoryStore::new())),
        }
    }
}

/// Starter config written by `clearsight init`.
pub fn starter_yaml(assistant_id: &str) -> String {
    format!(
        "# clearsight config — which assistant, and where its decisions are kept.\n\
         assistant_id: {assistant_id}\n\
         \n\
         # Pin a session to group decisions; omit to start a new session per run.\n\
         # session_id: my-session\n\
         \n\
         store:\n  \
           kind: file\n  \
           # path: ~/.clearsight/decisions.jsonl\n\
         \n\
         # Remote table instead:\n\
         # store:\n\
         #   kind: rest\n\
         #   url: https://project.example.co\n\
         #   table: {DEFAULT_TABLE}\n\
         #   api_key_env: {DEFAULT_API_KEY_ENV}\n"
    )
}
