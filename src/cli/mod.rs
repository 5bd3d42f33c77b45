pub mod init;
pub mod page;
pub mod record;
pub mod show;

use crate::config::{self, Config, StoreConfig};
use crate::decision::DecisionLogger;
use anyhow::{bail, Context, Result};
use std::path::PathBuf;

/// Options shared by every subcommand that touches the decision table.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Explicit config path (otherwise `.clearsight.yaml` is searched upward)
    pub config: Option<PathBuf>,
    /// Overrides `assistant_id` from the config
    pub assistant: Option<String>,
    /// Overrides `session_id` from the config
    pub session: Option<String>,
}

impl GlobalOptions {
    /// Load the config, applying command-line overrides.
    pub fn load_config(&self) -> Result<Config> {
        let path = match self.config {
            Some(ref path) => Some(path.clone()),
            None => {
                let cwd = std::env::current_dir().context("Failed to get current directory")?;
                config::find_config_walking_up(&cwd)
            }
        };

        let mut config = match (path, self.assistant.as_deref()) {
            (Some(path), _) => config::parse_config_file(&path)?,
            (None, Some(assistant)) => Config {
                assistant_id: assistant.to_string(),
                session_id: None,
                store: StoreConfig::default(),
            },
            (None, None) => bail!(
                "No {} found. Run `clearsight init` or pass --assistant.",
                config::CONFIG_FILE_NAME
            ),
        };

        if let Some(ref assistant) = self.assistant {
            if assistant.trim().is_empty() {
                bail!("--assistant must not be empty");
            }
            config.assistant_id = assistant.clone();
        }
        Ok(config)
    }

    /// Build a logger for the resolved context.
    /// With `require_session`, a session must be pinned by flag or config:
    /// reading a freshly generated session would always come back empty.
    pub fn open_logger(&self, require_session: bool) -> Result<DecisionLogger> {
        let config = self.load_config()?;
        if let Some(ref session) = self.session {
            if session.trim().is_empty() {
                bail!("--session must not be empty");
            }
        }
        if require_session && self.session.is_none() && config.session_id.is_none() {
            bail!("No session given. Pass --session <id> or set session_id in the config.");
        }

        let context = config.bound_context(self.session.as_deref());
        let store = config.open_store().context("Failed to open decision store")?;
        tracing::debug!(
            assistant_id = %context.assistant_id,
            session_id = %context.session_id,
            "decision logger ready"
        );
        Ok(DecisionLogger::new(context, store))
    }
}
