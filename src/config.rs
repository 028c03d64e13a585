use std::{
    env, fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable that overrides the config file location.
const CONFIG_ENV_VAR: &str = "MAILWATCH_CONFIG";

/// Tunables for the watch loop. Fields missing from the file fall back to
/// the defaults below.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    /// Seconds between status polls.
    pub poll_interval_secs: u64,
    /// Seconds the status command gets before the cycle is written off.
    pub fetch_timeout_secs: u64,
    /// Command line that prints the client's counters.
    pub status_command: Vec<String>,
    /// Exact text the client prints when it is not running.
    pub not_running_message: String,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: 10,
            fetch_timeout_secs: 5,
            status_command: vec!["claws-mail".into(), "--status".into()],
            not_running_message: "0 Claws Mail not running.".into(),
        }
    }
}

impl WatchConfig {
    /// Load from `$MAILWATCH_CONFIG` if set, otherwise from the user config
    /// directory; defaults apply when no file exists.
    pub fn load() -> Result<Self> {
        let path = match env::var(CONFIG_ENV_VAR) {
            Ok(custom) => PathBuf::from(custom),
            Err(_) => default_path()?,
        };
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let config = if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse config at {}", path.display()))?
        } else {
            Self::default()
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.poll_interval_secs == 0 {
            bail!("poll_interval_secs must be at least 1");
        }
        if self.fetch_timeout_secs == 0 {
            bail!("fetch_timeout_secs must be at least 1");
        }
        if self.status_command.is_empty() {
            bail!("status_command must name a program to run");
        }
        Ok(())
    }
}

fn default_path() -> Result<PathBuf> {
    let base = dirs::config_dir().context("Could not determine the user config directory")?;
    Ok(base.join("mailwatch").join("config.json"))
}
