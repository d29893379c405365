//! Console configuration.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// Address of the administrative backend.
    #[serde(default = "default_backend_addr")]
    pub backend_addr: String,
    /// UI tick interval in milliseconds.
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    /// Directory for client-side state (pinned actions).
    #[serde(default = "default_state_dir")]
    pub state_dir: PathBuf,
    /// Maximum number of live log lines kept in the visible buffer.
    #[serde(default = "default_log_capacity")]
    pub log_capacity: usize,
}

fn default_backend_addr() -> String {
    "127.0.0.1:9611".to_string()
}

fn default_tick_ms() -> u64 {
    250
}

fn default_state_dir() -> PathBuf {
    PathBuf::from(".bmongo")
}

fn default_log_capacity() -> usize {
    4000
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            backend_addr: default_backend_addr(),
            tick_ms: default_tick_ms(),
            state_dir: default_state_dir(),
            log_capacity: default_log_capacity(),
        }
    }
}

impl ConsoleConfig {
    pub fn pinned_path(&self) -> PathBuf {
        self.state_dir.join("pinned_actions.json")
    }
}

pub fn parse_console_config(contents: &str) -> Result<ConsoleConfig, toml::de::Error> {
    toml::from_str(contents)
}

pub fn load_console_config(path: impl AsRef<Path>) -> Result<ConsoleConfig, ConfigError> {
    let path_ref = path.as_ref();
    let body = fs::read_to_string(path_ref).map_err(|source| ConfigError::Read {
        path: path_ref.to_path_buf(),
        source,
    })?;
    parse_console_config(&body).map_err(|source| ConfigError::Parse {
        path: path_ref.to_path_buf(),
        source,
    })
}
