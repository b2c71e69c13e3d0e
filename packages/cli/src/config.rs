use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_CONFIG_NAME: &str = "oasedit.config.json";

/// oasedit configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Undo levels kept per session (0 = unlimited)
    #[serde(default = "default_max_undo_levels")]
    pub max_undo_levels: usize,

    /// Pretty-print written documents
    #[serde(default = "default_pretty")]
    pub pretty: bool,

    /// Prefix for ids of queued commands
    #[serde(default = "default_session_id")]
    pub session_id: String,
}

fn default_max_undo_levels() -> usize {
    100
}

fn default_pretty() -> bool {
    true
}

fn default_session_id() -> String {
    "oasedit".to_string()
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_undo_levels: default_max_undo_levels(),
            pretty: default_pretty(),
            session_id: default_session_id(),
        }
    }
}
