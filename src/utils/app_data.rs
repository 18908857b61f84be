use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::index::store::DEFAULT_PARALLEL_THRESHOLD;

const APP_NAME: &str = "docsift";
const CONFIG_FILE: &str = "config.json";
/// Environment variable naming an explicit config file
pub const CONFIG_ENV: &str = "DOCSIFT_CONFIG";

/// Application configuration stored in the app config directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Colored output on terminals
    #[serde(default = "default_color")]
    pub color: bool,

    /// Result cap for searches; 0 means unlimited
    #[serde(default)]
    pub default_limit: usize,

    /// Store size at which searches scan entries in parallel
    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: usize,
}

fn default_color() -> bool {
    true
}

fn default_parallel_threshold() -> usize {
    DEFAULT_PARALLEL_THRESHOLD
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            color: default_color(),
            default_limit: 0,
            parallel_threshold: default_parallel_threshold(),
        }
    }
}

impl AppConfig {
    /// Load config from the app config directory, or return default if not found
    pub fn load() -> Result<Self> {
        match get_config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Resolve the effective limit: an explicit CLI value wins over the configured one
    pub fn effective_limit(&self, cli_limit: Option<usize>) -> usize {
        cli_limit.unwrap_or(self.default_limit)
    }
}

/// Path of the config file: `$DOCSIFT_CONFIG`, else the platform config directory
pub fn get_config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|dir| dir.join(APP_NAME).join(CONFIG_FILE))
}
