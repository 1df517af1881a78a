//! Site configuration.
//!
//! Loaded from YAML. Every field has a default, so an empty file (or no file
//! at all) is a valid configuration:
//!
//! ```yaml
//! storage_key: theme-preference
//! state_file: /home/dana/.local/share/sitetheme/state.json
//! poll_interval_ms: 1000
//! comments:
//!   repo: dana/site
//!   repo_id: R_kgDOExample
//!   category: Comments
//!   category_id: DIC_kwDOExample
//!   mapping: pathname
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::store::JsonFileStore;
use crate::theme::DEFAULT_STORAGE_KEY;
use crate::widget::GiscusOptions;

/// Error returned when the configuration cannot be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Store key the preference is persisted under.
    pub storage_key: String,
    /// Preference state file; defaults to the user data directory.
    pub state_file: Option<PathBuf>,
    /// How often `watch` samples the system appearance.
    pub poll_interval_ms: u64,
    pub comments: GiscusOptions,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            state_file: None,
            poll_interval_ms: 1000,
            comments: GiscusOptions::default(),
        }
    }
}

impl SiteConfig {
    /// `<config dir>/sitetheme/config.yaml`.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("sitetheme")
            .join("config.yaml")
    }

    /// Parses a configuration from YAML text.
    pub fn from_yaml(path: &Path, content: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes to unit, not a map.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: SiteConfig =
            serde_yaml::from_str(content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads the configuration at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(path, &content)
    }

    /// Loads `path` if given, otherwise the default location if it exists,
    /// otherwise the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let path = Self::default_path();
                if path.exists() {
                    Self::load(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::Invalid("storage_key must not be empty".into()));
        }
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::Invalid("poll_interval_ms must be positive".into()));
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// The configured state file, or the default location.
    pub fn state_path(&self) -> PathBuf {
        self.state_file
            .clone()
            .unwrap_or_else(JsonFileStore::default_path)
    }
}
