use crate::api_client::{DEFAULT_TIMEOUT, normalize_base_url};
use crate::query::DEFAULT_PAGE_SIZE;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const APP_DIR: &str = "gameshelf";
pub const CONFIG_FILE: &str = "config.json";

pub const ENV_SERVER_URL: &str = "GAMESHELF_SERVER_URL";
pub const ENV_PAGE_SIZE: &str = "GAMESHELF_PAGE_SIZE";
pub const ENV_TIMEOUT_SECS: &str = "GAMESHELF_TIMEOUT_SECS";

pub const DEFAULT_SERVER_URL: &str = "http://localhost:5001/api";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no config directory on this platform")]
    NoConfigDir,

    #[error("failed to write config to {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Client settings, persisted as JSON under the user's config directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub server_url: String,
    pub page_size: NonZeroUsize,
    pub request_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            request_timeout_secs: DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

impl ClientConfig {
    /// `<config_dir>/gameshelf/config.json`
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Defaults, then the config file, then `GAMESHELF_*` environment
    /// variables. An unreadable file or a malformed variable is logged and
    /// skipped.
    pub fn load() -> Self {
        Self::load_from(Self::config_path().as_deref(), |key| std::env::var(key).ok())
    }

    pub fn load_from(path: Option<&Path>, env: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = path.and_then(Self::read_file).unwrap_or_default();

        if let Some(server_url) = env(ENV_SERVER_URL).filter(|v| !v.trim().is_empty()) {
            config.server_url = server_url;
        }
        if let Some(raw) = env(ENV_PAGE_SIZE) {
            match raw.trim().parse::<NonZeroUsize>() {
                Ok(size) => config.page_size = size,
                Err(err) => tracing::warn!(value = %raw, error = %err, "Ignoring {ENV_PAGE_SIZE}"),
            }
        }
        if let Some(raw) = env(ENV_TIMEOUT_SECS) {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.request_timeout_secs = secs,
                _ => tracing::warn!(value = %raw, "Ignoring {ENV_TIMEOUT_SECS}"),
            }
        }

        config.server_url = normalize_base_url(&config.server_url);
        config
    }

    fn read_file(path: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        match serde_json::from_str::<ClientConfig>(&content) {
            Ok(config) => {
                tracing::debug!(path = %path.display(), "Loaded client config");
                Some(config)
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "Ignoring malformed config file");
                None
            }
        }
    }

    /// Write to the default location, returning the path written.
    pub fn save(&self) -> Result<PathBuf, ConfigError> {
        let path = Self::config_path().ok_or(ConfigError::NoConfigDir)?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source: std::io::Error| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(io_err)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}
