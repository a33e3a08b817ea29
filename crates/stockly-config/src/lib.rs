//! Shared configuration for the stockly CLI.
//!
//! Merge order: built-in defaults → TOML file (`ProjectDirs`-resolved or
//! an explicit path) → `STOCKLY_`-prefixed environment variables. Nested
//! keys use `__` in the environment (`STOCKLY_SERVER__URL`).

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Inventory service connection settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Products per fetched page.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            page_size: default_page_size(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Service base URL (e.g., "http://localhost:3000").
    #[serde(default = "default_url")]
    pub url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout: default_timeout(),
        }
    }
}

fn default_url() -> String {
    "http://localhost:3000".into()
}
fn default_timeout() -> u64 {
    30
}
fn default_page_size() -> u32 {
    10
}

// ── Loading ─────────────────────────────────────────────────────────

/// Default config file location (`~/.config/stockly/config.toml` on
/// Linux, platform-appropriate elsewhere).
pub fn config_path() -> PathBuf {
    ProjectDirs::from("dev", "stockly", "stockly")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("stockly.toml"))
}

impl Config {
    /// Load from the default path, the environment, and defaults.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(config_path())
    }

    /// Load with an explicit config file path. A missing file is fine —
    /// defaults and environment still apply.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config: Self = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed("STOCKLY_").split("__"))
            .extract()?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::Validation {
                field: "page_size".into(),
                reason: "must be at least 1".into(),
            });
        }
        if self.server.timeout == 0 {
            return Err(ConfigError::Validation {
                field: "server.timeout".into(),
                reason: "must be at least 1 second".into(),
            });
        }
        if let Err(e) = url::Url::parse(&self.server.url) {
            return Err(ConfigError::Validation {
                field: "server.url".into(),
                reason: e.to_string(),
            });
        }
        Ok(())
    }
}
