//! Storage configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::StorageError;

/// Configuration for the persistence layer.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the database file. None = in-memory.
    pub db_path: Option<String>,
    /// SQLite busy timeout in milliseconds. Default: 5000.
    pub busy_timeout_ms: Option<u64>,
    /// Run pending schema migrations on open. Default: true.
    pub auto_migrate: Option<bool>,
}

impl StorageConfig {
    /// Parse a config from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, StorageError> {
        toml::from_str(s).map_err(|e| StorageError::ConfigError {
            message: e.to_string(),
        })
    }

    /// Load a config from a TOML file.
    pub fn load(path: &Path) -> Result<Self, StorageError> {
        let raw = std::fs::read_to_string(path).map_err(|e| StorageError::ConfigError {
            message: format!("{}: {e}", path.display()),
        })?;
        let cfg = Self::from_toml_str(&raw)?;
        tracing::debug!("loaded storage config from {}", path.display());
        Ok(cfg)
    }

    /// Returns the effective busy timeout, defaulting to 5000ms.
    pub fn effective_busy_timeout_ms(&self) -> u64 {
        self.busy_timeout_ms.unwrap_or(5_000)
    }

    /// Returns whether migrations run on open, defaulting to true.
    pub fn effective_auto_migrate(&self) -> bool {
        self.auto_migrate.unwrap_or(true)
    }
}
