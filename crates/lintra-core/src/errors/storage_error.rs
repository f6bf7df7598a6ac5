//! Storage-layer errors for SQLite operations.

use super::error_code::{self, LintraErrorCode};

/// Errors that can occur in the storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("Migration failed at version {version}: {message}")]
    MigrationFailed { version: u32, message: String },

    #[error("Database corrupt: {details}")]
    DbCorrupt { details: String },

    #[error("Config error: {message}")]
    ConfigError { message: String },
}

impl LintraErrorCode for StorageError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::DbCorrupt { .. } => error_code::DB_CORRUPT,
            Self::MigrationFailed { .. } => error_code::MIGRATION_FAILED,
            Self::ConfigError { .. } => error_code::CONFIG_ERROR,
            _ => error_code::STORAGE_ERROR,
        }
    }
}
