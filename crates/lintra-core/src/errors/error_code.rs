//! Stable machine-readable error codes, logged alongside messages.

pub const STORAGE_ERROR: &str = "LNT-STORAGE";
pub const MIGRATION_FAILED: &str = "LNT-MIGRATION-FAILED";
pub const DB_CORRUPT: &str = "LNT-DB-CORRUPT";
pub const CONFIG_ERROR: &str = "LNT-CONFIG";

/// Every error enum in the workspace maps to a stable code.
pub trait LintraErrorCode {
    fn error_code(&self) -> &'static str;
}
