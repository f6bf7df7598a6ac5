//! Error types shared across the workspace.

pub mod error_code;
mod storage_error;

pub use storage_error::StorageError;
