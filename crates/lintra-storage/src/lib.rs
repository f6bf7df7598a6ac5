//! # lintra-storage
//!
//! SQLite persistence layer for Lintra quality profiles.
//! WAL mode, serialized writes, versioned schema migrations,
//! per-table query modules.

pub mod connection;
pub mod engine;
pub mod mass_update;
pub mod migrations;
pub mod queries;
pub mod testing;

pub use connection::DatabaseManager;
pub use engine::ProfileStorageEngine;
