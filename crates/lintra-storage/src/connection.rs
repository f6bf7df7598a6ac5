//! `DatabaseManager` — owns the SQLite connection for one database.
//!
//! The persistence layer is a single-pass batch consumer: one connection,
//! writes serialized behind a mutex. `with_reader`/`with_writer` are the only
//! access paths; no code outside this crate should touch a raw `&Connection`.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use rusqlite::Connection;

use lintra_core::errors::StorageError;

/// Map a rusqlite error into a `StorageError`, keeping corruption distinct:
/// a database that fails with `SQLITE_CORRUPT` or `SQLITE_NOTADB` surfaces as
/// `DbCorrupt` instead of a generic SQLite error.
pub(crate) fn map_sqlite_err(e: rusqlite::Error) -> StorageError {
    if let rusqlite::Error::SqliteFailure(code, ref message) = e {
        if matches!(
            code.code,
            rusqlite::ErrorCode::DatabaseCorrupt | rusqlite::ErrorCode::NotADatabase
        ) {
            return StorageError::DbCorrupt {
                details: message.clone().unwrap_or_else(|| e.to_string()),
            };
        }
    }
    StorageError::SqliteError { message: e.to_string() }
}

/// SQLite pragma setup, applied to every connection before use.
pub mod pragmas {
    use lintra_core::errors::StorageError;
    use rusqlite::Connection;

    use super::map_sqlite_err;

    pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

    /// Apply WAL mode and the standard pragma set.
    pub fn apply_pragmas(conn: &Connection) -> Result<(), StorageError> {
        apply_pragmas_with_timeout(conn, DEFAULT_BUSY_TIMEOUT_MS)
    }

    /// Apply pragmas with an explicit busy timeout (from `StorageConfig`).
    pub fn apply_pragmas_with_timeout(
        conn: &Connection,
        busy_timeout_ms: u64,
    ) -> Result<(), StorageError> {
        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(map_sqlite_err)?;
        conn.pragma_update(None, "synchronous", "NORMAL")
            .map_err(map_sqlite_err)?;
        conn.pragma_update(None, "foreign_keys", "ON")
            .map_err(map_sqlite_err)?;
        conn.pragma_update(None, "busy_timeout", busy_timeout_ms as i64)
            .map_err(map_sqlite_err)?;
        Ok(())
    }
}

/// Owner of the database connection.
#[derive(Debug)]
pub struct DatabaseManager {
    conn: Mutex<Connection>,
    path: Option<PathBuf>,
}

impl DatabaseManager {
    /// Open a file-backed database and apply pragmas.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path).map_err(map_sqlite_err)?;
        pragmas::apply_pragmas(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
            path: Some(path.to_path_buf()),
        })
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory().map_err(map_sqlite_err)?;
        pragmas::apply_pragmas(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
            path: None,
        })
    }

    /// Database file path (None for in-memory).
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Run a read-only operation against the connection.
    pub fn with_reader<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&Connection) -> Result<T, StorageError>,
    {
        let conn = self.conn.lock().map_err(|_| StorageError::SqliteError {
            message: "connection mutex poisoned".to_string(),
        })?;
        f(&conn)
    }

    /// Run a write operation against the connection.
    pub fn with_writer<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&Connection) -> Result<T, StorageError>,
    {
        let conn = self.conn.lock().map_err(|_| StorageError::SqliteError {
            message: "connection mutex poisoned".to_string(),
        })?;
        f(&conn)
    }

    /// WAL checkpoint (TRUNCATE). No-op for in-memory databases.
    pub fn checkpoint(&self) -> Result<(), StorageError> {
        self.with_writer(|conn| {
            conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE)")
                .map_err(map_sqlite_err)
        })
    }
}
