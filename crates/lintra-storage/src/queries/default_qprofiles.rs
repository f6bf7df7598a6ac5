//! default_qprofiles table queries.

use lintra_core::errors::StorageError;
use rusqlite::{params, Connection};

/// A default_qprofiles record from the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultQProfileRecord {
    pub organization_uuid: String,
    pub language: String,
    pub qprofile_uuid: String,
}

/// Set the default profile for (organization, language), replacing any
/// previous default.
pub fn insert_or_update(conn: &Connection, d: &DefaultQProfileRecord) -> Result<(), StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "INSERT INTO default_qprofiles (organization_uuid, language, qprofile_uuid)
             VALUES (?1, ?2, ?3)
             ON CONFLICT (organization_uuid, language)
             DO UPDATE SET qprofile_uuid = excluded.qprofile_uuid",
        )
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;

    stmt.execute(params![d.organization_uuid, d.language, d.qprofile_uuid])
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;
    Ok(())
}

/// Uuid of the default profile for (organization, language).
pub fn get_uuid(
    conn: &Connection,
    organization_uuid: &str,
    language: &str,
) -> Result<Option<String>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT qprofile_uuid FROM default_qprofiles
             WHERE organization_uuid = ?1 AND language = ?2",
        )
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;

    let mut rows = stmt
        .query_map(params![organization_uuid, language], |row| row.get(0))
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;

    match rows.next() {
        Some(row) => Ok(Some(
            row.map_err(|e| StorageError::SqliteError { message: e.to_string() })?,
        )),
        None => Ok(None),
    }
}

/// Remove the default for (organization, language). Returns rows deleted.
pub fn delete(
    conn: &Connection,
    organization_uuid: &str,
    language: &str,
) -> Result<usize, StorageError> {
    conn.execute(
        "DELETE FROM default_qprofiles WHERE organization_uuid = ?1 AND language = ?2",
        params![organization_uuid, language],
    )
    .map_err(|e| StorageError::SqliteError { message: e.to_string() })
}
