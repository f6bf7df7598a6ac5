//! qprofiles table queries.

use lintra_core::errors::StorageError;
use rusqlite::{params, Connection};

/// A qprofiles record from the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrgQProfileRecord {
    pub uuid: String,
    pub organization_uuid: String,
    pub rules_profile_uuid: String,
    pub parent_uuid: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Insert a profile row.
pub fn insert(conn: &Connection, p: &OrgQProfileRecord) -> Result<(), StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "INSERT INTO qprofiles
             (uuid, organization_uuid, rules_profile_uuid, parent_uuid, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;

    stmt.execute(params![
        p.uuid,
        p.organization_uuid,
        p.rules_profile_uuid,
        p.parent_uuid,
        p.created_at,
        p.updated_at,
    ])
    .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;
    Ok(())
}

/// Get a profile by organization + uuid.
pub fn get(
    conn: &Connection,
    organization_uuid: &str,
    uuid: &str,
) -> Result<Option<OrgQProfileRecord>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT uuid, organization_uuid, rules_profile_uuid, parent_uuid,
                    created_at, updated_at
             FROM qprofiles WHERE organization_uuid = ?1 AND uuid = ?2",
        )
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;

    let mut rows = stmt
        .query_map(params![organization_uuid, uuid], map_qprofile_row)
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;

    match rows.next() {
        Some(row) => Ok(Some(
            row.map_err(|e| StorageError::SqliteError { message: e.to_string() })?,
        )),
        None => Ok(None),
    }
}

/// All profiles of one organization, ordered by uuid.
pub fn get_by_organization(
    conn: &Connection,
    organization_uuid: &str,
) -> Result<Vec<OrgQProfileRecord>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT uuid, organization_uuid, rules_profile_uuid, parent_uuid,
                    created_at, updated_at
             FROM qprofiles WHERE organization_uuid = ?1 ORDER BY uuid",
        )
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;

    let rows = stmt
        .query_map(params![organization_uuid], map_qprofile_row)
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;

    let mut result = Vec::new();
    for row in rows {
        result.push(row.map_err(|e| StorageError::SqliteError { message: e.to_string() })?);
    }
    Ok(result)
}

/// Count total profiles.
pub fn count(conn: &Connection) -> Result<i64, StorageError> {
    conn.query_row("SELECT COUNT(*) FROM qprofiles", [], |row| row.get(0))
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })
}

/// Shared row mapper for qprofiles queries.
fn map_qprofile_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<OrgQProfileRecord> {
    Ok(OrgQProfileRecord {
        uuid: row.get(0)?,
        organization_uuid: row.get(1)?,
        rules_profile_uuid: row.get(2)?,
        parent_uuid: row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}
