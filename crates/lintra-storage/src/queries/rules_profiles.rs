//! rules_profiles table queries.

use lintra_core::errors::StorageError;
use rusqlite::{params, Connection};

/// A rules_profiles record from the database.
#[derive(Debug, Clone)]
pub struct RulesProfileRecord {
    pub id: Option<i64>,
    pub kee: String,
    pub organization_uuid: String,
    pub name: String,
    pub language: String,
    pub parent_kee: Option<String>,
    pub rules_updated_at: Option<String>,
    pub last_used: Option<i64>,
    pub user_updated_at: Option<i64>,
    pub is_built_in: bool,
}

/// Insert a profile, returning its autoincrement id.
pub fn insert(conn: &Connection, p: &RulesProfileRecord) -> Result<i64, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "INSERT INTO rules_profiles
             (organization_uuid, kee, name, language, parent_kee,
              rules_updated_at, last_used, user_updated_at, is_built_in)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        )
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;

    stmt.execute(params![
        p.organization_uuid,
        p.kee,
        p.name,
        p.language,
        p.parent_kee,
        p.rules_updated_at,
        p.last_used,
        p.user_updated_at,
        p.is_built_in,
    ])
    .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;

    Ok(conn.last_insert_rowid())
}

/// Get a profile by its key.
pub fn get_by_key(
    conn: &Connection,
    kee: &str,
) -> Result<Option<RulesProfileRecord>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT id, kee, organization_uuid, name, language, parent_kee,
                    rules_updated_at, last_used, user_updated_at, is_built_in
             FROM rules_profiles WHERE kee = ?1",
        )
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;

    let mut rows = stmt
        .query_map(params![kee], map_profile_row)
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;

    match rows.next() {
        Some(row) => Ok(Some(
            row.map_err(|e| StorageError::SqliteError { message: e.to_string() })?,
        )),
        None => Ok(None),
    }
}

/// All profiles of one organization, ordered by key.
pub fn get_by_organization(
    conn: &Connection,
    organization_uuid: &str,
) -> Result<Vec<RulesProfileRecord>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT id, kee, organization_uuid, name, language, parent_kee,
                    rules_updated_at, last_used, user_updated_at, is_built_in
             FROM rules_profiles WHERE organization_uuid = ?1 ORDER BY kee",
        )
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;

    let rows = stmt
        .query_map(params![organization_uuid], map_profile_row)
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;

    collect_rows(rows)
}

/// All profiles, ordered by organization then key.
pub fn get_all(conn: &Connection) -> Result<Vec<RulesProfileRecord>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT id, kee, organization_uuid, name, language, parent_kee,
                    rules_updated_at, last_used, user_updated_at, is_built_in
             FROM rules_profiles ORDER BY organization_uuid, kee",
        )
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;

    let rows = stmt
        .query_map([], map_profile_row)
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;

    collect_rows(rows)
}

/// Count total profiles.
pub fn count(conn: &Connection) -> Result<i64, StorageError> {
    conn.query_row("SELECT COUNT(*) FROM rules_profiles", [], |row| row.get(0))
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })
}

/// Shared row mapper for rules_profiles queries.
fn map_profile_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RulesProfileRecord> {
    Ok(RulesProfileRecord {
        id: row.get(0)?,
        kee: row.get(1)?,
        organization_uuid: row.get(2)?,
        name: row.get(3)?,
        language: row.get(4)?,
        parent_kee: row.get(5)?,
        rules_updated_at: row.get(6)?,
        last_used: row.get(7)?,
        user_updated_at: row.get(8)?,
        is_built_in: row.get(9)?,
    })
}

/// Collect rusqlite mapped rows into a Vec.
fn collect_rows(
    rows: rusqlite::MappedRows<
        '_,
        impl FnMut(&rusqlite::Row<'_>) -> rusqlite::Result<RulesProfileRecord>,
    >,
) -> Result<Vec<RulesProfileRecord>, StorageError> {
    let mut result = Vec::new();
    for row in rows {
        result.push(row.map_err(|e| StorageError::SqliteError { message: e.to_string() })?);
    }
    Ok(result)
}
