//! v002: organization-scoped qprofiles table.
//!
//! Profiles are unique per (organization_uuid, uuid): two organizations may
//! own profiles carrying the same key.

use rusqlite::Connection;

use lintra_core::errors::StorageError;

use super::MigrationContext;

pub fn migrate(conn: &Connection, _ctx: &MigrationContext<'_>) -> Result<(), StorageError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS qprofiles (
            uuid               TEXT NOT NULL,
            organization_uuid  TEXT NOT NULL,
            rules_profile_uuid TEXT NOT NULL,
            parent_uuid        TEXT,
            created_at         INTEGER NOT NULL,
            updated_at         INTEGER NOT NULL,
            PRIMARY KEY (organization_uuid, uuid)
        );

        CREATE INDEX IF NOT EXISTS idx_qprofiles_rules_profile
            ON qprofiles(rules_profile_uuid);
        ",
    )
    .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;
    Ok(())
}
