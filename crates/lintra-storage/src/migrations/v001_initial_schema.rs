//! v001: schema version tracking, rules_profiles, default_qprofiles.

use rusqlite::Connection;

use lintra_core::errors::StorageError;

use super::MigrationContext;

pub fn migrate(conn: &Connection, _ctx: &MigrationContext<'_>) -> Result<(), StorageError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS schema_version (
            version    INTEGER NOT NULL,
            applied_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );

        CREATE TABLE IF NOT EXISTS rules_profiles (
            id                INTEGER PRIMARY KEY AUTOINCREMENT,
            organization_uuid TEXT NOT NULL,
            kee               TEXT NOT NULL,
            name              TEXT NOT NULL,
            language          TEXT NOT NULL,
            parent_kee        TEXT,
            rules_updated_at  TEXT,
            last_used         INTEGER,
            user_updated_at   INTEGER,
            is_built_in       INTEGER NOT NULL DEFAULT 0
        );

        CREATE UNIQUE INDEX IF NOT EXISTS uniq_rules_profiles_org_kee
            ON rules_profiles(organization_uuid, kee);
        CREATE INDEX IF NOT EXISTS idx_rules_profiles_org
            ON rules_profiles(organization_uuid);

        CREATE TABLE IF NOT EXISTS default_qprofiles (
            organization_uuid TEXT NOT NULL,
            language          TEXT NOT NULL,
            qprofile_uuid     TEXT NOT NULL,
            PRIMARY KEY (organization_uuid, language)
        );
        ",
    )
    .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;
    Ok(())
}
