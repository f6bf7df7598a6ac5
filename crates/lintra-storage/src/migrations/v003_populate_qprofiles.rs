//! v003: backfill qprofiles from rules_profiles.
//!
//! One qprofiles row per rules_profiles row that has none yet, matched on
//! (uuid = kee, organization_uuid). The anti-join makes the step safe to
//! re-run after partial completion. The legacy key is reused verbatim as the
//! new row's uuid — intentional, the new identity stays tied to the legacy
//! one. All rows of one run share a single clock reading.

use rusqlite::{params, Connection};

use lintra_core::errors::StorageError;

use super::MigrationContext;
use crate::mass_update::mass_update;

struct Candidate {
    kee: String,
    organization_uuid: String,
    parent_kee: Option<String>,
}

pub fn migrate(conn: &Connection, ctx: &MigrationContext<'_>) -> Result<(), StorageError> {
    let now = ctx.clock.now_millis();

    mass_update(
        conn,
        "SELECT p.kee, p.organization_uuid, p.parent_kee FROM rules_profiles p \
         WHERE NOT EXISTS ( \
             SELECT qp.uuid FROM qprofiles qp \
             WHERE qp.uuid = p.kee AND qp.organization_uuid = p.organization_uuid \
         )",
        |row| {
            Ok(Candidate {
                kee: row.get(0)?,
                organization_uuid: row.get(1)?,
                parent_kee: row.get(2)?,
            })
        },
        "INSERT INTO qprofiles \
         (uuid, organization_uuid, rules_profile_uuid, parent_uuid, created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        |c, stmt| {
            stmt.execute(params![
                c.kee,
                c.organization_uuid,
                c.kee,
                c.parent_kee,
                now,
                now,
            ])?;
            Ok(true)
        },
        "qprofiles",
    )?;

    Ok(())
}
