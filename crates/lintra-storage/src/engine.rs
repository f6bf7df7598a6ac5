//! `ProfileStorageEngine` — unified storage engine for quality profiles.
//!
//! Wraps `DatabaseManager` and implements the `IQualityProfiles` trait from
//! `lintra-core`. All reads go through `with_reader()`, all writes through
//! `with_writer()`. This is the single owner of the connection — no code
//! outside this crate should touch a raw `&Connection`.

use std::path::Path;

use lintra_core::config::StorageConfig;
use lintra_core::errors::StorageError;
use lintra_core::traits::clock::Clock;
use lintra_core::traits::storage::{
    DefaultQProfileRow, IQualityProfiles, OrgQProfileRow, RulesProfileRow,
};

use crate::connection::{pragmas, DatabaseManager};
use crate::migrations;
use crate::queries;

/// The quality-profile storage engine.
///
/// Owns `DatabaseManager`, runs migrations on open, and delegates every
/// trait method to the per-table query modules.
pub struct ProfileStorageEngine {
    db: DatabaseManager,
}

impl ProfileStorageEngine {
    /// Open a file-backed storage engine at the given path.
    /// Runs migrations and applies pragmas.
    pub fn open(path: &Path, clock: &dyn Clock) -> Result<Self, StorageError> {
        let db = DatabaseManager::open(path)?;
        db.with_writer(|conn| migrations::run_migrations(conn, clock).map(|_| ()))?;
        Ok(Self { db })
    }

    /// Open an in-memory storage engine (for testing).
    pub fn open_in_memory(clock: &dyn Clock) -> Result<Self, StorageError> {
        let db = DatabaseManager::open_in_memory()?;
        db.with_writer(|conn| migrations::run_migrations(conn, clock).map(|_| ()))?;
        Ok(Self { db })
    }

    /// Open according to a `StorageConfig`: file-backed or in-memory,
    /// configured busy timeout, optional auto-migration.
    pub fn open_with_config(
        config: &StorageConfig,
        clock: &dyn Clock,
    ) -> Result<Self, StorageError> {
        let db = match &config.db_path {
            Some(path) => DatabaseManager::open(Path::new(path))?,
            None => DatabaseManager::open_in_memory()?,
        };
        db.with_writer(|conn| {
            pragmas::apply_pragmas_with_timeout(conn, config.effective_busy_timeout_ms())
        })?;
        if config.effective_auto_migrate() {
            db.with_writer(|conn| migrations::run_migrations(conn, clock).map(|_| ()))?;
        }
        Ok(Self { db })
    }

    /// WAL checkpoint delegation.
    pub fn checkpoint(&self) -> Result<(), StorageError> {
        self.db.checkpoint()
    }

    /// Database file path (None for in-memory).
    pub fn path(&self) -> Option<&Path> {
        self.db.path()
    }

    /// Raw read access — for operations not covered by a trait method.
    /// Prefer trait methods where possible.
    pub fn with_reader<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&rusqlite::Connection) -> Result<T, StorageError>,
    {
        self.db.with_reader(f)
    }

    /// Raw write access — for operations not covered by a trait method.
    /// Prefer trait methods where possible.
    pub fn with_writer<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&rusqlite::Connection) -> Result<T, StorageError>,
    {
        self.db.with_writer(f)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// From impls: lintra-storage record types → lintra-core trait row types
// ═══════════════════════════════════════════════════════════════════════════════

impl From<queries::rules_profiles::RulesProfileRecord> for RulesProfileRow {
    fn from(r: queries::rules_profiles::RulesProfileRecord) -> Self {
        Self {
            id: r.id,
            kee: r.kee,
            organization_uuid: r.organization_uuid,
            name: r.name,
            language: r.language,
            parent_kee: r.parent_kee,
            rules_updated_at: r.rules_updated_at,
            last_used: r.last_used,
            user_updated_at: r.user_updated_at,
            is_built_in: r.is_built_in,
        }
    }
}

impl From<&RulesProfileRow> for queries::rules_profiles::RulesProfileRecord {
    fn from(r: &RulesProfileRow) -> Self {
        Self {
            id: r.id,
            kee: r.kee.clone(),
            organization_uuid: r.organization_uuid.clone(),
            name: r.name.clone(),
            language: r.language.clone(),
            parent_kee: r.parent_kee.clone(),
            rules_updated_at: r.rules_updated_at.clone(),
            last_used: r.last_used,
            user_updated_at: r.user_updated_at,
            is_built_in: r.is_built_in,
        }
    }
}

impl From<queries::org_qprofiles::OrgQProfileRecord> for OrgQProfileRow {
    fn from(r: queries::org_qprofiles::OrgQProfileRecord) -> Self {
        Self {
            uuid: r.uuid,
            organization_uuid: r.organization_uuid,
            rules_profile_uuid: r.rules_profile_uuid,
            parent_uuid: r.parent_uuid,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

impl From<&OrgQProfileRow> for queries::org_qprofiles::OrgQProfileRecord {
    fn from(r: &OrgQProfileRow) -> Self {
        Self {
            uuid: r.uuid.clone(),
            organization_uuid: r.organization_uuid.clone(),
            rules_profile_uuid: r.rules_profile_uuid.clone(),
            parent_uuid: r.parent_uuid.clone(),
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

impl From<queries::default_qprofiles::DefaultQProfileRecord> for DefaultQProfileRow {
    fn from(r: queries::default_qprofiles::DefaultQProfileRecord) -> Self {
        Self {
            organization_uuid: r.organization_uuid,
            language: r.language,
            qprofile_uuid: r.qprofile_uuid,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// IQualityProfiles implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl IQualityProfiles for ProfileStorageEngine {
    // ── rules_profiles ──

    fn insert_rules_profile(&self, row: &RulesProfileRow) -> Result<i64, StorageError> {
        let record: queries::rules_profiles::RulesProfileRecord = row.into();
        self.db.with_writer(|conn| queries::rules_profiles::insert(conn, &record))
    }

    fn get_rules_profile_by_key(
        &self,
        kee: &str,
    ) -> Result<Option<RulesProfileRow>, StorageError> {
        self.db.with_reader(|conn| {
            let row = queries::rules_profiles::get_by_key(conn, kee)?;
            Ok(row.map(Into::into))
        })
    }

    fn get_rules_profiles_by_organization(
        &self,
        organization_uuid: &str,
    ) -> Result<Vec<RulesProfileRow>, StorageError> {
        self.db.with_reader(|conn| {
            let rows = queries::rules_profiles::get_by_organization(conn, organization_uuid)?;
            Ok(rows.into_iter().map(Into::into).collect())
        })
    }

    fn get_all_rules_profiles(&self) -> Result<Vec<RulesProfileRow>, StorageError> {
        self.db.with_reader(|conn| {
            let rows = queries::rules_profiles::get_all(conn)?;
            Ok(rows.into_iter().map(Into::into).collect())
        })
    }

    fn count_rules_profiles(&self) -> Result<i64, StorageError> {
        self.db.with_reader(queries::rules_profiles::count)
    }

    // ── qprofiles ──

    fn insert_org_qprofile(&self, row: &OrgQProfileRow) -> Result<(), StorageError> {
        let record: queries::org_qprofiles::OrgQProfileRecord = row.into();
        self.db.with_writer(|conn| queries::org_qprofiles::insert(conn, &record))
    }

    fn get_org_qprofile(
        &self,
        organization_uuid: &str,
        uuid: &str,
    ) -> Result<Option<OrgQProfileRow>, StorageError> {
        self.db.with_reader(|conn| {
            let row = queries::org_qprofiles::get(conn, organization_uuid, uuid)?;
            Ok(row.map(Into::into))
        })
    }

    fn get_org_qprofiles_by_organization(
        &self,
        organization_uuid: &str,
    ) -> Result<Vec<OrgQProfileRow>, StorageError> {
        self.db.with_reader(|conn| {
            let rows = queries::org_qprofiles::get_by_organization(conn, organization_uuid)?;
            Ok(rows.into_iter().map(Into::into).collect())
        })
    }

    fn count_org_qprofiles(&self) -> Result<i64, StorageError> {
        self.db.with_reader(queries::org_qprofiles::count)
    }

    // ── default_qprofiles ──

    fn set_default_qprofile(&self, row: &DefaultQProfileRow) -> Result<(), StorageError> {
        let record = queries::default_qprofiles::DefaultQProfileRecord {
            organization_uuid: row.organization_uuid.clone(),
            language: row.language.clone(),
            qprofile_uuid: row.qprofile_uuid.clone(),
        };
        self.db
            .with_writer(|conn| queries::default_qprofiles::insert_or_update(conn, &record))
    }

    fn get_default_qprofile_uuid(
        &self,
        organization_uuid: &str,
        language: &str,
    ) -> Result<Option<String>, StorageError> {
        self.db.with_reader(|conn| {
            queries::default_qprofiles::get_uuid(conn, organization_uuid, language)
        })
    }

    fn delete_default_qprofile(
        &self,
        organization_uuid: &str,
        language: &str,
    ) -> Result<usize, StorageError> {
        self.db.with_writer(|conn| {
            queries::default_qprofiles::delete(conn, organization_uuid, language)
        })
    }
}
