//! `IQualityProfiles` trait — quality-profile table operations.
//!
//! Maps to `lintra-storage/src/queries/rules_profiles.rs` +
//! `queries/org_qprofiles.rs` + `queries/default_qprofiles.rs`.

use crate::errors::StorageError;

// ─── Row Types ──────────────────────────────────────────────────────

/// A row of the `rules_profiles` table (legacy profile).
#[derive(Debug, Clone)]
pub struct RulesProfileRow {
    /// Autoincrement id; None until inserted.
    pub id: Option<i64>,
    /// Profile key, unique within an organization.
    pub kee: String,
    pub organization_uuid: String,
    pub name: String,
    pub language: String,
    /// Key of the parent profile in the same organization, if any.
    pub parent_kee: Option<String>,
    pub rules_updated_at: Option<String>,
    pub last_used: Option<i64>,
    pub user_updated_at: Option<i64>,
    pub is_built_in: bool,
}

/// A row of the `qprofiles` table (organization-scoped profile).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrgQProfileRow {
    pub uuid: String,
    pub organization_uuid: String,
    /// Key of the `rules_profiles` row this profile was derived from.
    pub rules_profile_uuid: String,
    pub parent_uuid: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// A row of the `default_qprofiles` table: the default profile of an
/// organization for one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultQProfileRow {
    pub organization_uuid: String,
    pub language: String,
    pub qprofile_uuid: String,
}

// ─── Trait ───────────────────────────────────────────────────────────

/// Quality-profile storage operations.
///
/// Covers: `rules_profiles`, `qprofiles`, `default_qprofiles`.
pub trait IQualityProfiles: Send + Sync {
    // ── rules_profiles ──

    /// Insert a legacy profile row, returning its autoincrement id.
    fn insert_rules_profile(&self, row: &RulesProfileRow) -> Result<i64, StorageError>;

    /// Get a legacy profile by its key.
    fn get_rules_profile_by_key(&self, kee: &str)
        -> Result<Option<RulesProfileRow>, StorageError>;

    /// All legacy profiles of one organization.
    fn get_rules_profiles_by_organization(
        &self,
        organization_uuid: &str,
    ) -> Result<Vec<RulesProfileRow>, StorageError>;

    /// All legacy profiles, ordered by organization then key.
    fn get_all_rules_profiles(&self) -> Result<Vec<RulesProfileRow>, StorageError>;

    fn count_rules_profiles(&self) -> Result<i64, StorageError>;

    // ── qprofiles ──

    /// Insert an organization-scoped profile row.
    fn insert_org_qprofile(&self, row: &OrgQProfileRow) -> Result<(), StorageError>;

    /// Get a profile by organization + uuid.
    fn get_org_qprofile(
        &self,
        organization_uuid: &str,
        uuid: &str,
    ) -> Result<Option<OrgQProfileRow>, StorageError>;

    /// All profiles of one organization.
    fn get_org_qprofiles_by_organization(
        &self,
        organization_uuid: &str,
    ) -> Result<Vec<OrgQProfileRow>, StorageError>;

    fn count_org_qprofiles(&self) -> Result<i64, StorageError>;

    // ── default_qprofiles ──

    /// Set the default profile for an organization + language, replacing any
    /// previous default.
    fn set_default_qprofile(&self, row: &DefaultQProfileRow) -> Result<(), StorageError>;

    /// Uuid of the default profile for an organization + language.
    fn get_default_qprofile_uuid(
        &self,
        organization_uuid: &str,
        language: &str,
    ) -> Result<Option<String>, StorageError>;

    /// Remove the default for an organization + language. Returns rows deleted.
    fn delete_default_qprofile(
        &self,
        organization_uuid: &str,
        language: &str,
    ) -> Result<usize, StorageError>;
}
