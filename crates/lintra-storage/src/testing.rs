//! Test fixtures for quality-profile storage. Used by integration tests;
//! not part of the production surface.

use std::sync::atomic::{AtomicU32, Ordering};

use lintra_core::errors::StorageError;
use lintra_core::traits::storage::{DefaultQProfileRow, IQualityProfiles, RulesProfileRow};

use crate::engine::ProfileStorageEngine;

/// Fixture helper over a `ProfileStorageEngine`: sequenced profile inserts,
/// default-profile marking and lookup.
pub struct QualityProfileTester<'a> {
    engine: &'a ProfileStorageEngine,
    seq: AtomicU32,
}

impl<'a> QualityProfileTester<'a> {
    pub fn new(engine: &'a ProfileStorageEngine) -> Self {
        Self {
            engine,
            seq: AtomicU32::new(1),
        }
    }

    /// Insert a profile with generated field values on the given organization.
    pub fn insert_profile(
        &self,
        organization_uuid: &str,
    ) -> Result<RulesProfileRow, StorageError> {
        self.insert_profile_for_language(organization_uuid, "java")
    }

    /// Insert a profile with generated field values for one language.
    pub fn insert_profile_for_language(
        &self,
        organization_uuid: &str,
        language: &str,
    ) -> Result<RulesProfileRow, StorageError> {
        let n = self.seq.fetch_add(1, Ordering::SeqCst);
        let mut row = RulesProfileRow {
            id: None,
            kee: format!("profile-{n}"),
            organization_uuid: organization_uuid.to_string(),
            name: format!("Profile {n}"),
            language: language.to_string(),
            parent_kee: None,
            rules_updated_at: None,
            last_used: None,
            user_updated_at: None,
            is_built_in: false,
        };
        let id = self.engine.insert_rules_profile(&row)?;
        row.id = Some(id);
        Ok(row)
    }

    /// Mark profiles as the default of their organization + language.
    pub fn mark_as_default(&self, profiles: &[&RulesProfileRow]) -> Result<(), StorageError> {
        for profile in profiles {
            self.engine.set_default_qprofile(&DefaultQProfileRow {
                organization_uuid: profile.organization_uuid.clone(),
                language: profile.language.clone(),
                qprofile_uuid: profile.kee.clone(),
            })?;
        }
        Ok(())
    }

    /// Uuid of the default profile for an organization + language.
    pub fn select_uuid_of_default_profile(
        &self,
        organization_uuid: &str,
        language: &str,
    ) -> Result<Option<String>, StorageError> {
        self.engine.get_default_qprofile_uuid(organization_uuid, language)
    }
}
