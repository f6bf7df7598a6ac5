//! Engine + test-helper integration: trait round trips, defaults, config open.

use lintra_core::config::StorageConfig;
use lintra_core::errors::StorageError;
use lintra_core::traits::clock::FixedClock;
use lintra_core::traits::storage::{IQualityProfiles, OrgQProfileRow};
use lintra_storage::migrations::{self, v003_populate_qprofiles, MigrationContext};
use lintra_storage::testing::QualityProfileTester;
use lintra_storage::{DatabaseManager, ProfileStorageEngine};
use tempfile::TempDir;

#[test]
fn rules_profile_round_trip() {
    let clock = FixedClock::new(0);
    let engine = ProfileStorageEngine::open_in_memory(&clock).unwrap();
    let tester = QualityProfileTester::new(&engine);

    let inserted = tester.insert_profile("org-A").unwrap();
    assert!(inserted.id.is_some());

    let loaded = engine
        .get_rules_profile_by_key(&inserted.kee)
        .unwrap()
        .unwrap();
    assert_eq!(loaded.kee, inserted.kee);
    assert_eq!(loaded.organization_uuid, "org-A");
    assert_eq!(loaded.language, "java");
    assert_eq!(loaded.parent_kee, None);
    assert!(!loaded.is_built_in);

    assert!(engine.get_rules_profile_by_key("missing").unwrap().is_none());
    assert_eq!(engine.count_rules_profiles().unwrap(), 1);
}

#[test]
fn profiles_are_listed_per_organization() {
    let clock = FixedClock::new(0);
    let engine = ProfileStorageEngine::open_in_memory(&clock).unwrap();
    let tester = QualityProfileTester::new(&engine);

    tester.insert_profile("org-A").unwrap();
    tester.insert_profile("org-A").unwrap();
    tester.insert_profile("org-B").unwrap();

    assert_eq!(engine.get_rules_profiles_by_organization("org-A").unwrap().len(), 2);
    assert_eq!(engine.get_rules_profiles_by_organization("org-B").unwrap().len(), 1);
    assert!(engine.get_rules_profiles_by_organization("org-C").unwrap().is_empty());

    let all = engine.get_all_rules_profiles().unwrap();
    assert_eq!(all.len(), 3);
    let orgs: Vec<&str> = all.iter().map(|p| p.organization_uuid.as_str()).collect();
    assert_eq!(orgs, ["org-A", "org-A", "org-B"], "ordered by organization then key");
}

#[test]
fn default_profile_is_upserted_and_deleted() {
    let clock = FixedClock::new(0);
    let engine = ProfileStorageEngine::open_in_memory(&clock).unwrap();
    let tester = QualityProfileTester::new(&engine);

    let first = tester.insert_profile("org-A").unwrap();
    let second = tester.insert_profile("org-A").unwrap();

    tester.mark_as_default(&[&first]).unwrap();
    assert_eq!(
        tester.select_uuid_of_default_profile("org-A", "java").unwrap(),
        Some(first.kee.clone())
    );

    // Marking another profile replaces the default for the same language.
    tester.mark_as_default(&[&second]).unwrap();
    assert_eq!(
        tester.select_uuid_of_default_profile("org-A", "java").unwrap(),
        Some(second.kee.clone())
    );

    assert_eq!(engine.delete_default_qprofile("org-A", "java").unwrap(), 1);
    assert_eq!(
        tester.select_uuid_of_default_profile("org-A", "java").unwrap(),
        None
    );
    assert_eq!(engine.delete_default_qprofile("org-A", "java").unwrap(), 0);
}

#[test]
fn defaults_are_scoped_per_language() {
    let clock = FixedClock::new(0);
    let engine = ProfileStorageEngine::open_in_memory(&clock).unwrap();
    let tester = QualityProfileTester::new(&engine);

    let java = tester.insert_profile_for_language("org-A", "java").unwrap();
    let js = tester.insert_profile_for_language("org-A", "js").unwrap();
    tester.mark_as_default(&[&java, &js]).unwrap();

    assert_eq!(
        tester.select_uuid_of_default_profile("org-A", "java").unwrap(),
        Some(java.kee)
    );
    assert_eq!(
        tester.select_uuid_of_default_profile("org-A", "js").unwrap(),
        Some(js.kee)
    );
}

#[test]
fn org_qprofile_round_trip_through_engine() {
    let clock = FixedClock::new(0);
    let engine = ProfileStorageEngine::open_in_memory(&clock).unwrap();

    let row = OrgQProfileRow {
        uuid: "p1".to_string(),
        organization_uuid: "org-A".to_string(),
        rules_profile_uuid: "p1".to_string(),
        parent_uuid: None,
        created_at: 100,
        updated_at: 100,
    };
    engine.insert_org_qprofile(&row).unwrap();

    let loaded = engine.get_org_qprofile("org-A", "p1").unwrap().unwrap();
    assert_eq!(loaded, row);
    assert!(engine.get_org_qprofile("org-B", "p1").unwrap().is_none());
    assert_eq!(engine.count_org_qprofiles().unwrap(), 1);
}

#[test]
fn backfill_reaches_rows_inserted_through_the_engine() {
    let clock = FixedClock::new(0);
    let engine = ProfileStorageEngine::open_in_memory(&clock).unwrap();
    let tester = QualityProfileTester::new(&engine);

    let profile = tester.insert_profile("org-A").unwrap();

    let backfill_clock = FixedClock::new(7_000);
    engine
        .with_writer(|conn| {
            let ctx = MigrationContext {
                clock: &backfill_clock,
            };
            v003_populate_qprofiles::migrate(conn, &ctx)
        })
        .unwrap();

    let migrated = engine
        .get_org_qprofile("org-A", &profile.kee)
        .unwrap()
        .unwrap();
    assert_eq!(migrated.rules_profile_uuid, profile.kee);
    assert_eq!(migrated.created_at, 7_000);
}

#[test]
fn opening_a_non_database_file_reports_corruption() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("garbage.db");
    std::fs::write(&path, b"definitely not a sqlite file").unwrap();

    let err = DatabaseManager::open(&path).unwrap_err();
    assert!(
        matches!(err, StorageError::DbCorrupt { .. }),
        "unexpected error: {err}"
    );
}

#[test]
fn file_backed_engine_persists_across_reopen() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("lintra.db");
    let clock = FixedClock::new(0);

    {
        let engine = ProfileStorageEngine::open(&db_path, &clock).unwrap();
        let tester = QualityProfileTester::new(&engine);
        tester.insert_profile("org-A").unwrap();
        engine.checkpoint().unwrap();
        assert_eq!(engine.path(), Some(db_path.as_path()));
    }

    let engine = ProfileStorageEngine::open(&db_path, &clock).unwrap();
    assert_eq!(engine.count_rules_profiles().unwrap(), 1);
    engine
        .with_reader(|conn| {
            assert_eq!(
                migrations::current_version(conn).unwrap(),
                migrations::LATEST_VERSION
            );
            Ok(())
        })
        .unwrap();
}

#[test]
fn config_controls_open_and_migration() {
    let clock = FixedClock::new(0);

    // In-memory, defaults: migrated on open.
    let cfg = StorageConfig::default();
    let engine = ProfileStorageEngine::open_with_config(&cfg, &clock).unwrap();
    assert!(engine.path().is_none());
    assert_eq!(engine.count_rules_profiles().unwrap(), 0);

    // auto_migrate = false: schema is absent.
    let cfg = StorageConfig {
        auto_migrate: Some(false),
        ..Default::default()
    };
    let engine = ProfileStorageEngine::open_with_config(&cfg, &clock).unwrap();
    engine
        .with_reader(|conn| {
            assert_eq!(migrations::current_version(conn).unwrap(), 0);
            Ok(())
        })
        .unwrap();

    // File-backed through config.
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("cfg.db");
    let cfg = StorageConfig {
        db_path: Some(db_path.to_string_lossy().into_owned()),
        busy_timeout_ms: Some(100),
        auto_migrate: None,
    };
    let engine = ProfileStorageEngine::open_with_config(&cfg, &clock).unwrap();
    assert_eq!(engine.path(), Some(db_path.as_path()));
}
