//! Backfill tests: qprofiles populated from rules_profiles.

use lintra_core::traits::clock::FixedClock;
use lintra_storage::connection::pragmas::apply_pragmas;
use lintra_storage::migrations::{self, v003_populate_qprofiles, MigrationContext};
use lintra_storage::queries::{org_qprofiles, rules_profiles};
use rusqlite::Connection;

fn setup() -> Connection {
    lintra_core::tracing::init();
    let conn = Connection::open_in_memory().unwrap();
    apply_pragmas(&conn).unwrap();
    // Schema is fully migrated on an empty database; the backfill is then
    // re-invoked directly once legacy rows exist.
    migrations::run_migrations(&conn, &FixedClock::new(0)).unwrap();
    conn
}

fn insert_legacy(conn: &Connection, kee: &str, org: &str, parent_kee: Option<&str>) {
    rules_profiles::insert(
        conn,
        &rules_profiles::RulesProfileRecord {
            id: None,
            kee: kee.to_string(),
            organization_uuid: org.to_string(),
            name: kee.to_uppercase(),
            language: "java".to_string(),
            parent_kee: parent_kee.map(str::to_string),
            rules_updated_at: None,
            last_used: None,
            user_updated_at: None,
            is_built_in: false,
        },
    )
    .unwrap();
}

fn backfill(conn: &Connection, clock: &FixedClock) {
    let ctx = MigrationContext { clock };
    v003_populate_qprofiles::migrate(conn, &ctx).unwrap();
}

#[test]
fn example_scenario_then_rerun_leaves_table_unchanged() {
    let conn = setup();
    insert_legacy(&conn, "p1", "org-A", None);
    insert_legacy(&conn, "p2", "org-A", Some("p1"));

    let clock = FixedClock::new(1_000);
    backfill(&conn, &clock);

    let p1 = org_qprofiles::get(&conn, "org-A", "p1").unwrap().unwrap();
    assert_eq!(p1.uuid, "p1");
    assert_eq!(p1.organization_uuid, "org-A");
    assert_eq!(p1.rules_profile_uuid, "p1");
    assert_eq!(p1.parent_uuid, None);
    assert_eq!(p1.created_at, 1_000);
    assert_eq!(p1.updated_at, 1_000);

    let p2 = org_qprofiles::get(&conn, "org-A", "p2").unwrap().unwrap();
    assert_eq!(p2.rules_profile_uuid, "p2");
    assert_eq!(p2.parent_uuid.as_deref(), Some("p1"));
    assert_eq!(p2.created_at, 1_000);

    // Re-run later: still two rows, timestamps untouched.
    clock.set(2_000);
    backfill(&conn, &clock);

    assert_eq!(org_qprofiles::count(&conn).unwrap(), 2);
    let p1 = org_qprofiles::get(&conn, "org-A", "p1").unwrap().unwrap();
    assert_eq!(p1.created_at, 1_000);
    assert_eq!(p1.updated_at, 1_000);
}

#[test]
fn every_legacy_profile_gets_exactly_one_row() {
    let conn = setup();
    insert_legacy(&conn, "p1", "org-A", None);
    insert_legacy(&conn, "p2", "org-A", None);
    insert_legacy(&conn, "p3", "org-B", None);

    backfill(&conn, &FixedClock::new(1_000));

    for (kee, org) in [("p1", "org-A"), ("p2", "org-A"), ("p3", "org-B")] {
        let matching: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM qprofiles
                 WHERE rules_profile_uuid = ?1 AND organization_uuid = ?2",
                [kee, org],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(matching, 1, "expected exactly one row for {kee}@{org}");
    }
    assert_eq!(org_qprofiles::count(&conn).unwrap(), 3);
}

#[test]
fn parent_reference_is_preserved_and_absence_stays_absent() {
    let conn = setup();
    insert_legacy(&conn, "root", "org-A", None);
    insert_legacy(&conn, "child", "org-A", Some("root"));

    backfill(&conn, &FixedClock::new(1_000));

    let root = org_qprofiles::get(&conn, "org-A", "root").unwrap().unwrap();
    assert_eq!(root.parent_uuid, None);
    let child = org_qprofiles::get(&conn, "org-A", "child").unwrap().unwrap();
    assert_eq!(child.parent_uuid.as_deref(), Some("root"));
}

#[test]
fn all_rows_of_one_run_share_one_timestamp() {
    let conn = setup();
    for kee in ["a", "b", "c", "d"] {
        insert_legacy(&conn, kee, "org-A", None);
    }

    backfill(&conn, &FixedClock::new(42_000));

    let rows = org_qprofiles::get_by_organization(&conn, "org-A").unwrap();
    assert_eq!(rows.len(), 4);
    for row in &rows {
        assert_eq!(row.created_at, 42_000);
        assert_eq!(row.updated_at, 42_000);
    }
}

#[test]
fn same_key_in_two_organizations_stays_independent() {
    let conn = setup();
    insert_legacy(&conn, "shared", "org-A", None);
    insert_legacy(&conn, "shared", "org-B", None);

    backfill(&conn, &FixedClock::new(1_000));

    let a = org_qprofiles::get(&conn, "org-A", "shared").unwrap().unwrap();
    let b = org_qprofiles::get(&conn, "org-B", "shared").unwrap().unwrap();
    assert_eq!(a.organization_uuid, "org-A");
    assert_eq!(b.organization_uuid, "org-B");
    assert_eq!(org_qprofiles::count(&conn).unwrap(), 2);
}

#[test]
fn resumes_after_partial_completion_without_touching_existing_rows() {
    let conn = setup();
    insert_legacy(&conn, "done", "org-A", None);
    insert_legacy(&conn, "pending", "org-A", None);

    // "done" was already migrated by an earlier, interrupted run.
    org_qprofiles::insert(
        &conn,
        &org_qprofiles::OrgQProfileRecord {
            uuid: "done".to_string(),
            organization_uuid: "org-A".to_string(),
            rules_profile_uuid: "done".to_string(),
            parent_uuid: None,
            created_at: 500,
            updated_at: 500,
        },
    )
    .unwrap();

    backfill(&conn, &FixedClock::new(1_000));

    let done = org_qprofiles::get(&conn, "org-A", "done").unwrap().unwrap();
    assert_eq!(done.created_at, 500, "already-migrated row must stay untouched");
    let pending = org_qprofiles::get(&conn, "org-A", "pending").unwrap().unwrap();
    assert_eq!(pending.created_at, 1_000);
    assert_eq!(org_qprofiles::count(&conn).unwrap(), 2);
}

#[test]
fn store_error_aborts_the_run() {
    let conn = setup();
    insert_legacy(&conn, "p1", "org-A", None);
    conn.execute_batch("DROP TABLE qprofiles").unwrap();

    let ctx = MigrationContext {
        clock: &FixedClock::new(1_000),
    };
    let result = v003_populate_qprofiles::migrate(&conn, &ctx);
    assert!(result.is_err());
}
