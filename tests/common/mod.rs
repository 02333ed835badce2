//! Common test fixtures: a seeded temporary intelligence database

#![allow(dead_code)]

use rusqlite::{params, Connection};
use tail_intel::store::Store;
use tempfile::TempDir;

/// A temporary SQLite database plus a store handle over it
///
/// The TempDir must stay alive for the duration of the test, or the
/// database file disappears under the store.
pub struct TestDb {
    pub dir: TempDir,
    pub store: Store,
}

/// Create the five relations and the activity aggregate view
pub fn empty_db() -> TestDb {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("intel.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE groups (
             id INTEGER PRIMARY KEY,
             name TEXT NOT NULL,
             synopsis TEXT,
             motivation TEXT,
             total_victims INTEGER
         );

         CREATE TABLE group_aliases (
             id INTEGER PRIMARY KEY AUTOINCREMENT,
             group_id INTEGER NOT NULL REFERENCES groups(id),
             alias TEXT NOT NULL
         );

         CREATE TABLE incidents (
             id INTEGER PRIMARY KEY,
             group_id INTEGER REFERENCES groups(id),
             victim_name TEXT,
             sector TEXT,
             country TEXT,
             incident_date TEXT,
             data_exposed TEXT,
             source_url TEXT
         );

         CREATE TABLE ttps (
             id INTEGER PRIMARY KEY,
             attack_id TEXT NOT NULL,
             title TEXT NOT NULL
         );

         CREATE TABLE incident_ttps (
             incident_id INTEGER NOT NULL REFERENCES incidents(id),
             ttp_id INTEGER NOT NULL REFERENCES ttps(id)
         );

         CREATE VIEW group_activity_summary AS
         SELECT group_id,
                MIN(incident_date) AS first_incident,
                MAX(incident_date) AS last_incident,
                COUNT(*) AS total_incidents
         FROM incidents
         WHERE group_id IS NOT NULL
         GROUP BY group_id;",
    )
    .unwrap();

    let store = Store::open(&path);
    TestDb { dir, store }
}

/// Create a database populated with a small cross-group fixture set
///
/// Incident counts per group: Lockbit 3, Akira 2, Conti 2, Quietworm 0.
pub fn seeded_db() -> TestDb {
    let db = empty_db();
    let conn = Connection::open(db.dir.path().join("intel.db")).unwrap();

    conn.execute_batch(
        "INSERT INTO groups (id, name, synopsis, motivation, total_victims) VALUES
             (1, 'Lockbit', 'Ransomware-as-a-service operation.', 'Financial', 150),
             (2, 'Conti', NULL, 'Financial', NULL),
             (3, 'Quietworm', 'Rarely observed.', NULL, NULL),
             (4, 'Akira', 'Emerged in 2023.', 'Financial', 40);

         INSERT INTO group_aliases (group_id, alias) VALUES
             (1, 'Lockbit 3.0'),
             (1, 'ABCD Gang'),
             (1, 'Lockbit Black'),
             (2, 'Wizard Spider');

         INSERT INTO ttps (id, attack_id, title) VALUES
             (1, 'T1486', 'Data Encrypted for Impact'),
             (2, 'T1566', 'Phishing'),
             (3, 'T1059', 'Command and Scripting Interpreter');",
    )
    .unwrap();

    // Lockbit incidents
    let beta_description = "x".repeat(300);
    insert_incident(
        &conn,
        1,
        Some(1),
        "Alpha Hospital",
        Some("Healthcare"),
        Some("Germany"),
        Some("2023-01-01"),
        None,
        None,
    );
    insert_incident(
        &conn,
        2,
        Some(1),
        "Beta Bank",
        Some("Finance"),
        Some("France"),
        Some("2023-06-01"),
        Some(beta_description.as_str()),
        None,
    );
    insert_incident(
        &conn,
        3,
        Some(1),
        "Gamma Corp",
        Some("Healthcare"),
        Some("Germany"),
        Some("2022-03-15"),
        None,
        Some("https://leaks.example/gamma"),
    );

    // Conti incidents; sector label contains "Healthcare" as a substring
    // of a different label, exercising exact-match filtering
    insert_incident(
        &conn,
        4,
        Some(2),
        "Delta Logistics",
        Some("Healthcare Services"),
        Some("United States"),
        Some("2022-11-20"),
        None,
        None,
    );
    insert_incident(
        &conn,
        5,
        Some(2),
        "Epsilon Mining",
        Some("Healthcare Services"),
        Some("Canada"),
        Some("2021-08-05"),
        None,
        None,
    );

    // Akira incidents, equal completeness scores for tiebreak testing
    insert_incident(
        &conn,
        6,
        Some(4),
        "Zeta Utilities",
        Some("Energy"),
        Some("Japan"),
        Some("2023-09-01"),
        None,
        None,
    );
    insert_incident(
        &conn,
        7,
        Some(4),
        "Eta Power",
        Some("Energy"),
        Some("Japan"),
        Some("2024-02-10"),
        None,
        None,
    );

    conn.execute_batch(
        "INSERT INTO incident_ttps (incident_id, ttp_id) VALUES
             (2, 1),
             (4, 2);",
    )
    .unwrap();

    db
}

#[allow(clippy::too_many_arguments)]
fn insert_incident(
    conn: &Connection,
    id: i64,
    group_id: Option<i64>,
    victim_name: &str,
    sector: Option<&str>,
    country: Option<&str>,
    incident_date: Option<&str>,
    data_exposed: Option<&str>,
    source_url: Option<&str>,
) {
    conn.execute(
        "INSERT INTO incidents
             (id, group_id, victim_name, sector, country, incident_date, data_exposed, source_url)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            id,
            group_id,
            victim_name,
            sector,
            country,
            incident_date,
            data_exposed,
            source_url
        ],
    )
    .unwrap();
}
