//! Read-only data access over the SQLite intelligence database
//!
//! The store holds only the database path; every call opens a fresh
//! read-only connection, so concurrent requests share no state and need
//! no coordination. All user-supplied values are bound as parameters,
//! never interpolated into SQL.

use std::path::PathBuf;

use rusqlite::{params, Connection, OpenFlags, OptionalExtension};

use crate::error::Result;
use crate::models::FilterOptions;

/// Read-only handle to the intelligence database
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

/// One aggregated row of the group search query
#[derive(Debug, Clone)]
pub struct GroupSearchRow {
    pub group_id: i64,
    pub group_name: String,
    pub incident_count: i64,
    /// Comma-joined distinct sectors as produced by GROUP_CONCAT
    pub sectors: Option<String>,
    /// Comma-joined distinct countries as produced by GROUP_CONCAT
    pub countries: Option<String>,
    pub matched_name: bool,
    pub matched_alias: bool,
    pub matched_sector: bool,
    pub matched_ttp: bool,
    pub matched_victim: bool,
    /// Comma-joined aliases that matched the query pattern
    pub matching_aliases: Option<String>,
    pub first_incident: Option<String>,
    pub last_incident: Option<String>,
}

/// A group row from the groups relation
#[derive(Debug, Clone)]
pub struct GroupRecord {
    pub id: i64,
    pub name: String,
    pub synopsis: Option<String>,
    pub motivation: Option<String>,
    pub total_victims: Option<i64>,
}

/// An incident row from the incidents relation
#[derive(Debug, Clone)]
pub struct IncidentRow {
    pub id: i64,
    pub victim_name: Option<String>,
    pub sector: Option<String>,
    pub country: Option<String>,
    pub incident_date: Option<String>,
    pub data_exposed: Option<String>,
    pub source_url: Option<String>,
}

/// A row of the per-group activity aggregate view
#[derive(Debug, Clone)]
pub struct ActivityRow {
    pub first_incident: Option<String>,
    pub last_incident: Option<String>,
    pub total_incidents: i64,
}

impl Store {
    /// Create a store for the database at the given path
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Open a fresh read-only connection
    fn connect(&self) -> Result<Connection> {
        let conn = Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        Ok(conn)
    }

    /// Verify the database is reachable
    pub fn ping(&self) -> Result<()> {
        let conn = self.connect()?;
        conn.query_row("SELECT 1", [], |_| Ok(()))?;
        Ok(())
    }

    /// Distinct filter values and the global incident date range
    pub fn filter_options(&self) -> Result<FilterOptions> {
        let conn = self.connect()?;

        let mut stmt = conn.prepare(
            "SELECT DISTINCT sector
             FROM incidents
             WHERE sector IS NOT NULL AND sector != ''
             ORDER BY sector",
        )?;
        let sectors = stmt
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;

        let mut stmt = conn.prepare(
            "SELECT DISTINCT country
             FROM incidents
             WHERE country IS NOT NULL AND country != ''
             ORDER BY country",
        )?;
        let countries = stmt
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;

        let mut stmt = conn.prepare(
            "SELECT DISTINCT attack_id || ' ' || title
             FROM ttps
             ORDER BY attack_id",
        )?;
        let ttps = stmt
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;

        let (min_date, max_date) = conn.query_row(
            "SELECT MIN(incident_date), MAX(incident_date)
             FROM incidents
             WHERE incident_date IS NOT NULL AND incident_date != ''",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;

        Ok(FilterOptions {
            sectors,
            countries,
            ttps,
            min_date,
            max_date,
        })
    }

    /// Execute an aggregated group search query built by the search engine
    pub fn search_groups(&self, sql: &str, bindings: &[String]) -> Result<Vec<GroupSearchRow>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt
            .query_map(rusqlite::params_from_iter(bindings.iter()), |row| {
                Ok(GroupSearchRow {
                    group_id: row.get("group_id")?,
                    group_name: row.get("group_name")?,
                    incident_count: row.get("incident_count")?,
                    sectors: row.get("sectors")?,
                    countries: row.get("countries")?,
                    matched_name: row.get::<_, i64>("matched_name")? != 0,
                    matched_alias: row.get::<_, i64>("matched_alias")? != 0,
                    matched_sector: row.get::<_, i64>("matched_sector")? != 0,
                    matched_ttp: row.get::<_, i64>("matched_ttp")? != 0,
                    matched_victim: row.get::<_, i64>("matched_victim")? != 0,
                    matching_aliases: row.get("matching_aliases")?,
                    first_incident: row.get("first_incident")?,
                    last_incident: row.get("last_incident")?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    /// Look up a group by id
    pub fn group_by_id(&self, group_id: i64) -> Result<Option<GroupRecord>> {
        let conn = self.connect()?;
        let record = conn
            .query_row(
                "SELECT id, name, synopsis, motivation, total_victims
                 FROM groups
                 WHERE id = ?",
                params![group_id],
                |row| {
                    Ok(GroupRecord {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        synopsis: row.get(2)?,
                        motivation: row.get(3)?,
                        total_victims: row.get(4)?,
                    })
                },
            )
            .optional()?;
        Ok(record)
    }

    /// All aliases for a group, sorted
    pub fn group_aliases(&self, group_id: i64) -> Result<Vec<String>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT alias FROM group_aliases WHERE group_id = ? ORDER BY alias",
        )?;
        let aliases = stmt
            .query_map(params![group_id], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(aliases)
    }

    /// Distinct non-empty countries across a group's incidents, sorted
    pub fn group_countries(&self, group_id: i64) -> Result<Vec<String>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT DISTINCT country
             FROM incidents
             WHERE group_id = ? AND country IS NOT NULL AND country != ''
             ORDER BY country",
        )?;
        let countries = stmt
            .query_map(params![group_id], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(countries)
    }

    /// Distinct non-empty sectors across a group's incidents, sorted
    pub fn group_sectors(&self, group_id: i64) -> Result<Vec<String>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT DISTINCT sector
             FROM incidents
             WHERE group_id = ? AND sector IS NOT NULL AND sector != ''
             ORDER BY sector",
        )?;
        let sectors = stmt
            .query_map(params![group_id], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(sectors)
    }

    /// Activity window for a group from the precomputed aggregate view
    pub fn group_activity(&self, group_id: i64) -> Result<Option<ActivityRow>> {
        let conn = self.connect()?;
        let activity = conn
            .query_row(
                "SELECT first_incident, last_incident, total_incidents
                 FROM group_activity_summary
                 WHERE group_id = ?",
                params![group_id],
                |row| {
                    Ok(ActivityRow {
                        first_incident: row.get(0)?,
                        last_incident: row.get(1)?,
                        total_incidents: row.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(activity)
    }

    /// Distinct technique display strings used by a group, sorted by attack id
    pub fn group_ttps(&self, group_id: i64) -> Result<Vec<String>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT DISTINCT t.attack_id || ' ' || t.title
             FROM ttps t
             JOIN incident_ttps it ON t.id = it.ttp_id
             JOIN incidents i ON it.incident_id = i.id
             WHERE i.group_id = ?
             ORDER BY t.attack_id",
        )?;
        let ttps = stmt
            .query_map(params![group_id], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(ttps)
    }

    /// All incidents attributed to a group, unordered
    pub fn group_incidents(&self, group_id: i64) -> Result<Vec<IncidentRow>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT id, victim_name, sector, country, incident_date, data_exposed, source_url
             FROM incidents
             WHERE group_id = ?",
        )?;
        let incidents = stmt
            .query_map(params![group_id], |row| {
                Ok(IncidentRow {
                    id: row.get(0)?,
                    victim_name: row.get(1)?,
                    sector: row.get(2)?,
                    country: row.get(3)?,
                    incident_date: row.get(4)?,
                    data_exposed: row.get(5)?,
                    source_url: row.get(6)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(incidents)
    }

    /// Distinct technique display strings for one incident, sorted by attack id
    pub fn incident_ttps(&self, incident_id: i64) -> Result<Vec<String>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT DISTINCT t.attack_id || ' ' || t.title
             FROM ttps t
             JOIN incident_ttps it ON t.id = it.ttp_id
             WHERE it.incident_id = ?
             ORDER BY t.attack_id",
        )?;
        let ttps = stmt
            .query_map(params![incident_id], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(ttps)
    }
}
