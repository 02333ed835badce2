use serde::{Deserialize, Serialize};

use crate::models::IncidentDetail;

/// A ranked search result entry for a single threat group
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupSummary {
    /// Unique identifier
    pub group_id: i64,

    /// Primary name of the group
    pub group_name: String,

    /// Number of distinct incidents surviving the applied filters
    pub incident_count: i64,

    /// Targeted sectors, deduplicated and sorted
    pub sectors: Vec<String>,

    /// Targeted countries, deduplicated and sorted
    pub countries: Vec<String>,

    /// Why this group matched the free-text query, in fixed field order
    pub match_reasons: Vec<String>,

    /// Date of earliest incident
    pub first_incident: Option<String>,

    /// Date of most recent incident
    pub last_incident: Option<String>,
}

/// Full detail payload for a single threat group
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupProfile {
    /// Profile header fields
    pub summary: ProfileSummary,

    /// Incidents attributed to the group, most complete first
    pub incidents: Vec<IncidentDetail>,
}

/// Profile header for a threat group
///
/// List-valued fields are rendered as comma-joined display strings; any
/// field without data carries the `"N/A"` sentinel rather than an empty
/// collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileSummary {
    /// Primary name of the group
    pub group_name: String,

    /// Known aliases, excluding the primary name
    pub aliases: String,

    /// Synopsis text
    pub synopsis: String,

    /// Motivation label
    pub motivation: String,

    /// Targeted countries
    pub regions: String,

    /// Targeted industries
    pub industries: String,

    /// Distinct MITRE ATT&CK techniques used across all incidents
    pub mitre_ttps: String,

    /// Total victim count
    pub total_victims: String,

    /// Date of earliest recorded incident
    pub first_seen: String,

    /// Date of most recent recorded incident
    pub last_seen: String,
}
