//! Group profile assembly

use crate::error::{AppError, Result};
use crate::models::{GroupProfile, IncidentDetail, ProfileSummary};
use crate::profile::score::{rank_incidents, ScoredIncident};
use crate::store::Store;

/// Display sentinel for fields without data
const NOT_AVAILABLE: &str = "N/A";

/// Builds detail payloads for single threat groups
#[derive(Debug, Clone)]
pub struct ProfileService {
    store: Store,
}

impl ProfileService {
    /// Create a service over the given store
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Assemble the full profile for a group
    ///
    /// Fails with NotFound when the id does not resolve to a group; no
    /// partial payload is returned.
    pub fn group_profile(&self, group_id: i64) -> Result<GroupProfile> {
        let group = self
            .store
            .group_by_id(group_id)?
            .ok_or_else(|| AppError::NotFound(format!("group {group_id}")))?;

        let aliases = self.store.group_aliases(group_id)?;
        let countries = self.store.group_countries(group_id)?;
        let sectors = self.store.group_sectors(group_id)?;
        let ttps = self.store.group_ttps(group_id)?;
        let activity = self.store.group_activity(group_id)?;

        let mut scored = Vec::new();
        for incident in self.store.group_incidents(group_id)? {
            let incident_ttps = self.store.incident_ttps(incident.id)?;
            scored.push(ScoredIncident::new(incident, incident_ttps));
        }

        let incidents = rank_incidents(scored)
            .into_iter()
            .map(incident_detail)
            .collect();

        let (first_seen, last_seen) = match &activity {
            Some(window) => (
                present_or_na(window.first_incident.as_deref()),
                present_or_na(window.last_incident.as_deref()),
            ),
            None => (NOT_AVAILABLE.to_string(), NOT_AVAILABLE.to_string()),
        };

        let summary = ProfileSummary {
            group_name: group.name,
            aliases: join_or_na(&aliases),
            synopsis: group
                .synopsis
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "No synopsis available.".to_string()),
            motivation: present_or_na(group.motivation.as_deref()),
            regions: join_or_na(&countries),
            industries: join_or_na(&sectors),
            mitre_ttps: join_or_na(&ttps),
            total_victims: group
                .total_victims
                .map(|n| n.to_string())
                .unwrap_or_else(|| "0".to_string()),
            first_seen,
            last_seen,
        };

        Ok(GroupProfile { summary, incidents })
    }
}

/// Render a ranked incident into its response record
fn incident_detail(scored: ScoredIncident) -> IncidentDetail {
    let incident = scored.incident;
    IncidentDetail {
        victim_name: incident
            .victim_name
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| "Unknown Victim".to_string()),
        victim_sector: present_or_na(incident.sector.as_deref()),
        victim_country: present_or_na(incident.country.as_deref()),
        date_of_leak: present_or_na(incident.incident_date.as_deref()),
        data_exposed: present_or_na(incident.data_exposed.as_deref()),
        mitre_ttps: join_or_na(&scored.ttps),
        source_url: incident.source_url,
    }
}

fn present_or_na(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => NOT_AVAILABLE.to_string(),
    }
}

fn join_or_na(values: &[String]) -> String {
    if values.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        values.join(", ")
    }
}
