//! Incident completeness scoring

use std::cmp::Ordering;

use crate::store::IncidentRow;

/// An incident annotated with its techniques and completeness score
#[derive(Debug, Clone)]
pub struct ScoredIncident {
    pub incident: IncidentRow,
    /// Distinct technique display strings, sorted by attack id
    pub ttps: Vec<String>,
    pub score: f64,
}

impl ScoredIncident {
    /// Score an incident against its associated techniques
    pub fn new(incident: IncidentRow, ttps: Vec<String>) -> Self {
        let score = completeness_score(&incident, ttps.len());
        Self {
            incident,
            ttps,
            score,
        }
    }
}

/// Weighted completeness score for a single incident
///
/// - 1 point per populated field among sector, data_exposed, source_url
/// - 0.1 point per 100 characters of data_exposed, uncapped
/// - 0.5 points per associated technique
///
/// A heuristic ranking signal rewarding evidentiary richness, not a
/// probability. Pure function of the incident's own fields and its
/// technique count.
pub fn completeness_score(incident: &IncidentRow, ttp_count: usize) -> f64 {
    let presence_bonus = [
        incident.sector.as_deref(),
        incident.data_exposed.as_deref(),
        incident.source_url.as_deref(),
    ]
    .into_iter()
    .filter(|field| is_populated(*field))
    .count() as f64;

    let length_bonus = incident
        .data_exposed
        .as_deref()
        .map_or(0.0, |text| text.chars().count() as f64)
        / 100.0;

    let technique_bonus = 0.5 * ttp_count as f64;

    presence_bonus + length_bonus + technique_bonus
}

fn is_populated(field: Option<&str>) -> bool {
    field.is_some_and(|value| !value.is_empty())
}

/// Order incidents by descending score, then descending incident date
///
/// Missing dates sort as the lowest value, so undated incidents land last
/// among equally-scored peers. The tiebreak is deterministic.
pub fn rank_incidents(mut incidents: Vec<ScoredIncident>) -> Vec<ScoredIncident> {
    incidents.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| b.incident.incident_date.cmp(&a.incident.incident_date))
    });
    incidents
}
