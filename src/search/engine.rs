//! Search execution and result post-processing

use std::collections::BTreeSet;

use validator::Validate;

use crate::error::Result;
use crate::models::{FilterOptions, GroupSummary};
use crate::search::query::{build_search_query, SearchContext, SearchRequest};
use crate::store::{GroupSearchRow, Store};

/// Stateless engine running filtered group searches against the store
#[derive(Debug, Clone)]
pub struct SearchEngine {
    store: Store,
}

impl SearchEngine {
    /// Create an engine over the given store
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Distinct filter values for the search controls
    pub fn filter_options(&self) -> Result<FilterOptions> {
        self.store.filter_options()
    }

    /// Run a filtered search, returning ranked group summaries
    ///
    /// Results are ordered by incident count descending, then group name
    /// ascending; groups with no incident surviving the filters are
    /// excluded by the query itself.
    pub fn search(&self, request: &SearchRequest) -> Result<Vec<GroupSummary>> {
        request.validate()?;

        let ctx = request.context();
        let query = build_search_query(&ctx);

        tracing::debug!(
            has_query = ctx.has_query(),
            bindings = query.bindings.len(),
            "Executing group search"
        );

        let rows = self.store.search_groups(&query.sql, &query.bindings)?;
        Ok(rows.into_iter().map(|row| summarize(row, &ctx)).collect())
    }
}

/// Convert one aggregated row into a response summary
fn summarize(row: GroupSearchRow, ctx: &SearchContext) -> GroupSummary {
    let match_reasons = match_reasons(&row, ctx);
    GroupSummary {
        group_id: row.group_id,
        group_name: row.group_name,
        incident_count: row.incident_count,
        sectors: dedup_sorted(row.sectors.as_deref()),
        countries: dedup_sorted(row.countries.as_deref()),
        match_reasons,
        first_incident: row.first_incident,
        last_incident: row.last_incident,
    }
}

/// Split a GROUP_CONCAT value into a deduplicated, sorted list
fn dedup_sorted(concat: Option<&str>) -> Vec<String> {
    let mut values = BTreeSet::new();
    if let Some(joined) = concat {
        for part in joined.split(',') {
            if !part.is_empty() {
                values.insert(part.to_string());
            }
        }
    }
    values.into_iter().collect()
}

/// Build the ordered match-reason list for one result row
///
/// Reasons appear in fixed field order: name, alias, sector, ttp, victim.
/// When no free-text query was given the wildcard pattern would flag every
/// populated field as matched, so attribution is suppressed entirely.
fn match_reasons(row: &GroupSearchRow, ctx: &SearchContext) -> Vec<String> {
    if !ctx.has_query() {
        return Vec::new();
    }

    let mut reasons = Vec::new();
    if row.matched_name {
        reasons.push("Group Name".to_string());
    }
    if row.matched_alias {
        if let Some(joined) = row.matching_aliases.as_deref() {
            // Surface up to 2 matching aliases by name
            let aliases: Vec<&str> = joined.split(',').filter(|a| !a.is_empty()).take(2).collect();
            if !aliases.is_empty() {
                reasons.push(format!("Alias: {}", aliases.join(", ")));
            }
        }
    }
    if row.matched_sector {
        reasons.push("Sector".to_string());
    }
    if row.matched_ttp {
        reasons.push("TTP".to_string());
    }
    if row.matched_victim {
        reasons.push("Victim Name".to_string());
    }
    reasons
}
