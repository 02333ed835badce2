//! Search request parsing and query construction

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Filter payload accepted by the search endpoint
///
/// Every field is optional; an empty or whitespace-only value means the
/// filter is not applied.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct SearchRequest {
    /// Free-text query across names, aliases, sectors, techniques and victims
    #[serde(default)]
    #[validate(length(max = 200))]
    pub query: String,

    /// Exact-match victim sector filter
    #[serde(default)]
    #[validate(length(max = 200))]
    pub sector: String,

    /// Exact-match victim country filter
    #[serde(default)]
    #[validate(length(max = 200))]
    pub country: String,

    /// Exact-match technique filter ("{attack_id} {title}")
    #[serde(default)]
    #[validate(length(max = 200))]
    pub ttp: String,

    /// Inclusive lower bound on incident date
    #[serde(default)]
    #[validate(length(max = 32))]
    pub date_from: String,

    /// Inclusive upper bound on incident date
    #[serde(default)]
    #[validate(length(max = 32))]
    pub date_to: String,
}

impl SearchRequest {
    /// Trim the request into an immutable search context
    pub fn context(&self) -> SearchContext {
        SearchContext {
            query: non_empty(&self.query),
            sector: non_empty(&self.sector),
            country: non_empty(&self.country),
            ttp: non_empty(&self.ttp),
            date_from: non_empty(&self.date_from),
            date_to: non_empty(&self.date_to),
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Immutable, trimmed view of a search request
///
/// Passed to every predicate and attribution evaluator so the match
/// pattern is a single explicit value rather than shared mutable state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchContext {
    pub query: Option<String>,
    pub sector: Option<String>,
    pub country: Option<String>,
    pub ttp: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

impl SearchContext {
    /// Whether a free-text query was given
    pub fn has_query(&self) -> bool {
        self.query.is_some()
    }

    /// Wildcard containment pattern for the free-text query
    ///
    /// Falls back to the match-everything pattern when no query was
    /// given, keeping the attribution columns well-formed.
    pub fn like_pattern(&self) -> String {
        match &self.query {
            Some(query) => format!("%{query}%"),
            None => "%".to_string(),
        }
    }
}

/// One conjunctive predicate: a SQL fragment plus its bound values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    pub sql: String,
    pub bindings: Vec<String>,
}

/// A fully assembled query with bindings in placeholder order
#[derive(Debug, Clone)]
pub struct BoundQuery {
    pub sql: String,
    pub bindings: Vec<String>,
}

/// Free-text containment across the five searchable fields
pub fn text_predicate(ctx: &SearchContext) -> Option<Predicate> {
    ctx.query.as_ref()?;
    let pattern = ctx.like_pattern();
    Some(Predicate {
        sql: "(g.name LIKE ? \
               OR ga.alias LIKE ? \
               OR i.sector LIKE ? \
               OR (t.attack_id || ' ' || t.title) LIKE ? \
               OR i.victim_name LIKE ?)"
            .to_string(),
        bindings: vec![pattern; 5],
    })
}

/// Exact-match sector filter
pub fn sector_predicate(ctx: &SearchContext) -> Option<Predicate> {
    ctx.sector.as_ref().map(|sector| Predicate {
        sql: "i.sector = ?".to_string(),
        bindings: vec![sector.clone()],
    })
}

/// Exact-match country filter
pub fn country_predicate(ctx: &SearchContext) -> Option<Predicate> {
    ctx.country.as_ref().map(|country| Predicate {
        sql: "i.country = ?".to_string(),
        bindings: vec![country.clone()],
    })
}

/// Exact-match technique filter against the display string
pub fn ttp_predicate(ctx: &SearchContext) -> Option<Predicate> {
    ctx.ttp.as_ref().map(|ttp| Predicate {
        sql: "(t.attack_id || ' ' || t.title) = ?".to_string(),
        bindings: vec![ttp.clone()],
    })
}

/// Inclusive lexical lower bound on incident date
pub fn date_from_predicate(ctx: &SearchContext) -> Option<Predicate> {
    ctx.date_from.as_ref().map(|date| Predicate {
        sql: "i.incident_date >= ?".to_string(),
        bindings: vec![date.clone()],
    })
}

/// Inclusive lexical upper bound on incident date
pub fn date_to_predicate(ctx: &SearchContext) -> Option<Predicate> {
    ctx.date_to.as_ref().map(|date| Predicate {
        sql: "i.incident_date <= ?".to_string(),
        bindings: vec![date.clone()],
    })
}

/// All applicable predicates for a context, in clause order
pub fn predicates(ctx: &SearchContext) -> Vec<Predicate> {
    [
        text_predicate(ctx),
        sector_predicate(ctx),
        country_predicate(ctx),
        ttp_predicate(ctx),
        date_from_predicate(ctx),
        date_to_predicate(ctx),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Selection head of the group search query
///
/// The six leading placeholders carry the attribution pattern: the five
/// matched_* flags record which fields the free-text query hit, and the
/// sixth collects the alias strings that hit it.
const SEARCH_HEAD: &str = "\
    SELECT \
        g.id AS group_id, \
        g.name AS group_name, \
        COUNT(DISTINCT i.id) AS incident_count, \
        GROUP_CONCAT(DISTINCT i.sector) AS sectors, \
        GROUP_CONCAT(DISTINCT i.country) AS countries, \
        MAX(CASE WHEN g.name LIKE ? THEN 1 ELSE 0 END) AS matched_name, \
        MAX(CASE WHEN ga.alias LIKE ? THEN 1 ELSE 0 END) AS matched_alias, \
        MAX(CASE WHEN i.sector LIKE ? THEN 1 ELSE 0 END) AS matched_sector, \
        MAX(CASE WHEN (t.attack_id || ' ' || t.title) LIKE ? THEN 1 ELSE 0 END) AS matched_ttp, \
        MAX(CASE WHEN i.victim_name LIKE ? THEN 1 ELSE 0 END) AS matched_victim, \
        GROUP_CONCAT(DISTINCT CASE WHEN ga.alias LIKE ? THEN ga.alias END) AS matching_aliases, \
        MIN(i.incident_date) AS first_incident, \
        MAX(i.incident_date) AS last_incident \
    FROM groups g \
    LEFT JOIN incidents i ON g.id = i.group_id \
    LEFT JOIN group_aliases ga ON g.id = ga.group_id \
    LEFT JOIN incident_ttps it ON i.id = it.incident_id \
    LEFT JOIN ttps t ON it.ttp_id = t.id \
    WHERE 1=1";

/// Grouping, zero-incident exclusion and result ordering
const SEARCH_TAIL: &str = " \
    GROUP BY g.id, g.name \
    HAVING incident_count > 0 \
    ORDER BY incident_count DESC, g.name ASC";

/// Assemble the full group search query for a context
///
/// Clauses are conjunctive and appended only when their source filter is
/// present; every value travels as a binding.
pub fn build_search_query(ctx: &SearchContext) -> BoundQuery {
    let pattern = ctx.like_pattern();
    let mut sql = SEARCH_HEAD.to_string();
    let mut bindings = vec![pattern; 6];

    for predicate in predicates(ctx) {
        sql.push_str(" AND ");
        sql.push_str(&predicate.sql);
        bindings.extend(predicate.bindings);
    }

    sql.push_str(SEARCH_TAIL);
    BoundQuery { sql, bindings }
}
