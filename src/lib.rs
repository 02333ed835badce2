//! TAIL — Threat Actor Intelligence Lookup
//!
//! A read-only search and browsing service over a relational dataset of
//! ransomware threat-group intelligence: groups, aliases, incidents,
//! victim sectors and countries, and MITRE ATT&CK techniques.
//!
//! Three operations are exposed over HTTP:
//!
//! - **Filter options** — distinct sectors, countries, techniques and the
//!   global incident date range, for populating search controls.
//! - **Search** — a free-text query combined with structured filters,
//!   returning groups ranked by incident volume with per-result match
//!   attribution.
//! - **Group detail** — a single group's profile with its incident
//!   history ordered by a completeness score that rewards evidentiary
//!   richness over recency.
//!
//! All operations are stateless reads; the dataset is never mutated.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod profile;
pub mod search;
pub mod store;
