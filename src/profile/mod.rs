//! Group profiles with completeness-ranked incident history
//!
//! Scores each incident by a deterministic weighted formula over populated
//! fields, description length and technique associations, so the most
//! informative incidents surface first.

pub mod score;
pub mod service;

pub use score::{completeness_score, rank_incidents, ScoredIncident};
pub use service::ProfileService;
