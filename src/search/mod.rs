//! Filtered group search
//!
//! Composes an optional free-text predicate with optional structured
//! filters (sector, country, technique, date range) into a single
//! aggregation query, then post-processes the rows into ranked group
//! summaries with match attribution.

pub mod engine;
pub mod query;

pub use engine::SearchEngine;
pub use query::{SearchContext, SearchRequest};
