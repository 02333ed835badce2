use serde::{Deserialize, Serialize};

/// Distinct values available for the search filter controls
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterOptions {
    /// Distinct non-empty victim sectors, sorted ascending
    pub sectors: Vec<String>,

    /// Distinct non-empty victim countries, sorted ascending
    pub countries: Vec<String>,

    /// Technique display strings ("{attack_id} {title}"), sorted by attack id
    pub ttps: Vec<String>,

    /// Earliest non-empty incident date across the dataset
    pub min_date: Option<String>,

    /// Latest non-empty incident date across the dataset
    pub max_date: Option<String>,
}
