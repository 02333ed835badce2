use serde::{Deserialize, Serialize};

/// A single incident in a group detail payload
///
/// Missing fields are rendered as display sentinels so the payload never
/// carries empty strings masquerading as data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncidentDetail {
    /// Victim organisation name ("Unknown Victim" when absent)
    pub victim_name: String,

    /// Victim sector ("N/A" when absent)
    pub victim_sector: String,

    /// Victim country ("N/A" when absent)
    pub victim_country: String,

    /// Incident date ("N/A" when absent)
    pub date_of_leak: String,

    /// Description of the data exposed ("N/A" when absent)
    pub data_exposed: String,

    /// Techniques used, comma-joined display strings ("N/A" when none)
    pub mitre_ttps: String,

    /// Source URL, passed through unmodified
    pub source_url: Option<String>,
}
