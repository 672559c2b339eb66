//! Vulnerability facts extracted from documents that embed them.

use super::record::{NOT_AVAILABLE, UNKNOWN_COMPONENT};
use serde::{Deserialize, Serialize};

pub const UNKNOWN_CVE: &str = "Unknown CVE";
pub const UNKNOWN_SEVERITY: &str = "Unknown";
pub const NO_DESCRIPTION: &str = "No description available.";
pub const NO_RECOMMENDATION: &str = "No recommendation available.";
pub const UNKNOWN_SOURCE: &str = "Unknown Source";
pub const NO_SOURCE_URL: &str = "No URL provided";

/// One vulnerability reported against one component.
///
/// Every field is always populated; missing source data is replaced by an
/// explicit placeholder rather than left empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VulnerabilityFact {
    pub cve_id: String,
    pub severity: String,
    pub score: String,
    pub description: String,
    pub recommendation: String,
    pub source_name: String,
    pub source_url: String,
    pub component: String,
    pub version: String,
    /// File the fact was read from
    pub origin_file: String,
}

impl Default for VulnerabilityFact {
    fn default() -> Self {
        Self {
            cve_id: UNKNOWN_CVE.to_string(),
            severity: UNKNOWN_SEVERITY.to_string(),
            score: NOT_AVAILABLE.to_string(),
            description: NO_DESCRIPTION.to_string(),
            recommendation: NO_RECOMMENDATION.to_string(),
            source_name: UNKNOWN_SOURCE.to_string(),
            source_url: NO_SOURCE_URL.to_string(),
            component: UNKNOWN_COMPONENT.to_string(),
            version: NOT_AVAILABLE.to_string(),
            origin_file: String::new(),
        }
    }
}
