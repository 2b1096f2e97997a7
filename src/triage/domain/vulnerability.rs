use super::Severity;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a vulnerability finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VulnerabilityStatus {
    New,
    Patching,
    Resolved,
}

impl Default for VulnerabilityStatus {
    fn default() -> Self {
        VulnerabilityStatus::New
    }
}

/// Vulnerability - a known weakness on a tracked asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vulnerability {
    pub id: String,
    pub cve_id: String,
    pub name: String,
    pub severity: Severity,
    pub affected_asset: String,
    pub description: String,
    pub published_date: NaiveDate,
    pub cve_link: String,
    pub remediation: String,
    #[serde(default)]
    pub status: VulnerabilityStatus,
}
