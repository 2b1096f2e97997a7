use super::Severity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of an alert. Immutable once the alert is fetched;
/// selection never mutates the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertStatus {
    New,
    Investigating,
    Resolved,
}

impl Default for AlertStatus {
    fn default() -> Self {
        AlertStatus::New
    }
}

/// Alert - a single endpoint detection event
///
/// Field names serialize in camelCase to match the dashboard wire format.
/// Optional fields are omitted from serialized output when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub severity: Severity,
    pub endpoint: String,
    pub user: String,
    pub process_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_process_name: Option<String>,
    pub file_path: String,
    pub command_line: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mitre_tactic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mitre_technique: Option<String>,
    #[serde(default)]
    pub status: AlertStatus,
}

impl Alert {
    /// Builds the MITRE ATT&CK reference URL for this alert's technique,
    /// if one is mapped. Sub-technique ids like "T1059.001" map to the
    /// "T1059/001" URL path.
    pub fn mitre_technique_url(&self) -> Option<String> {
        self.mitre_technique.as_ref().map(|technique| {
            format!(
                "https://attack.mitre.org/techniques/{}/",
                technique.replace('.', "/")
            )
        })
    }
}
