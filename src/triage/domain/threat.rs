use super::Severity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Threat - a feed entry summarizing a detection for the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Threat {
    pub id: String,
    pub name: String,
    pub severity: Severity,
    pub timestamp: DateTime<Utc>,
}
