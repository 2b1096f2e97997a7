use serde::{Deserialize, Serialize};

/// Remediation commands keyed by target shell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemediationCommands {
    /// Windows-oriented remediation command
    pub powershell: String,
    /// POSIX-oriented remediation command
    pub bash: String,
}

/// AlertExplanation - the structured AI triage result for an alert
///
/// All fields are required by the response contract: a payload missing
/// any of them fails structural parsing and is never surfaced as a
/// partially-populated success. The risk score is 1-10 by contract but
/// is not enforced locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertExplanation {
    pub summary: String,
    pub risk_score: u8,
    pub recommendation: String,
    /// Ordered list of short strings explaining the score
    pub rationale: Vec<String>,
    pub remediation_commands: RemediationCommands,
}

/// VulnerabilityAnalysis - the structured AI triage result for a
/// vulnerability: contextual summary, prioritization score (1-10) and
/// a strategic recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VulnerabilityAnalysis {
    pub summary: String,
    pub priority_score: u8,
    pub recommendation: String,
}
