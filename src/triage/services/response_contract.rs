//! Structured-output contract between the triage pipeline and the
//! generative-AI backend.
//!
//! The schemas declared here are sent with every analysis request so the
//! backend constrains its output; the field descriptions instruct the
//! model on intended semantics and are not validated locally. Local
//! validation is purely structural: the returned JSON text must parse
//! into the corresponding domain type, otherwise the call fails with
//! `TriageError::ResponseMalformed`.

use crate::shared::{Result, TriageError};
use crate::triage::domain::{AlertExplanation, VulnerabilityAnalysis};
use serde_json::{json, Value};

/// Declares the required structure of an alert explanation response.
pub fn alert_explanation_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "summary": {
                "type": "STRING",
                "description": "A 1-2 sentence plain English summary of the threat, explaining WHAT it is and WHY it is potentially malicious, incorporating the MITRE tactic."
            },
            "riskScore": {
                "type": "INTEGER",
                "description": "A numerical risk score from 1 (very low) to 10 (critical), based on the provided data and MITRE context."
            },
            "recommendation": {
                "type": "STRING",
                "description": "A clear, single, actionable next step for the IT administrator."
            },
            "rationale": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "Ordered list of short factors that drove the risk score."
            },
            "remediationCommands": {
                "type": "OBJECT",
                "properties": {
                    "powershell": {
                        "type": "STRING",
                        "description": "A PowerShell command for Windows remediation."
                    },
                    "bash": {
                        "type": "STRING",
                        "description": "A Bash command for Linux/macOS remediation."
                    }
                },
                "required": ["powershell", "bash"]
            }
        },
        "required": ["summary", "riskScore", "recommendation", "rationale", "remediationCommands"]
    })
}

/// Declares the required structure of a vulnerability analysis response.
pub fn vulnerability_analysis_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "summary": {
                "type": "STRING",
                "description": "A contextual summary of the vulnerability and its relevance to the affected asset."
            },
            "priorityScore": {
                "type": "INTEGER",
                "description": "A prioritization score from 1 (defer) to 10 (patch immediately)."
            },
            "recommendation": {
                "type": "STRING",
                "description": "A strategic remediation recommendation for the IT administrator."
            }
        },
        "required": ["summary", "priorityScore", "recommendation"]
    })
}

/// Builds the natural-language instruction prompt for alert analysis,
/// embedding the normalized payload JSON.
pub fn alert_prompt(payload_json: &str) -> String {
    format!(
        "You are a cybersecurity expert for a platform called CyberGuard AI. \
         Your user is an IT administrator, not a security specialist. \
         Analyze the following security alert data, paying close attention to \
         the mapped MITRE ATT&CK framework context. Provide a response in JSON \
         format matching the declared schema. A process spawned by an office \
         product (like WINWORD.EXE) should have a higher risk.\n\n\
         Alert Data:\n{payload_json}\n"
    )
}

/// Builds the natural-language instruction prompt for vulnerability
/// analysis, embedding the normalized payload JSON.
pub fn vulnerability_prompt(payload_json: &str) -> String {
    format!(
        "You are a cybersecurity expert for a platform called CyberGuard AI. \
         Your user is an IT administrator, not a security specialist. \
         Analyze the following vulnerability in the context of the affected \
         asset and provide a response in JSON format matching the declared \
         schema. Internet-facing assets deserve a higher priority score.\n\n\
         Vulnerability Data:\n{payload_json}\n"
    )
}

/// Parses backend text as an alert explanation.
///
/// # Errors
/// Returns `TriageError::ResponseMalformed` if the text is not
/// syntactically parseable as the declared structure.
pub fn parse_alert_explanation(text: &str) -> Result<AlertExplanation> {
    serde_json::from_str(text).map_err(|e| {
        TriageError::ResponseMalformed {
            details: e.to_string(),
        }
        .into()
    })
}

/// Parses backend text as a vulnerability analysis.
///
/// # Errors
/// Returns `TriageError::ResponseMalformed` if the text is not
/// syntactically parseable as the declared structure.
pub fn parse_vulnerability_analysis(text: &str) -> Result<VulnerabilityAnalysis> {
    serde_json::from_str(text).map_err(|e| {
        TriageError::ResponseMalformed {
            details: e.to_string(),
        }
        .into()
    })
}
