use crate::shared::Result;
use crate::triage::domain::{Alert, Severity, Vulnerability};
use serde::Serialize;

/// AlertAnalysisPayload - the normalized request payload for alert analysis
///
/// Holds a fixed whitelisted subset of alert fields: never the full
/// record, never any locally-added AI fields. Absent optional fields are
/// omitted from serialization rather than sent as null. Building a
/// payload has no side effects.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertAnalysisPayload<'a> {
    pub process_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_process_name: Option<&'a str>,
    pub file_path: &'a str,
    pub command_line: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<&'a str>,
    pub user: &'a str,
    pub severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mitre_tactic: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mitre_technique: Option<&'a str>,
}

impl<'a> AlertAnalysisPayload<'a> {
    pub fn from_alert(alert: &'a Alert) -> Self {
        Self {
            process_name: &alert.process_name,
            parent_process_name: alert.parent_process_name.as_deref(),
            file_path: &alert.file_path,
            command_line: &alert.command_line,
            ip_address: alert.ip_address.as_deref(),
            user: &alert.user,
            severity: alert.severity,
            mitre_tactic: alert.mitre_tactic.as_deref(),
            mitre_technique: alert.mitre_technique.as_deref(),
        }
    }

    /// Serializes the payload as pretty-printed JSON for prompt embedding
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// VulnerabilityAnalysisPayload - the normalized request payload for
/// vulnerability analysis: CVE id, description, severity, affected asset.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VulnerabilityAnalysisPayload<'a> {
    pub cve_id: &'a str,
    pub description: &'a str,
    pub severity: Severity,
    pub affected_asset: &'a str,
}

impl<'a> VulnerabilityAnalysisPayload<'a> {
    pub fn from_vulnerability(vulnerability: &'a Vulnerability) -> Self {
        Self {
            cve_id: &vulnerability.cve_id,
            description: &vulnerability.description,
            severity: vulnerability.severity,
            affected_asset: &vulnerability.affected_asset,
        }
    }

    /// Serializes the payload as pretty-printed JSON for prompt embedding
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::triage::domain::{AlertStatus, VulnerabilityStatus};
    use chrono::{NaiveDate, TimeZone, Utc};
    use std::collections::BTreeSet;

    fn sample_alert() -> Alert {
        Alert {
            id: "1".to_string(),
            timestamp: Utc.with_ymd_and_hms(2023, 10, 27, 10, 0, 0).unwrap(),
            severity: Severity::High,
            endpoint: "WS-FINANCE-03".to_string(),
            user: "j.doe".to_string(),
            process_name: "powershell.exe".to_string(),
            parent_process_name: Some("explorer.exe".to_string()),
            file_path: "C:\\Windows\\System32\\".to_string(),
            command_line: "powershell -enc JABjAGw...".to_string(),
            ip_address: Some("198.51.100.24".to_string()),
            mitre_tactic: Some("Execution".to_string()),
            mitre_technique: Some("T1059.001".to_string()),
            status: AlertStatus::New,
        }
    }

    fn sample_vulnerability() -> Vulnerability {
        Vulnerability {
            id: "vuln-1".to_string(),
            cve_id: "CVE-2021-44228".to_string(),
            name: "Apache Log4j Remote Code Execution".to_string(),
            severity: Severity::Critical,
            affected_asset: "prod-web-server-01".to_string(),
            description: "Log4Shell allows remote code execution.".to_string(),
            published_date: NaiveDate::from_ymd_opt(2021, 12, 10).unwrap(),
            cve_link: "https://nvd.nist.gov/vuln/detail/CVE-2021-44228".to_string(),
            remediation: "Upgrade to 2.17.1 or later.".to_string(),
            status: VulnerabilityStatus::New,
        }
    }

    const ALERT_WHITELIST: &[&str] = &[
        "processName",
        "parentProcessName",
        "filePath",
        "commandLine",
        "ipAddress",
        "user",
        "severity",
        "mitreTactic",
        "mitreTechnique",
    ];

    #[test]
    fn test_alert_payload_contains_only_whitelisted_fields() {
        let alert = sample_alert();
        let payload = AlertAnalysisPayload::from_alert(&alert);
        let value = serde_json::to_value(&payload).unwrap();
        let keys: BTreeSet<&str> = value
            .as_object()
            .unwrap()
            .keys()
            .map(|k| k.as_str())
            .collect();

        for key in &keys {
            assert!(
                ALERT_WHITELIST.contains(key),
                "unexpected field in payload: {}",
                key
            );
        }
        // Record identity and lifecycle fields must never leak
        assert!(!keys.contains("id"));
        assert!(!keys.contains("endpoint"));
        assert!(!keys.contains("timestamp"));
        assert!(!keys.contains("status"));
    }

    #[test]
    fn test_alert_payload_omits_absent_optionals() {
        let mut alert = sample_alert();
        alert.parent_process_name = None;
        alert.ip_address = None;
        alert.mitre_tactic = None;
        alert.mitre_technique = None;

        let payload = AlertAnalysisPayload::from_alert(&alert);
        let value = serde_json::to_value(&payload).unwrap();
        let object = value.as_object().unwrap();
        assert!(!object.contains_key("parentProcessName"));
        assert!(!object.contains_key("ipAddress"));
        assert!(!object.contains_key("mitreTactic"));
        assert!(!object.contains_key("mitreTechnique"));
        // Required fields are still present
        assert_eq!(object["processName"], "powershell.exe");
        assert_eq!(object["severity"], "High");
    }

    #[test]
    fn test_vulnerability_payload_fields() {
        let vulnerability = sample_vulnerability();
        let payload = VulnerabilityAnalysisPayload::from_vulnerability(&vulnerability);
        let value = serde_json::to_value(&payload).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 4);
        assert_eq!(object["cveId"], "CVE-2021-44228");
        assert_eq!(object["severity"], "Critical");
        assert_eq!(object["affectedAsset"], "prod-web-server-01");
        assert!(!object.contains_key("remediation"));
        assert!(!object.contains_key("cveLink"));
    }

    #[test]
    fn test_payload_to_json_is_pretty_printed() {
        let alert = sample_alert();
        let json = AlertAnalysisPayload::from_alert(&alert).to_json().unwrap();
        assert!(json.contains('\n'));
        assert!(json.contains("\"processName\": \"powershell.exe\""));
    }
}
