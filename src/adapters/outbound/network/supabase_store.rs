use crate::ports::outbound::RecordStore;
use crate::shared::{Result, TriageError};
use crate::triage::domain::{
    Alert, AlertStatus, Severity, Vulnerability, VulnerabilityStatus,
};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

/// Supabase (PostgREST) record store
///
/// Read-only list queries against the hosted database. Ordering is done
/// server-side via the `order` query parameter; any failure surfaces as
/// `DataFetchFailed` with the raw cause preserved for operator
/// debugging.
pub struct SupabaseRecordStore {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl SupabaseRecordStore {
    const TIMEOUT_SECONDS: u64 = 30;

    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("cyberguard/{}", version);
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(Self::TIMEOUT_SECONDS))
            .user_agent(user_agent)
            .build()?;

        let base_url: String = base_url.into();
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    async fn fetch_rows<T: DeserializeOwned>(&self, table: &str, order: &str) -> Result<Vec<T>> {
        let url = format!(
            "{}/rest/v1/{}?select=*&order={}",
            self.base_url,
            table,
            urlencoding::encode(order)
        );

        let fetch_failed = |details: String| TriageError::DataFetchFailed {
            resource: table.to_string(),
            details,
        };

        let response = self
            .client
            .get(&url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| fetch_failed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(fetch_failed(format!("HTTP {}", status)).into());
        }

        let rows: Vec<T> = response
            .json()
            .await
            .map_err(|e| fetch_failed(format!("failed to decode rows: {}", e)))?;
        Ok(rows)
    }
}

#[async_trait]
impl RecordStore for SupabaseRecordStore {
    async fn list_alerts(&self) -> Result<Vec<Alert>> {
        let rows: Vec<AlertRow> = self.fetch_rows("alerts", "timestamp.desc").await?;
        Ok(rows.into_iter().map(Alert::from).collect())
    }

    async fn list_vulnerabilities(&self) -> Result<Vec<Vulnerability>> {
        let rows: Vec<VulnerabilityRow> = self
            .fetch_rows("vulnerabilities", "published_date.desc")
            .await?;
        Ok(rows.into_iter().map(Vulnerability::from).collect())
    }
}

// PostgREST row structures (snake_case columns)

#[derive(Debug, Deserialize)]
struct AlertRow {
    id: String,
    timestamp: DateTime<Utc>,
    severity: Severity,
    endpoint: String,
    user: String,
    process_name: String,
    #[serde(default)]
    parent_process_name: Option<String>,
    file_path: String,
    command_line: String,
    #[serde(default)]
    ip_address: Option<String>,
    #[serde(default)]
    mitre_tactic: Option<String>,
    #[serde(default)]
    mitre_technique: Option<String>,
    #[serde(default)]
    status: AlertStatus,
}

impl From<AlertRow> for Alert {
    fn from(row: AlertRow) -> Self {
        Alert {
            id: row.id,
            timestamp: row.timestamp,
            severity: row.severity,
            endpoint: row.endpoint,
            user: row.user,
            process_name: row.process_name,
            parent_process_name: row.parent_process_name,
            file_path: row.file_path,
            command_line: row.command_line,
            ip_address: row.ip_address,
            mitre_tactic: row.mitre_tactic,
            mitre_technique: row.mitre_technique,
            status: row.status,
        }
    }
}

#[derive(Debug, Deserialize)]
struct VulnerabilityRow {
    id: String,
    cve_id: String,
    name: String,
    severity: Severity,
    affected_asset: String,
    description: String,
    published_date: NaiveDate,
    cve_link: String,
    remediation: String,
    #[serde(default)]
    status: VulnerabilityStatus,
}

impl From<VulnerabilityRow> for Vulnerability {
    fn from(row: VulnerabilityRow) -> Self {
        Vulnerability {
            id: row.id,
            cve_id: row.cve_id,
            name: row.name,
            severity: row.severity,
            affected_asset: row.affected_asset,
            description: row.description,
            published_date: row.published_date,
            cve_link: row.cve_link,
            remediation: row.remediation,
            status: row.status,
        }
    }
}
