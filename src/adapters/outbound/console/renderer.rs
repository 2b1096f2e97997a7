//! Terminal rendering for record lists, metric cards and analysis
//! details. Text output colors severities with owo-colors; JSON output
//! emits the records verbatim for scripting.

use crate::application::SlotState;
use crate::shared::Result;
use crate::triage::domain::{
    Alert, AlertExplanation, Metric, Severity, Threat, Vulnerability, VulnerabilityAnalysis,
};
use owo_colors::OwoColorize;
use std::fmt::Write;

/// Output format for rendered views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderFormat {
    Text,
    Json,
}

fn severity_label(severity: Severity) -> String {
    match severity {
        Severity::Critical => severity.as_str().red().bold().to_string(),
        Severity::High => severity.as_str().red().to_string(),
        Severity::Medium => severity.as_str().yellow().to_string(),
        Severity::Low => severity.as_str().blue().to_string(),
        Severity::Info => severity.as_str().dimmed().to_string(),
    }
}

pub fn render_alert_list(alerts: &[Alert], format: RenderFormat) -> Result<String> {
    if format == RenderFormat::Json {
        return Ok(serde_json::to_string_pretty(alerts)?);
    }

    let mut out = String::new();
    writeln!(out, "Recent Incidents ({})", alerts.len())?;
    for alert in alerts {
        let mitre = match (&alert.mitre_tactic, &alert.mitre_technique) {
            (Some(tactic), Some(technique)) => format!("{} / {}", tactic, technique),
            (Some(tactic), None) => tactic.clone(),
            (None, Some(technique)) => technique.clone(),
            (None, None) => "-".to_string(),
        };
        writeln!(
            out,
            "  [{}] {:<10} {:<20} {:<16} {}",
            alert.id,
            severity_label(alert.severity),
            alert.process_name,
            alert.endpoint,
            mitre
        )?;
    }
    Ok(out)
}

pub fn render_vulnerability_list(
    vulnerabilities: &[Vulnerability],
    format: RenderFormat,
) -> Result<String> {
    if format == RenderFormat::Json {
        return Ok(serde_json::to_string_pretty(vulnerabilities)?);
    }

    let mut out = String::new();
    writeln!(out, "Vulnerability Assessment ({})", vulnerabilities.len())?;
    for vulnerability in vulnerabilities {
        writeln!(
            out,
            "  [{}] {:<10} {:<18} {:<20} published {}",
            vulnerability.id,
            severity_label(vulnerability.severity),
            vulnerability.cve_id,
            vulnerability.affected_asset,
            vulnerability.published_date
        )?;
    }
    Ok(out)
}

pub fn render_metrics(metrics: &[Metric], format: RenderFormat) -> Result<String> {
    if format == RenderFormat::Json {
        return Ok(serde_json::to_string_pretty(metrics)?);
    }

    let mut out = String::new();
    for metric in metrics {
        match &metric.change {
            Some(change) => writeln!(
                out,
                "  {:<26} {} ({} vs prior 24h)",
                metric.title,
                metric.value.bold(),
                change
            )?,
            None => writeln!(out, "  {:<26} {}", metric.title, metric.value.bold())?,
        }
    }
    Ok(out)
}

pub fn render_threat_feed(threats: &[Threat], format: RenderFormat) -> Result<String> {
    if format == RenderFormat::Json {
        return Ok(serde_json::to_string_pretty(threats)?);
    }

    let mut out = String::new();
    writeln!(out, "Threat Feed")?;
    for threat in threats {
        writeln!(
            out,
            "  {}  {:<10} {}",
            threat.timestamp.format("%Y-%m-%d %H:%M"),
            severity_label(threat.severity),
            threat.name
        )?;
    }
    Ok(out)
}

pub fn render_alert_details(
    alert: &Alert,
    analysis: &SlotState<AlertExplanation>,
    format: RenderFormat,
) -> Result<String> {
    if format == RenderFormat::Json {
        let value = match analysis {
            SlotState::Succeeded(explanation) => serde_json::json!({
                "alert": alert,
                "analysis": explanation,
            }),
            _ => serde_json::json!({ "alert": alert }),
        };
        return Ok(serde_json::to_string_pretty(&value)?);
    }

    let mut out = String::new();
    writeln!(out, "Incident Details - Alert {}", alert.id)?;
    writeln!(out, "  Endpoint:       {}", alert.endpoint)?;
    writeln!(out, "  User:           {}", alert.user)?;
    writeln!(out, "  Severity:       {}", severity_label(alert.severity))?;
    writeln!(out, "  Process:        {}", alert.process_name)?;
    if let Some(parent) = &alert.parent_process_name {
        writeln!(out, "  Parent Process: {}", parent)?;
    }
    writeln!(out, "  Command Line:   {}", alert.command_line)?;
    if let Some(ip_address) = &alert.ip_address {
        writeln!(out, "  IP Address:     {}", ip_address)?;
    }
    if let (Some(tactic), Some(technique)) = (&alert.mitre_tactic, &alert.mitre_technique) {
        writeln!(out, "  MITRE ATT&CK:   {} ({})", tactic, technique)?;
        if let Some(url) = alert.mitre_technique_url() {
            writeln!(out, "                  {}", url.dimmed())?;
        }
    }

    writeln!(out)?;
    writeln!(out, "AI-Assisted Triage")?;
    match analysis {
        SlotState::Idle => writeln!(out, "  (no analysis requested)")?,
        SlotState::Loading => writeln!(out, "  Analyzing threat...")?,
        SlotState::Failed(message) => {
            writeln!(out, "  {}", "AI Analysis Failed".red().bold())?;
            writeln!(out, "  {}", message)?;
        }
        SlotState::Succeeded(explanation) => {
            writeln!(out, "  Summary:        {}", explanation.summary)?;
            writeln!(out, "  Risk Score:     {}/10", explanation.risk_score)?;
            writeln!(out, "  Recommendation: {}", explanation.recommendation)?;
            writeln!(out, "  Key Factors:")?;
            for reason in &explanation.rationale {
                writeln!(out, "    - {}", reason)?;
            }
            writeln!(out, "  Remediation Commands:")?;
            writeln!(
                out,
                "    PowerShell: {}",
                explanation.remediation_commands.powershell
            )?;
            writeln!(out, "    Bash:       {}", explanation.remediation_commands.bash)?;
        }
    }
    Ok(out)
}

pub fn render_vulnerability_details(
    vulnerability: &Vulnerability,
    analysis: &SlotState<VulnerabilityAnalysis>,
    format: RenderFormat,
) -> Result<String> {
    if format == RenderFormat::Json {
        let value = match analysis {
            SlotState::Succeeded(result) => serde_json::json!({
                "vulnerability": vulnerability,
                "analysis": result,
            }),
            _ => serde_json::json!({ "vulnerability": vulnerability }),
        };
        return Ok(serde_json::to_string_pretty(&value)?);
    }

    let mut out = String::new();
    writeln!(out, "Vulnerability Details - {}", vulnerability.cve_id)?;
    writeln!(out, "  Name:           {}", vulnerability.name)?;
    writeln!(
        out,
        "  Severity:       {}",
        severity_label(vulnerability.severity)
    )?;
    writeln!(out, "  Affected Asset: {}", vulnerability.affected_asset)?;
    writeln!(out, "  Published:      {}", vulnerability.published_date)?;
    writeln!(out, "  Reference:      {}", vulnerability.cve_link.dimmed())?;
    writeln!(out, "  Description:    {}", vulnerability.description)?;
    writeln!(out, "  Remediation:    {}", vulnerability.remediation)?;

    writeln!(out)?;
    writeln!(out, "AI-Assisted Triage")?;
    match analysis {
        SlotState::Idle => writeln!(out, "  (no analysis requested)")?,
        SlotState::Loading => writeln!(out, "  Analyzing vulnerability...")?,
        SlotState::Failed(message) => {
            writeln!(out, "  {}", "AI Analysis Failed".red().bold())?;
            writeln!(out, "  {}", message)?;
        }
        SlotState::Succeeded(result) => {
            writeln!(out, "  Summary:        {}", result.summary)?;
            writeln!(out, "  Priority Score: {}/10", result.priority_score)?;
            writeln!(out, "  Recommendation: {}", result.recommendation)?;
        }
    }
    Ok(out)
}
