use crate::triage::domain::{
    Alert, AlertStatus, ChangeType, Metric, Severity, Threat, Vulnerability,
};
use chrono::{DateTime, Duration, Utc};

/// Computes the dashboard metric cards from the fetched record lists.
///
/// `now` is passed in so callers (and tests) control the reference time
/// for the 24h window. The threat card carries its change against the
/// preceding 24h window.
pub fn dashboard_metrics(
    alerts: &[Alert],
    vulnerabilities: &[Vulnerability],
    now: DateTime<Utc>,
) -> Vec<Metric> {
    let window_start = now - Duration::hours(24);
    let previous_start = now - Duration::hours(48);
    let detected_24h = alerts
        .iter()
        .filter(|a| a.timestamp >= window_start && a.timestamp <= now)
        .count();
    let detected_previous_24h = alerts
        .iter()
        .filter(|a| a.timestamp >= previous_start && a.timestamp < window_start)
        .count();
    let open_alerts = alerts
        .iter()
        .filter(|a| a.status != AlertStatus::Resolved)
        .count();
    let critical_vulnerabilities = vulnerabilities
        .iter()
        .filter(|v| v.severity == Severity::Critical)
        .count();

    let mut threats = Metric::new("Threats Detected (24h)", detected_24h.to_string());
    let delta = detected_24h as i64 - detected_previous_24h as i64;
    if delta != 0 {
        threats.change = Some(format!("{:+}", delta));
        threats.change_type = Some(if delta > 0 {
            ChangeType::Increase
        } else {
            ChangeType::Decrease
        });
    }

    vec![
        Metric::new("Open Alerts", open_alerts.to_string()),
        threats,
        Metric::new(
            "Critical Vulnerabilities",
            critical_vulnerabilities.to_string(),
        ),
        Metric::new("Tracked Vulnerabilities", vulnerabilities.len().to_string()),
    ]
}

/// Derives the threat feed from the alert list, most recent first.
///
/// The feed entry name combines process and tactic so the feed is
/// readable without opening the alert.
pub fn threat_feed(alerts: &[Alert]) -> Vec<Threat> {
    let mut threats: Vec<Threat> = alerts
        .iter()
        .map(|alert| {
            let name = match alert.mitre_tactic.as_deref() {
                Some(tactic) => format!("{} ({})", alert.process_name, tactic),
                None => alert.process_name.clone(),
            };
            Threat {
                id: alert.id.clone(),
                name,
                severity: alert.severity,
                timestamp: alert.timestamp,
            }
        })
        .collect();
    threats.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    threats
}
