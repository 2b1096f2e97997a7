//! Integration tests for the selection controller and analysis
//! orchestrator wired against mock backends.

mod test_utilities;

use cyberguard::prelude::*;
use std::sync::Arc;
use test_utilities::mocks::{GatedAnalysisBackend, MockAnalysisBackend, MockProgressReporter};

const ALERT_EXPLANATION_JSON: &str = r#"{
    "summary": "Encoded PowerShell launched from explorer, consistent with the Execution tactic.",
    "riskScore": 8,
    "recommendation": "Isolate WS-FINANCE-03 and reset the user's credentials.",
    "rationale": ["Base64-encoded command line", "MITRE T1059.001 mapping"],
    "remediationCommands": {
        "powershell": "Stop-Process -Name powershell -Force",
        "bash": "pkill -9 pwsh"
    }
}"#;

const VULNERABILITY_ANALYSIS_JSON: &str = r#"{
    "summary": "Log4Shell on an internet-facing web server is actively exploited.",
    "priorityScore": 10,
    "recommendation": "Patch prod-web-server-01 before all other assets."
}"#;

async fn seeded_alert(id: &str) -> Alert {
    let store = StaticRecordStore::seeded();
    store
        .list_alerts()
        .await
        .unwrap()
        .into_iter()
        .find(|a| a.id == id)
        .unwrap_or_else(|| panic!("seed dataset has no alert '{}'", id))
}

async fn seeded_vulnerability(cve_id: &str) -> Vulnerability {
    let store = StaticRecordStore::seeded();
    store
        .list_vulnerabilities()
        .await
        .unwrap()
        .into_iter()
        .find(|v| v.cve_id == cve_id)
        .unwrap_or_else(|| panic!("seed dataset has no vulnerability '{}'", cve_id))
}

fn controller_with(
    backend: MockAnalysisBackend,
) -> (
    SelectionController<MockAnalysisBackend, MockProgressReporter>,
    MockProgressReporter,
) {
    let reporter = MockProgressReporter::new();
    let orchestrator = AnalysisOrchestrator::new(backend, reporter.clone());
    (SelectionController::new(orchestrator), reporter)
}

#[tokio::test]
async fn test_selecting_alert_commits_parsed_explanation() {
    let backend = MockAnalysisBackend::new().with_response(ALERT_EXPLANATION_JSON);
    let (controller, _reporter) = controller_with(backend);
    let alert = seeded_alert("1").await;

    controller.select_alert(alert.clone()).await;

    assert_eq!(controller.selected_alert().map(|a| a.id), Some(alert.id));
    match controller.alert_analysis() {
        SlotState::Succeeded(explanation) => {
            assert_eq!(explanation.risk_score, 8);
            assert_eq!(explanation.rationale.len(), 2);
            assert_eq!(
                explanation.remediation_commands.powershell,
                "Stop-Process -Name powershell -Force"
            );
        }
        other => panic!("expected success, got {:?}", other),
    }
}

#[tokio::test]
async fn test_reselecting_same_alert_issues_no_call() {
    let backend = MockAnalysisBackend::new().with_response(ALERT_EXPLANATION_JSON);
    let calls = backend.clone();
    let (controller, _reporter) = controller_with(backend);
    let alert = seeded_alert("1").await;

    controller.select_alert(alert.clone()).await;
    let first = controller.alert_analysis();

    controller.select_alert(alert).await;

    // The analysis from the first selection is preserved untouched
    assert_eq!(calls.call_count(), 1);
    assert_eq!(controller.alert_analysis(), first);
}

#[tokio::test]
async fn test_selecting_other_kind_clears_previous_selection() {
    let backend = MockAnalysisBackend::new()
        .with_response(ALERT_EXPLANATION_JSON)
        .with_response(VULNERABILITY_ANALYSIS_JSON);
    let (controller, _reporter) = controller_with(backend);

    controller.select_alert(seeded_alert("1").await).await;
    controller
        .select_vulnerability(seeded_vulnerability("CVE-2021-44228").await)
        .await;

    assert!(controller.selected_alert().is_none());
    assert!(controller.selected_vulnerability().is_some());
    assert_eq!(
        controller.alert_analysis(),
        SlotState::<AlertExplanation>::Idle
    );
    match controller.vulnerability_analysis() {
        SlotState::Succeeded(analysis) => assert_eq!(analysis.priority_score, 10),
        other => panic!("expected success, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_response_fails_with_generic_advisory() {
    let backend = MockAnalysisBackend::new().with_response("this is not the declared structure");
    let (controller, reporter) = controller_with(backend);

    controller.select_alert(seeded_alert("1").await).await;

    assert_eq!(
        controller.alert_analysis(),
        SlotState::Failed(ANALYSIS_FAILED_MESSAGE.to_string())
    );
    // The structural cause is logged, never shown in the slot state
    let errors = reporter.errors();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("declared schema"));
}

#[tokio::test]
async fn test_backend_failure_logs_detailed_cause() {
    let backend = MockAnalysisBackend::new().with_failure("connection refused");
    let (controller, reporter) = controller_with(backend);

    controller.select_alert(seeded_alert("1").await).await;

    assert_eq!(
        controller.alert_analysis(),
        SlotState::Failed(ANALYSIS_FAILED_MESSAGE.to_string())
    );
    let errors = reporter.errors();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("connection refused"));
    assert!(errors[0].contains("'1'"));
}

#[tokio::test]
async fn test_missing_credential_fails_without_network() {
    // No API key configured and an unroutable base URL: the failure must
    // come from configuration checking, not from a connection attempt.
    let backend = GeminiClient::new(None, None)
        .unwrap()
        .with_base_url("http://127.0.0.1:1");
    let reporter = MockProgressReporter::new();
    let controller = SelectionController::new(AnalysisOrchestrator::new(backend, reporter.clone()));

    controller.select_alert(seeded_alert("1").await).await;

    assert_eq!(
        controller.alert_analysis(),
        SlotState::Failed(ANALYSIS_FAILED_MESSAGE.to_string())
    );
    let errors = reporter.errors();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("credential is not configured"));
}

#[tokio::test]
async fn test_prompt_carries_whitelisted_payload_only() {
    let backend = MockAnalysisBackend::new().with_response(ALERT_EXPLANATION_JSON);
    let log = backend.clone();
    let (controller, _reporter) = controller_with(backend);

    let alert = seeded_alert("1").await;
    controller.select_alert(alert.clone()).await;

    let prompts = log.prompts();
    assert_eq!(prompts.len(), 1);
    // Analysis-relevant fields are embedded
    assert!(prompts[0].contains("powershell.exe"));
    assert!(prompts[0].contains("T1059.001"));
    // Record identity fields are not
    assert!(!prompts[0].contains(&alert.endpoint));
    assert!(!prompts[0].contains("\"id\""));
}

#[tokio::test]
async fn test_clear_selection_idles_both_slots() {
    let backend = MockAnalysisBackend::new().with_response(ALERT_EXPLANATION_JSON);
    let (controller, _reporter) = controller_with(backend);

    controller.select_alert(seeded_alert("1").await).await;
    controller.clear_selection();

    assert!(controller.selected_alert().is_none());
    assert!(controller.selected_vulnerability().is_none());
    assert_eq!(
        controller.alert_analysis(),
        SlotState::<AlertExplanation>::Idle
    );
    assert_eq!(
        controller.vulnerability_analysis(),
        SlotState::<VulnerabilityAnalysis>::Idle
    );
}

#[tokio::test]
async fn test_slow_superseded_response_is_discarded() {
    // Select alert 1, then alert 2 while 1 is still in flight. The
    // second response arrives first; when the first finally resolves it
    // must be discarded, not displayed against the newer selection.
    let (backend, mut gates) = GatedAnalysisBackend::with_gates(2);
    let reporter = MockProgressReporter::new();
    let controller = Arc::new(SelectionController::new(AnalysisOrchestrator::new(
        backend, reporter,
    )));

    let first_alert = seeded_alert("1").await;
    let second_alert = seeded_alert("2").await;

    let first_task = {
        let controller = Arc::clone(&controller);
        tokio::spawn(async move { controller.select_alert(first_alert).await })
    };
    // Let the first call reach its gate before dispatching the second
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }

    let second_task = {
        let controller = Arc::clone(&controller);
        tokio::spawn(async move { controller.select_alert(second_alert).await })
    };
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }

    let slow_gate = gates.remove(0);
    let fast_gate = gates.remove(0);

    // Newer selection completes first
    let newer = ALERT_EXPLANATION_JSON.replace("\"riskScore\": 8", "\"riskScore\": 9");
    fast_gate.send(Ok(newer)).unwrap();
    second_task.await.unwrap();

    // The superseded call resolves afterwards
    slow_gate.send(Ok(ALERT_EXPLANATION_JSON.to_string())).unwrap();
    first_task.await.unwrap();

    assert_eq!(controller.selected_alert().map(|a| a.id), Some("2".to_string()));
    match controller.alert_analysis() {
        SlotState::Succeeded(explanation) => assert_eq!(explanation.risk_score, 9),
        other => panic!("expected the newer analysis, got {:?}", other),
    }
}

#[tokio::test]
async fn test_request_dispatched_for_superseded_selection_cannot_commit() {
    // Two selections race: the first obtains its generation token, the
    // second obtains a newer one, and only then does the first
    // selection's backend call actually run. Even though that call is
    // the last to complete, its token is outdated and the newer
    // selection's analysis must be the one retained.
    let newer = ALERT_EXPLANATION_JSON.replace("\"riskScore\": 8", "\"riskScore\": 9");
    let backend = MockAnalysisBackend::new()
        .with_response(&newer)
        .with_response(ALERT_EXPLANATION_JSON);
    let reporter = MockProgressReporter::new();
    let orchestrator = AnalysisOrchestrator::new(backend, reporter.clone());

    let first_alert = seeded_alert("1").await;
    let second_alert = seeded_alert("2").await;

    let first_generation = orchestrator.begin_alert_analysis();
    let second_generation = orchestrator.begin_alert_analysis();

    orchestrator
        .analyze_alert(&second_alert, second_generation)
        .await;
    orchestrator
        .analyze_alert(&first_alert, first_generation)
        .await;

    match orchestrator.alert_state() {
        SlotState::Succeeded(explanation) => assert_eq!(explanation.risk_score, 9),
        other => panic!("expected the newer analysis, got {:?}", other),
    }
    assert!(reporter.errors().is_empty());
}

#[tokio::test]
async fn test_superseding_failure_does_not_overwrite_newer_success() {
    // The stale call fails after the newer one succeeded; the failure
    // must be discarded and nothing logged for it.
    let (backend, mut gates) = GatedAnalysisBackend::with_gates(2);
    let reporter = MockProgressReporter::new();
    let controller = Arc::new(SelectionController::new(AnalysisOrchestrator::new(
        backend,
        reporter.clone(),
    )));

    let first_alert = seeded_alert("1").await;
    let second_alert = seeded_alert("2").await;

    let first_task = {
        let controller = Arc::clone(&controller);
        tokio::spawn(async move { controller.select_alert(first_alert).await })
    };
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
    let second_task = {
        let controller = Arc::clone(&controller);
        tokio::spawn(async move { controller.select_alert(second_alert).await })
    };
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }

    let slow_gate = gates.remove(0);
    let fast_gate = gates.remove(0);

    fast_gate.send(Ok(ALERT_EXPLANATION_JSON.to_string())).unwrap();
    second_task.await.unwrap();

    slow_gate.send(Err("timed out".to_string())).unwrap();
    first_task.await.unwrap();

    assert!(matches!(
        controller.alert_analysis(),
        SlotState::Succeeded(_)
    ));
    assert!(reporter.errors().is_empty());
}
