use crate::application::slot::{AnalysisSlot, SlotState};
use crate::ports::outbound::{AnalysisBackend, ProgressReporter};
use crate::shared::Result;
use crate::triage::domain::{Alert, AlertExplanation, Vulnerability, VulnerabilityAnalysis};
use crate::triage::services::response_contract;
use crate::triage::services::{AlertAnalysisPayload, VulnerabilityAnalysisPayload};
use parking_lot::Mutex;

/// Static advisory shown to the user when an analysis fails for any
/// reason. The detailed cause is logged through the reporter only.
pub const ANALYSIS_FAILED_MESSAGE: &str =
    "Failed to generate AI analysis. Please check your API key and connection.";

/// AnalysisOrchestrator - issues one outbound analysis call per
/// selection event and tracks in-flight/success/failure state
///
/// Holds one slot per record kind. Each `analyze_*` call performs
/// exactly one backend request with no retries. The slot mutexes are
/// never held across an await: the caller obtains a generation token
/// from `begin_*_analysis` in the same critical section that records
/// its selection, the network call runs unlocked, and the completion
/// only commits when the token still matches - so a slow response for
/// a superseded selection is discarded instead of overwriting the
/// newer analysis.
///
/// # Type Parameters
/// * `B` - AnalysisBackend implementation
/// * `R` - ProgressReporter implementation
pub struct AnalysisOrchestrator<B, R> {
    backend: B,
    reporter: R,
    alert_slot: Mutex<AnalysisSlot<AlertExplanation>>,
    vulnerability_slot: Mutex<AnalysisSlot<VulnerabilityAnalysis>>,
}

impl<B, R> AnalysisOrchestrator<B, R>
where
    B: AnalysisBackend,
    R: ProgressReporter,
{
    /// Creates a new orchestrator with injected dependencies
    pub fn new(backend: B, reporter: R) -> Self {
        Self {
            backend,
            reporter,
            alert_slot: Mutex::new(AnalysisSlot::new()),
            vulnerability_slot: Mutex::new(AnalysisSlot::new()),
        }
    }

    /// Current state of the alert analysis slot
    pub fn alert_state(&self) -> SlotState<AlertExplanation> {
        self.alert_slot.lock().state().clone()
    }

    /// Current state of the vulnerability analysis slot
    pub fn vulnerability_state(&self) -> SlotState<VulnerabilityAnalysis> {
        self.vulnerability_slot.lock().state().clone()
    }

    /// Returns the alert slot to `Idle`, invalidating any in-flight call
    pub fn reset_alert_slot(&self) {
        self.alert_slot.lock().reset();
    }

    /// Returns the vulnerability slot to `Idle`, invalidating any
    /// in-flight call
    pub fn reset_vulnerability_slot(&self) {
        self.vulnerability_slot.lock().reset();
    }

    /// Issues the generation token for a new alert analysis, moving
    /// the slot to `Loading`.
    ///
    /// Call this inside the same critical section that records the
    /// selection: tokens are then issued in selection order, and a
    /// request dispatched for a superseded selection can never hold the
    /// latest token.
    pub fn begin_alert_analysis(&self) -> u64 {
        self.alert_slot.lock().begin()
    }

    /// Issues the generation token for a new vulnerability analysis;
    /// symmetric to [`Self::begin_alert_analysis`].
    pub fn begin_vulnerability_analysis(&self) -> u64 {
        self.vulnerability_slot.lock().begin()
    }

    /// Analyzes an alert: builds the whitelisted payload, performs one
    /// backend call and commits the parsed result or the generic
    /// failure message. The commit only lands while `generation` is
    /// still the latest token issued for the alert slot.
    pub async fn analyze_alert(&self, alert: &Alert, generation: u64) {
        self.reporter.begin_activity("Analyzing threat with AI...");
        let outcome = self.request_alert_explanation(alert).await;
        self.reporter.end_activity();

        match outcome {
            Ok(explanation) => {
                let committed = self
                    .alert_slot
                    .lock()
                    .complete_succeeded(generation, explanation);
                if committed {
                    self.reporter.report_completion("✅ AI analysis complete");
                }
            }
            Err(error) => {
                let committed = self
                    .alert_slot
                    .lock()
                    .complete_failed(generation, ANALYSIS_FAILED_MESSAGE);
                if committed {
                    self.reporter
                        .report_error(&format!("Alert analysis for '{}' failed: {:#}", alert.id, error));
                }
            }
        }
    }

    /// Analyzes a vulnerability; symmetric to [`Self::analyze_alert`].
    pub async fn analyze_vulnerability(&self, vulnerability: &Vulnerability, generation: u64) {
        self.reporter
            .begin_activity("Analyzing vulnerability with AI...");
        let outcome = self.request_vulnerability_analysis(vulnerability).await;
        self.reporter.end_activity();

        match outcome {
            Ok(analysis) => {
                let committed = self
                    .vulnerability_slot
                    .lock()
                    .complete_succeeded(generation, analysis);
                if committed {
                    self.reporter.report_completion("✅ AI analysis complete");
                }
            }
            Err(error) => {
                let committed = self
                    .vulnerability_slot
                    .lock()
                    .complete_failed(generation, ANALYSIS_FAILED_MESSAGE);
                if committed {
                    self.reporter.report_error(&format!(
                        "Vulnerability analysis for '{}' failed: {:#}",
                        vulnerability.cve_id, error
                    ));
                }
            }
        }
    }

    async fn request_alert_explanation(&self, alert: &Alert) -> Result<AlertExplanation> {
        let payload = AlertAnalysisPayload::from_alert(alert).to_json()?;
        let prompt = response_contract::alert_prompt(&payload);
        let schema = response_contract::alert_explanation_schema();
        let text = self.backend.generate(&prompt, schema).await?;
        response_contract::parse_alert_explanation(&text)
    }

    async fn request_vulnerability_analysis(
        &self,
        vulnerability: &Vulnerability,
    ) -> Result<VulnerabilityAnalysis> {
        let payload = VulnerabilityAnalysisPayload::from_vulnerability(vulnerability).to_json()?;
        let prompt = response_contract::vulnerability_prompt(&payload);
        let schema = response_contract::vulnerability_analysis_schema();
        let text = self.backend.generate(&prompt, schema).await?;
        response_contract::parse_vulnerability_analysis(&text)
    }
}
