use crate::application::orchestrator::AnalysisOrchestrator;
use crate::application::slot::SlotState;
use crate::ports::outbound::{AnalysisBackend, ProgressReporter};
use crate::triage::domain::{Alert, AlertExplanation, Vulnerability, VulnerabilityAnalysis};
use parking_lot::Mutex;

#[derive(Debug, Default)]
struct Selection {
    alert: Option<Alert>,
    vulnerability: Option<Vulnerability>,
}

/// SelectionController - holds the currently selected record and the
/// currently displayed analysis
///
/// Invariant: at most one of {selected alert, selected vulnerability}
/// is non-empty at a time. Selecting a record of one kind clears the
/// other kind's selection and idles its analysis slot before the new
/// request is dispatched, so a stale result is never displayed against
/// a new selection. The analysis generation token is issued inside the
/// same critical section that records the selection, so tokens are
/// issued in selection order and a request belonging to a superseded
/// selection can never carry the latest token. Re-selecting the
/// current record is an idempotent no-op: no call is issued and
/// existing analysis state is preserved.
pub struct SelectionController<B, R> {
    orchestrator: AnalysisOrchestrator<B, R>,
    selection: Mutex<Selection>,
}

impl<B, R> SelectionController<B, R>
where
    B: AnalysisBackend,
    R: ProgressReporter,
{
    pub fn new(orchestrator: AnalysisOrchestrator<B, R>) -> Self {
        Self {
            orchestrator,
            selection: Mutex::new(Selection::default()),
        }
    }

    pub fn selected_alert(&self) -> Option<Alert> {
        self.selection.lock().alert.clone()
    }

    pub fn selected_vulnerability(&self) -> Option<Vulnerability> {
        self.selection.lock().vulnerability.clone()
    }

    pub fn alert_analysis(&self) -> SlotState<AlertExplanation> {
        self.orchestrator.alert_state()
    }

    pub fn vulnerability_analysis(&self) -> SlotState<VulnerabilityAnalysis> {
        self.orchestrator.vulnerability_state()
    }

    /// Selects an alert and triggers its analysis.
    ///
    /// The selection swap (store alert, clear vulnerability, idle the
    /// vulnerability slot) and the issuance of the alert slot's new
    /// generation happen as one indivisible update under the lock, so
    /// a concurrent later selection always obtains a newer generation
    /// than this one before the asynchronous analysis call starts.
    pub async fn select_alert(&self, alert: Alert) {
        let generation = {
            let mut selection = self.selection.lock();
            if selection.alert.as_ref().is_some_and(|a| a.id == alert.id) {
                return;
            }
            selection.alert = Some(alert.clone());
            selection.vulnerability = None;
            self.orchestrator.reset_vulnerability_slot();
            self.orchestrator.begin_alert_analysis()
        };
        self.orchestrator.analyze_alert(&alert, generation).await;
    }

    /// Selects a vulnerability and triggers its analysis; symmetric to
    /// [`Self::select_alert`].
    pub async fn select_vulnerability(&self, vulnerability: Vulnerability) {
        let generation = {
            let mut selection = self.selection.lock();
            if selection
                .vulnerability
                .as_ref()
                .is_some_and(|v| v.id == vulnerability.id)
            {
                return;
            }
            selection.vulnerability = Some(vulnerability.clone());
            selection.alert = None;
            self.orchestrator.reset_alert_slot();
            self.orchestrator.begin_vulnerability_analysis()
        };
        self.orchestrator
            .analyze_vulnerability(&vulnerability, generation)
            .await;
    }

    /// Clears both selections and idles both analysis slots.
    pub fn clear_selection(&self) {
        let mut selection = self.selection.lock();
        selection.alert = None;
        selection.vulnerability = None;
        self.orchestrator.reset_alert_slot();
        self.orchestrator.reset_vulnerability_slot();
    }
}
