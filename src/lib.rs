//! cyberguard - AI-assisted security operations triage
//!
//! This library powers a terminal dashboard over security alerts and
//! tracked vulnerabilities, with per-record AI triage analysis produced
//! through a structured-output generation backend. It follows hexagonal
//! architecture: the analysis pipeline is pure application logic behind
//! ports, with network and console concerns kept in adapters.
//!
//! # Architecture
//!
//! - **Domain Layer** (`triage`): Record models, payload whitelisting and
//!   the AI response contract
//! - **Application Layer** (`application`): The analysis orchestrator and
//!   selection state controller
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Gemini, Supabase, in-memory and console
//!   implementations of the ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use cyberguard::prelude::*;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<()> {
//! // Create adapters
//! let backend = GeminiClient::new(Some("api-key".to_string()), None)?;
//! let reporter = StderrProgressReporter::new();
//! let store = StaticRecordStore::seeded();
//!
//! // Wire the analysis pipeline
//! let orchestrator = AnalysisOrchestrator::new(backend, reporter);
//! let controller = SelectionController::new(orchestrator);
//!
//! // Select a record; analysis runs as part of the selection
//! let alerts = store.list_alerts().await?;
//! if let Some(alert) = alerts.first() {
//!     controller.select_alert(alert.clone()).await;
//!     println!("{:?}", controller.alert_analysis());
//! }
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod cli;
pub mod config;
pub mod ports;
pub mod shared;
pub mod triage;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::{
        renderer, RenderFormat, StderrProgressReporter,
    };
    pub use crate::adapters::outbound::memory::StaticRecordStore;
    pub use crate::adapters::outbound::network::{
        GeminiClient, SupabaseAuthProvider, SupabaseRecordStore,
    };
    pub use crate::application::{
        AnalysisOrchestrator, SelectionController, SlotState, ANALYSIS_FAILED_MESSAGE,
    };
    pub use crate::config::{AppConfig, DataSource};
    pub use crate::ports::outbound::{
        AnalysisBackend, AuthProvider, ProgressReporter, RecordStore, Session,
    };
    pub use crate::shared::{ExitCode, Result, TriageError};
    pub use crate::triage::domain::{
        Alert, AlertExplanation, AlertStatus, Metric, Severity, Threat, Vulnerability,
        VulnerabilityAnalysis, VulnerabilityStatus,
    };
    pub use crate::triage::services::metrics::{dashboard_metrics, threat_feed};
}
