pub mod analysis_backend;
pub mod auth_provider;
pub mod progress_reporter;
pub mod record_store;

pub use analysis_backend::AnalysisBackend;
pub use auth_provider::{AuthProvider, Session};
pub use progress_reporter::ProgressReporter;
pub use record_store::RecordStore;
