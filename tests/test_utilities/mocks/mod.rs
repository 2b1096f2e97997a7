pub mod gated_analysis_backend;
pub mod mock_analysis_backend;
pub mod mock_progress_reporter;

pub use gated_analysis_backend::GatedAnalysisBackend;
pub use mock_analysis_backend::MockAnalysisBackend;
pub use mock_progress_reporter::MockProgressReporter;
