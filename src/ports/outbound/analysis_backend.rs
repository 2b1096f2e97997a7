use crate::shared::Result;
use async_trait::async_trait;
use serde_json::Value;

/// AnalysisBackend port for the generative-AI service
///
/// One call per analysis. The request carries a natural-language
/// instruction prompt plus the declared structured-output schema; the
/// backend is expected to answer with a single JSON-shaped text response
/// conforming to that schema. Parsing against the contract happens in
/// the caller, not here.
///
/// # Errors
/// Implementations return:
/// - `TriageError::ConfigurationMissing` when the backend credential is
///   absent - raised before any network I/O
/// - `TriageError::BackendCallFailed` for network or backend-side errors
#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    /// Sends one generation request and returns the raw response text
    async fn generate(&self, prompt: &str, response_schema: Value) -> Result<String>;
}
