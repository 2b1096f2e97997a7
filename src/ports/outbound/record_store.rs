use crate::shared::Result;
use crate::triage::domain::{Alert, Vulnerability};
use async_trait::async_trait;

/// RecordStore port for read-only alert and vulnerability listings
///
/// Listing failures surface as `TriageError::DataFetchFailed` and are
/// fatal to rendering the corresponding list view - there is no partial
/// rendering.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Lists alerts ordered by timestamp descending
    async fn list_alerts(&self) -> Result<Vec<Alert>>;

    /// Lists vulnerabilities ordered by published date descending
    async fn list_vulnerabilities(&self) -> Result<Vec<Vulnerability>>;
}
