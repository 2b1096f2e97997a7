use async_trait::async_trait;
use cyberguard::prelude::*;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Mock AnalysisBackend for testing
///
/// Returns scripted responses in order and records every prompt it was
/// asked to generate for. Internals are shared across clones so a test
/// can keep a handle after moving the backend into the orchestrator.
/// Calling it with no scripted response left is an error, so tests
/// catch unexpected extra calls.
#[derive(Clone)]
pub struct MockAnalysisBackend {
    responses: Arc<Mutex<VecDeque<std::result::Result<String, String>>>>,
    prompts: Arc<Mutex<Vec<String>>>,
    calls: Arc<AtomicUsize>,
}

impl MockAnalysisBackend {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            prompts: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_response(self, body: &str) -> Self {
        self.responses.lock().push_back(Ok(body.to_string()));
        self
    }

    pub fn with_failure(self, details: &str) -> Self {
        self.responses.lock().push_back(Err(details.to_string()));
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }
}

impl Default for MockAnalysisBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AnalysisBackend for MockAnalysisBackend {
    async fn generate(&self, prompt: &str, _response_schema: Value) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().push(prompt.to_string());

        match self.responses.lock().pop_front() {
            Some(Ok(body)) => Ok(body),
            Some(Err(details)) => Err(TriageError::BackendCallFailed { details }.into()),
            None => anyhow::bail!("Mock analysis backend called more times than scripted"),
        }
    }
}
