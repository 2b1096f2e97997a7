use cyberguard::prelude::*;
use parking_lot::Mutex;
use std::sync::Arc;

/// Mock ProgressReporter that records every event for assertions
#[derive(Clone)]
pub struct MockProgressReporter {
    events: Arc<Mutex<Vec<String>>>,
}

impl MockProgressReporter {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn events(&self) -> Vec<String> {
        self.events.lock().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.events
            .lock()
            .iter()
            .filter_map(|event| event.strip_prefix("error: ").map(str::to_string))
            .collect()
    }
}

impl Default for MockProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for MockProgressReporter {
    fn begin_activity(&self, message: &str) {
        self.events.lock().push(format!("begin: {}", message));
    }

    fn end_activity(&self) {
        self.events.lock().push("end".to_string());
    }

    fn report_error(&self, message: &str) {
        self.events.lock().push(format!("error: {}", message));
    }

    fn report_completion(&self, message: &str) {
        self.events.lock().push(format!("complete: {}", message));
    }
}
