use async_trait::async_trait;
use cyberguard::prelude::*;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::VecDeque;
use tokio::sync::oneshot;

/// AnalysisBackend whose calls block until the test resolves them.
///
/// Each call takes the next gate in order and waits on it; the test
/// holds the matching senders and decides when, and in which order,
/// in-flight calls complete. This makes slow-response interleavings
/// deterministic.
pub struct GatedAnalysisBackend {
    gates: Mutex<VecDeque<oneshot::Receiver<std::result::Result<String, String>>>>,
}

pub type Gate = oneshot::Sender<std::result::Result<String, String>>;

impl GatedAnalysisBackend {
    /// Creates a backend expecting exactly `calls` calls, returning one
    /// sender per call in dispatch order.
    pub fn with_gates(calls: usize) -> (Self, Vec<Gate>) {
        let mut senders = Vec::with_capacity(calls);
        let mut receivers = VecDeque::with_capacity(calls);
        for _ in 0..calls {
            let (sender, receiver) = oneshot::channel();
            senders.push(sender);
            receivers.push_back(receiver);
        }
        (
            Self {
                gates: Mutex::new(receivers),
            },
            senders,
        )
    }
}

#[async_trait]
impl AnalysisBackend for GatedAnalysisBackend {
    async fn generate(&self, _prompt: &str, _response_schema: Value) -> Result<String> {
        let gate = self.gates.lock().pop_front();
        let Some(gate) = gate else {
            anyhow::bail!("Gated analysis backend called more times than scripted");
        };

        match gate.await {
            Ok(Ok(body)) => Ok(body),
            Ok(Err(details)) => Err(TriageError::BackendCallFailed { details }.into()),
            Err(_) => anyhow::bail!("Gate dropped before resolution"),
        }
    }
}
