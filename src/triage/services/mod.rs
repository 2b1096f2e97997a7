pub mod metrics;
pub mod request_builder;
pub mod response_contract;

pub use request_builder::{AlertAnalysisPayload, VulnerabilityAnalysisPayload};
