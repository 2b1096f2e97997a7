pub mod alert;
pub mod analysis;
pub mod metric;
pub mod severity;
pub mod threat;
pub mod vulnerability;

pub use alert::{Alert, AlertStatus};
pub use analysis::{AlertExplanation, RemediationCommands, VulnerabilityAnalysis};
pub use metric::{ChangeType, Metric};
pub use severity::Severity;
pub use threat::Threat;
pub use vulnerability::{Vulnerability, VulnerabilityStatus};
