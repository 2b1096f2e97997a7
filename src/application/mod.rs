//! Application layer: the analysis orchestrator, its per-kind slot
//! state machines, and the selection state controller.

pub mod orchestrator;
pub mod selection;
pub mod slot;

pub use orchestrator::{AnalysisOrchestrator, ANALYSIS_FAILED_MESSAGE};
pub use selection::SelectionController;
pub use slot::{AnalysisSlot, SlotState};
