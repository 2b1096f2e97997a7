pub mod error;
pub mod result;

pub use error::{ExitCode, TriageError};
pub use result::Result;
