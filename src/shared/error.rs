use std::fmt;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow scripts and CI systems to distinguish between
/// different types of failures and successes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - the requested operation completed
    Success = 0,
    /// An AI analysis was requested but ended in the failed state
    AnalysisFailed = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (API error, network error, config error, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::AnalysisFailed => write!(f, "Analysis Failed (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors for the triage pipeline.
///
/// Uses thiserror to derive Display and Error traits automatically,
/// reducing boilerplate while maintaining user-friendly error messages.
#[derive(Debug, Error)]
pub enum TriageError {
    #[error("AI backend credential is not configured\n\n💡 Hint: Set the GEMINI_API_KEY environment variable or add 'gemini_api_key' to cyberguard.config.yml")]
    ConfigurationMissing,

    #[error("AI backend call failed: {details}")]
    BackendCallFailed { details: String },

    #[error("AI response did not match the declared schema: {details}")]
    ResponseMalformed { details: String },

    #[error("Failed to fetch {resource}: {details}\n\n💡 Hint: Verify your data store URL and API key, and that the service is reachable")]
    DataFetchFailed { resource: String, details: String },

    /// Validation error for configuration values
    #[error("Invalid configuration: {message}")]
    Validation { message: String },
}
