use std::fmt;
use std::path::PathBuf;
use thiserror::Error;
use uuid::Uuid;

/// Exit codes for the CLI application.
///
/// These codes allow CI systems to distinguish between different
/// types of failures and successes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// The SBOM was retrieved and written
    Success = 0,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (service error, network error, file I/O error, etc.)
    ApplicationError = 3,
    /// The call was cancelled by the user (Ctrl-C)
    Interrupted = 130,
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
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
            ExitCode::Interrupted => write!(f, "Interrupted (130)"),
        }
    }
}

/// Application-specific errors for SBOM retrieval.
///
/// The client port only exposes `anyhow::Error`; these variants are what
/// adapters put inside it, so callers that care can downcast.
#[derive(Debug, Error)]
pub enum SbomError {
    #[error("Invalid {field}: {reason}\n\n💡 Hint: Identifiers must be non-empty and must not contain '/', '\\', '..', '#', '?' or '@'")]
    InvalidIdentifier { field: String, reason: String },

    #[error("Call cancelled (trace {trace_id})")]
    Cancelled { trace_id: Uuid },

    #[error("Call deadline exceeded (trace {trace_id})\n\n💡 Hint: Increase the timeout with --timeout or `timeout_secs` in the config file")]
    DeadlineExceeded { trace_id: Uuid },

    #[error("SBOM service returned status {status}: {message}")]
    ServiceError { status: u16, message: String },

    #[error("SBOM service returned an empty document for {org_id}/{project_id}")]
    EmptyDocument { org_id: String, project_id: String },

    #[error("Failed to parse dependency graph: {path}\nDetails: {details}\n\n💡 Hint: The dependency graph must be a JSON object")]
    DepGraphParseError { path: PathBuf, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    /// Validation error for builder patterns and configuration
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Security violation: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    SecurityError {
        path: PathBuf,
        reason: String,
        hint: String,
    },
}

impl SbomError {
    /// Whether a failed call may succeed if issued again unchanged.
    ///
    /// Only transient service conditions qualify: 5xx, 408 and 429.
    pub fn is_retryable(&self) -> bool {
        match self {
            SbomError::ServiceError { status, .. } => {
                *status >= 500 || *status == 408 || *status == 429
            }
            _ => false,
        }
    }

    /// Whether this error means the call context ended the call.
    pub fn is_cancellation(&self) -> bool {
        matches!(
            self,
            SbomError::Cancelled { .. } | SbomError::DeadlineExceeded { .. }
        )
    }
}

/// Classifies an arbitrary error from the client port for retry purposes.
///
/// Transport failures from reqwest count as retryable when they are
/// timeouts or connection errors.
pub fn is_retryable(error: &anyhow::Error) -> bool {
    if let Some(sbom_error) = error.downcast_ref::<SbomError>() {
        return sbom_error.is_retryable();
    }
    if let Some(http_error) = error.downcast_ref::<reqwest::Error>() {
        return http_error.is_timeout() || http_error.is_connect();
    }
    false
}

/// Returns true when the error was produced by a cancelled or expired call context.
pub fn is_cancellation(error: &anyhow::Error) -> bool {
    error
        .downcast_ref::<SbomError>()
        .is_some_and(SbomError::is_cancellation)
}
