//! Error types for lap analysis.
//!
//! Only structural misuse surfaces as an error: an unknown analysis or session type, a
//! session that cannot be loaded, or a document that cannot be parsed. Data gaps for a
//! single driver or stint (no clean laps, too few samples, missing stint id) are never
//! errors; the affected rows are simply absent from the response.
//!
//! ## Error Categories
//!
//! - **Request Errors**: Unsupported analysis type or session type
//! - **Session Errors**: Session documents that are missing, unreadable or malformed
//! - **Conversion Errors**: Durations that cannot be represented
//! - **Config Errors**: Analysis thresholds outside their valid range
//!
//! ## Recovery
//!
//! ```rust
//! use lapsight::AnalysisError;
//!
//! let error = AnalysisError::unsupported_analysis_type("tyre_wear");
//! assert!(!error.is_retryable());
//! for suggestion in error.recovery_suggestions() {
//!     println!("  - {}", suggestion);
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for analysis operations.
pub type Result<T, E = AnalysisError> = std::result::Result<T, E>;

/// Main error type for analysis operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum AnalysisError {
    #[error("Unsupported analysis type '{requested}'")]
    UnsupportedAnalysisType { requested: String },

    #[error("Unsupported session type '{requested}'")]
    UnsupportedSessionType { requested: String },

    #[error("Session not found: {key}")]
    SessionNotFound { key: String },

    #[error("Session file error: {path}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error in {context}: {details}")]
    Parse { context: String, details: String },

    #[error("Time conversion error: {details}")]
    TimeConversion { details: String },

    #[error("Invalid analysis config: {reason}")]
    Config { reason: String },
}

impl AnalysisError {
    /// Returns whether this error is potentially recoverable through retry.
    pub fn is_retryable(&self) -> bool {
        match self {
            AnalysisError::File { .. } => true,
            AnalysisError::SessionNotFound { .. } => false,
            AnalysisError::UnsupportedAnalysisType { .. } => false,
            AnalysisError::UnsupportedSessionType { .. } => false,
            AnalysisError::Parse { .. } => false,
            AnalysisError::TimeConversion { .. } => false,
            AnalysisError::Config { .. } => false,
        }
    }

    /// Returns suggested recovery actions for this error.
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            AnalysisError::UnsupportedAnalysisType { .. } => vec![
                "Use one of: race_pace, tire_degradation, stint_summary, consistency",
                "Check the analysis type spelling",
            ],
            AnalysisError::UnsupportedSessionType { .. } => vec![
                "Use one of the session codes FP1, FP2, FP3, Q, S, R",
                "Check the session type spelling",
            ],
            AnalysisError::SessionNotFound { .. } => vec![
                "Verify the season year and event name",
                "Check that the session has been exported by the timing provider",
            ],
            AnalysisError::File { .. } => vec![
                "Check file exists and is readable",
                "Check file permissions",
                "Retry once the export has finished writing",
            ],
            AnalysisError::Parse { .. } => vec![
                "Check the session document is valid YAML",
                "Verify column names match the timing provider export",
                "Verify source data integrity",
            ],
            AnalysisError::TimeConversion { .. } => vec![
                "Check lap times are within a realistic range",
                "Verify source data integrity",
            ],
            AnalysisError::Config { .. } => vec![
                "Degradation needs at least 2 laps per stint",
                "Consistency needs at least 2 laps per driver",
            ],
        }
    }

    /// Helper constructor for unsupported analysis types.
    pub fn unsupported_analysis_type(requested: impl Into<String>) -> Self {
        AnalysisError::UnsupportedAnalysisType { requested: requested.into() }
    }

    /// Helper constructor for unsupported session types.
    pub fn unsupported_session_type(requested: impl Into<String>) -> Self {
        AnalysisError::UnsupportedSessionType { requested: requested.into() }
    }

    /// Helper constructor for file errors with path context.
    pub fn file_error(path: PathBuf, source: std::io::Error) -> Self {
        AnalysisError::File { path, source }
    }

    /// Helper constructor for parse errors.
    pub fn parse_error(context: impl Into<String>, details: impl Into<String>) -> Self {
        AnalysisError::Parse { context: context.into(), details: details.into() }
    }

    /// Helper constructor for time conversion errors.
    pub fn time_conversion(details: impl Into<String>) -> Self {
        AnalysisError::TimeConversion { details: details.into() }
    }

    /// Helper constructor for config errors.
    pub fn config(reason: impl Into<String>) -> Self {
        AnalysisError::Config { reason: reason.into() }
    }
}

impl From<std::io::Error> for AnalysisError {
    fn from(err: std::io::Error) -> Self {
        AnalysisError::File { path: PathBuf::from("<unknown>"), source: err }
    }
}
