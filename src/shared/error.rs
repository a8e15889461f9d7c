use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Report rendered, or the user chose to quit
    Success = 0,
    /// Configuration, connection or query failure
    Failure = 1,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

/// Application-specific errors for release reconciliation.
///
/// Every variant is fatal: the run stops at the first one and the
/// top level reports it as a single diagnostic.
#[derive(Debug, Error)]
pub enum ReleaseError {
    /// Missing or partial configuration, detected before any query runs
    #[error("Invalid configuration: {details}\n\n💡 Hint: {hint}")]
    Configuration { details: String, hint: String },

    /// A data source could not be reached or timed out
    #[error("Failed to connect to {source_name}\nDetails: {details}\n\n💡 Hint: Please check the connection details and try again")]
    Connection {
        source_name: String,
        details: String,
    },

    /// A patch identifier did not match `pcr-<digits>_<key><version>`
    #[error("Malformed patch identifier: {raw}\nReason: {reason}")]
    MalformedPatchId { raw: String, reason: String },

    /// A query failed after the connection was established
    #[error("Query failed on {source_name}: {query}\nDetails: {details}")]
    SourceUnavailable {
        source_name: String,
        query: String,
        details: String,
    },

    /// Interactive or command-line selection could not be interpreted
    #[error("Invalid selection: {input}")]
    InvalidSelection { input: String },

    /// The rendered report could not be written
    #[error("Failed to write output file: {path}\nDetails: {details}")]
    FileWrite { path: PathBuf, details: String },

    /// An invalid product catalog or comparison input
    #[error("Validation error: {message}")]
    Validation { message: String },
}
