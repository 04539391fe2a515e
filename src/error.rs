//! Error types for profile loading, validation and assumption tables

use thiserror::Error;

/// Result type for fallible crate operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised at the boundary of the engine
///
/// The calculators and the projection engine themselves are total; these
/// errors only come from reading inputs and checking them before a run.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error (file operations)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid JSON profile or patch
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed assumption table
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A field in an assumption table could not be parsed
    #[error("Parse error in {table}: {message}")]
    Parse { table: String, message: String },

    /// Profile contents contradict each other
    #[error("Invalid profile: {0}")]
    InvalidProfile(String),

    /// No built-in scenario with the requested id
    #[error("Unknown scenario: {0}")]
    UnknownScenario(String),
}
