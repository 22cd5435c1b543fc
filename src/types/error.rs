//! Error types for the ku-graph library.

use thiserror::Error;

/// All errors that can occur in the ku-graph library.
#[derive(Error, Debug)]
pub enum KuGraphError {
    /// Link weight outside the closed interval [0.0, 1.0] (or NaN).
    #[error("Link weight must be between 0.0 and 1.0, received: {0}")]
    InvalidWeight(f64),

    /// A knowledge unit was linked to itself where the caller forbids it.
    #[error("Cannot link a Knowledge Unit to itself: {0}")]
    SelfLink(String),

    /// Malformed line in a link script.
    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Configuration could not be read or parsed.
    #[error("Config error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience result type for ku-graph operations.
pub type KuGraphResult<T> = Result<T, KuGraphError>;
