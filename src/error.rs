//! Error types for the GLS engine.
//!
//! Every failure inside a run propagates to the driver boundary as a
//! [`GlsError`]. A failed run never yields a partial tour.

use thiserror::Error;

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, GlsError>;

/// Errors that abort a GLS run or reject its inputs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GlsError {
    /// The guidance callback failed or returned an unusable matrix.
    #[error("guidance failed: {0}")]
    Guidance(#[from] GuidanceError),

    /// The run configuration was rejected by `GlsConfig::validate`.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The instance data is inconsistent (shape, symmetry, finiteness).
    #[error("invalid instance: {0}")]
    InvalidInstance(String),

    /// The tour builder was asked to start outside the node range.
    #[error("start node {start} out of range for {n} nodes")]
    InvalidStartNode { start: usize, n: usize },
}

/// Failures attributed to the injected guidance function.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GuidanceError {
    /// The callback reported an error of its own.
    #[error("{name}: {message}")]
    Failed { name: String, message: String },

    /// The callback panicked.
    #[error("{name} panicked: {message}")]
    Panicked { name: String, message: String },

    /// The returned matrix has a different dimension than the instance.
    #[error("{name} returned a {actual}x{actual} matrix, expected {expected}x{expected}")]
    WrongShape {
        name: String,
        expected: usize,
        actual: usize,
    },

    /// The returned matrix contains NaN or infinite entries.
    #[error("{name} returned a non-finite value {value} at ({row}, {col})")]
    NonFinite {
        name: String,
        row: usize,
        col: usize,
        value: f64,
    },

    /// The returned matrix has an entry too large for 2-opt move arithmetic.
    #[error("{name} returned {value} at ({row}, {col}), above the weight limit {limit}")]
    OutOfRange {
        name: String,
        row: usize,
        col: usize,
        value: f64,
        limit: f64,
    },
}

impl GuidanceError {
    /// Creates a callback-reported failure.
    pub fn failed(name: impl Into<String>, message: impl Into<String>) -> Self {
        GuidanceError::Failed {
            name: name.into(),
            message: message.into(),
        }
    }
}
