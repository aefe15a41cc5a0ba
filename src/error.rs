//! Error types for imputation, clustering, and prediction.
use crate::Energy;
use crate::Probability;
use crate::Value;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the forecasting pipeline.
///
/// Every variant is a local precondition failure. None are transient, so
/// nothing is retried; the operation that raised it is aborted and any
/// previously computed model state is left as it was.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A training row or query vector is malformed.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A probability would have to be divided by zero.
    #[error("degenerate data: {0}")]
    DegenerateData(String),

    /// A caller-supplied parameter is out of range.
    #[error("invalid parameter: {message}")]
    InvalidParameter {
        /// Description of what's wrong with the parameter
        message: String,
    },

    /// An operation was invoked before the state it depends on exists.
    #[error("precondition violated: {0}")]
    Precondition(&'static str),

    /// Clustering hit its iteration cap without reaching a fixed point.
    #[error("clustering did not converge after {iterations} iterations (drift {drift})")]
    DidNotConverge {
        /// Refinement steps performed
        iterations: usize,
        /// Largest centroid movement on the final step
        drift: Energy,
    },
}

impl Error {
    /// Create a DegenerateData error.
    pub fn degenerate(message: impl Into<String>) -> Self {
        Self::DegenerateData(message.into())
    }

    /// Create an InvalidParameter error.
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            message: message.into(),
        }
    }
}

/// Ways an input row or query can be malformed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("interval lower bound {lower} exceeds upper bound {upper}")]
    InvertedInterval { lower: Value, upper: Value },

    #[error("interval is unbounded on both ends")]
    UnboundedInterval,

    #[error("mass {0} is not a probability in [0, 1]")]
    MassOutOfRange(Probability),

    #[error("example {row} has no features")]
    EmptyExample { row: usize },

    #[error("training table is empty")]
    EmptyTable,

    #[error("example {row} imputes to width {actual}, schema expects {expected}")]
    RaggedLayout {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("vector has dimension {actual}, centroids have {expected}")]
    DimensionMismatch { expected: usize, actual: usize },
}
