//! Error types for the perceptron engine
//!
//! Every fallible operation returns [`Result<T>`]. Precondition violations are
//! reported to the caller immediately and the operation produces no partial
//! output.

use thiserror::Error;

/// Result type alias for this crate
pub type Result<T> = std::result::Result<T, PerceptronError>;

/// All error conditions raised by the engine and its configuration layer.
#[derive(Error, Debug)]
pub enum PerceptronError {
    /// A network was constructed without any layer
    #[error("cannot create a perceptron with less than one layer")]
    EmptyNetwork,

    /// A neuron received more input values than it has weights
    #[error("input count {inputs} greater than weight count {weights}")]
    InvalidInputSize { inputs: usize, weights: usize },

    /// The expected-output vector does not match the output layer width
    #[error("invalid expected output element count: output layer has {expected}, got {actual}")]
    OutputSizeMismatch { expected: usize, actual: usize },

    /// Configuration parsed but holds an unusable value
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file is not valid JSON for the expected shape
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
