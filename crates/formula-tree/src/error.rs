//! Formula error types

use thiserror::Error;

/// Result type for formula operations
pub type FormulaResult<T> = std::result::Result<T, FormulaError>;

/// Errors that can occur while building or compiling a formula tree
#[derive(Debug, Error)]
pub enum FormulaError {
    /// A node (or the formula root) has no value to compile
    #[error("Missing value: {0}")]
    MissingValue(String),

    /// A node was assembled with the wrong shape for its kind
    #[error("Structural misuse: {0}")]
    StructuralMisuse(String),

    /// Wrong number of arguments
    #[error("Wrong number of arguments for {function}: expected {expected}, got {actual}")]
    ArgumentCount {
        function: String,
        expected: String,
        actual: usize,
    },

    /// Unknown function or operator
    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    /// Number literal that has no decimal text form
    #[error("Number literal is not finite: {0}")]
    NonFiniteNumber(f64),

    /// Tree is deeper than the configured compile limit
    #[error("Formula tree exceeds the maximum depth of {0}")]
    DepthLimitExceeded(usize),

    /// JSON rendering or tree description error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
