//! Errors for evaluation-context construction, field access and θ mapping.
//!
//! ## Conventions
//! - Indices into parameter fields are 0-based and follow the flattened
//!   (column-major) order used by [`ParamLayout`](crate::context::ParamLayout).
//! - Field kinds in `TypeMismatch` use the labels returned by
//!   `DataValue::kind` / `ParamValue::kind` (e.g. `"data vector"`).

/// Result alias for context operations.
pub type ContextResult<T> = Result<T, ContextError>;

#[derive(Debug, Clone, PartialEq)]
pub enum ContextError {
    // ---- Construction ----
    /// Field names must be non-empty.
    EmptyFieldName,

    /// A name was bound twice (data and parameters share one namespace).
    DuplicateField { name: String },

    /// Parameter values must be finite.
    NonFiniteParameter { name: String, index: usize, value: f64 },

    // ---- Access ----
    /// No field with this name exists.
    MissingField { name: String },

    /// The field exists but holds a different kind of value.
    TypeMismatch { name: String, expected: &'static str, found: &'static str },

    // ---- θ mapping ----
    /// Flat parameter vector does not match the parameter layout.
    ThetaLengthMismatch { expected: usize, actual: usize },

    /// Flat parameter vector must have finite entries.
    NonFiniteTheta { index: usize, value: f64 },

    /// A flat slice could not be reshaped into a parameter matrix.
    InvalidShape { name: String, rows: usize, cols: usize, len: usize },
}

impl std::error::Error for ContextError {}

impl std::fmt::Display for ContextError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Construction ----
            ContextError::EmptyFieldName => {
                write!(f, "Context field names must be non-empty.")
            }
            ContextError::DuplicateField { name } => {
                write!(f, "Context field '{name}' is bound more than once.")
            }
            ContextError::NonFiniteParameter { name, index, value } => {
                write!(f, "Parameter '{name}' has a non-finite value at index {index}: {value}")
            }
            // ---- Access ----
            ContextError::MissingField { name } => {
                write!(f, "Context has no field named '{name}'.")
            }
            ContextError::TypeMismatch { name, expected, found } => {
                write!(f, "Context field '{name}' is a {found}, expected a {expected}.")
            }
            // ---- θ mapping ----
            ContextError::ThetaLengthMismatch { expected, actual } => {
                write!(f, "Theta length mismatch: expected {expected}, got {actual}")
            }
            ContextError::NonFiniteTheta { index, value } => {
                write!(f, "Theta entry at index {index} must be finite, got {value}")
            }
            ContextError::InvalidShape { name, rows, cols, len } => {
                write!(f, "Cannot reshape {len} values into a {rows}x{cols} matrix for '{name}'.")
            }
        }
    }
}
