//! Unified error type for objective evaluation and its derivatives.
//!
//! [`ObjectiveError`] is what callers of [`Objective`](crate::objective::Objective),
//! [`ObjectiveFunction`](crate::objective::ObjectiveFunction) and the argmin
//! adapter see. Lower-level errors ([`DispatchError`], [`ContextError`],
//! argmin/anyhow errors raised by host implementations) convert into it via
//! `From`, so `?` works across layers.
use argmin::core::ArgminError;

use crate::{context::errors::ContextError, dispatch::errors::DispatchError};

/// Result alias for objective operations.
pub type ObjectiveResult<T> = Result<T, ObjectiveError>;

#[derive(Debug, Clone, PartialEq)]
pub enum ObjectiveError {
    // ---- Dispatch ----
    UnrecognizedModel {
        name: String,
    },

    // ---- Context ----
    Context(ContextError),

    // ---- Objective value ----
    NonFiniteValue {
        value: f64,
    },

    // ---- Gradient ----
    GradientNotImplemented,

    GradientDimMismatch {
        expected: usize,
        found: usize,
    },

    InvalidGradient {
        index: usize,
        value: f64,
        reason: &'static str,
    },

    // ---- Finite Diffs ----
    HessianDimMismatch {
        expected: usize,
        found: (usize, usize),
    },

    InvalidHessian {
        row: usize,
        col: usize,
        value: f64,
    },

    // ---- Options ----
    InvalidGradientMode {
        name: String,
        reason: &'static str,
    },

    InvalidLink {
        name: String,
        reason: &'static str,
    },

    // ---- Numerics ----
    InvalidDistribution {
        name: &'static str,
        reason: &'static str,
    },

    // ---- Host implementation ----
    Implementation {
        text: String,
    },

    // ---- Argmin ---
    InvalidParameter {
        text: String,
    },
    NotImplemented {
        text: String,
    },
    NotInitialized {
        text: String,
    },
    ConditionViolated {
        text: String,
    },
    CheckPointNotFound {
        text: String,
    },
    PotentialBug {
        text: String,
    },
    ImpossibleError {
        text: String,
    },
    BackendError {
        text: String,
    },

    // ---- Fallback ----
    UnknownError,
}

impl std::error::Error for ObjectiveError {}

impl std::fmt::Display for ObjectiveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Dispatch ----
            ObjectiveError::UnrecognizedModel { .. } => write!(f, "Unknown model."),

            // ---- Context ----
            ObjectiveError::Context(err) => write!(f, "{err}"),

            // ---- Objective value ----
            ObjectiveError::NonFiniteValue { value } => {
                write!(f, "Non-finite objective value: {value}")
            }

            // ---- Gradient ----
            ObjectiveError::GradientNotImplemented => {
                write!(f, "Analytic gradient not implemented")
            }
            ObjectiveError::GradientDimMismatch { expected, found } => {
                write!(f, "Gradient dimension mismatch: expected {expected}, found {found}")
            }
            ObjectiveError::InvalidGradient { index, value, reason } => {
                write!(f, "Invalid gradient at index {index}: {value}: {reason}")
            }

            // ---- Finite Diffs ----
            ObjectiveError::HessianDimMismatch { expected, found } => {
                write!(
                    f,
                    "Hessian dimension mismatch: expected ({expected}, {expected}), found {found:?}"
                )
            }
            ObjectiveError::InvalidHessian { row, col, value } => {
                write!(f, "Invalid Hessian at ({row}, {col}): {value}, must be finite")
            }

            // ---- Options ----
            ObjectiveError::InvalidGradientMode { name, reason } => {
                write!(f, "Invalid gradient mode '{name}': {reason}")
            }
            ObjectiveError::InvalidLink { name, reason } => {
                write!(f, "Invalid inverse link '{name}': {reason}")
            }

            // ---- Numerics ----
            ObjectiveError::InvalidDistribution { name, reason } => {
                write!(f, "Invalid {name} distribution: {reason}")
            }

            // ---- Host implementation ----
            ObjectiveError::Implementation { text } => {
                write!(f, "Objective implementation failed: {text}")
            }

            // ---- Argmin ----
            ObjectiveError::InvalidParameter { text } => {
                write!(f, "Invalid parameter: {text}")
            }
            ObjectiveError::NotImplemented { text } => {
                write!(f, "Not implemented: {text}")
            }
            ObjectiveError::NotInitialized { text } => {
                write!(f, "Not initialized: {text}")
            }
            ObjectiveError::ConditionViolated { text } => {
                write!(f, "Condition violated: {text}")
            }
            ObjectiveError::CheckPointNotFound { text } => {
                write!(f, "Checkpoint not found: {text}")
            }
            ObjectiveError::PotentialBug { text } => {
                write!(f, "Potential bug: {text}")
            }
            ObjectiveError::ImpossibleError { text } => {
                write!(f, "Impossible error: {text}")
            }
            ObjectiveError::BackendError { text } => {
                write!(f, "Backend error: {text}")
            }

            // ---- Fallback ----
            ObjectiveError::UnknownError => {
                write!(f, "Unknown error")
            }
        }
    }
}

impl From<DispatchError> for ObjectiveError {
    fn from(err: DispatchError) -> Self {
        match err {
            DispatchError::UnrecognizedModel { name } => ObjectiveError::UnrecognizedModel { name },
        }
    }
}

impl From<ContextError> for ObjectiveError {
    fn from(err: ContextError) -> Self {
        ObjectiveError::Context(err)
    }
}

/// Recover a typed error from an `anyhow`/argmin error.
///
/// `argmin::core::Error` is `anyhow::Error`, so one conversion serves both
/// argmin solver failures and host implementations that report errors with
/// `anyhow`. Errors that started life as an [`ObjectiveError`] (e.g. raised
/// inside the argmin adapter) come back unchanged.
impl From<anyhow::Error> for ObjectiveError {
    fn from(original_err: anyhow::Error) -> Self {
        let original_err = match original_err.downcast::<ObjectiveError>() {
            Ok(obj_err) => return obj_err,
            Err(err) => err,
        };
        match original_err.downcast::<ArgminError>() {
            Ok(argmin_err) => match argmin_err {
                ArgminError::InvalidParameter { text } => ObjectiveError::InvalidParameter { text },
                ArgminError::NotImplemented { text } => ObjectiveError::NotImplemented { text },
                ArgminError::NotInitialized { text } => ObjectiveError::NotInitialized { text },
                ArgminError::ConditionViolated { text } => {
                    ObjectiveError::ConditionViolated { text }
                }
                ArgminError::CheckpointNotFound { text } => {
                    ObjectiveError::CheckPointNotFound { text }
                }
                ArgminError::PotentialBug { text } => ObjectiveError::PotentialBug { text },
                ArgminError::ImpossibleError { text } => ObjectiveError::ImpossibleError { text },
                _ => ObjectiveError::UnknownError,
            },
            Err(err) => ObjectiveError::Implementation { text: err.to_string() },
        }
    }
}
