//! Errors raised while resolving a model identifier.
//!
//! Exactly one failure is observable at the dispatch layer: the context
//! names a model that has no registry entry. Its user-visible message is the
//! literal `"Unknown model."`; the offending identifier is kept on the value
//! for diagnostics but never changes the message.

/// Result alias for registry lookups.
pub type DispatchResult<T> = Result<T, DispatchError>;

/// Dispatch-layer error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// The `model` field matched no registered identifier.
    UnrecognizedModel { name: String },
}

impl DispatchError {
    /// Identifier that failed to resolve.
    pub fn model_name(&self) -> &str {
        match self {
            DispatchError::UnrecognizedModel { name } => name,
        }
    }
}

impl std::error::Error for DispatchError {}

impl std::fmt::Display for DispatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DispatchError::UnrecognizedModel { .. } => write!(f, "Unknown model."),
        }
    }
}
