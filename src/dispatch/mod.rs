//! dispatch — model registry and the dispatcher built on it.
//!
//! Purpose
//! -------
//! Turn the run-time `model` string of an [`EvalContext`](crate::context::EvalContext)
//! into a call on exactly one registered objective implementation.
//!
//! Key behaviors
//! -------------
//! - [`ModelKind`] is the closed set of models; [`REGISTRY`] maps
//!   identifiers to variants and is the only place identifiers are spelled.
//! - Parsing the identifier is the single failure point
//!   ([`DispatchError::UnrecognizedModel`], "Unknown model."); everything
//!   downstream matches exhaustively on [`ModelKind`].
//! - [`Dispatcher`] owns one implementation per variant and returns
//!   [`ScalarResult`]s.
//!
//! Conventions
//! -----------
//! - Identifier comparison is exact and case-sensitive.
//! - Dispatch failures reach callers as `ObjectiveError::UnrecognizedModel`,
//!   which keeps the same message.
pub mod dispatcher;
pub mod errors;
pub mod registry;

pub use self::dispatcher::{Dispatcher, ScalarResult};
pub use self::errors::{DispatchError, DispatchResult};
pub use self::registry::{ModelKind, REGISTRY};
