//! objective — the contract implementations fulfil and the derivative layer.
//!
//! Purpose
//! -------
//! Define what a dispatchable model is ([`Objective`]) and turn a dispatched
//! model into something an optimizer can drive: a function of one flat
//! parameter vector with values, gradients and Hessians
//! ([`ObjectiveFunction`]), plus an argmin bridge ([`ArgMinAdapter`]).
//!
//! Key behaviors
//! -------------
//! - [`Objective::value`] is required; [`Objective::gradient`] is optional
//!   and defaults to `GradientNotImplemented`.
//! - [`ObjectiveFunction`] resolves the model once, evaluates at any `θ`
//!   through fresh contexts, and falls back to finite differences
//!   ([`finite_diff`]) according to [`DerivativeOptions`].
//! - Every failure surfaces as [`ObjectiveError`]; argmin and `anyhow`
//!   errors convert into it by downcasting.
//!
//! Invariants & assumptions
//! ------------------------
//! - Values are minimized (negative log-likelihood); gradients and
//!   Hessians are of that same value with respect to `θ`.
//! - Values, gradients and Hessians that leave this module are finite and
//!   correctly shaped ([`validation`]).
//!
//! Conventions
//! -----------
//! - `θ`, gradients and Hessians use the aliases in [`types`].
//! - Errors are returned as [`ObjectiveResult<T>`]; nothing here panics on
//!   bad input.
//!
//! Downstream usage
//! ----------------
//! - Model authors implement [`Objective`] and register it in a
//!   [`Dispatcher`](crate::dispatch::Dispatcher).
//! - Hosts wrap the dispatcher in an [`ObjectiveFunction`] and hand an
//!   [`ArgMinAdapter`] to the argmin solver of their choice.
//!
//! Testing notes
//! -------------
//! - Each submodule tests its own concern with closed-form toy objectives;
//!   `tests/dispatch_pipeline.rs` runs an L-BFGS fit end to end.
pub mod adapter;
pub mod errors;
pub mod finite_diff;
pub mod function;
pub mod options;
pub mod traits;
pub mod types;
pub mod validation;

pub use self::adapter::ArgMinAdapter;
pub use self::errors::{ObjectiveError, ObjectiveResult};
pub use self::function::ObjectiveFunction;
pub use self::options::{DerivativeOptions, GradientMode};
pub use self::traits::Objective;
pub use self::types::{Cost, Grad, Hessian, Theta};

pub mod prelude {
    pub use super::adapter::ArgMinAdapter;
    pub use super::errors::{ObjectiveError, ObjectiveResult};
    pub use super::function::ObjectiveFunction;
    pub use super::options::{DerivativeOptions, GradientMode};
    pub use super::traits::Objective;
    pub use super::types::{Cost, Grad, Hessian, Theta};
}
