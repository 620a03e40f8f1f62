//! objective::types — shared numeric aliases for objective evaluation.
//!
//! Purpose
//! -------
//! Centralize the numeric types used when a dispatched model is viewed as a
//! function of one flat parameter vector. Keeping them here lets the rest of
//! the crate stay agnostic to `ndarray` generics.
//!
//! Conventions
//! -----------
//! - `Theta` and `Grad` have one entry per scalar parameter, in the order
//!   produced by [`ParamLayout`](crate::context::ParamLayout).
//! - `Hessian` is a dense `theta.len() × theta.len()` matrix.
//! - `Cost` is the value an optimizer minimizes (a negative log-likelihood
//!   under the crate's sign convention).
use ndarray::{Array1, Array2};

/// Flat parameter vector `θ`.
pub type Theta = Array1<f64>;

/// Gradient `∇c(θ)`, same shape as [`Theta`].
pub type Grad = Array1<f64>;

/// Dense second-derivative matrix of the objective.
pub type Hessian = Array2<f64>;

/// Scalar objective value.
pub type Cost = f64;
