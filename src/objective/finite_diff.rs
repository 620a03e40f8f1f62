//! objective::finite_diff — finite-difference gradient and Hessian helpers.
//!
//! Purpose
//! -------
//! Approximate derivatives of a dispatched objective when its implementation
//! supplies no analytic gradient (or when finite differences are requested
//! explicitly), without exposing the `finitediff` API to the rest of the
//! crate.
//!
//! Key behaviors
//! -------------
//! - [`fd_gradient`] tries a central-difference gradient first and retries
//!   with forward differences when the central pass captured an evaluation
//!   error or produced a non-finite entry.
//! - [`compute_hessian`] differentiates a gradient function with central
//!   differences, falls back to forward differences on validation failure,
//!   and symmetrizes the result.
//! - [`compute_hessian_from_values`] builds a Hessian from objective values
//!   alone with a second-order central stencil, for models without an
//!   analytic gradient.
//!
//! Invariants & assumptions
//! ------------------------
//! - The closures handed to `finitediff` cannot return `Result`. Callers wrap
//!   fallible evaluations so that the first error is stored in the shared
//!   `closure_err` cell and `NaN` is returned in its place.
//! - A captured error always wins over a numerical result on the final
//!   (forward) pass.
//! - Returned gradients satisfy [`validate_grad`]; returned Hessians satisfy
//!   [`validate_hessian`] and are exactly symmetric.
//! - Differencing a finite-difference gradient again at `finitediff`'s
//!   `√ε` step amplifies rounding noise past usefulness, so value-only
//!   Hessians use their own stencil with step `ε^(1/4)·max(1, |θᵢ|)`.
//!
//! Downstream usage
//! ----------------
//! - [`ObjectiveFunction`](crate::objective::ObjectiveFunction) calls these
//!   helpers; implementation authors never need to.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the central path, the central→forward fallback, error
//!   propagation from the closure, and both Hessian constructions.
use std::cell::RefCell;

use finitediff::FiniteDiff;
use log::trace;

use crate::objective::{
    errors::{ObjectiveError, ObjectiveResult},
    types::{Grad, Hessian, Theta},
    validation::{validate_grad, validate_hessian},
};

/// `f64::EPSILON^(1/4)` (exactly 2⁻¹³), base step of the value-only Hessian stencil.
const HESS_STEP: f64 = 1.220_703_125e-4;

/// fd_gradient — finite-difference gradient with error capture and fallback.
///
/// Parameters
/// ----------
/// - `theta`: `&Theta`
///   Point at which the gradient is approximated; its length is the
///   expected gradient dimension.
/// - `func`: `&G`
///   Scalar objective. Must route evaluation errors into `closure_err` and
///   return `NaN` in that case.
/// - `closure_err`: `&RefCell<Option<ObjectiveError>>`
///   Error side channel shared with `func`. Cleared on entry and before the
///   forward pass.
///
/// Returns
/// -------
/// `ObjectiveResult<Grad>`
///   The central-difference gradient when it is clean, otherwise the
///   forward-difference gradient.
///
/// Errors
/// ------
/// - Whatever `func` stored in `closure_err` during the forward pass.
/// - `ObjectiveError::GradientDimMismatch` / `InvalidGradient` when the
///   forward-difference gradient fails [`validate_grad`].
///
/// Examples
/// --------
/// ```rust
/// # use std::cell::RefCell;
/// # use ndarray::array;
/// # use tmb_dispatch::objective::{ObjectiveError, Theta, finite_diff::fd_gradient};
/// let theta: Theta = array![1.0, -2.0];
/// let closure_err: RefCell<Option<ObjectiveError>> = RefCell::new(None);
/// let f = |x: &Theta| x.dot(x);
///
/// let grad = fd_gradient(&theta, &f, &closure_err).unwrap();
/// assert!((grad[0] - 2.0).abs() < 1e-6);
/// assert!((grad[1] + 4.0).abs() < 1e-6);
/// ```
pub fn fd_gradient<G: Fn(&Theta) -> f64>(
    theta: &Theta, func: &G, closure_err: &RefCell<Option<ObjectiveError>>,
) -> ObjectiveResult<Grad> {
    let dim = theta.len();
    closure_err.replace(None);
    let central = theta.central_diff(func);
    if closure_err.borrow().is_none() && validate_grad(&central, dim).is_ok() {
        return Ok(central);
    }
    trace!("central-difference gradient rejected at dim {dim}; retrying with forward differences");
    run_forward_diff(theta, func, closure_err)
}

/// compute_hessian — finite-difference Hessian of a gradient function.
///
/// Central differences are attempted first. Any captured error or validation
/// failure on that pass triggers a forward-difference retry, whose result (or
/// captured error) is final. The accepted matrix is symmetrized in place.
///
/// Errors
/// ------
/// - Whatever `grad_fn` stored in `closure_err` during the forward pass.
/// - `ObjectiveError::HessianDimMismatch` / `InvalidHessian` from
///   [`validate_hessian`].
pub fn compute_hessian<F: Fn(&Theta) -> Grad>(
    grad_fn: &F, theta: &Theta, closure_err: &RefCell<Option<ObjectiveError>>,
) -> ObjectiveResult<Hessian> {
    let dim = theta.len();
    closure_err.replace(None);
    let mut cent_hess = theta.central_hessian(grad_fn);
    if closure_err.borrow().is_none() && validate_hessian(&cent_hess, dim).is_ok() {
        symmetrize_hess(&mut cent_hess);
        return Ok(cent_hess);
    }
    trace!("central-difference Hessian rejected at dim {dim}; retrying with forward differences");
    closure_err.replace(None);
    let mut forward_hess = theta.forward_hessian(grad_fn);
    if let Some(err) = closure_err.take() {
        return Err(err);
    }
    validate_hessian(&forward_hess, dim)?;
    symmetrize_hess(&mut forward_hess);
    Ok(forward_hess)
}

/// compute_hessian_from_values — Hessian from objective values only.
///
/// Purpose
/// -------
/// Approximate `∇²c(θ)` when no analytic gradient exists, using
///
/// - `Hᵢᵢ = (c(θ + hᵢeᵢ) − 2c(θ) + c(θ − hᵢeᵢ)) / hᵢ²`
/// - `Hᵢⱼ = (c(++) − c(+−) − c(−+) + c(−−)) / (4hᵢhⱼ)`
///
/// with `hᵢ = ε^(1/4)·max(1, |θᵢ|)`. The off-diagonal formula is symmetric
/// by construction.
///
/// Errors
/// ------
/// - The first error `func` stored in `closure_err`.
/// - `ObjectiveError::InvalidHessian` when a stencil value was non-finite.
///
/// Notes
/// -----
/// - Costs `1 + 2d + 2d(d − 1)` evaluations for `d = theta.len()`.
pub fn compute_hessian_from_values<G: Fn(&Theta) -> f64>(
    func: &G, theta: &Theta, closure_err: &RefCell<Option<ObjectiveError>>,
) -> ObjectiveResult<Hessian> {
    let dim = theta.len();
    closure_err.replace(None);
    let steps: Vec<f64> = theta.iter().map(|x| HESS_STEP * x.abs().max(1.0)).collect();
    let f0 = func(theta);
    let mut hess = Hessian::zeros((dim, dim));
    for i in 0..dim {
        let hi = steps[i];
        let fp = func(&shifted(theta, &[(i, hi)]));
        let fm = func(&shifted(theta, &[(i, -hi)]));
        hess[[i, i]] = (fp - 2.0 * f0 + fm) / (hi * hi);
        for j in 0..i {
            let hj = steps[j];
            let fpp = func(&shifted(theta, &[(i, hi), (j, hj)]));
            let fpm = func(&shifted(theta, &[(i, hi), (j, -hj)]));
            let fmp = func(&shifted(theta, &[(i, -hi), (j, hj)]));
            let fmm = func(&shifted(theta, &[(i, -hi), (j, -hj)]));
            let hij = (fpp - fpm - fmp + fmm) / (4.0 * hi * hj);
            hess[[i, j]] = hij;
            hess[[j, i]] = hij;
        }
    }
    if let Some(err) = closure_err.take() {
        return Err(err);
    }
    validate_hessian(&hess, dim)?;
    Ok(hess)
}

/// Store the first error raised inside a finite-difference closure.
pub(crate) fn capture_err(closure_err: &RefCell<Option<ObjectiveError>>, err: ObjectiveError) {
    let mut slot = closure_err.borrow_mut();
    if slot.is_none() {
        *slot = Some(err);
    }
}

// ---- Helper methods ----

fn run_forward_diff<G: Fn(&Theta) -> f64>(
    theta: &Theta, func: &G, closure_err: &RefCell<Option<ObjectiveError>>,
) -> ObjectiveResult<Grad> {
    closure_err.replace(None);
    let fd_grad = theta.forward_diff(func);
    if let Some(err) = closure_err.take() {
        return Err(err);
    }
    validate_grad(&fd_grad, theta.len())?;
    Ok(fd_grad)
}

fn shifted(theta: &Theta, moves: &[(usize, f64)]) -> Theta {
    let mut point = theta.clone();
    for &(index, delta) in moves {
        point[index] += delta;
    }
    point
}

/// Average each off-diagonal pair; the diagonal is left untouched.
fn symmetrize_hess(hess: &mut Hessian) {
    for i in 0..hess.nrows() {
        for j in 0..i {
            let avg = 0.5 * (hess[[i, j]] + hess[[j, i]]);
            hess[[i, j]] = avg;
            hess[[j, i]] = avg;
        }
    }
}
