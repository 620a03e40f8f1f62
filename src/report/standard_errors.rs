//! report::standard_errors — Hessian-based covariance and standard errors.
//!
//! Purpose
//! -------
//! After a caller's optimizer has located `θ̂`, turn the curvature of the
//! dispatched objective at `θ̂` into a covariance matrix and per-parameter
//! standard errors, labelled with the context's parameter names.
//!
//! Key behaviors
//! -------------
//! - Obtain the observed information `J(θ̂)` as
//!   [`ObjectiveFunction::hessian`] at `θ̂`.
//! - Copy `J(θ̂)` into a `nalgebra::DMatrix` ([`fill_dmatrix`]) and form its
//!   Moore–Penrose pseudoinverse via `symmetric_eigen`.
//! - Return a [`ParameterReport`] with estimates, standard errors, the
//!   covariance matrix and labels from the [`ParamLayout`].
//!
//! Invariants & assumptions
//! ------------------------
//! - The objective is a *summed* negative log-likelihood, so `J(θ̂)⁺` is the
//!   covariance itself (no `1/n` rescaling).
//! - `J(θ̂)` is symmetric on arrival; symmetry is enforced upstream by the
//!   finite-difference layer.
//! - Eigenvalues at most [`EIGEN_EPS`] are treated as zero: those directions
//!   get no variance contribution rather than an infinite one.
//!
//! Conventions
//! -----------
//! - No explicit inverse is formed.
//! - Errors are reported via [`ObjectiveResult<T>`].
//!
//! Testing notes
//! -------------
//! - Unit tests cover the `ndarray` → `DMatrix` copy, agreement with an
//!   analytic inverse for a diagonal quadratic, and pseudoinverse behavior
//!   on a rank-deficient information matrix.
use nalgebra::DMatrix;
use ndarray::{Array1, Array2};

use crate::{
    context::ParamLayout,
    dispatch::ModelKind,
    objective::{
        errors::ObjectiveResult,
        function::ObjectiveFunction,
        traits::Objective,
        types::{Hessian, Theta},
    },
};

/// Eigenvalues of `J(θ̂)` at or below this are treated as zero.
pub const EIGEN_EPS: f64 = 1e-12;

/// Estimates and their uncertainty for one fitted model.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterReport {
    model: ModelKind,
    labels: Vec<String>,
    estimates: Theta,
    std_errors: Array1<f64>,
    covariance: Array2<f64>,
    layout: ParamLayout,
}

impl ParameterReport {
    pub fn model(&self) -> ModelKind {
        self.model
    }

    /// One label per entry of `θ`, e.g. `beta[1]` or `M[0,2]`.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn estimates(&self) -> &Theta {
        &self.estimates
    }

    pub fn std_errors(&self) -> &Array1<f64> {
        &self.std_errors
    }

    pub fn covariance(&self) -> &Array2<f64> {
        &self.covariance
    }

    pub fn layout(&self) -> &ParamLayout {
        &self.layout
    }

    /// `(estimate, standard error)` for the entry labelled `label`.
    pub fn get(&self, label: &str) -> Option<(f64, f64)> {
        let index = self.labels.iter().position(|l| l == label)?;
        Some((self.estimates[index], self.std_errors[index]))
    }
}

/// standard_errors — covariance and standard errors at `theta_hat`.
///
/// Parameters
/// ----------
/// - `f`: `&ObjectiveFunction<O, P>`
///   Dispatched objective whose minimizer is `theta_hat`.
/// - `theta_hat`: `&Theta`
///   Parameter estimate, laid out as `f.layout()`.
///
/// Returns
/// -------
/// `ObjectiveResult<ParameterReport>`
///   Estimates, `sqrt(diag(J⁺))`, `J⁺` and per-entry labels.
///
/// Errors
/// ------
/// - Any error from [`ObjectiveFunction::hessian`] (misfit or non-finite
///   `theta_hat`, implementation failures, invalid Hessians).
///
/// Notes
/// -----
/// - At a point that is not a minimum `J` can have negative eigenvalues;
///   those are dropped along with the near-zero ones.
/// - A context without parameters yields an empty report.
pub fn standard_errors<O: Objective, P: Objective>(
    f: &ObjectiveFunction<'_, O, P>, theta_hat: &Theta,
) -> ObjectiveResult<ParameterReport> {
    let obs_info = f.hessian(theta_hat)?;
    let n = obs_info.nrows();
    // nalgebra's eigensolver rejects 0×0 input.
    if n == 0 {
        return Ok(ParameterReport {
            model: f.kind(),
            labels: Vec::new(),
            estimates: theta_hat.clone(),
            std_errors: Array1::zeros(0),
            covariance: Array2::zeros((0, 0)),
            layout: f.layout().clone(),
        });
    }
    let mut obs_info_nalg = DMatrix::<f64>::zeros(n, n);
    fill_dmatrix(&obs_info, &mut obs_info_nalg);
    let covariance = pseudo_inverse(obs_info_nalg, n);
    let std_errors = covariance.diag().mapv(f64::sqrt);
    Ok(ParameterReport {
        model: f.kind(),
        labels: f.layout().labels(),
        estimates: theta_hat.clone(),
        std_errors,
        covariance,
        layout: f.layout().clone(),
    })
}

// ---- Helper methods ----

fn fill_dmatrix(obs_info: &Hessian, obs_info_nalg: &mut DMatrix<f64>) {
    for ((i, j), &value) in obs_info.indexed_iter() {
        obs_info_nalg[(i, j)] = value;
    }
}

/// `J⁺ = Σ_{k: λ_k > EIGEN_EPS} q_k q_kᵀ / λ_k`.
fn pseudo_inverse(obs_info_nalg: DMatrix<f64>, n: usize) -> Array2<f64> {
    let eigen_decomp = obs_info_nalg.symmetric_eigen();
    let q = eigen_decomp.eigenvectors;
    let mut cov = Array2::<f64>::zeros((n, n));
    for (k, &lambda) in eigen_decomp.eigenvalues.iter().enumerate() {
        if lambda <= EIGEN_EPS {
            continue;
        }
        for i in 0..n {
            for j in 0..n {
                cov[[i, j]] += q[(i, k)] * q[(j, k)] / lambda;
            }
        }
    }
    cov
}
