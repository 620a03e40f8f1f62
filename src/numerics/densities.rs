//! Log-probability mass functions for count and detection data.
//!
//! Thin wrappers over `statrs` that validate parameters up front and report
//! bad ones as [`ObjectiveError::InvalidDistribution`] instead of letting a
//! NaN leak into an objective value.
use statrs::distribution::{Binomial, Discrete, Poisson};

use crate::objective::errors::{ObjectiveError, ObjectiveResult};

/// `ln P(X = x)` for `X ~ Poisson(lambda)`.
///
/// # Errors
/// `InvalidDistribution` unless `lambda` is finite and `> 0`.
pub fn ln_dpois(x: u64, lambda: f64) -> ObjectiveResult<f64> {
    if !lambda.is_finite() || lambda <= 0.0 {
        return Err(ObjectiveError::InvalidDistribution {
            name: "Poisson",
            reason: "Rate must be finite and positive.",
        });
    }
    let dist = Poisson::new(lambda).map_err(|_| ObjectiveError::InvalidDistribution {
        name: "Poisson",
        reason: "Rate must be finite and positive.",
    })?;
    Ok(dist.ln_pmf(x))
}

/// `ln P(X = x)` for `X ~ Binomial(size, prob)`; `−∞` when `x > size`.
///
/// # Errors
/// `InvalidDistribution` unless `prob` lies in `[0, 1]`.
pub fn ln_dbinom(x: u64, size: u64, prob: f64) -> ObjectiveResult<f64> {
    if !(0.0..=1.0).contains(&prob) {
        return Err(ObjectiveError::InvalidDistribution {
            name: "binomial",
            reason: "Success probability must lie in [0, 1].",
        });
    }
    if x > size {
        return Ok(f64::NEG_INFINITY);
    }
    let dist = Binomial::new(prob, size).map_err(|_| ObjectiveError::InvalidDistribution {
        name: "binomial",
        reason: "Success probability must lie in [0, 1].",
    })?;
    Ok(dist.ln_pmf(x))
}
