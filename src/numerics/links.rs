//! Numerically stable link functions and log-space helpers.
//!
//! Guarded forms of the transforms occupancy and count likelihoods lean on,
//! using explicit cutoffs (`x > 20.0`) so `f64` arithmetic stays well
//! conditioned in the tails.
//!
//! # Provided items
//! - [`safe_softplus`] / [`safe_softplus_inv`]: `ln(1 + eˣ)` and its inverse.
//! - [`inv_logit`], [`log_inv_logit`], [`log1m_inv_logit`]: probabilities
//!   and their logs from a logit-scale predictor.
//! - [`inv_cloglog`]: `1 − exp(−eˣ)`.
//! - [`log_sum_exp`]: `ln Σ eˣⁱ` without overflow.
//! - [`InvLink`]: run-time choice of inverse link, parsed from its name.
use std::str::FromStr;

use crate::objective::errors::ObjectiveError;

pub fn safe_softplus(x: f64) -> f64 {
    if x > 20.0 { x } else { x.exp().ln_1p() }
}

pub fn safe_softplus_inv(x: f64) -> f64 {
    if x > 20.0 { x } else { x.exp_m1().ln() }
}

/// Logistic function `1 / (1 + e⁻ˣ)`, evaluated without overflow for either sign.
pub fn inv_logit(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// `ln(inv_logit(x)) = −softplus(−x)`.
pub fn log_inv_logit(x: f64) -> f64 {
    -safe_softplus(-x)
}

/// `ln(1 − inv_logit(x)) = −softplus(x)`.
pub fn log1m_inv_logit(x: f64) -> f64 {
    -safe_softplus(x)
}

pub fn inv_cloglog(x: f64) -> f64 {
    -(-x.exp()).exp_m1()
}

/// `ln Σᵢ exp(xᵢ)`; `−∞` for an empty input or when every term is `−∞`,
/// `NaN` whenever any term is `NaN`.
pub fn log_sum_exp(xs: &[f64]) -> f64 {
    if xs.iter().any(|x| x.is_nan()) {
        return f64::NAN;
    }
    let max = xs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if max == f64::NEG_INFINITY {
        return f64::NEG_INFINITY;
    }
    if max.is_infinite() {
        return max;
    }
    max + xs.iter().map(|&x| (x - max).exp()).sum::<f64>().ln()
}

/// Inverse link from linear predictor to natural scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvLink {
    Logit,
    Cloglog,
    Log,
    Identity,
}

impl InvLink {
    pub fn apply(self, eta: f64) -> f64 {
        match self {
            InvLink::Logit => inv_logit(eta),
            InvLink::Cloglog => inv_cloglog(eta),
            InvLink::Log => eta.exp(),
            InvLink::Identity => eta,
        }
    }
}

impl FromStr for InvLink {
    type Err = ObjectiveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "logit" => Ok(InvLink::Logit),
            "cloglog" => Ok(InvLink::Cloglog),
            "log" => Ok(InvLink::Log),
            "identity" => Ok(InvLink::Identity),
            _ => Err(ObjectiveError::InvalidLink {
                name: s.to_string(),
                reason: "Valid options are case insensitive 'logit', 'cloglog', 'log' or 'identity'.",
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Agreement of the guarded transforms with naïve formulas on a safe grid.
    // - Finite, saturating behavior in the tails.
    // - Parsing of inverse-link names.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // On moderate inputs the stable forms match the textbook formulas.
    //
    // Given
    // -----
    // - x in {-5, -0.5, 0, 0.5, 5}.
    //
    // Expect
    // ------
    // - inv_logit, its logs, inv_cloglog and softplus agree to 1e-12.
    // - softplus_inv inverts softplus.
    fn transforms_match_naive_formulas_on_safe_grid() {
        for x in [-5.0_f64, -0.5, 0.0, 0.5, 5.0] {
            let p = 1.0 / (1.0 + (-x).exp());

            assert_relative_eq!(inv_logit(x), p, epsilon = 1e-12);
            assert_relative_eq!(log_inv_logit(x), p.ln(), epsilon = 1e-12);
            assert_relative_eq!(log1m_inv_logit(x), (1.0 - p).ln(), epsilon = 1e-12);
            assert_relative_eq!(inv_cloglog(x), 1.0 - (-x.exp()).exp(), epsilon = 1e-12);
            assert_relative_eq!(safe_softplus(x), (1.0 + x.exp()).ln(), epsilon = 1e-12);
            assert_relative_eq!(safe_softplus_inv(safe_softplus(x)), x, epsilon = 1e-9);
        }
    }

    #[test]
    fn transforms_stay_finite_in_tails() {
        assert_eq!(inv_logit(-800.0), 0.0);
        assert_eq!(inv_logit(800.0), 1.0);
        assert_relative_eq!(log_inv_logit(-800.0), -800.0);
        assert_relative_eq!(log1m_inv_logit(800.0), -800.0);
        assert_eq!(inv_cloglog(800.0), 1.0);
        assert!(inv_cloglog(-40.0) > 0.0);
    }

    #[test]
    // Purpose
    // -------
    // log_sum_exp avoids overflow and handles empty / all −∞ inputs.
    fn log_sum_exp_is_stable() {
        assert_relative_eq!(log_sum_exp(&[1000.0, 1000.0]), 1000.0 + 2.0_f64.ln(), epsilon = 1e-9);
        assert_relative_eq!(log_sum_exp(&[0.0, 1.0_f64.ln()]), 2.0_f64.ln(), epsilon = 1e-12);
        assert_eq!(log_sum_exp(&[]), f64::NEG_INFINITY);
        assert_eq!(log_sum_exp(&[f64::NEG_INFINITY, f64::NEG_INFINITY]), f64::NEG_INFINITY);
        assert!(log_sum_exp(&[f64::NAN]).is_nan());
        assert!(log_sum_exp(&[f64::NAN, f64::NEG_INFINITY]).is_nan());
        assert!(log_sum_exp(&[0.0, f64::NAN]).is_nan());
    }

    #[test]
    fn inv_link_parses_and_applies() {
        assert_eq!("LOGIT".parse::<InvLink>().unwrap(), InvLink::Logit);
        assert_eq!("Cloglog".parse::<InvLink>().unwrap(), InvLink::Cloglog);
        assert_relative_eq!("log".parse::<InvLink>().unwrap().apply(1.0), 1.0_f64.exp());
        assert_eq!(InvLink::Identity.apply(-3.5), -3.5);
        assert!(matches!(
            "probit".parse::<InvLink>(),
            Err(ObjectiveError::InvalidLink { ref name, .. }) if name == "probit"
        ));
    }
}
