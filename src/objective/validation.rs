//! Validation helpers for objective values and derivatives.
//!
//! - **Objective values**: [`validate_value`] rejects NaN and ±∞.
//! - **Gradients**: [`validate_grad`] enforces dimension and finite entries.
//! - **Hessians**: [`validate_hessian`] enforces a square `dim × dim` shape
//!   and finite entries.
//!
//! Only the first offending entry is reported.
use crate::objective::{
    errors::{ObjectiveError, ObjectiveResult},
    types::{Cost, Grad, Hessian},
};

pub fn validate_value(value: Cost) -> ObjectiveResult<()> {
    if !value.is_finite() {
        return Err(ObjectiveError::NonFiniteValue { value });
    }
    Ok(())
}

pub fn validate_grad(grad: &Grad, dim: usize) -> ObjectiveResult<()> {
    if grad.len() != dim {
        return Err(ObjectiveError::GradientDimMismatch { expected: dim, found: grad.len() });
    }
    for (index, &value) in grad.iter().enumerate() {
        if !value.is_finite() {
            return Err(ObjectiveError::InvalidGradient {
                index,
                value,
                reason: "Gradient elements must be finite.",
            });
        }
    }
    Ok(())
}

pub fn validate_hessian(hessian: &Hessian, dim: usize) -> ObjectiveResult<()> {
    if hessian.nrows() != dim || hessian.ncols() != dim {
        return Err(ObjectiveError::HessianDimMismatch {
            expected: dim,
            found: (hessian.nrows(), hessian.ncols()),
        });
    }
    for ((row, col), &value) in hessian.indexed_iter() {
        if !value.is_finite() {
            return Err(ObjectiveError::InvalidHessian { row, col, value });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array1, Array2, array};

    #[test]
    fn validate_value_rejects_nan_and_inf() {
        assert!(validate_value(1.5).is_ok());
        assert!(matches!(
            validate_value(f64::NEG_INFINITY),
            Err(ObjectiveError::NonFiniteValue { .. })
        ));
        assert!(matches!(validate_value(f64::NAN), Err(ObjectiveError::NonFiniteValue { .. })));
    }

    #[test]
    // Purpose
    // -------
    // Length is checked before finiteness, and the first bad entry is reported.
    //
    // Given
    // -----
    // - A 2-vector checked against dim 3.
    // - A 3-vector with NaN at index 1 and ∞ at index 2.
    //
    // Expect
    // ------
    // - `GradientDimMismatch { expected: 3, found: 2 }`.
    // - `InvalidGradient { index: 1, .. }`.
    fn validate_grad_reports_dimension_then_first_bad_entry() {
        let short: Grad = Array1::zeros(2);
        let bad: Grad = array![0.0, f64::NAN, f64::INFINITY];

        let dim_err = validate_grad(&short, 3).unwrap_err();
        let val_err = validate_grad(&bad, 3).unwrap_err();

        assert_eq!(dim_err, ObjectiveError::GradientDimMismatch { expected: 3, found: 2 });
        assert!(matches!(val_err, ObjectiveError::InvalidGradient { index: 1, .. }));
    }

    #[test]
    fn validate_hessian_checks_shape_and_entries() {
        let rect: Hessian = Array2::zeros((2, 3));
        let mut bad: Hessian = Array2::eye(2);
        bad[[1, 0]] = f64::NAN;

        assert_eq!(
            validate_hessian(&rect, 2).unwrap_err(),
            ObjectiveError::HessianDimMismatch { expected: 2, found: (2, 3) }
        );
        assert!(matches!(
            validate_hessian(&bad, 2).unwrap_err(),
            ObjectiveError::InvalidHessian { row: 1, col: 0, .. }
        ));
        assert!(validate_hessian(&Array2::eye(2), 2).is_ok());
    }
}
