//! Adapter that exposes a dispatched model as an `argmin` problem.
//!
//! The objective is already a cost (a value to minimize), so the adapter
//! forwards values, gradients and Hessians from [`ObjectiveFunction`]
//! unchanged. Typed [`ObjectiveError`](crate::objective::ObjectiveError)s
//! travel through argmin as `anyhow` errors and can be recovered with
//! `ObjectiveError::from`.
use argmin::core::{CostFunction, Error, Gradient, Hessian as ArgminHessian};

use crate::objective::{
    function::ObjectiveFunction,
    traits::Objective,
    types::{Cost, Grad, Hessian, Theta},
};

#[derive(Debug)]
pub struct ArgMinAdapter<'a, O, P> {
    function: ObjectiveFunction<'a, O, P>,
}

impl<O, P> Clone for ArgMinAdapter<'_, O, P> {
    fn clone(&self) -> Self {
        Self { function: self.function.clone() }
    }
}

impl<'a, O: Objective, P: Objective> ArgMinAdapter<'a, O, P> {
    pub fn new(function: ObjectiveFunction<'a, O, P>) -> Self {
        Self { function }
    }

    pub fn function(&self) -> &ObjectiveFunction<'a, O, P> {
        &self.function
    }

    pub fn into_inner(self) -> ObjectiveFunction<'a, O, P> {
        self.function
    }
}

impl<'a, O: Objective, P: Objective> CostFunction for ArgMinAdapter<'a, O, P> {
    type Param = Theta;
    type Output = Cost;

    fn cost(&self, theta: &Self::Param) -> Result<Self::Output, Error> {
        Ok(self.function.value(theta)?)
    }
}

impl<'a, O: Objective, P: Objective> Gradient for ArgMinAdapter<'a, O, P> {
    type Param = Theta;
    type Gradient = Grad;

    fn gradient(&self, theta: &Self::Param) -> Result<Self::Gradient, Error> {
        Ok(self.function.gradient(theta)?)
    }
}

impl<'a, O: Objective, P: Objective> ArgminHessian for ArgMinAdapter<'a, O, P> {
    type Param = Theta;
    type Hessian = Hessian;

    fn hessian(&self, theta: &Self::Param) -> Result<Self::Hessian, Error> {
        Ok(self.function.hessian(theta)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        context::EvalContext,
        dispatch::Dispatcher,
        objective::{errors::ObjectiveError, errors::ObjectiveResult, options::DerivativeOptions},
    };
    use approx::assert_relative_eq;
    use ndarray::array;

    #[derive(Debug)]
    struct Shifted(f64);

    impl Objective for Shifted {
        fn value(&self, ctx: &EvalContext) -> ObjectiveResult<Cost> {
            let x = ctx.parameter("x")?;
            if x > 10.0 {
                return Err(ObjectiveError::NonFiniteValue { value: f64::INFINITY });
            }
            Ok((x - self.0).powi(2))
        }
    }

    #[test]
    // Purpose
    // -------
    // Values and gradients pass through without a sign flip.
    //
    // Given
    // -----
    // - pcount slot c(x) = (x - 2)², evaluated at x = 0.
    //
    // Expect
    // ------
    // - cost = 4, gradient ≈ -4, Hessian ≈ 2.
    fn adapter_forwards_cost_and_derivatives() {
        // Arrange
        let dispatcher = Dispatcher::new(Shifted(-1.0), Shifted(2.0));
        let ctx = EvalContext::builder("tmb_pcount").parameter("x", 0.0).build().unwrap();
        let function = ObjectiveFunction::new(&dispatcher, ctx, DerivativeOptions::default()).unwrap();
        let adapter = ArgMinAdapter::new(function);
        let theta = adapter.function().par();

        // Act
        let cost = adapter.cost(&theta).unwrap();
        let grad = Gradient::gradient(&adapter, &theta).unwrap();
        let hess = ArgminHessian::hessian(&adapter, &theta).unwrap();

        // Assert
        assert_relative_eq!(cost, 4.0);
        assert_relative_eq!(grad[0], -4.0, epsilon = 1e-6);
        assert_relative_eq!(hess[[0, 0]], 2.0, epsilon = 1e-4);
    }

    #[test]
    // Purpose
    // -------
    // Errors leave argmin as `anyhow` errors and convert back to the
    // original typed error.
    fn adapter_errors_round_trip_to_objective_error() {
        let dispatcher = Dispatcher::new(Shifted(0.0), Shifted(0.0));
        let ctx = EvalContext::builder("tmb_occu").parameter("x", 0.0).build().unwrap();
        let function = ObjectiveFunction::new(&dispatcher, ctx, DerivativeOptions::default()).unwrap();
        let adapter = ArgMinAdapter::new(function);

        let err = adapter.cost(&array![11.0]).unwrap_err();

        assert_eq!(
            ObjectiveError::from(err),
            ObjectiveError::NonFiniteValue { value: f64::INFINITY }
        );
    }
}
