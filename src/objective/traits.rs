//! The contract a model implementation fulfils to be dispatchable.
//!
//! Convention: [`Objective::value`] returns the quantity an optimizer
//! *minimizes* (a negative log-likelihood). An analytic gradient, when
//! provided, is the gradient of that same value with respect to the flat
//! parameter vector `θ` laid out by
//! [`ParamLayout`](crate::context::ParamLayout). Implementations that do not
//! override [`Objective::gradient`] are differentiated numerically by
//! [`ObjectiveFunction`](crate::objective::ObjectiveFunction).
use crate::{
    context::EvalContext,
    objective::{
        errors::{ObjectiveError, ObjectiveResult},
        types::{Cost, Grad},
    },
};

pub trait Objective {
    // Required methods
    fn value(&self, ctx: &EvalContext) -> ObjectiveResult<Cost>;

    // Optional methods
    fn gradient(&self, _ctx: &EvalContext) -> ObjectiveResult<Grad> {
        Err(ObjectiveError::GradientNotImplemented)
    }
}

impl<T: Objective + ?Sized> Objective for &T {
    fn value(&self, ctx: &EvalContext) -> ObjectiveResult<Cost> {
        (**self).value(ctx)
    }

    fn gradient(&self, ctx: &EvalContext) -> ObjectiveResult<Grad> {
        (**self).gradient(ctx)
    }
}

impl<T: Objective + ?Sized> Objective for Box<T> {
    fn value(&self, ctx: &EvalContext) -> ObjectiveResult<Cost> {
        (**self).value(ctx)
    }

    fn gradient(&self, ctx: &EvalContext) -> ObjectiveResult<Grad> {
        (**self).gradient(ctx)
    }
}
