//! objective::function — a dispatched model viewed as a function of `θ`.
//!
//! Purpose
//! -------
//! Optimizers and finite differences work on one flat parameter vector,
//! while implementations read named bindings from an [`EvalContext`].
//! [`ObjectiveFunction`] bridges the two: it binds a [`Dispatcher`] to a
//! template context and evaluates the selected model at any `θ` by building
//! a fresh context per call.
//!
//! Key behaviors
//! -------------
//! - The model is resolved once, in [`ObjectiveFunction::new`]; an
//!   unregistered identifier fails there with "Unknown model.".
//! - [`ObjectiveFunction::value`] rejects non-finite results.
//! - [`ObjectiveFunction::gradient`] follows [`GradientMode`]: analytic,
//!   finite differences, or analytic with a finite-difference fallback.
//! - [`ObjectiveFunction::hessian`] differentiates the analytic gradient
//!   numerically, or uses a value-only stencil when there is none.
//!
//! Invariants & assumptions
//! ------------------------
//! - The template context is never mutated; `θ` only ever reaches an
//!   implementation through [`EvalContext::with_theta`].
//! - Values are those an optimizer minimizes; no sign flip happens here.
//!
//! Testing notes
//! -------------
//! - Unit tests use closed-form toy objectives to check each gradient mode,
//!   error propagation out of finite-difference closures, and the Hessian.
use std::cell::RefCell;

use ndarray::Array1;

use crate::{
    context::{EvalContext, ParamLayout},
    dispatch::{Dispatcher, ModelKind},
    objective::{
        errors::{ObjectiveError, ObjectiveResult},
        finite_diff::{capture_err, compute_hessian, compute_hessian_from_values, fd_gradient},
        options::{DerivativeOptions, GradientMode},
        traits::Objective,
        types::{Cost, Grad, Hessian, Theta},
        validation::{validate_grad, validate_value},
    },
};

#[derive(Debug)]
pub struct ObjectiveFunction<'a, O, P> {
    dispatcher: &'a Dispatcher<O, P>,
    template: EvalContext,
    kind: ModelKind,
    options: DerivativeOptions,
}

// Manual impl: only the dispatcher reference is shared, so `O`/`P` need not be `Clone`.
impl<O, P> Clone for ObjectiveFunction<'_, O, P> {
    fn clone(&self) -> Self {
        Self {
            dispatcher: self.dispatcher,
            template: self.template.clone(),
            kind: self.kind,
            options: self.options,
        }
    }
}

impl<'a, O: Objective, P: Objective> ObjectiveFunction<'a, O, P> {
    /// Bind `dispatcher` to `template`, resolving the model identifier.
    ///
    /// # Errors
    /// `ObjectiveError::UnrecognizedModel` if `template.model()` is not
    /// registered.
    pub fn new(
        dispatcher: &'a Dispatcher<O, P>, template: EvalContext, options: DerivativeOptions,
    ) -> ObjectiveResult<Self> {
        let kind = dispatcher.resolve(&template)?;
        Ok(Self { dispatcher, template, kind, options })
    }

    pub fn kind(&self) -> ModelKind {
        self.kind
    }

    pub fn layout(&self) -> &ParamLayout {
        self.template.layout()
    }

    pub fn template(&self) -> &EvalContext {
        &self.template
    }

    pub fn options(&self) -> DerivativeOptions {
        self.options
    }

    /// Starting point: the template's parameters flattened to `θ`.
    pub fn par(&self) -> Theta {
        self.template.theta()
    }

    /// Fresh context for `theta`.
    pub fn context_at(&self, theta: &Theta) -> ObjectiveResult<EvalContext> {
        Ok(self.template.with_theta(theta)?)
    }

    /// Objective value at `theta`.
    ///
    /// # Errors
    /// - `ObjectiveError::Context` if `theta` does not fit the layout.
    /// - Whatever the implementation returns.
    /// - `ObjectiveError::NonFiniteValue` for NaN/±∞ results.
    pub fn value(&self, theta: &Theta) -> ObjectiveResult<Cost> {
        let ctx = self.context_at(theta)?;
        let out = self.dispatcher.evaluate_kind(self.kind, &ctx)?;
        validate_value(out.value)?;
        Ok(out.value)
    }

    /// gradient — gradient of the objective at `theta`.
    ///
    /// Parameters
    /// ----------
    /// - `theta`: `&Theta`
    ///   Point in parameter space, laid out as [`ObjectiveFunction::layout`].
    ///
    /// Returns
    /// -------
    /// `ObjectiveResult<Grad>`
    ///   A validated gradient of length `theta.len()`.
    ///
    /// Errors
    /// ------
    /// - `ObjectiveError::GradientNotImplemented` in `Analytic` mode when the
    ///   implementation has no gradient.
    /// - `ObjectiveError::GradientDimMismatch` / `InvalidGradient` for an
    ///   analytic gradient of the wrong length or with non-finite entries.
    /// - Errors raised by the implementation, including those captured while
    ///   finite differencing.
    ///
    /// Notes
    /// -----
    /// - In `Auto` mode only `GradientNotImplemented` triggers the
    ///   finite-difference path; any other analytic failure is returned.
    pub fn gradient(&self, theta: &Theta) -> ObjectiveResult<Grad> {
        match self.options.gradient {
            GradientMode::Analytic => self.analytic_gradient(theta),
            GradientMode::FiniteDiff => self.numeric_gradient(theta),
            GradientMode::Auto => match self.analytic_gradient(theta) {
                Err(ObjectiveError::GradientNotImplemented) => self.numeric_gradient(theta),
                other => other,
            },
        }
    }

    /// hessian — finite-difference Hessian of the objective at `theta`.
    ///
    /// When an analytic gradient is in use (per [`GradientMode`]) the
    /// Hessian is the central-difference Jacobian of that gradient.
    /// Otherwise it is built from objective values with a second-order
    /// stencil. Either way the result is validated and symmetric.
    ///
    /// Errors
    /// ------
    /// - Any error raised by the implementation at a stencil point.
    /// - `ObjectiveError::InvalidHessian` / `HessianDimMismatch`.
    pub fn hessian(&self, theta: &Theta) -> ObjectiveResult<Hessian> {
        let closure_err: RefCell<Option<ObjectiveError>> = RefCell::new(None);
        if !self.uses_analytic_gradient(theta)? {
            let cost_fn = |t: &Theta| self.value_or_nan(t, &closure_err);
            return compute_hessian_from_values(&cost_fn, theta, &closure_err);
        }
        let dim = theta.len();
        let grad_fn = |t: &Theta| -> Grad {
            match self.analytic_gradient(t) {
                Ok(g) => g,
                Err(e) => {
                    capture_err(&closure_err, e);
                    Array1::from_elem(dim, f64::NAN)
                }
            }
        };
        compute_hessian(&grad_fn, theta, &closure_err)
    }

    // ---- Helper methods ----

    fn analytic_gradient(&self, theta: &Theta) -> ObjectiveResult<Grad> {
        let ctx = self.context_at(theta)?;
        let grad = self.dispatcher.gradient_kind(self.kind, &ctx)?;
        validate_grad(&grad, theta.len())?;
        Ok(grad)
    }

    fn numeric_gradient(&self, theta: &Theta) -> ObjectiveResult<Grad> {
        let closure_err: RefCell<Option<ObjectiveError>> = RefCell::new(None);
        let cost_fn = |t: &Theta| self.value_or_nan(t, &closure_err);
        fd_gradient(theta, &cost_fn, &closure_err)
    }

    fn uses_analytic_gradient(&self, theta: &Theta) -> ObjectiveResult<bool> {
        match self.options.gradient {
            GradientMode::Analytic => Ok(true),
            GradientMode::FiniteDiff => Ok(false),
            GradientMode::Auto => match self.analytic_gradient(theta) {
                Ok(_) => Ok(true),
                Err(ObjectiveError::GradientNotImplemented) => Ok(false),
                Err(e) => Err(e),
            },
        }
    }

    fn value_or_nan(&self, theta: &Theta, closure_err: &RefCell<Option<ObjectiveError>>) -> f64 {
        match self.value(theta) {
            Ok(v) => v,
            Err(e) => {
                capture_err(closure_err, e);
                f64::NAN
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ContextError;
    use approx::assert_relative_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Model resolution at construction.
    // - Value evaluation through fresh contexts.
    // - Each GradientMode, including the Auto fallback.
    // - Hessian of a quadratic objective.
    //
    // They intentionally DO NOT cover:
    // - argmin integration (see `objective::adapter`).
    // -------------------------------------------------------------------------

    /// c(a, b) = (a - 1)² + 2(b + 0.5)²; analytic gradient optional.
    #[derive(Debug)]
    struct Quadratic {
        analytic: bool,
    }

    impl Objective for Quadratic {
        fn value(&self, ctx: &EvalContext) -> ObjectiveResult<Cost> {
            let a = ctx.parameter("a")?;
            let b = ctx.parameter("b")?;
            Ok((a - 1.0).powi(2) + 2.0 * (b + 0.5).powi(2))
        }

        fn gradient(&self, ctx: &EvalContext) -> ObjectiveResult<Grad> {
            if !self.analytic {
                return Err(ObjectiveError::GradientNotImplemented);
            }
            let a = ctx.parameter("a")?;
            let b = ctx.parameter("b")?;
            Ok(array![2.0 * (a - 1.0), 4.0 * (b + 0.5)])
        }
    }

    /// Returns an analytic gradient that is deliberately wrong, so tests can
    /// tell which path produced a gradient.
    #[derive(Debug)]
    struct WrongGradient;

    impl Objective for WrongGradient {
        fn value(&self, ctx: &EvalContext) -> ObjectiveResult<Cost> {
            Ok(ctx.parameter("a")?.powi(2))
        }

        fn gradient(&self, _ctx: &EvalContext) -> ObjectiveResult<Grad> {
            Ok(array![100.0])
        }
    }

    fn template(model: &str) -> EvalContext {
        EvalContext::builder(model).parameter("a", 0.0).parameter("b", 0.0).build().unwrap()
    }

    fn bind<'a, O: Objective, P: Objective>(
        dispatcher: &'a Dispatcher<O, P>, ctx: EvalContext,
    ) -> ObjectiveFunction<'a, O, P> {
        ObjectiveFunction::new(dispatcher, ctx, DerivativeOptions::default()).unwrap()
    }

    #[test]
    fn new_rejects_unknown_model() {
        let dispatcher = Dispatcher::new(Quadratic { analytic: true }, Quadratic { analytic: true });

        let err =
            ObjectiveFunction::new(&dispatcher, template("tmb_ocu"), DerivativeOptions::default())
                .unwrap_err();

        assert_eq!(err.to_string(), "Unknown model.");
    }

    #[test]
    // Purpose
    // -------
    // `value` evaluates the selected model at θ without touching the template.
    //
    // Given
    // -----
    // - Template at (0, 0); θ = (1, -0.5) is the minimizer.
    //
    // Expect
    // ------
    // - value(par()) = 1 + 0.5 = 1.5; value(θ) = 0.
    // - `par()` is unchanged afterwards.
    fn value_evaluates_at_theta() {
        let dispatcher = Dispatcher::new(Quadratic { analytic: true }, WrongGradient);
        let f = bind(&dispatcher, template("tmb_occu"));

        assert_eq!(f.kind(), ModelKind::Occu);
        assert_relative_eq!(f.value(&f.par()).unwrap(), 1.5);
        assert_relative_eq!(f.value(&array![1.0, -0.5]).unwrap(), 0.0);
        assert_eq!(f.par(), array![0.0, 0.0]);
    }

    #[test]
    fn value_rejects_misfit_theta() {
        let dispatcher = Dispatcher::new(Quadratic { analytic: true }, WrongGradient);
        let f = bind(&dispatcher, template("tmb_occu"));

        let err = f.value(&array![1.0]).unwrap_err();

        assert_eq!(
            err,
            ObjectiveError::Context(ContextError::ThetaLengthMismatch { expected: 2, actual: 1 })
        );
    }

    #[test]
    // Purpose
    // -------
    // Auto mode uses the analytic gradient when present and finite
    // differences otherwise.
    //
    // Given
    // -----
    // - pcount slot: `WrongGradient` (analytic gradient always 100).
    // - occu slot: `Quadratic` without analytic gradient.
    //
    // Expect
    // ------
    // - pcount gradient is exactly [100].
    // - occu gradient ≈ (-2, 2) at (0, 0) from finite differences.
    fn auto_mode_prefers_analytic_then_falls_back() {
        // Arrange
        let dispatcher = Dispatcher::new(Quadratic { analytic: false }, WrongGradient);
        let pcount_ctx = EvalContext::builder("tmb_pcount").parameter("a", 3.0).build().unwrap();
        let occu = bind(&dispatcher, template("tmb_occu"));
        let pcount = bind(&dispatcher, pcount_ctx);

        // Act
        let g_occu = occu.gradient(&occu.par()).unwrap();
        let g_pcount = pcount.gradient(&pcount.par()).unwrap();

        // Assert
        assert_eq!(g_pcount, array![100.0]);
        assert_relative_eq!(g_occu[0], -2.0, epsilon = 1e-6);
        assert_relative_eq!(g_occu[1], 2.0, epsilon = 1e-6);
    }

    #[test]
    fn finite_diff_mode_ignores_analytic_gradient() {
        let dispatcher = Dispatcher::new(Quadratic { analytic: true }, WrongGradient);
        let ctx = EvalContext::builder("tmb_pcount").parameter("a", 3.0).build().unwrap();
        let options = DerivativeOptions::new(GradientMode::FiniteDiff);
        let f = ObjectiveFunction::new(&dispatcher, ctx, options).unwrap();

        let g = f.gradient(&f.par()).unwrap();

        assert_relative_eq!(g[0], 6.0, epsilon = 1e-6);
    }

    #[test]
    fn analytic_mode_requires_gradient() {
        let dispatcher = Dispatcher::new(Quadratic { analytic: false }, WrongGradient);
        let f = ObjectiveFunction::new(
            &dispatcher,
            template("tmb_occu"),
            DerivativeOptions::new(GradientMode::Analytic),
        )
        .unwrap();

        assert_eq!(f.gradient(&f.par()).unwrap_err(), ObjectiveError::GradientNotImplemented);
    }

    #[test]
    // Purpose
    // -------
    // An analytic gradient of the wrong length is rejected, not padded.
    fn analytic_gradient_is_validated() {
        let dispatcher = Dispatcher::new(Quadratic { analytic: true }, WrongGradient);
        let f = bind(&dispatcher, template("tmb_pcount"));

        let err = f.gradient(&f.par()).unwrap_err();

        assert_eq!(err, ObjectiveError::GradientDimMismatch { expected: 2, found: 1 });
    }

    #[test]
    // Purpose
    // -------
    // The Hessian of the quadratic is diag(2, 4) on the analytic-gradient path.
    fn hessian_of_quadratic_is_diagonal() {
        let dispatcher = Dispatcher::new(Quadratic { analytic: true }, WrongGradient);
        let f = bind(&dispatcher, template("tmb_occu"));

        let h = f.hessian(&array![0.3, 0.1]).unwrap();

        assert_relative_eq!(h[[0, 0]], 2.0, epsilon = 1e-5);
        assert_relative_eq!(h[[1, 1]], 4.0, epsilon = 1e-5);
        assert_relative_eq!(h[[0, 1]], 0.0, epsilon = 1e-5);
    }

    #[test]
    // Purpose
    // -------
    // Without an analytic gradient the value-only stencil gives the same
    // Hessian.
    fn hessian_without_gradient_uses_values() {
        let dispatcher = Dispatcher::new(Quadratic { analytic: false }, WrongGradient);
        let f = bind(&dispatcher, template("tmb_occu"));

        let h = f.hessian(&array![0.3, 0.1]).unwrap();

        assert_relative_eq!(h[[0, 0]], 2.0, epsilon = 1e-4);
        assert_relative_eq!(h[[1, 1]], 4.0, epsilon = 1e-4);
        assert_relative_eq!(h[[1, 0]], 0.0, epsilon = 1e-4);
    }
}
