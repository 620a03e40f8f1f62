//! dispatch::dispatcher — route an evaluation context to one model.
//!
//! Purpose
//! -------
//! Hold one [`Objective`] implementation per [`ModelKind`] and, for each
//! call, invoke exactly the one named by the context's `model` field.
//!
//! Key behaviors
//! -------------
//! - [`Dispatcher::evaluate`] resolves `ctx.model()` via
//!   [`ModelKind::lookup`], calls the selected implementation once with the
//!   full context and returns its value unmodified inside a
//!   [`ScalarResult`].
//! - [`Dispatcher::gradient`] routes analytic gradients the same way.
//! - An unrecognized identifier fails before any implementation runs, with
//!   `ObjectiveError::UnrecognizedModel` ("Unknown model.").
//!
//! Invariants & assumptions
//! ------------------------
//! - The dispatcher reads no field other than `model` and never mutates the
//!   context; bindings reach the implementation exactly as the host built
//!   them.
//! - The dispatcher holds no mutable state. It is `Sync` whenever both
//!   implementations are, so concurrent calls with separate contexts are
//!   safe.
//! - No default model, no fallback value, no partial result.
//!
//! Downstream usage
//! ----------------
//! - Hosts call `evaluate` directly per optimizer step, or wrap the
//!   dispatcher in an [`ObjectiveFunction`](crate::objective::ObjectiveFunction)
//!   to work with flat parameter vectors.
//!
//! Testing notes
//! -------------
//! - Unit tests use counting and sentinel-echo stubs to check call counts,
//!   pass-through of bindings and error behavior without model math.
use log::{debug, warn};

use crate::{
    context::EvalContext,
    dispatch::registry::ModelKind,
    objective::{
        errors::ObjectiveResult,
        traits::Objective,
        types::{Cost, Grad},
    },
};

/// Objective value tagged with the model that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScalarResult {
    pub model: ModelKind,
    pub value: Cost,
}

/// Registry-backed dispatcher over one occupancy and one count implementation.
#[derive(Debug, Clone)]
pub struct Dispatcher<O, P> {
    occu: O,
    pcount: P,
}

impl<O: Objective, P: Objective> Dispatcher<O, P> {
    pub fn new(occu: O, pcount: P) -> Self {
        Self { occu, pcount }
    }

    /// Resolve the context's model identifier.
    ///
    /// # Errors
    /// `ObjectiveError::UnrecognizedModel` when `ctx.model()` is not registered.
    pub fn resolve(&self, ctx: &EvalContext) -> ObjectiveResult<ModelKind> {
        match ModelKind::lookup(ctx.model()) {
            Ok(kind) => {
                debug!("dispatching model '{kind}'");
                Ok(kind)
            }
            Err(err) => {
                warn!("rejecting unregistered model identifier {:?}", err.model_name());
                Err(err.into())
            }
        }
    }

    /// Implementation registered for `kind`.
    pub fn objective(&self, kind: ModelKind) -> &dyn Objective {
        match kind {
            ModelKind::Occu => &self.occu,
            ModelKind::PCount => &self.pcount,
        }
    }

    /// evaluate — compute the selected model's objective for one context.
    ///
    /// Parameters
    /// ----------
    /// - `ctx`: `&EvalContext`
    ///   Model identifier plus every binding the implementation needs. Only
    ///   `ctx.model()` is inspected here.
    ///
    /// Returns
    /// -------
    /// `ObjectiveResult<ScalarResult>`
    ///   The implementation's value, unmodified, tagged with its model.
    ///
    /// Errors
    /// ------
    /// - `ObjectiveError::UnrecognizedModel` if the identifier is not
    ///   registered; no implementation is invoked.
    /// - Any error returned by the selected implementation, unchanged.
    pub fn evaluate(&self, ctx: &EvalContext) -> ObjectiveResult<ScalarResult> {
        let kind = self.resolve(ctx)?;
        self.evaluate_kind(kind, ctx)
    }

    /// Evaluate an already-resolved model; `ctx.model()` is not re-read.
    pub fn evaluate_kind(
        &self, kind: ModelKind, ctx: &EvalContext,
    ) -> ObjectiveResult<ScalarResult> {
        let value = self.objective(kind).value(ctx)?;
        Ok(ScalarResult { model: kind, value })
    }

    /// Analytic gradient of the selected model, routed like [`Dispatcher::evaluate`].
    ///
    /// # Errors
    /// - `ObjectiveError::UnrecognizedModel` for an unregistered identifier.
    /// - `ObjectiveError::GradientNotImplemented` when the implementation
    ///   has no analytic gradient.
    pub fn gradient(&self, ctx: &EvalContext) -> ObjectiveResult<Grad> {
        let kind = self.resolve(ctx)?;
        self.gradient_kind(kind, ctx)
    }

    pub fn gradient_kind(&self, kind: ModelKind, ctx: &EvalContext) -> ObjectiveResult<Grad> {
        self.objective(kind).gradient(ctx)
    }
}
