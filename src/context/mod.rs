//! context — evaluation contexts handed to model implementations.
//!
//! Purpose
//! -------
//! Carry everything one objective evaluation needs: the `model` identifier
//! string and the typed bindings (fixed data and differentiable parameters)
//! that the selected implementation reads. The dispatcher looks only at the
//! identifier; every other field passes through untouched.
//!
//! Key behaviors
//! -------------
//! - [`EvalContext`] is built once through [`EvalContextBuilder`] and is
//!   immutable afterwards.
//! - [`ParamLayout`] maps named parameters to the flat vector `θ` used by
//!   optimizers and finite differences.
//! - [`ContextError`] reports construction, access and θ-mapping failures.
//!
//! Downstream usage
//! ----------------
//! - Hosts build one context per evaluation (or reuse a template and call
//!   `with_theta` per optimizer step).
//! - Implementations of [`Objective`](crate::objective::Objective) read their
//!   inputs through the typed accessors.
pub mod binding;
pub mod errors;
pub mod eval_context;
pub mod layout;

pub use self::binding::{DataValue, ParamShape, ParamValue};
pub use self::errors::{ContextError, ContextResult};
pub use self::eval_context::{EvalContext, EvalContextBuilder};
pub use self::layout::{ParamLayout, ParamSegment};
