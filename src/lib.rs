//! tmb_dispatch — registry-based dispatch of statistical objective functions.
//!
//! Purpose
//! -------
//! Bind a run-time model identifier (`"tmb_occu"`, `"tmb_pcount"`) to a
//! compiled objective implementation and hand the selected model's scalar
//! negative log-likelihood, and its derivatives, to whatever optimizer the
//! caller drives.
//!
//! Key behaviors
//! -------------
//! - [`dispatch`]: the closed [`ModelKind`](dispatch::ModelKind) registry and
//!   the [`Dispatcher`](dispatch::Dispatcher) that invokes exactly one
//!   implementation per call, failing with "Unknown model." otherwise.
//! - [`context`]: the per-evaluation [`EvalContext`](context::EvalContext)
//!   carrying the identifier plus typed data and parameter bindings.
//! - [`objective`]: the [`Objective`](objective::Objective) contract, a
//!   θ-vector view with finite-difference derivatives, and an argmin adapter.
//! - [`numerics`]: stable links and log-densities for implementation authors.
//! - [`report`]: covariance and standard errors at a fitted `θ̂`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Identifier matching is exact and case-sensitive; there is no default
//!   model and no run-time registration.
//! - The dispatcher never reads or changes any context field besides
//!   `model`, and returns implementation values unmodified.
//! - Failures are typed `Result` errors; nothing in the library aborts the
//!   process.
//!
//! Conventions
//! -----------
//! - Objective values are quantities to minimize (negative log-likelihoods).
//! - The library logs through the `log` facade and never installs a logger.
//!
//! Downstream usage
//! ----------------
//! - Hosts implement [`Objective`](objective::Objective) for each model,
//!   build a [`Dispatcher`](dispatch::Dispatcher), then either call
//!   `evaluate` per step or wrap it in an
//!   [`ObjectiveFunction`](objective::ObjectiveFunction) for argmin.
//! - `use tmb_dispatch::prelude::*;` brings the common surface into scope.
//!
//! Testing notes
//! -------------
//! - Unit tests live next to each module; `tests/dispatch_pipeline.rs`
//!   exercises dispatch, concurrency, an L-BFGS fit and standard errors
//!   end to end.

pub mod context;
pub mod dispatch;
pub mod numerics;
pub mod objective;
pub mod report;

pub mod prelude {
    pub use crate::context::{ContextError, EvalContext, EvalContextBuilder, ParamLayout};
    pub use crate::dispatch::{DispatchError, Dispatcher, ModelKind, REGISTRY, ScalarResult};
    pub use crate::numerics::InvLink;
    pub use crate::objective::prelude::*;
    pub use crate::report::{ParameterReport, standard_errors};
}
