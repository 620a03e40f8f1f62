//! numerics — shared helpers for writing objective implementations.
//!
//! Purpose
//! -------
//! Collect the small numerical routines every occupancy or count likelihood
//! needs, so implementations plugged into the dispatcher do not each
//! re-derive stable link functions or log-densities.
//!
//! Key behaviors
//! -------------
//! - [`links`]: guarded inverse links, softplus and `log_sum_exp`, plus the
//!   [`InvLink`] selector parsed from strings.
//! - [`densities`]: Poisson and binomial log-pmfs backed by `statrs`, with
//!   parameter validation surfaced as `ObjectiveError::InvalidDistribution`.
//!
//! Conventions
//! -----------
//! - Everything works in log space where possible; callers sum
//!   log-contributions and negate once to obtain a cost.
pub mod densities;
pub mod links;

pub use self::densities::{ln_dbinom, ln_dpois};
pub use self::links::{
    InvLink, inv_cloglog, inv_logit, log_inv_logit, log_sum_exp, log1m_inv_logit, safe_softplus,
    safe_softplus_inv,
};
