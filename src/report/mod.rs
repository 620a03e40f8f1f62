//! report — post-fit uncertainty for dispatched models.
//!
//! Given the estimate `θ̂` a caller's optimizer found, [`standard_errors`]
//! returns a [`ParameterReport`] with the covariance `J(θ̂)⁺` of the minimized
//! objective and per-parameter standard errors, labelled by parameter name.
pub mod standard_errors;

pub use self::standard_errors::{EIGEN_EPS, ParameterReport, standard_errors};
