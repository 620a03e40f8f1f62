//! Derivative configuration for [`ObjectiveFunction`](crate::objective::ObjectiveFunction).
use std::str::FromStr;

use crate::objective::errors::ObjectiveError;

/// How `ObjectiveFunction::gradient` obtains a gradient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GradientMode {
    /// Analytic gradient when the implementation has one, finite
    /// differences otherwise.
    #[default]
    Auto,
    /// Analytic gradient only; `GradientNotImplemented` if missing.
    Analytic,
    /// Finite differences of the value, ignoring any analytic gradient.
    FiniteDiff,
}

impl FromStr for GradientMode {
    type Err = ObjectiveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(GradientMode::Auto),
            "analytic" => Ok(GradientMode::Analytic),
            "finitediff" => Ok(GradientMode::FiniteDiff),
            _ => Err(ObjectiveError::InvalidGradientMode {
                name: s.to_string(),
                reason: "Valid options are case insensitive 'Auto', 'Analytic' or 'FiniteDiff'.",
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DerivativeOptions {
    pub gradient: GradientMode,
}

impl DerivativeOptions {
    pub fn new(gradient: GradientMode) -> Self {
        Self { gradient }
    }
}
