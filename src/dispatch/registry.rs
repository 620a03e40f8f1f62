//! The closed set of dispatchable models.
//!
//! [`REGISTRY`] is the single source of truth for identifiers: lookup scans
//! it in order (`"tmb_occu"` first, then `"tmb_pcount"`) with an exact,
//! case-sensitive comparison. Nothing is trimmed or normalized, so
//! `"Tmb_Occu"`, `" tmb_occu"` and `""` all fail. Adding a model means one
//! new [`ModelKind`] variant, one table row and one implementation slot in
//! [`Dispatcher`](crate::dispatch::Dispatcher).
use std::{fmt, str::FromStr};

use crate::dispatch::errors::{DispatchError, DispatchResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelKind {
    /// Single-season site occupancy (`"tmb_occu"`).
    Occu,
    /// N-mixture point counts (`"tmb_pcount"`).
    PCount,
}

/// Identifier table, in lookup order. Row `i` holds the variant whose
/// discriminant is `i`.
pub const REGISTRY: [(&str, ModelKind); 2] =
    [("tmb_occu", ModelKind::Occu), ("tmb_pcount", ModelKind::PCount)];

impl ModelKind {
    /// Registered identifier for this model.
    pub fn name(self) -> &'static str {
        REGISTRY[self as usize].0
    }

    /// Every registered model, in lookup order.
    pub fn all() -> impl Iterator<Item = ModelKind> {
        REGISTRY.iter().map(|&(_, kind)| kind)
    }

    /// Resolve `name` against [`REGISTRY`].
    ///
    /// # Errors
    /// [`DispatchError::UnrecognizedModel`] when no identifier matches exactly.
    pub fn lookup(name: &str) -> DispatchResult<ModelKind> {
        REGISTRY
            .iter()
            .find(|(id, _)| *id == name)
            .map(|&(_, kind)| kind)
            .ok_or_else(|| DispatchError::UnrecognizedModel { name: name.to_string() })
    }
}

impl FromStr for ModelKind {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModelKind::lookup(s)
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
