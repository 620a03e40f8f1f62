//! context::eval_context — inputs for one objective evaluation.
//!
//! Purpose
//! -------
//! Hold the model identifier together with the named bindings an
//! implementation reads: fixed observation data and differentiable
//! parameters. One context describes exactly one evaluation (or one
//! differentiation pass); a new point in parameter space gets a new context
//! via [`EvalContext::with_theta`].
//!
//! Key behaviors
//! -------------
//! - [`EvalContextBuilder`] collects bindings and validates them once in
//!   [`EvalContextBuilder::build`].
//! - Typed accessors distinguish a missing field from a field of the wrong
//!   kind.
//! - [`EvalContext::theta`] / [`EvalContext::with_theta`] map parameters to
//!   and from the flat vector `θ` using the context's [`ParamLayout`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Field names are non-empty and unique across data and parameters.
//! - Every parameter entry is finite.
//! - The `model` string is stored verbatim; whether it names a registered
//!   model is decided by the dispatcher, not here.
//! - Data is immutable after `build` and shared (`Arc`) between a context
//!   and every context derived from it with `with_theta`.
//!
//! Conventions
//! -----------
//! - Parameters keep declaration order; matrices flatten column-major.
//!
//! Testing notes
//! -------------
//! - Unit tests cover builder validation, accessor error kinds and the
//!   θ round trip including data sharing.
use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, s};

use crate::{
    context::{
        binding::{DataValue, ParamValue},
        errors::{ContextError, ContextResult},
        layout::ParamLayout,
    },
    objective::types::Theta,
};

#[derive(Debug, Clone, PartialEq)]
pub struct EvalContext {
    model: String,
    data: Arc<HashMap<String, DataValue>>,
    parameters: Vec<(String, ParamValue)>,
    layout: ParamLayout,
}

impl EvalContext {
    /// Start a context for the model identified by `model`.
    pub fn builder(model: impl Into<String>) -> EvalContextBuilder {
        EvalContextBuilder { model: model.into(), data: Vec::new(), parameters: Vec::new() }
    }

    /// The model identifier, verbatim.
    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn layout(&self) -> &ParamLayout {
        &self.layout
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.field_kind(name).is_some()
    }

    /// Parameter fields in declaration order.
    pub fn parameters(&self) -> &[(String, ParamValue)] {
        &self.parameters
    }

    // ---- Data accessors ----

    pub fn data_string(&self, name: &str) -> ContextResult<&str> {
        match self.data.get(name) {
            Some(DataValue::Str(text)) => Ok(text.as_str()),
            _ => Err(self.absent_or_mismatch(name, "data string")),
        }
    }

    pub fn data_integer(&self, name: &str) -> ContextResult<i64> {
        match self.data.get(name) {
            Some(DataValue::Integer(n)) => Ok(*n),
            _ => Err(self.absent_or_mismatch(name, "data integer")),
        }
    }

    pub fn data_scalar(&self, name: &str) -> ContextResult<f64> {
        match self.data.get(name) {
            Some(DataValue::Scalar(x)) => Ok(*x),
            _ => Err(self.absent_or_mismatch(name, "data scalar")),
        }
    }

    pub fn data_vector(&self, name: &str) -> ContextResult<ArrayView1<'_, f64>> {
        match self.data.get(name) {
            Some(DataValue::Vector(v)) => Ok(v.view()),
            _ => Err(self.absent_or_mismatch(name, "data vector")),
        }
    }

    pub fn data_matrix(&self, name: &str) -> ContextResult<ArrayView2<'_, f64>> {
        match self.data.get(name) {
            Some(DataValue::Matrix(m)) => Ok(m.view()),
            _ => Err(self.absent_or_mismatch(name, "data matrix")),
        }
    }

    pub fn data_ivector(&self, name: &str) -> ContextResult<ArrayView1<'_, i64>> {
        match self.data.get(name) {
            Some(DataValue::IntVector(v)) => Ok(v.view()),
            _ => Err(self.absent_or_mismatch(name, "data integer vector")),
        }
    }

    pub fn data_imatrix(&self, name: &str) -> ContextResult<ArrayView2<'_, i64>> {
        match self.data.get(name) {
            Some(DataValue::IntMatrix(m)) => Ok(m.view()),
            _ => Err(self.absent_or_mismatch(name, "data integer matrix")),
        }
    }

    // ---- Parameter accessors ----

    pub fn parameter(&self, name: &str) -> ContextResult<f64> {
        match self.find_parameter(name) {
            Some(ParamValue::Scalar(x)) => Ok(*x),
            _ => Err(self.absent_or_mismatch(name, "parameter scalar")),
        }
    }

    pub fn parameter_vector(&self, name: &str) -> ContextResult<ArrayView1<'_, f64>> {
        match self.find_parameter(name) {
            Some(ParamValue::Vector(v)) => Ok(v.view()),
            _ => Err(self.absent_or_mismatch(name, "parameter vector")),
        }
    }

    pub fn parameter_matrix(&self, name: &str) -> ContextResult<ArrayView2<'_, f64>> {
        match self.find_parameter(name) {
            Some(ParamValue::Matrix(m)) => Ok(m.view()),
            _ => Err(self.absent_or_mismatch(name, "parameter matrix")),
        }
    }

    // ---- θ mapping ----

    /// Flatten all parameters into `θ` (declaration order, column-major).
    pub fn theta(&self) -> Theta {
        let mut flat = Vec::with_capacity(self.layout.len());
        for (_, value) in &self.parameters {
            value.extend_flat(&mut flat);
        }
        Array1::from(flat)
    }

    /// with_theta — new context at another point in parameter space.
    ///
    /// Parameters
    /// ----------
    /// - `theta`: `&Theta`
    ///   Flat parameter vector laid out as [`EvalContext::layout`] describes.
    ///
    /// Returns
    /// -------
    /// `ContextResult<EvalContext>`
    ///   A context with the same model and data (shared, not copied) and
    ///   every parameter rebuilt from its slice of `theta`. `self` is left
    ///   untouched.
    ///
    /// Errors
    /// ------
    /// - `ContextError::ThetaLengthMismatch` if `theta.len()` differs from
    ///   the layout length.
    /// - `ContextError::NonFiniteTheta` for the first NaN/±∞ entry.
    pub fn with_theta(&self, theta: &Theta) -> ContextResult<EvalContext> {
        if theta.len() != self.layout.len() {
            return Err(ContextError::ThetaLengthMismatch {
                expected: self.layout.len(),
                actual: theta.len(),
            });
        }
        if let Some((index, &value)) = theta.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(ContextError::NonFiniteTheta { index, value });
        }
        let mut parameters = Vec::with_capacity(self.parameters.len());
        for seg in self.layout.segments() {
            let values = theta.slice(s![seg.range()]).to_vec();
            let value = ParamValue::from_flat(seg.name(), seg.shape(), values)?;
            parameters.push((seg.name().to_string(), value));
        }
        Ok(EvalContext {
            model: self.model.clone(),
            data: Arc::clone(&self.data),
            parameters,
            layout: self.layout.clone(),
        })
    }

    // ---- Helper methods ----

    fn find_parameter(&self, name: &str) -> Option<&ParamValue> {
        self.parameters.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    fn field_kind(&self, name: &str) -> Option<&'static str> {
        self.data
            .get(name)
            .map(DataValue::kind)
            .or_else(|| self.find_parameter(name).map(ParamValue::kind))
    }

    fn absent_or_mismatch(&self, name: &str, expected: &'static str) -> ContextError {
        match self.field_kind(name) {
            Some(found) => ContextError::TypeMismatch { name: name.to_string(), expected, found },
            None => ContextError::MissingField { name: name.to_string() },
        }
    }
}

/// Collects bindings for an [`EvalContext`]; validation happens in
/// [`EvalContextBuilder::build`].
#[derive(Debug, Clone)]
pub struct EvalContextBuilder {
    model: String,
    data: Vec<(String, DataValue)>,
    parameters: Vec<(String, ParamValue)>,
}

impl EvalContextBuilder {
    pub fn data(mut self, name: impl Into<String>, value: DataValue) -> Self {
        self.data.push((name.into(), value));
        self
    }

    pub fn data_string(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.data(name, DataValue::Str(value.into()))
    }

    pub fn data_integer(self, name: impl Into<String>, value: i64) -> Self {
        self.data(name, DataValue::Integer(value))
    }

    pub fn data_scalar(self, name: impl Into<String>, value: f64) -> Self {
        self.data(name, DataValue::Scalar(value))
    }

    pub fn data_vector(self, name: impl Into<String>, value: Array1<f64>) -> Self {
        self.data(name, DataValue::Vector(value))
    }

    pub fn data_matrix(self, name: impl Into<String>, value: Array2<f64>) -> Self {
        self.data(name, DataValue::Matrix(value))
    }

    pub fn data_ivector(self, name: impl Into<String>, value: Array1<i64>) -> Self {
        self.data(name, DataValue::IntVector(value))
    }

    pub fn data_imatrix(self, name: impl Into<String>, value: Array2<i64>) -> Self {
        self.data(name, DataValue::IntMatrix(value))
    }

    pub fn param(mut self, name: impl Into<String>, value: ParamValue) -> Self {
        self.parameters.push((name.into(), value));
        self
    }

    pub fn parameter(self, name: impl Into<String>, value: f64) -> Self {
        self.param(name, ParamValue::Scalar(value))
    }

    pub fn parameter_vector(self, name: impl Into<String>, value: Array1<f64>) -> Self {
        self.param(name, ParamValue::Vector(value))
    }

    pub fn parameter_matrix(self, name: impl Into<String>, value: Array2<f64>) -> Self {
        self.param(name, ParamValue::Matrix(value))
    }

    /// Validate the bindings and freeze them into an [`EvalContext`].
    ///
    /// # Errors
    /// - [`ContextError::EmptyFieldName`] for an empty name.
    /// - [`ContextError::DuplicateField`] for a name bound twice.
    /// - [`ContextError::NonFiniteParameter`] for a NaN/±∞ parameter entry.
    pub fn build(self) -> ContextResult<EvalContext> {
        let mut seen: HashSet<&str> = HashSet::new();
        let names = self.data.iter().map(|(n, _)| n).chain(self.parameters.iter().map(|(n, _)| n));
        for name in names {
            if name.is_empty() {
                return Err(ContextError::EmptyFieldName);
            }
            if !seen.insert(name.as_str()) {
                return Err(ContextError::DuplicateField { name: name.clone() });
            }
        }
        for (name, value) in &self.parameters {
            if let Some((index, value)) = value.first_non_finite() {
                return Err(ContextError::NonFiniteParameter { name: name.clone(), index, value });
            }
        }

        let layout = ParamLayout::from_parameters(&self.parameters);
        Ok(EvalContext {
            model: self.model,
            data: Arc::new(self.data.into_iter().collect()),
            parameters: self.parameters,
            layout,
        })
    }
}
