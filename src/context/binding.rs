//! Typed values bound to names inside an [`EvalContext`](crate::context::EvalContext).
//!
//! Fixed observation data and differentiable parameters are kept apart:
//! [`DataValue`] covers everything an implementation may read but never
//! differentiates, [`ParamValue`] covers the real-valued fields that flatten
//! into `θ`.
use ndarray::{Array1, Array2, ShapeBuilder};

use crate::context::errors::{ContextError, ContextResult};

/// Fixed (non-differentiable) context field.
#[derive(Debug, Clone, PartialEq)]
pub enum DataValue {
    Str(String),
    Integer(i64),
    Scalar(f64),
    Vector(Array1<f64>),
    Matrix(Array2<f64>),
    IntVector(Array1<i64>),
    IntMatrix(Array2<i64>),
}

impl DataValue {
    /// Human-readable kind, used in `TypeMismatch` errors.
    pub fn kind(&self) -> &'static str {
        match self {
            DataValue::Str(_) => "data string",
            DataValue::Integer(_) => "data integer",
            DataValue::Scalar(_) => "data scalar",
            DataValue::Vector(_) => "data vector",
            DataValue::Matrix(_) => "data matrix",
            DataValue::IntVector(_) => "data integer vector",
            DataValue::IntMatrix(_) => "data integer matrix",
        }
    }
}

/// Shape of a parameter field, enough to rebuild it from a flat slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamShape {
    Scalar,
    Vector(usize),
    /// `(rows, cols)`
    Matrix(usize, usize),
}

impl ParamShape {
    /// Number of scalar entries the field contributes to `θ`.
    pub fn len(&self) -> usize {
        match *self {
            ParamShape::Scalar => 1,
            ParamShape::Vector(n) => n,
            ParamShape::Matrix(rows, cols) => rows * cols,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Differentiable context field.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Scalar(f64),
    Vector(Array1<f64>),
    Matrix(Array2<f64>),
}

impl ParamValue {
    /// Human-readable kind, used in `TypeMismatch` errors.
    pub fn kind(&self) -> &'static str {
        match self {
            ParamValue::Scalar(_) => "parameter scalar",
            ParamValue::Vector(_) => "parameter vector",
            ParamValue::Matrix(_) => "parameter matrix",
        }
    }

    pub fn shape(&self) -> ParamShape {
        match self {
            ParamValue::Scalar(_) => ParamShape::Scalar,
            ParamValue::Vector(v) => ParamShape::Vector(v.len()),
            ParamValue::Matrix(m) => ParamShape::Matrix(m.nrows(), m.ncols()),
        }
    }

    /// Append the field's entries to `out`; matrices go column-major.
    pub fn extend_flat(&self, out: &mut Vec<f64>) {
        match self {
            ParamValue::Scalar(x) => out.push(*x),
            ParamValue::Vector(v) => out.extend(v.iter().copied()),
            ParamValue::Matrix(m) => out.extend(m.t().iter().copied()),
        }
    }

    /// Rebuild a field of the given shape from its flat (column-major) entries.
    ///
    /// # Errors
    /// - [`ContextError::ThetaLengthMismatch`] if `values.len() != shape.len()`.
    /// - [`ContextError::InvalidShape`] if `ndarray` rejects the matrix shape.
    pub fn from_flat(name: &str, shape: ParamShape, values: Vec<f64>) -> ContextResult<Self> {
        if values.len() != shape.len() {
            return Err(ContextError::ThetaLengthMismatch {
                expected: shape.len(),
                actual: values.len(),
            });
        }
        match shape {
            ParamShape::Scalar => Ok(ParamValue::Scalar(values[0])),
            ParamShape::Vector(_) => Ok(ParamValue::Vector(Array1::from(values))),
            ParamShape::Matrix(rows, cols) => {
                let len = values.len();
                Array2::from_shape_vec((rows, cols).f(), values).map(ParamValue::Matrix).map_err(
                    |_| ContextError::InvalidShape { name: name.to_string(), rows, cols, len },
                )
            }
        }
    }

    /// First non-finite entry in flattened order, if any.
    pub(crate) fn first_non_finite(&self) -> Option<(usize, f64)> {
        let mut flat = Vec::with_capacity(self.shape().len());
        self.extend_flat(&mut flat);
        flat.into_iter().enumerate().find(|(_, v)| !v.is_finite())
    }
}
