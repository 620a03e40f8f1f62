//! Mapping between named parameter fields and the flat vector `θ`.
//!
//! Parameters flatten in declaration order; within a matrix, entries run
//! column-major. The same order drives [`ParamLayout::labels`], so label `i`
//! always names `θ[i]`.
use ndarray::{ArrayView1, s};

use crate::{
    context::{
        binding::{ParamShape, ParamValue},
        errors::{ContextError, ContextResult},
    },
    objective::types::Theta,
};

/// One parameter field's position inside `θ`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSegment {
    name: String,
    offset: usize,
    shape: ParamShape,
}

impl ParamSegment {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn shape(&self) -> ParamShape {
        self.shape
    }

    pub fn len(&self) -> usize {
        self.shape.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shape.is_empty()
    }

    /// Index range of this field inside `θ`.
    pub fn range(&self) -> std::ops::Range<usize> {
        self.offset..self.offset + self.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParamLayout {
    segments: Vec<ParamSegment>,
    len: usize,
}

impl ParamLayout {
    /// Build the layout for parameters given in declaration order.
    pub fn from_parameters(parameters: &[(String, ParamValue)]) -> Self {
        let mut segments = Vec::with_capacity(parameters.len());
        let mut offset = 0;
        for (name, value) in parameters {
            let shape = value.shape();
            segments.push(ParamSegment { name: name.clone(), offset, shape });
            offset += shape.len();
        }
        Self { segments, len: offset }
    }

    /// Total length of `θ`.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn segments(&self) -> &[ParamSegment] {
        &self.segments
    }

    pub fn segment(&self, name: &str) -> Option<&ParamSegment> {
        self.segments.iter().find(|seg| seg.name == name)
    }

    /// Per-entry labels: `sigma`, `beta[2]`, `M[1,0]` (row, column).
    pub fn labels(&self) -> Vec<String> {
        let mut labels = Vec::with_capacity(self.len);
        for seg in &self.segments {
            match seg.shape {
                ParamShape::Scalar => labels.push(seg.name.clone()),
                ParamShape::Vector(n) => {
                    labels.extend((0..n).map(|i| format!("{}[{i}]", seg.name)));
                }
                ParamShape::Matrix(rows, cols) => {
                    for c in 0..cols {
                        labels.extend((0..rows).map(|r| format!("{}[{r},{c}]", seg.name)));
                    }
                }
            }
        }
        labels
    }

    /// View of the entries of `theta` that belong to field `name`.
    ///
    /// # Errors
    /// - [`ContextError::ThetaLengthMismatch`] if `theta` does not match the layout.
    /// - [`ContextError::MissingField`] if no parameter is called `name`.
    pub fn slice<'t>(&self, name: &str, theta: &'t Theta) -> ContextResult<ArrayView1<'t, f64>> {
        if theta.len() != self.len {
            return Err(ContextError::ThetaLengthMismatch {
                expected: self.len,
                actual: theta.len(),
            });
        }
        let seg =
            self.segment(name).ok_or_else(|| ContextError::MissingField { name: name.to_string() })?;
        let range = seg.range();
        Ok(theta.slice(s![range.start..range.end]))
    }
}
