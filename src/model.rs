//! A model: a shape plus its world transform.

use crate::math::mat4::Mat4;
use crate::shape::Shape;

/// One scene object fed to the pipeline.
///
/// The matrix is the optional per-model transform, applied before the
/// view transform; it defaults to identity.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    shape: Shape,
    matrix: Mat4,
}

impl Model {
    pub fn new(shape: Shape) -> Self {
        Self {
            shape,
            matrix: Mat4::identity(),
        }
    }

    /// Builder-style override of the per-model transform.
    pub fn with_matrix(mut self, matrix: Mat4) -> Self {
        self.matrix = matrix;
        self
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn matrix(&self) -> Mat4 {
        self.matrix
    }

    pub fn set_matrix(&mut self, matrix: Mat4) {
        self.matrix = matrix;
    }
}
