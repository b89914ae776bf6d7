//! Per-frame vertex transforms.
//!
//! The mesh arena keeps original local positions. Each frame the renderer
//! resets a [`VertexBuffer`] from the arena and transforms the buffer in
//! place, so a vertex shared by many faces is transformed exactly once and
//! the arena is never corrupted by a skipped reset.

use std::fmt;

use crate::math::mat4::Mat4;
use crate::math::vec3::Vec3;
use crate::math::vec4::Vec4;
use crate::mesh::{Mesh, VertexId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformError {
    /// Normals were requested through a matrix with no inverse.
    SingularMatrix,
}

impl fmt::Display for TransformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformError::SingularMatrix => {
                write!(f, "matrix is not invertible, normals cannot be transformed")
            }
        }
    }
}

impl std::error::Error for TransformError {}

/// Inverse-transpose of a transform, used to carry normals through it.
#[derive(Debug, Clone, Copy)]
pub struct NormalMatrix(Mat4);

impl NormalMatrix {
    pub fn new(matrix: &Mat4) -> Result<Self, TransformError> {
        matrix
            .inverse_transpose()
            .map(NormalMatrix)
            .ok_or(TransformError::SingularMatrix)
    }

    /// Transforms and renormalizes a normal.
    pub fn apply(&self, normal: Vec3) -> Vec3 {
        self.0.transform_direction(normal).normalize_or_zero()
    }
}

/// Working copy of one vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkingVertex {
    pub position: Vec3,
    pub normal: Vec3,
}

/// Multiplies `(x, y, z, 1)` by `matrix` and divides by the resulting `w`.
///
/// With `normals`, the local normal is carried through the inverse-transpose
/// into the working normal.
pub fn transform_vertex(
    vertex: &mut WorkingVertex,
    local_normal: Vec3,
    matrix: &Mat4,
    normals: Option<&NormalMatrix>,
) {
    vertex.position = (*matrix * Vec4::point(vertex.position)).to_vec3_perspective();
    if let Some(normal_matrix) = normals {
        vertex.normal = normal_matrix.apply(local_normal);
    }
}

/// Frame-scoped working positions for the vertices of one mesh.
#[derive(Debug, Default)]
pub struct VertexBuffer {
    working: Vec<WorkingVertex>,
}

impl VertexBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sizes the buffer for `mesh` and restores every working vertex to its
    /// local position and normal.
    pub fn reset(&mut self, mesh: &Mesh) {
        self.working.clear();
        self.working
            .extend(mesh.vertices().iter().map(|v| WorkingVertex {
                position: v.position,
                normal: v.normal,
            }));
    }

    /// Restores a single vertex. Idempotent.
    pub fn reset_vertex(&mut self, mesh: &Mesh, id: VertexId) {
        let local = mesh.vertex(id);
        self.working[id.index()] = WorkingVertex {
            position: local.position,
            normal: local.normal,
        };
    }

    /// Transforms every working vertex once by `matrix`.
    ///
    /// With `apply_normal`, normals are carried through the inverse-transpose
    /// of `matrix`, which must then be invertible.
    pub fn transform(
        &mut self,
        mesh: &Mesh,
        matrix: &Mat4,
        apply_normal: bool,
    ) -> Result<(), TransformError> {
        let normals = if apply_normal {
            Some(NormalMatrix::new(matrix)?)
        } else {
            None
        };
        for (working, local) in self.working.iter_mut().zip(mesh.vertices()) {
            transform_vertex(working, local.normal, matrix, normals.as_ref());
        }
        Ok(())
    }

    pub fn get(&self, id: VertexId) -> &WorkingVertex {
        &self.working[id.index()]
    }

    /// Positions of three vertices, typically a face's corners.
    pub fn positions(&self, ids: [VertexId; 3]) -> [Vec3; 3] {
        ids.map(|id| self.get(id).position)
    }

    /// Normals of three vertices.
    pub fn normals(&self, ids: [VertexId; 3]) -> [Vec3; 3] {
        ids.map(|id| self.get(id).normal)
    }

    pub fn len(&self) -> usize {
        self.working.len()
    }

    pub fn is_empty(&self) -> bool {
        self.working.is_empty()
    }
}
