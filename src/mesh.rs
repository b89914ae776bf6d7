//! Scene geometry: vertex arena, faces and meshes.
//!
//! A [`Mesh`] owns its vertices in an arena; faces refer to them through
//! [`VertexId`] handles so several faces can share one vertex record. The
//! arena is never touched by rendering: per-frame working positions live in a
//! separate [`VertexBuffer`](crate::transform::VertexBuffer).
//!
//! The model matrix is built by chained left-multiplication. Calling
//! `translate` then `rotate` applies the translation first and the rotation
//! second, so
//!
//! ```ignore
//! mesh.translate(-x, 0.0, -z);   // move to the origin
//! mesh.rotate(Axis::Z, angle);   // spin in place
//! mesh.translate(x, 0.0, z);     // move back
//! ```
//!
//! rotates the mesh about its own centre.

use std::fmt;
use std::path::Path;

use log::{info, warn};

use crate::colors::Color;
use crate::math::mat4::Mat4;
use crate::math::vec3::Vec3;

/// Handle into a mesh's vertex arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(pub u32);

impl VertexId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// An immutable local-space vertex record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// Original position in model space.
    pub position: Vec3,
    /// Model-space normal, expected to be unit length.
    pub normal: Vec3,
}

impl Vertex {
    pub fn new(position: Vec3, normal: Vec3) -> Self {
        Self { position, normal }
    }
}

/// A triangle referencing three vertices of its mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    pub vertices: [VertexId; 3],
    pub color: Color,
    /// Marks the face as recolorable by [`Mesh::change_marked_faces_color`].
    pub change_color: bool,
    /// Set while a marked face shows its highlight color.
    pub is_shining: bool,
}

impl Face {
    pub fn new(vertices: [VertexId; 3], color: Color) -> Self {
        Self {
            vertices,
            color,
            change_color: false,
            is_shining: false,
        }
    }
}

/// Average of the three corners.
pub fn centroid(corners: &[Vec3; 3]) -> Vec3 {
    (corners[0] + corners[1] + corners[2]) / 3.0
}

/// Un-normalized face normal `(b - a) x (c - a)`.
///
/// Counter-clockwise corners (seen from the front) give a normal pointing
/// out of the front side.
pub fn face_normal(corners: &[Vec3; 3]) -> Vec3 {
    (corners[1] - corners[0]).cross(corners[2] - corners[0])
}

/// Rotation axis for [`Mesh::rotate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Errors raised while loading a mesh from disk.
#[derive(Debug)]
pub enum LoadError {
    Obj(tobj::LoadError),
    /// The file parsed but contained no triangles.
    Empty,
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Obj(e) => write!(f, "failed to parse OBJ: {e}"),
            LoadError::Empty => write!(f, "OBJ file contains no triangles"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Obj(e) => Some(e),
            LoadError::Empty => None,
        }
    }
}

impl From<tobj::LoadError> for LoadError {
    fn from(e: tobj::LoadError) -> Self {
        LoadError::Obj(e)
    }
}

/// An ordered list of faces sharing a vertex arena and a model matrix.
#[derive(Debug, Clone)]
pub struct Mesh {
    vertices: Vec<Vertex>,
    faces: Vec<Face>,
    color: Color,
    model: Mat4,
}

impl Mesh {
    /// Creates an empty mesh whose new faces default to `color`.
    pub fn new(color: Color) -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
            color,
            model: Mat4::identity(),
        }
    }

    /// Adds a vertex to the arena and returns its handle.
    pub fn add_vertex(&mut self, position: Vec3, normal: Vec3) -> VertexId {
        let id = VertexId(self.vertices.len() as u32);
        self.vertices.push(Vertex::new(position, normal));
        id
    }

    /// Adds a face colored with the mesh color and returns it for further tweaks.
    ///
    /// # Panics
    /// Panics if any handle does not belong to this mesh.
    pub fn add_face(&mut self, vertices: [VertexId; 3]) -> &mut Face {
        assert!(
            vertices.iter().all(|v| v.index() < self.vertices.len()),
            "face references a vertex outside the mesh"
        );
        self.faces.push(Face::new(vertices, self.color));
        let last = self.faces.len() - 1;
        &mut self.faces[last]
    }

    /// Adds three fresh vertices sharing one normal and a face over them.
    pub fn add_flat_triangle(&mut self, corners: [Vec3; 3], normal: Vec3) -> &mut Face {
        let ids = corners.map(|p| self.add_vertex(p, normal));
        self.add_face(ids)
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn vertex(&self, id: VertexId) -> &Vertex {
        &self.vertices[id.index()]
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn faces_mut(&mut self) -> &mut [Face] {
        &mut self.faces
    }

    /// Local-space corner positions of a face.
    pub fn corners(&self, face: &Face) -> [Vec3; 3] {
        face.vertices.map(|id| self.vertex(id).position)
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Sets the mesh color and repaints every face with it.
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
        for face in &mut self.faces {
            face.color = color;
        }
    }

    pub fn model(&self) -> &Mat4 {
        &self.model
    }

    // ============ Model matrix (left-multiplied, order matters) ============

    pub fn translate(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        self.model = Mat4::translation(x, y, z) * self.model;
        self
    }

    pub fn scale(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        self.model = Mat4::scaling(x, y, z) * self.model;
        self
    }

    /// Rotates by `angle` radians about a world axis through the origin.
    pub fn rotate(&mut self, axis: Axis, angle: f32) -> &mut Self {
        let rotation = match axis {
            Axis::X => Mat4::rotation_x(angle),
            Axis::Y => Mat4::rotation_y(angle),
            Axis::Z => Mat4::rotation_z(angle),
        };
        self.model = rotation * self.model;
        self
    }

    pub fn reset_model(&mut self) -> &mut Self {
        self.model = Mat4::identity();
        self
    }

    /// Recolors every face flagged `change_color` and sets its shining state.
    pub fn change_marked_faces_color(&mut self, color: Color, shining: bool) {
        for face in self.faces.iter_mut().filter(|f| f.change_color) {
            face.color = color;
            face.is_shining = shining;
        }
    }

    /// Loads every object of an OBJ file into one mesh.
    ///
    /// Faces are triangulated and indices unified so vertices are shared
    /// between faces. Missing normals are rebuilt from the faces.
    pub fn from_obj<P: AsRef<Path>>(path: P, color: Color) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let (models, _materials) = tobj::load_obj(
            path,
            &tobj::LoadOptions {
                triangulate: true,
                single_index: true,
                ..Default::default()
            },
        )?;

        let mut mesh = Mesh::new(color);
        let mut missing_normals = false;

        for model in &models {
            let source = &model.mesh;
            let base = mesh.vertices.len() as u32;
            let has_normals = source.normals.len() == source.positions.len();
            missing_normals |= !has_normals;

            for (i, p) in source.positions.chunks_exact(3).enumerate() {
                let normal = if has_normals {
                    Vec3::new(
                        source.normals[3 * i],
                        source.normals[3 * i + 1],
                        source.normals[3 * i + 2],
                    )
                    .normalize_or_zero()
                } else {
                    Vec3::ZERO
                };
                mesh.add_vertex(Vec3::new(p[0], p[1], p[2]), normal);
            }

            for tri in source.indices.chunks_exact(3) {
                mesh.add_face([
                    VertexId(base + tri[0]),
                    VertexId(base + tri[1]),
                    VertexId(base + tri[2]),
                ]);
            }
        }

        if mesh.faces.is_empty() {
            return Err(LoadError::Empty);
        }

        if missing_normals {
            warn!("{}: no vertex normals, rebuilding from faces", path.display());
            mesh.rebuild_missing_normals();
        }

        info!(
            "Loaded {}: {} vertices, {} faces",
            path.display(),
            mesh.vertices.len(),
            mesh.faces.len()
        );
        Ok(mesh)
    }

    /// Fills zero normals with the area-weighted average of adjacent face normals.
    fn rebuild_missing_normals(&mut self) {
        let mut sums = vec![Vec3::ZERO; self.vertices.len()];
        for face in &self.faces {
            let n = face_normal(&self.corners(face));
            for id in face.vertices {
                sums[id.index()] += n;
            }
        }
        for (vertex, sum) in self.vertices.iter_mut().zip(sums) {
            if vertex.normal == Vec3::ZERO {
                vertex.normal = sum.normalize_or_zero();
            }
        }
    }
}
