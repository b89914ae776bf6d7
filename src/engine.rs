//! The per-frame render pipeline.
//!
//! [`render`] is stateless: the caller owns the scene, the surface and the
//! depth buffer and passes an immutable [`RenderConfig`] for the frame.
//!
//! # Pipeline
//!
//! ```text
//! lights --view--> view-space lights (enabled only)
//! mesh vertices --reset--> working buffer --view*model--> view space
//!     -> visibility (behind viewer, back-facing)
//!     -> projection + viewport -> ScreenTriangle
//!     -> FaceShader (flat / gouraud / phong) -> scanline fill + depth test
//! ```

use std::fmt;

use log::{debug, trace};

use crate::camera::Camera;
use crate::fog::Fog;
use crate::light::{Light, ViewLight};
use crate::mesh::Mesh;
use crate::projection::{viewport_to_pixel, Projection};
use crate::render::framebuffer::{DepthBuffer, FrameBuffer, Surface};
use crate::render::rasterizer::{
    Coverage, FaceShader, ScanlineRasterizer, ScreenPoint, ScreenTriangle,
};
use crate::shading::{LightingCoefficients, LightingContext, ShadingMode};
use crate::transform::VertexBuffer;
use crate::visibility::{classify, Visibility};

/// Meshes and lights, mutated in place by the host between frames.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub meshes: Vec<Mesh>,
    pub lights: Vec<Light>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a mesh and returns its index.
    pub fn add_mesh(&mut self, mesh: Mesh) -> usize {
        self.meshes.push(mesh);
        self.meshes.len() - 1
    }

    /// Adds a light and returns its index.
    pub fn add_light(&mut self, light: Light) -> usize {
        self.lights.push(light);
        self.lights.len() - 1
    }
}

/// Settings that hold for one whole frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub shading: ShadingMode,
    pub lighting: LightingCoefficients,
    pub fog: Option<Fog>,
    pub z_near: f32,
    pub z_far: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            shading: ShadingMode::default(),
            lighting: LightingCoefficients::default(),
            fog: None,
            z_near: 0.001,
            z_far: 100.0,
        }
    }
}

/// Face counts for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub faces: usize,
    pub behind_viewer: usize,
    pub back_facing: usize,
    pub outside_guard_band: usize,
    pub rasterized: usize,
    pub pixels: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// The view-model matrix of the mesh at this index has no inverse, so
    /// its normals cannot be transformed.
    SingularTransform { mesh: usize },
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::SingularTransform { mesh } => {
                write!(f, "mesh {mesh} has a non-invertible view-model transform")
            }
        }
    }
}

impl std::error::Error for RenderError {}

/// Draws `scene` as seen by `camera` onto `surface`.
///
/// The depth buffer is resized to the surface and reset to `+inf` first.
/// The surface is not cleared; hosts clear it to their background.
pub fn render(
    scene: &Scene,
    camera: &Camera,
    config: &RenderConfig,
    surface: &mut Surface,
    depth: &mut DepthBuffer,
) -> Result<FrameStats, RenderError> {
    let (width, height) = (surface.width(), surface.height());
    let mut buffer = FrameBuffer::for_frame(surface, depth);
    let mut stats = FrameStats::default();
    if width == 0 || height == 0 {
        return Ok(stats);
    }

    let projection =
        Projection::for_viewport(camera.fov, width, height, config.z_near, config.z_far).matrix();
    let view = camera.view_matrix();

    let lights: Vec<ViewLight> = scene
        .lights
        .iter()
        .filter(|light| !light.off)
        .map(|light| light.to_view(&view))
        .collect();
    let ctx = LightingContext::new(config.lighting, &lights, config.fog.as_ref());

    let rasterizer = ScanlineRasterizer::new();
    let mut working = VertexBuffer::new();

    for (index, mesh) in scene.meshes.iter().enumerate() {
        working.reset(mesh);
        let view_model = view * *mesh.model();
        working
            .transform(mesh, &view_model, true)
            .map_err(|_| RenderError::SingularTransform { mesh: index })?;

        for (face_index, face) in mesh.faces().iter().enumerate() {
            stats.faces += 1;
            let positions = working.positions(face.vertices);

            match classify(&positions) {
                Visibility::Visible => {}
                Visibility::BehindViewer => {
                    stats.behind_viewer += 1;
                    trace!("mesh {index} face {face_index}: behind viewer");
                    continue;
                }
                Visibility::BackFacing => {
                    stats.back_facing += 1;
                    trace!("mesh {index} face {face_index}: back-facing");
                    continue;
                }
            }

            let mut points = [ScreenPoint::default(); 3];
            let mut depths = [0.0; 3];
            for (i, position) in positions.iter().enumerate() {
                let ndc = projection * *position;
                let (x, y) = viewport_to_pixel(ndc, width, height);
                points[i] = ScreenPoint::new(x, y);
                depths[i] = ndc.z;
            }
            let triangle = ScreenTriangle::new(points, depths);

            let normals = working.normals(face.vertices);
            let shader = FaceShader::new(config.shading, positions, normals, face.color, ctx);

            match rasterizer.fill_triangle(&triangle, &shader, &mut buffer) {
                Coverage::Rejected => {
                    stats.outside_guard_band += 1;
                    trace!("mesh {index} face {face_index}: outside guard band");
                }
                Coverage::Filled(pixels) => {
                    stats.rasterized += 1;
                    stats.pixels += pixels;
                }
            }
        }
    }

    debug!(
        "frame {}x{} {} shading: {:?}",
        width, height, config.shading, stats
    );
    Ok(stats)
}
