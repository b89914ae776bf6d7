//! A CPU software rasterizer.
//!
//! Meshes are transformed into view space, culled, projected and filled
//! with an active-edge-table scanline rasterizer against a depth buffer.
//! Lighting is Phong with point lights, spotlights and linear fog,
//! evaluated per face, per vertex or per pixel.
//!
//! # Quick Start
//!
//! ```ignore
//! use rastrum::prelude::*;
//!
//! let mut scene = Scene::new();
//! scene.add_mesh(shapes::cube(Color::new(109, 49, 11)));
//! scene.add_light(Light::point(Vec3::new(-5.0, 5.0, 5.0)));
//!
//! let mut surface = Surface::new(800, 600);
//! let mut depth = DepthBuffer::default();
//! render(&scene, &Camera::default(), &RenderConfig::default(), &mut surface, &mut depth)?;
//! surface.save_png("cube.png")?;
//! ```

pub mod camera;
pub mod colors;
pub mod config;
pub mod engine;
pub mod fog;
pub mod light;
pub mod math;
pub mod mesh;
pub mod projection;
pub mod render;
pub mod shading;
pub mod shapes;
pub mod transform;
pub mod visibility;

pub use engine::{render, FrameStats, RenderConfig, RenderError, Scene};
pub use mesh::{LoadError, Mesh};
pub use shading::ShadingMode;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::camera::Camera;
    pub use crate::colors::{Color, Rgb};
    pub use crate::config::{SceneConfig, SceneSetup};
    pub use crate::engine::{render, FrameStats, RenderConfig, RenderError, Scene};
    pub use crate::fog::Fog;
    pub use crate::light::Light;
    pub use crate::mesh::{Axis, Mesh};
    pub use crate::render::{DepthBuffer, Surface};
    pub use crate::shading::{LightingCoefficients, ShadingMode};
    pub use crate::shapes;

    pub use crate::math::mat4::Mat4;
    pub use crate::math::vec3::Vec3;
    pub use crate::math::vec4::Vec4;
}
