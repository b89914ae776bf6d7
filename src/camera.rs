//! Look-at camera.
//!
//! # Coordinate System
//!
//! World and view space are **right-handed**. The view matrix moves the eye
//! to the origin looking down `-Z`, with `up` mapped onto `+Y`. Anything in
//! front of the camera therefore has a negative view-space `z`.

use crate::math::mat4::Mat4;
use crate::math::vec3::Vec3;

/// A camera defined by eye position, target point and up vector.
///
/// The renderer only reads cameras; scripting moves them between frames.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Field of view in degrees.
    pub fov: f32,
}

impl Camera {
    pub fn new(position: Vec3, target: Vec3, up: Vec3, fov: f32) -> Self {
        Self {
            position,
            target,
            up,
            fov,
        }
    }

    /// Direction from the eye toward the target (normalized).
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize()
    }

    /// Field of view in radians.
    pub fn fov_radians(&self) -> f32 {
        self.fov.to_radians()
    }

    /// Computes the view matrix for the rendering pipeline.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }
}

impl Default for Camera {
    /// Five units up the `+Z` axis, looking at the origin with a 60 degree field of view.
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::UP, 60.0)
    }
}
