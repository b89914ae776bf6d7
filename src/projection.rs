//! Perspective projection parameters and viewport mapping.
//!
//! The [`Projection`] struct is the single source of truth for the
//! perspective parameters of a frame (FOV, aspect ratio, near/far planes).
//! It builds the projection matrix and maps normalized device coordinates
//! onto integer pixel positions.

use crate::math::mat4::Mat4;
use crate::math::vec3::Vec3;

/// Perspective projection parameters.
#[derive(Debug, Clone, Copy)]
pub struct Projection {
    /// Field of view in degrees.
    fov: f32,
    /// Aspect ratio (height / width).
    aspect_ratio: f32,
    /// Near clipping plane distance.
    z_near: f32,
    /// Far clipping plane distance.
    z_far: f32,
}

impl Projection {
    /// Creates a new projection with the given parameters.
    ///
    /// # Arguments
    /// * `fov` - Field of view in degrees
    /// * `aspect_ratio` - Height divided by width
    /// * `z_near` - Near plane distance (must be > 0)
    /// * `z_far` - Far plane distance (must be > z_near)
    pub fn new(fov: f32, aspect_ratio: f32, z_near: f32, z_far: f32) -> Self {
        Self {
            fov,
            aspect_ratio,
            z_near,
            z_far,
        }
    }

    /// Creates the projection for an output of `width` x `height` pixels.
    pub fn for_viewport(fov: f32, width: u32, height: u32, z_near: f32, z_far: f32) -> Self {
        Self::new(fov, height as f32 / width as f32, z_near, z_far)
    }

    /// Returns the field of view in degrees.
    pub fn fov(&self) -> f32 {
        self.fov
    }

    /// Returns the aspect ratio (height / width).
    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    pub fn z_near(&self) -> f32 {
        self.z_near
    }

    pub fn z_far(&self) -> f32 {
        self.z_far
    }

    /// Generates the right-handed perspective projection matrix.
    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov.to_radians(), self.aspect_ratio, self.z_near, self.z_far)
    }
}

/// Largest pixel offset a projected vertex may take on either axis.
///
/// Vertices near the eye plane project arbitrarily far away. Keeping them
/// within `±2^24` leaves the rasterizer's edge products well inside `i64`.
pub const PIXEL_LIMIT: i32 = 1 << 24;

/// Maps NDC `x, y` in `[-1, 1]` to pixel coordinates.
///
/// `+Y` in NDC points up the screen, so rows are flipped. Coordinates are
/// truncated toward zero, not rounded, and clamped to [`PIXEL_LIMIT`].
pub fn viewport_to_pixel(ndc: Vec3, width: u32, height: u32) -> (i32, i32) {
    let limit = PIXEL_LIMIT as f32;
    let x = (ndc.x + 1.0) * width as f32 / 2.0;
    let y = (1.0 - ndc.y) * height as f32 / 2.0;
    (x.clamp(-limit, limit) as i32, y.clamp(-limit, limit) as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn aspect_ratio_is_height_over_width() {
        let proj = Projection::for_viewport(60.0, 800, 600, 0.1, 100.0);
        assert_relative_eq!(proj.aspect_ratio(), 0.75, epsilon = 1e-6);
    }

    #[test]
    fn square_pixels_on_non_square_viewport() {
        // A point at equal x and y offsets lands equally far from the centre in pixels
        let (w, h) = (800, 400);
        let proj = Projection::for_viewport(90.0, w, h, 0.1, 100.0);
        let ndc = proj.matrix() * Vec3::new(0.5, 0.5, -2.0);
        let (px, py) = viewport_to_pixel(ndc, w, h);
        let dx = px - w as i32 / 2;
        let dy = h as i32 / 2 - py;
        assert!(dx > 50 && (dx - dy).abs() <= 1, "dx={dx} dy={dy}");
    }

    #[test]
    fn viewport_corners() {
        assert_eq!(viewport_to_pixel(Vec3::new(-1.0, 1.0, 0.0), 100, 50), (0, 0));
        assert_eq!(viewport_to_pixel(Vec3::new(0.0, 0.0, 0.0), 100, 50), (50, 25));
        assert_eq!(viewport_to_pixel(Vec3::new(1.0, -1.0, 0.0), 100, 50), (100, 50));
    }

    #[test]
    fn far_projections_are_clamped() {
        let huge = Vec3::new(-1.0e12, -1.0e12, 0.0);
        assert_eq!(viewport_to_pixel(huge, 100, 100), (-PIXEL_LIMIT, PIXEL_LIMIT));
        let inf = Vec3::new(f32::INFINITY, f32::NEG_INFINITY, 0.0);
        assert_eq!(viewport_to_pixel(inf, 100, 100), (PIXEL_LIMIT, PIXEL_LIMIT));
    }
}
