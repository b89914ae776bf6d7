//! Linear distance fog.

use crate::colors::{Color, Rgb};
use crate::math::vec3::Vec3;

/// Blends lit colors toward a fog color as distance from the camera grows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fog {
    pub color: Color,
    pub max_distance: f32,
}

impl Default for Fog {
    fn default() -> Self {
        Self::new(Color::LIGHT_GRAY, 10.0)
    }
}

impl Fog {
    pub fn new(color: Color, max_distance: f32) -> Self {
        Self {
            color,
            max_distance,
        }
    }

    /// Surface weight `f = (max - d) / max` for a point at distance `d`.
    ///
    /// Not clamped: beyond `max_distance` it goes negative and the blend
    /// overshoots past the fog color.
    pub fn factor(&self, distance: f32) -> f32 {
        (self.max_distance - distance) / self.max_distance
    }

    /// `color * f + fog * (1 - f)` for a point seen from `camera`.
    pub fn apply(&self, color: Rgb, point: Vec3, camera: Vec3) -> Rgb {
        let f = self.factor(point.distance(camera));
        color * f + self.color.to_unit() * (1.0 - f)
    }
}
