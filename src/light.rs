//! Point and spot lights.

use crate::math::mat4::Mat4;
use crate::math::vec3::Vec3;

/// A light in world space.
///
/// Point lights shine in every direction and ignore `direction`. Spotlights
/// attenuate by `cos(angle)^exponent` around `direction` and contribute
/// nothing beyond 90 degrees from it.
#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    pub position: Vec3,
    /// Direction the spotlight points toward.
    pub direction: Vec3,
    pub is_spotlight: bool,
    /// Spotlight falloff exponent `P`.
    pub exponent: i32,
    pub off: bool,
}

impl Light {
    pub fn point(position: Vec3) -> Self {
        Self {
            position,
            direction: Vec3::ZERO,
            is_spotlight: false,
            exponent: 0,
            off: false,
        }
    }

    pub fn spot(position: Vec3, direction: Vec3, exponent: i32) -> Self {
        Self {
            position,
            direction,
            is_spotlight: true,
            exponent,
            off: false,
        }
    }

    /// Carries the light into view space.
    ///
    /// Positions go through the full view matrix. The direction goes through
    /// its rotation part and is renormalized; view matrices are rigid, so
    /// this equals the inverse-transpose used for normals.
    pub fn to_view(&self, view: &Mat4) -> ViewLight {
        let spot = self.is_spotlight.then(|| Spot {
            direction: view.transform_direction(self.direction).normalize_or_zero(),
            exponent: self.exponent,
        });
        ViewLight {
            position: *view * self.position,
            spot,
        }
    }
}

/// Spotlight cone in view space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spot {
    pub direction: Vec3,
    pub exponent: i32,
}

/// A light transformed into view space for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewLight {
    pub position: Vec3,
    /// `None` for point lights.
    pub spot: Option<Spot>,
}

impl ViewLight {
    /// Angular attenuation toward a surface point.
    ///
    /// `to_light` is the unit vector from the point to the light. Point
    /// lights always return `1.0`.
    pub fn spot_factor(&self, to_light: Vec3) -> f32 {
        match self.spot {
            None => 1.0,
            Some(spot) => {
                let cos = (-spot.direction).dot(to_light);
                if cos > 0.0 {
                    cos.powi(spot.exponent)
                } else {
                    0.0
                }
            }
        }
    }
}
