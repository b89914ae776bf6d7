//! 4D vector for homogeneous coordinates.

use super::vec3::Vec3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vec4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vec4 {
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Create a point (w=1) from a Vec3.
    pub const fn point(v: Vec3) -> Self {
        Self::new(v.x, v.y, v.z, 1.0)
    }

    /// Create a direction vector (w=0) from a Vec3.
    pub const fn direction(v: Vec3) -> Self {
        Self::new(v.x, v.y, v.z, 0.0)
    }

    /// Convert to Vec3, discarding w.
    pub const fn to_vec3(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// Convert to Vec3 with perspective division (divide by w).
    ///
    /// A `w` of exactly zero leaves the components undivided.
    pub fn to_vec3_perspective(self) -> Vec3 {
        if self.w != 0.0 && self.w != 1.0 {
            Vec3::new(self.x / self.w, self.y / self.w, self.z / self.w)
        } else {
            Vec3::new(self.x, self.y, self.z)
        }
    }
}

impl From<Vec3> for Vec4 {
    /// Convert Vec3 to Vec4 as a point (w=1).
    fn from(v: Vec3) -> Self {
        Self::point(v)
    }
}

impl From<Vec4> for Vec3 {
    /// Convert Vec4 to Vec3, discarding w.
    fn from(v: Vec4) -> Self {
        v.to_vec3()
    }
}
