use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };
    pub const ONE: Self = Self {
        x: 1.0,
        y: 1.0,
        z: 1.0,
    };
    pub const RIGHT: Self = Self {
        x: 1.0,
        y: 0.0,
        z: 0.0,
    };
    pub const UP: Self = Self {
        x: 0.0,
        y: 1.0,
        z: 0.0,
    };
    /// Right-handed forward: the camera looks down `-Z` in view space.
    pub const FORWARD: Self = Self {
        x: 0.0,
        y: 0.0,
        z: -1.0,
    };
    pub const BACK: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 1.0,
    };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn from_array(v: [f32; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }

    pub fn magnitude(&self) -> f32 {
        (self.x.powi(2) + self.y.powi(2) + self.z.powi(2)).sqrt()
    }

    pub fn distance(&self, other: Self) -> f32 {
        (*self - other).magnitude()
    }

    /// Returns the unit vector in the same direction.
    ///
    /// A zero-length vector yields NaN components, like any division by zero.
    pub fn normalize(&self) -> Self {
        let magnitude = self.magnitude();
        Self {
            x: self.x / magnitude,
            y: self.y / magnitude,
            z: self.z / magnitude,
        }
    }

    /// Like [`normalize`](Self::normalize) but returns [`Vec3::ZERO`] for
    /// vectors too short to have a direction.
    pub fn normalize_or_zero(&self) -> Self {
        let magnitude = self.magnitude();
        if magnitude <= f32::EPSILON {
            Self::ZERO
        } else {
            *self / magnitude
        }
    }

    pub fn dot(&self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Returns the cross product of two vectors.
    /// The resulting vector is perpendicular to both input vectors.
    pub fn cross(&self, other: Self) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Reflects `self` about `normal` (`2 (n·v) n - v`). Both are expected to be unit length.
    pub fn reflect(&self, normal: Self) -> Self {
        normal * (2.0 * normal.dot(*self)) - *self
    }

    /// Weighted sum `w0*a + w1*b + w2*c`, the barycentric blend of three points.
    pub fn blend(points: &[Vec3; 3], weights: [f32; 3]) -> Self {
        points[0] * weights[0] + points[1] * weights[1] + points[2] * weights[2]
    }
}

/// Component-wise addition of two vectors.
impl Add<Vec3> for Vec3 {
    type Output = Vec3;

    fn add(self, rhs: Vec3) -> Self::Output {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            z: self.z + rhs.z,
        }
    }
}

impl AddAssign<Vec3> for Vec3 {
    fn add_assign(&mut self, rhs: Vec3) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

/// Component-wise subtraction of two vectors.
impl Sub<Vec3> for Vec3 {
    type Output = Vec3;

    fn sub(self, rhs: Vec3) -> Self::Output {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z,
        }
    }
}

/// Scalar multiplication of a vector.
impl Mul<f32> for Vec3 {
    type Output = Vec3;

    fn mul(self, rhs: f32) -> Self::Output {
        Self {
            x: self.x * rhs,
            y: self.y * rhs,
            z: self.z * rhs,
        }
    }
}

/// Scalar division of a vector.
impl Div<f32> for Vec3 {
    type Output = Vec3;

    fn div(self, rhs: f32) -> Self::Output {
        Self {
            x: self.x / rhs,
            y: self.y / rhs,
            z: self.z / rhs,
        }
    }
}

/// Negation of a vector.
impl Neg for Vec3 {
    type Output = Vec3;

    fn neg(self) -> Self::Output {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn cross_follows_right_hand_rule() {
        let z = Vec3::RIGHT.cross(Vec3::UP);
        assert_eq!(z, Vec3::BACK);
    }

    #[test]
    fn reflect_mirrors_about_normal() {
        let incoming = Vec3::new(1.0, 1.0, 0.0).normalize();
        let reflected = incoming.reflect(Vec3::UP);
        assert_relative_eq!(reflected.x, -incoming.x, epsilon = 1e-6);
        assert_relative_eq!(reflected.y, incoming.y, epsilon = 1e-6);
    }

    #[test]
    fn normalize_or_zero_handles_zero_length() {
        assert_eq!(Vec3::ZERO.normalize_or_zero(), Vec3::ZERO);
        assert_relative_eq!(
            Vec3::new(0.0, 3.0, 4.0).normalize_or_zero().magnitude(),
            1.0,
            epsilon = 1e-6
        );
    }

    #[test]
    fn blend_with_unit_weight_returns_that_point() {
        let points = [Vec3::ZERO, Vec3::UP, Vec3::RIGHT];
        assert_eq!(Vec3::blend(&points, [0.0, 1.0, 0.0]), Vec3::UP);
    }
}
