//! 4x4 transformation matrix using column-vector convention.
//!
//! # Convention
//! - Vectors are **column vectors** on the right: `Mat4 * Vec`
//! - Translation is stored in the **last column**
//! - Transforms chain **right-to-left**: `A * B * v` applies B first, then A
//! - Space is **right-handed**; cameras look down `-Z` in view space
//!
//! # Example
//! ```ignore
//! let model_view = view * model;     // model applied first, then view
//! let result = model_view * vertex;  // transform the vertex
//! ```

use std::ops::Mul;

use super::vec3::Vec3;
use super::vec4::Vec4;

/// 4x4 matrix stored as `data[row][col]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    data: [[f32; 4]; 4],
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mat4 {
    pub fn new(data: [[f32; 4]; 4]) -> Self {
        Mat4 { data }
    }

    pub fn identity() -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a translation matrix.
    pub fn translation(x: f32, y: f32, z: f32) -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, x],
            [0.0, 1.0, 0.0, y],
            [0.0, 0.0, 1.0, z],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a scale matrix.
    pub fn scaling(x: f32, y: f32, z: f32) -> Self {
        Mat4::new([
            [x, 0.0, 0.0, 0.0],
            [0.0, y, 0.0, 0.0],
            [0.0, 0.0, z, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Counter-clockwise rotation around the X axis (looking down +X toward the origin).
    pub fn rotation_x(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, c, -s, 0.0],
            [0.0, s, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Counter-clockwise rotation around the Y axis.
    pub fn rotation_y(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Mat4::new([
            [c, 0.0, s, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [-s, 0.0, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Counter-clockwise rotation around the Z axis.
    pub fn rotation_z(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Mat4::new([
            [c, -s, 0.0, 0.0],
            [s, c, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates an OpenGL-style right-handed perspective matrix.
    ///
    /// `fov` is in radians and spans the horizontal axis. `aspect_ratio` is
    /// `height / width`, so the vertical scale is `e / aspect_ratio` with
    /// `e = 1 / tan(fov / 2)`. View-space depth `-z` ends up in `w`.
    pub fn perspective_rh(fov: f32, aspect_ratio: f32, near: f32, far: f32) -> Self {
        let e = 1.0 / (fov / 2.0).tan();
        Mat4::new([
            [e, 0.0, 0.0, 0.0],
            [0.0, e / aspect_ratio, 0.0, 0.0],
            [
                0.0,
                0.0,
                -(far + near) / (far - near),
                -(2.0 * far * near) / (far - near),
            ],
            [0.0, 0.0, -1.0, 0.0],
        ])
    }

    /// Creates a right-handed look-at view matrix.
    ///
    /// After the transform the eye sits at the origin looking down `-Z`
    /// with `up` projected onto `+Y`.
    pub fn look_at_rh(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        let forward = (target - eye).normalize();
        let right = forward.cross(up).normalize();
        let up = right.cross(forward);

        Self::new([
            [right.x, right.y, right.z, -right.dot(eye)],
            [up.x, up.y, up.z, -up.dot(eye)],
            [-forward.x, -forward.y, -forward.z, forward.dot(eye)],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn transpose(&self) -> Self {
        let mut data = [[0.0f32; 4]; 4];
        for (row, values) in data.iter_mut().enumerate() {
            for (col, value) in values.iter_mut().enumerate() {
                *value = self.data[col][row];
            }
        }
        Mat4 { data }
    }

    /// Computes the inverse with Gauss-Jordan elimination and partial pivoting.
    /// Returns `None` if the matrix is singular.
    pub fn inverse(&self) -> Option<Mat4> {
        let mut m = self.data;
        let mut inv = Mat4::identity().data;

        for col in 0..4 {
            let pivot = (col..4)
                .max_by(|&a, &b| m[a][col].abs().total_cmp(&m[b][col].abs()))
                .unwrap_or(col);
            if m[pivot][col].abs() < f32::EPSILON {
                return None;
            }
            m.swap(col, pivot);
            inv.swap(col, pivot);

            let scale = 1.0 / m[col][col];
            for k in 0..4 {
                m[col][k] *= scale;
                inv[col][k] *= scale;
            }

            for row in 0..4 {
                if row == col {
                    continue;
                }
                let factor = m[row][col];
                if factor == 0.0 {
                    continue;
                }
                for k in 0..4 {
                    m[row][k] -= factor * m[col][k];
                    inv[row][k] -= factor * inv[col][k];
                }
            }
        }

        Some(Mat4::new(inv))
    }

    /// The inverse-transpose, which carries surface normals through this transform.
    pub fn inverse_transpose(&self) -> Option<Mat4> {
        self.inverse().map(|inv| inv.transpose())
    }

    /// Applies the upper 3x3 block only (no translation, no divide).
    pub fn transform_direction(&self, v: Vec3) -> Vec3 {
        (*self * Vec4::direction(v)).to_vec3()
    }

    /// Access element at [row][col].
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row][col]
    }

    /// Set element at [row][col].
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f32) {
        self.data[row][col] = value;
    }
}

/// Matrix multiplication: Mat4 * Mat4.
///
/// `A * B * v` applies B first, then A.
impl Mul<Mat4> for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Self::Output {
        let mut result = [[0.0f32; 4]; 4];

        for (row, values) in result.iter_mut().enumerate() {
            for (col, value) in values.iter_mut().enumerate() {
                *value = self.data[row][0] * rhs.data[0][col]
                    + self.data[row][1] * rhs.data[1][col]
                    + self.data[row][2] * rhs.data[2][col]
                    + self.data[row][3] * rhs.data[3][col];
            }
        }

        Mat4::new(result)
    }
}

/// Transform a Vec4 by a matrix: Mat4 * Vec4 (column vector).
impl Mul<Vec4> for Mat4 {
    type Output = Vec4;

    fn mul(self, v: Vec4) -> Self::Output {
        let row = |r: usize| {
            self.data[r][0] * v.x + self.data[r][1] * v.y + self.data[r][2] * v.z + self.data[r][3] * v.w
        };
        Vec4::new(row(0), row(1), row(2), row(3))
    }
}

/// Transform a point: Mat4 * Vec3 (treats Vec3 as column vector with w=1).
///
/// Applies perspective division by the resulting w.
impl Mul<Vec3> for Mat4 {
    type Output = Vec3;

    fn mul(self, v: Vec3) -> Self::Output {
        (self * Vec4::point(v)).to_vec3_perspective()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    fn assert_mat_eq(a: &Mat4, b: &Mat4) {
        for row in 0..4 {
            for col in 0..4 {
                assert_relative_eq!(a.get(row, col), b.get(row, col), epsilon = 1e-5);
            }
        }
    }

    #[test]
    fn rotation_y_turns_x_toward_negative_z() {
        let v = Mat4::rotation_y(FRAC_PI_2) * Vec3::RIGHT;
        assert_relative_eq!(v.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(v.z, -1.0, epsilon = 1e-6);
    }

    #[test]
    fn rotation_z_turns_x_toward_y() {
        let v = Mat4::rotation_z(FRAC_PI_2) * Vec3::RIGHT;
        assert_relative_eq!(v.y, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn multiplication_order_applies_right_first() {
        // Scale, then translate: (1,0,0) -> (2,0,0) -> (2,5,0)
        let m = Mat4::translation(0.0, 5.0, 0.0) * Mat4::scaling(2.0, 2.0, 2.0);
        let v = m * Vec3::RIGHT;
        assert_eq!(v, Vec3::new(2.0, 5.0, 0.0));
    }

    #[test]
    fn inverse_undoes_transform() {
        let m = Mat4::translation(1.0, -2.0, 3.0)
            * Mat4::rotation_x(0.7)
            * Mat4::scaling(2.0, 3.0, 0.5);
        let inv = m.inverse().unwrap();
        assert_mat_eq(&(m * inv), &Mat4::identity());
        assert_mat_eq(&(inv * m), &Mat4::identity());
    }

    #[test]
    fn inverse_of_singular_is_none() {
        assert!(Mat4::scaling(1.0, 0.0, 1.0).inverse().is_none());
    }

    #[test]
    fn transpose_swaps_rows_and_columns() {
        let m = Mat4::translation(1.0, 2.0, 3.0).transpose();
        assert_eq!(m.get(3, 0), 1.0);
        assert_eq!(m.get(3, 2), 3.0);
        assert_eq!(m.get(0, 3), 0.0);
    }

    #[test]
    fn look_at_places_target_on_negative_z() {
        let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::UP);
        let p = view * Vec3::ZERO;
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(p.z, -5.0, epsilon = 1e-6);

        let up = view * Vec3::UP;
        assert_relative_eq!(up.y, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn perspective_maps_near_and_far_to_ndc_bounds() {
        let p = Mat4::perspective_rh(FRAC_PI_2, 1.0, 1.0, 10.0);
        let near = p * Vec3::new(0.0, 0.0, -1.0);
        let far = p * Vec3::new(0.0, 0.0, -10.0);
        assert_relative_eq!(near.z, -1.0, epsilon = 1e-5);
        assert_relative_eq!(far.z, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn perspective_divides_by_view_depth() {
        // 90 degree fov: e = 1, so x_ndc = x / -z
        let p = Mat4::perspective_rh(FRAC_PI_2, 1.0, 0.1, 100.0);
        let v = p * Vec3::new(1.0, 0.5, -2.0);
        assert_relative_eq!(v.x, 0.5, epsilon = 1e-5);
        assert_relative_eq!(v.y, 0.25, epsilon = 1e-5);
    }

    #[test]
    fn transform_direction_ignores_translation() {
        let m = Mat4::translation(4.0, 5.0, 6.0);
        assert_eq!(m.transform_direction(Vec3::UP), Vec3::UP);
    }
}
