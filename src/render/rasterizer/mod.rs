//! Triangle rasterization.
//!
//! A projected face becomes a [`ScreenTriangle`], which the
//! [`ScanlineRasterizer`] fills through a [`PixelShader`].

mod barycentric;
mod scanline;
mod shader;

pub use barycentric::Barycentric;
pub use scanline::{Coverage, ScanlineRasterizer, GUARD_BAND};
pub use shader::{FaceShader, PixelShader};

/// Integer pixel position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
}

impl ScreenPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A face after projection and viewport mapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenTriangle {
    pub points: [ScreenPoint; 3],
    /// Post-projection depth of each corner.
    pub depths: [f32; 3],
}

impl ScreenTriangle {
    pub fn new(points: [ScreenPoint; 3], depths: [f32; 3]) -> Self {
        Self { points, depths }
    }

    /// `(min_x, max_x, min_y, max_y)` of the corners.
    pub fn bounds(&self) -> (i32, i32, i32, i32) {
        let [a, b, c] = self.points;
        (
            a.x.min(b.x).min(c.x),
            a.x.max(b.x).max(c.x),
            a.y.min(b.y).min(c.y),
            a.y.max(b.y).max(c.y),
        )
    }

    #[inline]
    pub fn interpolate_depth(&self, weights: [f32; 3]) -> f32 {
        self.depths[0] * weights[0] + self.depths[1] * weights[1] + self.depths[2] * weights[2]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_cover_all_corners() {
        let t = ScreenTriangle::new(
            [ScreenPoint::new(4, -2), ScreenPoint::new(-7, 9), ScreenPoint::new(1, 3)],
            [0.0; 3],
        );
        assert_eq!(t.bounds(), (-7, 4, -2, 9));
    }
}
