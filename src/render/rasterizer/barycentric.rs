//! Barycentric weights over integer screen points.

use super::ScreenPoint;

/// Weights of a pixel against a fixed triangle.
///
/// The denominator is computed once per triangle. A zero-area triangle gets
/// a denominator of `1`, which keeps the weights finite but geometrically
/// meaningless.
#[derive(Debug, Clone, Copy)]
pub struct Barycentric {
    points: [ScreenPoint; 3],
    denominator: f32,
}

impl Barycentric {
    pub fn new(points: [ScreenPoint; 3]) -> Self {
        let [v1, v2, v3] = points;
        let d = (v2.y as i64 - v3.y as i64) * (v1.x as i64 - v3.x as i64)
            + (v3.x as i64 - v2.x as i64) * (v1.y as i64 - v3.y as i64);
        Self {
            points,
            denominator: if d == 0 { 1.0 } else { d as f32 },
        }
    }

    pub fn denominator(&self) -> f32 {
        self.denominator
    }

    /// Weights `[w1, w2, w3]` of pixel (x, y), or `None` when it lies outside.
    ///
    /// If the derived `w3` is negative it is clamped to `0` and `w2` becomes
    /// `1 - w1`; any remaining negative weight rejects the pixel. Accepted
    /// weights are non-negative and sum to one.
    #[inline]
    pub fn weights(&self, x: i32, y: i32) -> Option<[f32; 3]> {
        let [v1, v2, v3] = self.points;
        let dx = x as i64 - v3.x as i64;
        let dy = y as i64 - v3.y as i64;

        let n1 = (v2.y as i64 - v3.y as i64) * dx + (v3.x as i64 - v2.x as i64) * dy;
        let n2 = (v3.y as i64 - v1.y as i64) * dx + (v1.x as i64 - v3.x as i64) * dy;

        let w1 = n1 as f32 / self.denominator;
        let mut w2 = n2 as f32 / self.denominator;
        let mut w3 = 1.0 - w1 - w2;
        if w3 < 0.0 {
            w3 = 0.0;
            w2 = 1.0 - w1;
        }

        if w1 < 0.0 || w2 < 0.0 || w3 < 0.0 {
            None
        } else {
            Some([w1, w2, w3])
        }
    }
}
