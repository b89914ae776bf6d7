//! Scanline triangle fill with an active edge table.
//!
//! # Algorithm Overview
//!
//! 1. **Guard band**: a face whose screen bounding box lies entirely outside
//!    the frame grown by [`GUARD_BAND`] pixels is skipped.
//! 2. **Edge table**: each non-horizontal edge is recorded at its first row
//!    with its last row (exclusive), its X at the first row and its inverse
//!    slope `dx/dy`.
//! 3. **Scan**: for each row, edges starting there join the active list,
//!    which is sorted by X and filled pairwise (even-odd). Leftover unpaired
//!    edges are ignored.
//! 4. **Advance**: after each row, edges ending on the next row are dropped
//!    and the rest step their X by the inverse slope.
//!
//! Rows outside the frame are never scanned. Edges that begin above the
//! first visible row enter the active list already advanced to it.
//!
//! ```text
//!   y_min ---- v0
//!             /  \
//!            /    \      active: [left, right]
//!   y   ----#######-    fill  left.x <= x < right.x
//!          /        \
//!   y_max v1 ------- v2
//! ```

use super::barycentric::Barycentric;
use super::shader::PixelShader;
use super::ScreenTriangle;
use crate::render::framebuffer::FrameBuffer;

/// Pixels a face may extend past the frame before it is rejected outright.
pub const GUARD_BAND: i32 = 400;

/// Result of filling one triangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coverage {
    /// Bounding box entirely outside the guard band.
    Rejected,
    /// Pixels that passed the depth test and were written.
    Filled(usize),
}

#[derive(Debug, Clone, Copy)]
struct Edge {
    /// First row this edge is active on.
    y_start: i32,
    /// Row on which the edge stops being active.
    y_max: i32,
    x: f64,
    inv_slope: f64,
}

/// Active-edge-table rasterizer.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScanlineRasterizer;

impl ScanlineRasterizer {
    pub fn new() -> Self {
        Self
    }

    /// True when the bounding box of `triangle` misses the frame grown by
    /// the guard band on either axis.
    pub fn outside_guard_band(triangle: &ScreenTriangle, width: u32, height: u32) -> bool {
        let (min_x, max_x, min_y, max_y) = triangle.bounds();
        max_x < -GUARD_BAND
            || min_x > width as i32 + GUARD_BAND
            || max_y < -GUARD_BAND
            || min_y > height as i32 + GUARD_BAND
    }

    /// Builds the edge table for rows `first..`, sorted by starting row.
    fn build_edges(triangle: &ScreenTriangle, first: i32) -> Vec<Edge> {
        let mut edges = Vec::with_capacity(3);
        for i in 0..3 {
            let mut p1 = triangle.points[i];
            let mut p2 = triangle.points[(i + 1) % 3];
            if p1.y == p2.y {
                continue;
            }
            if p1.y > p2.y {
                std::mem::swap(&mut p1, &mut p2);
            }
            if p2.y <= first {
                continue;
            }

            let dx = p2.x as i64 - p1.x as i64;
            let dy = p2.y as i64 - p1.y as i64;
            let inv_slope = dx as f64 / dy as f64;
            let y_start = p1.y.max(first);
            edges.push(Edge {
                y_start,
                y_max: p2.y,
                x: p1.x as f64 + inv_slope * (y_start as i64 - p1.y as i64) as f64,
                inv_slope,
            });
        }
        edges.sort_by_key(|e| e.y_start);
        edges
    }

    /// Fills `triangle` into `buffer`, depth-testing each covered pixel and
    /// shading it with `shader` only when the test passes.
    pub fn fill_triangle<S: PixelShader>(
        &self,
        triangle: &ScreenTriangle,
        shader: &S,
        buffer: &mut FrameBuffer,
    ) -> Coverage {
        let (width, height) = (buffer.width(), buffer.height());
        if Self::outside_guard_band(triangle, width, height) {
            return Coverage::Rejected;
        }

        let (_, _, min_y, max_y) = triangle.bounds();
        let first = min_y.max(0);
        let last = max_y.min(height as i32 - 1);
        if first > last {
            return Coverage::Filled(0);
        }

        let bary = Barycentric::new(triangle.points);
        let edges = Self::build_edges(triangle, first);
        let mut pending = edges.iter().peekable();
        let mut active: Vec<Edge> = Vec::with_capacity(3);
        let mut written = 0;

        for y in first..=last {
            while let Some(edge) = pending.next_if(|e| e.y_start <= y) {
                active.push(*edge);
            }
            if active.is_empty() && pending.peek().is_none() {
                break;
            }

            active.sort_by(|a, b| a.x.total_cmp(&b.x));
            for span in active.chunks_exact(2) {
                let right = span[1].x;
                let mut x = (span[0].x as i32).max(0);
                while (x as f64) < right && x < width as i32 {
                    if let Some(weights) = bary.weights(x, y) {
                        let depth = triangle.interpolate_depth(weights);
                        if buffer.test_and_set_depth(x, y, depth) {
                            buffer.put_pixel(x, y, shader.shade(weights));
                            written += 1;
                        }
                    }
                    x += 1;
                }
            }

            active.retain_mut(|edge| {
                if edge.y_max == y + 1 {
                    false
                } else {
                    edge.x += edge.inv_slope;
                    true
                }
            });
        }

        Coverage::Filled(written)
    }
}
