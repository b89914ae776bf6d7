//! Pixel storage and depth testing.
//!
//! [`Surface`] and [`DepthBuffer`] are owned by the caller and outlive a
//! frame. [`FrameBuffer`] is the short-lived view the rasterizer writes
//! through while a frame is being drawn.

use std::path::Path;

use image::{ImageError, Rgb as ImageRgb, RgbImage};

use crate::colors::Color;

/// Host-owned ARGB8888 pixel surface.
#[derive(Debug, Clone)]
pub struct Surface {
    pixels: Vec<u32>,
    width: u32,
    height: u32,
}

impl Surface {
    /// Creates a black surface.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: vec![Color::BLACK.to_argb(); (width * height) as usize],
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(color.to_argb());
    }

    /// Color at (x, y), or None if out of bounds.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            Some(Color::from_argb(
                self.pixels[(y as u32 * self.width + x as u32) as usize],
            ))
        } else {
            None
        }
    }

    pub fn to_image(&self) -> RgbImage {
        RgbImage::from_fn(self.width, self.height, |x, y| {
            let c = Color::from_argb(self.pixels[(y * self.width + x) as usize]);
            ImageRgb([c.r, c.g, c.b])
        })
    }

    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<(), ImageError> {
        self.to_image().save(path)
    }
}

/// Per-pixel nearest depth, frame-scoped.
#[derive(Debug, Clone, Default)]
pub struct DepthBuffer {
    depth: Vec<f32>,
    width: u32,
    height: u32,
}

impl DepthBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        let mut buffer = Self::default();
        buffer.reset(width, height);
        buffer
    }

    /// Resizes to `width` x `height` and fills with `+inf`.
    pub fn reset(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.depth.clear();
        self.depth.resize((width * height) as usize, f32::INFINITY);
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Stored depth at (x, y), or None if out of bounds.
    pub fn get(&self, x: i32, y: i32) -> Option<f32> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            Some(self.depth[(y as u32 * self.width + x as u32) as usize])
        } else {
            None
        }
    }
}

/// A view into color and depth buffers of equal size.
///
/// Smaller depth is nearer; the depth test keeps the minimum.
pub struct FrameBuffer<'a> {
    color_buffer: &'a mut [u32],
    depth_buffer: &'a mut [f32],
    width: u32,
    height: u32,
}

impl<'a> FrameBuffer<'a> {
    /// # Panics
    /// Panics if buffer lengths don't match width * height
    pub fn new(
        color_buffer: &'a mut [u32],
        depth_buffer: &'a mut [f32],
        width: u32,
        height: u32,
    ) -> Self {
        assert_eq!(
            color_buffer.len(),
            (width * height) as usize,
            "Color buffer size doesn't match dimensions"
        );
        assert_eq!(
            depth_buffer.len(),
            (width * height) as usize,
            "Depth buffer size doesn't match dimensions"
        );
        Self {
            color_buffer,
            depth_buffer,
            width,
            height,
        }
    }

    /// Borrows a surface and resets the depth buffer to match its size.
    pub fn for_frame(surface: &'a mut Surface, depth: &'a mut DepthBuffer) -> Self {
        depth.reset(surface.width, surface.height);
        Self::new(
            &mut surface.pixels,
            &mut depth.depth,
            surface.width,
            surface.height,
        )
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            Some((y as u32 * self.width + x as u32) as usize)
        } else {
            None
        }
    }

    /// Depth test at (x, y): when `depth` is strictly nearer than the stored
    /// value it is written and `true` returned. Out of bounds is a miss.
    #[inline]
    pub fn test_and_set_depth(&mut self, x: i32, y: i32, depth: f32) -> bool {
        match self.index(x, y) {
            Some(idx) if depth < self.depth_buffer[idx] => {
                self.depth_buffer[idx] = depth;
                true
            }
            _ => false,
        }
    }

    /// Writes a pixel without depth testing. Out of bounds is ignored.
    #[inline]
    pub fn put_pixel(&mut self, x: i32, y: i32, color: Color) {
        if let Some(idx) = self.index(x, y) {
            self.color_buffer[idx] = color.to_argb();
        }
    }

    pub fn get_pixel(&self, x: i32, y: i32) -> Option<Color> {
        self.index(x, y).map(|idx| Color::from_argb(self.color_buffer[idx]))
    }

    pub fn get_depth(&self, x: i32, y: i32) -> Option<f32> {
        self.index(x, y).map(|idx| self.depth_buffer[idx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_fills_with_infinity_at_new_size() {
        let mut depth = DepthBuffer::new(2, 2);
        depth.reset(4, 3);
        assert_eq!(depth.width(), 4);
        assert_eq!(depth.height(), 3);
        assert_eq!(depth.get(3, 2), Some(f32::INFINITY));
        assert_eq!(depth.get(4, 0), None);
    }

    #[test]
    fn depth_test_keeps_minimum() {
        let mut surface = Surface::new(4, 4);
        let mut depth = DepthBuffer::new(1, 1);
        let mut fb = FrameBuffer::for_frame(&mut surface, &mut depth);

        assert!(fb.test_and_set_depth(1, 1, 0.5));
        assert!(!fb.test_and_set_depth(1, 1, 0.7));
        assert!(!fb.test_and_set_depth(1, 1, 0.5));
        assert!(fb.test_and_set_depth(1, 1, 0.2));
        assert_eq!(fb.get_depth(1, 1), Some(0.2));
    }

    #[test]
    fn out_of_bounds_is_ignored() {
        let mut surface = Surface::new(2, 2);
        let mut depth = DepthBuffer::default();
        let mut fb = FrameBuffer::for_frame(&mut surface, &mut depth);

        assert!(!fb.test_and_set_depth(-1, 0, 0.0));
        assert!(!fb.test_and_set_depth(0, 2, 0.0));
        fb.put_pixel(2, 0, Color::WHITE);
        assert_eq!(fb.get_pixel(2, 0), None);
    }

    #[test]
    fn surface_round_trips_colors_into_image() {
        let mut surface = Surface::new(3, 2);
        surface.clear(Color::new(10, 20, 30));
        {
            let mut depth = DepthBuffer::default();
            let mut fb = FrameBuffer::for_frame(&mut surface, &mut depth);
            fb.put_pixel(2, 1, Color::YELLOW);
        }
        assert_eq!(surface.pixel(0, 0), Some(Color::new(10, 20, 30)));
        assert_eq!(surface.pixel(2, 1), Some(Color::YELLOW));

        let image = surface.to_image();
        assert_eq!(image.dimensions(), (3, 2));
        assert_eq!(image.get_pixel(2, 1).0, [255, 255, 0]);
    }
}
