//! Color types and ARGB8888 packing.
//!
//! [`Color`] is the 8-bit-per-channel value stored on faces and written to
//! the surface. [`Rgb`] carries unit-range floating point channels through
//! the lighting math, where values may leave `[0, 1]` before the final clamp.

use std::ops::{Add, AddAssign, Mul};

use serde::Deserialize;

/// An opaque 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "[u8; 3]")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);
    pub const YELLOW: Color = Color::new(255, 255, 0);
    pub const LIGHT_GRAY: Color = Color::new(211, 211, 211);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Packs into ARGB8888 with full alpha.
    #[inline]
    pub fn to_argb(self) -> u32 {
        0xFF00_0000 | (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }

    /// Unpacks an ARGB8888 value, ignoring alpha.
    #[inline]
    pub fn from_argb(argb: u32) -> Self {
        Self::new((argb >> 16) as u8, (argb >> 8) as u8, argb as u8)
    }

    /// Scales channels into `[0, 1]`.
    pub fn to_unit(self) -> Rgb {
        Rgb::new(
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        )
    }

    /// Barycentric blend of three colors, rounded per channel.
    pub fn blend(colors: &[Color; 3], weights: [f32; 3]) -> Color {
        let channel = |pick: fn(&Color) -> u8| {
            let value = weights[0] * pick(&colors[0]) as f32
                + weights[1] * pick(&colors[1]) as f32
                + weights[2] * pick(&colors[2]) as f32;
            value.round().clamp(0.0, 255.0) as u8
        };
        Color::new(channel(|c| c.r), channel(|c| c.g), channel(|c| c.b))
    }
}

impl From<[u8; 3]> for Color {
    fn from(v: [u8; 3]) -> Self {
        Color::new(v[0], v[1], v[2])
    }
}

/// Floating point RGB, nominally in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub const fn splat(v: f32) -> Self {
        Self::new(v, v, v)
    }

    /// Clamps each channel to at most `1.0`.
    pub fn min_one(self) -> Self {
        Self::new(self.r.min(1.0), self.g.min(1.0), self.b.min(1.0))
    }

    /// Quantizes to 8 bits by truncation.
    ///
    /// Channels are expected to be `<= 1.0` already; negative channels (which
    /// fog extrapolation can produce) saturate to `0`.
    pub fn to_color(self) -> Color {
        let quantize = |v: f32| (v * 255.0).clamp(0.0, 255.0) as u8;
        Color::new(quantize(self.r), quantize(self.g), quantize(self.b))
    }
}

impl Add for Rgb {
    type Output = Rgb;

    fn add(self, rhs: Rgb) -> Rgb {
        Rgb::new(self.r + rhs.r, self.g + rhs.g, self.b + rhs.b)
    }
}

impl AddAssign for Rgb {
    fn add_assign(&mut self, rhs: Rgb) {
        self.r += rhs.r;
        self.g += rhs.g;
        self.b += rhs.b;
    }
}

impl Mul<f32> for Rgb {
    type Output = Rgb;

    fn mul(self, rhs: f32) -> Rgb {
        Rgb::new(self.r * rhs, self.g * rhs, self.b * rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argb_packing_preserves_channels() {
        let c = Color::new(12, 200, 255);
        assert_eq!(c.to_argb(), 0xFF0C_C8FF);
        assert_eq!(Color::from_argb(c.to_argb()), c);
    }

    #[test]
    fn unit_round_trip_is_exact_for_full_channels() {
        assert_eq!(Color::WHITE.to_unit().to_color(), Color::WHITE);
        assert_eq!(Color::BLACK.to_unit().to_color(), Color::BLACK);
    }

    #[test]
    fn negative_channels_saturate_to_zero() {
        assert_eq!(Rgb::new(-0.5, 0.5, 2.0).to_color(), Color::new(0, 127, 255));
    }

    #[test]
    fn min_one_leaves_negative_channels_alone() {
        let clamped = Rgb::new(1.5, -0.25, 0.5).min_one();
        assert_eq!(clamped, Rgb::new(1.0, -0.25, 0.5));
    }

    #[test]
    fn blend_of_equal_colors_is_exact() {
        let c = Color::new(10, 50, 10);
        let blended = Color::blend(&[c, c, c], [0.2, 0.3, 0.5]);
        assert_eq!(blended, c);
    }

    #[test]
    fn blend_rounds_to_nearest() {
        let blended = Color::blend(
            &[Color::new(10, 0, 0), Color::new(11, 0, 0), Color::BLACK],
            [0.5, 0.5, 0.0],
        );
        assert_eq!(blended, Color::new(11, 0, 0));
    }
}
