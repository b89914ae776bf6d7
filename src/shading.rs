//! Phong lighting model and shading modes.
//!
//! Everything here works in view space: the eye sits at the origin and
//! lights have already been carried through the view matrix.

use std::fmt;

use serde::Deserialize;

use crate::colors::{Color, Rgb};
use crate::fog::Fog;
use crate::light::ViewLight;
use crate::math::vec3::Vec3;

/// Where lighting is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ShadingMode {
    /// One sample per face, at its averaged position and normal.
    Flat,
    /// One sample per vertex, colors blended across the face.
    #[default]
    Gouraud,
    /// One sample per pixel from blended positions and normals.
    Phong,
}

impl fmt::Display for ShadingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShadingMode::Flat => write!(f, "Flat"),
            ShadingMode::Gouraud => write!(f, "Gouraud"),
            ShadingMode::Phong => write!(f, "Phong"),
        }
    }
}

/// Ambient, diffuse and specular weights plus the specular exponent.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct LightingCoefficients {
    pub ka: f32,
    pub kd: f32,
    pub ks: f32,
    pub shininess: i32,
}

impl Default for LightingCoefficients {
    fn default() -> Self {
        Self {
            ka: 0.2,
            kd: 1.0,
            ks: 0.2,
            shininess: 5,
        }
    }
}

/// Everything the lighting function needs besides the surface sample.
#[derive(Debug, Clone, Copy)]
pub struct LightingContext<'a> {
    pub coefficients: LightingCoefficients,
    /// Enabled lights in view space.
    pub lights: &'a [ViewLight],
    /// Eye position, the origin in view space.
    pub camera: Vec3,
    pub fog: Option<&'a Fog>,
}

impl<'a> LightingContext<'a> {
    pub fn new(
        coefficients: LightingCoefficients,
        lights: &'a [ViewLight],
        fog: Option<&'a Fog>,
    ) -> Self {
        Self {
            coefficients,
            lights,
            camera: Vec3::ZERO,
            fog,
        }
    }
}

/// Evaluates the Phong model at one surface point.
///
/// A light whose diffuse term is negative adds neither diffuse nor specular.
/// Fog is blended in after all lights, then channels are clamped to at most
/// `1.0` and quantized by truncation.
pub fn phong(position: Vec3, normal: Vec3, base: Rgb, ctx: &LightingContext) -> Color {
    let k = ctx.coefficients;
    let mut result = base * k.ka;

    for light in ctx.lights {
        let to_light = (light.position - position).normalize_or_zero();
        let spot = light.spot_factor(to_light);

        let ndotl = normal.dot(to_light);
        if ndotl < 0.0 {
            continue;
        }
        result += base * (k.kd * ndotl * spot);

        let reflected = to_light.reflect(normal).normalize_or_zero();
        let to_eye = (ctx.camera - position).normalize_or_zero();
        let rdotv = reflected.dot(to_eye);
        if rdotv < 0.0 {
            continue;
        }
        result += Rgb::splat(k.ks * rdotv.powi(k.shininess) * spot);
    }

    if let Some(fog) = ctx.fog {
        result = fog.apply(result, position, ctx.camera);
    }

    result.min_one().to_color()
}
