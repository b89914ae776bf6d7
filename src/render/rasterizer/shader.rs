//! Per-pixel color computation.
//!
//! The rasterizer decides coverage and depth; a [`PixelShader`] turns the
//! barycentric weights of a covered pixel into its color.

use crate::colors::{Color, Rgb};
use crate::math::vec3::Vec3;
use crate::mesh::centroid;
use crate::shading::{phong, LightingContext, ShadingMode};

/// Computes the color of a covered pixel from its barycentric weights.
pub trait PixelShader {
    /// `weights` are non-negative and sum to one.
    fn shade(&self, weights: [f32; 3]) -> Color;
}

/// Shading prepared for one face, chosen once per render by [`ShadingMode`].
#[derive(Debug, Clone, Copy)]
pub enum FaceShader<'a> {
    /// Lit once at the face center.
    Flat(Color),
    /// Lit at each corner, blended per pixel.
    Gouraud([Color; 3]),
    /// Lit per pixel from blended view-space positions and normals.
    Phong {
        positions: [Vec3; 3],
        normals: [Vec3; 3],
        base: Rgb,
        ctx: LightingContext<'a>,
    },
}

impl<'a> FaceShader<'a> {
    /// Precomputes whatever `mode` needs from the face's view-space corners.
    pub fn new(
        mode: ShadingMode,
        positions: [Vec3; 3],
        normals: [Vec3; 3],
        color: Color,
        ctx: LightingContext<'a>,
    ) -> Self {
        let base = color.to_unit();
        match mode {
            ShadingMode::Flat => {
                let normal = (normals[0] + normals[1] + normals[2]).normalize_or_zero();
                FaceShader::Flat(phong(centroid(&positions), normal, base, &ctx))
            }
            ShadingMode::Gouraud => {
                FaceShader::Gouraud([0, 1, 2].map(|i| phong(positions[i], normals[i], base, &ctx)))
            }
            ShadingMode::Phong => FaceShader::Phong {
                positions,
                normals,
                base,
                ctx,
            },
        }
    }
}

impl PixelShader for FaceShader<'_> {
    #[inline]
    fn shade(&self, weights: [f32; 3]) -> Color {
        match self {
            FaceShader::Flat(color) => *color,
            FaceShader::Gouraud(colors) => Color::blend(colors, weights),
            FaceShader::Phong {
                positions,
                normals,
                base,
                ctx,
            } => {
                let position = Vec3::blend(positions, weights);
                let normal = Vec3::blend(normals, weights).normalize_or_zero();
                phong(position, normal, *base, ctx)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::light::Light;
    use crate::math::mat4::Mat4;
    use crate::shading::LightingCoefficients;

    fn triangle() -> [Vec3; 3] {
        [
            Vec3::new(-1.0, -1.0, -5.0),
            Vec3::new(1.0, -1.0, -5.0),
            Vec3::new(0.0, 1.0, -5.0),
        ]
    }

    #[test]
    fn gouraud_hits_vertex_colors_at_corners() {
        let lights = [Light::point(Vec3::new(-3.0, 0.0, 0.0)).to_view(&Mat4::identity())];
        let ctx = LightingContext::new(LightingCoefficients::default(), &lights, None);
        let normals = [Vec3::BACK; 3];
        let shader = FaceShader::new(ShadingMode::Gouraud, triangle(), normals, Color::WHITE, ctx);

        let FaceShader::Gouraud(colors) = shader else {
            panic!("expected a Gouraud shader");
        };
        assert_eq!(shader.shade([1.0, 0.0, 0.0]), colors[0]);
        assert_eq!(shader.shade([0.0, 0.0, 1.0]), colors[2]);
        // The left corner is nearer the light
        assert!(colors[0].r > colors[1].r);
    }

    #[test]
    fn flat_is_constant() {
        let ctx = LightingContext::new(LightingCoefficients::default(), &[], None);
        let shader = FaceShader::new(
            ShadingMode::Flat,
            triangle(),
            [Vec3::BACK; 3],
            Color::new(100, 150, 200),
            ctx,
        );
        assert_eq!(shader.shade([1.0, 0.0, 0.0]), shader.shade([0.2, 0.3, 0.5]));
    }

    #[test]
    fn phong_renormalizes_blended_normals() {
        // Opposing corner normals blend to zero length; must not produce NaN colors
        let lights = [Light::point(Vec3::ZERO).to_view(&Mat4::identity())];
        let ctx = LightingContext::new(LightingCoefficients::default(), &lights, None);
        let normals = [Vec3::RIGHT, -Vec3::RIGHT, Vec3::BACK];
        let shader = FaceShader::new(ShadingMode::Phong, triangle(), normals, Color::WHITE, ctx);
        let c = shader.shade([0.5, 0.5, 0.0]);
        // Ambient only: 0.2 * 255 truncated
        assert_eq!(c, Color::new(51, 51, 51));
    }
}
