//! TOML scene description.
//!
//! A file lists the output surface, render settings, optional fog, cameras,
//! lights and meshes. [`SceneConfig::build`] turns it into a [`SceneSetup`]
//! ready for [`crate::engine::render`].

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

use crate::camera::Camera;
use crate::colors::Color;
use crate::engine::{RenderConfig, Scene};
use crate::fog::Fog;
use crate::light::Light;
use crate::math::vec3::Vec3;
use crate::mesh::{Axis, LoadError, Mesh};
use crate::shading::{LightingCoefficients, ShadingMode};
use crate::shapes;

/// The arena scene shipped with the crate.
pub const DEFAULT_SCENE: &str = include_str!("../scenes/arena.toml");

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: io::Error },
    Parse(toml::de::Error),
    NoCameras,
    CameraOutOfRange { index: usize, count: usize },
    SpinMeshOutOfRange { index: usize, count: usize },
    Mesh { index: usize, source: LoadError },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "failed to read {}: {}", path.display(), source)
            }
            ConfigError::Parse(e) => write!(f, "invalid scene file: {}", e),
            ConfigError::NoCameras => write!(f, "scene declares no cameras"),
            ConfigError::CameraOutOfRange { index, count } => {
                write!(f, "active camera {index} out of range ({count} cameras)")
            }
            ConfigError::SpinMeshOutOfRange { index, count } => {
                write!(f, "spin mesh {index} out of range ({count} meshes)")
            }
            ConfigError::Mesh { index, source } => write!(f, "mesh {index}: {source}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Mesh { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

#[derive(Debug, Deserialize)]
pub struct SceneConfig {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub render: RenderSettings,
    #[serde(default)]
    pub fog: Option<FogConfig>,
    #[serde(default)]
    pub active_camera: usize,
    #[serde(default)]
    pub cameras: Vec<CameraConfig>,
    #[serde(default)]
    pub lights: Vec<LightConfig>,
    #[serde(default)]
    pub meshes: Vec<MeshConfig>,
    #[serde(default)]
    pub spin: Option<SpinConfig>,
    /// Directory relative OBJ paths are resolved against.
    #[serde(skip)]
    pub base_dir: PathBuf,
}

#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default)]
    pub background: Color,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            background: Color::BLACK,
        }
    }
}

fn default_width() -> u32 {
    800
}

fn default_height() -> u32 {
    600
}

#[derive(Debug, Deserialize)]
pub struct RenderSettings {
    #[serde(default)]
    pub shading: ShadingMode,
    #[serde(default)]
    pub lighting: LightingCoefficients,
    #[serde(default = "default_near")]
    pub z_near: f32,
    #[serde(default = "default_far")]
    pub z_far: f32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            shading: ShadingMode::default(),
            lighting: LightingCoefficients::default(),
            z_near: default_near(),
            z_far: default_far(),
        }
    }
}

fn default_near() -> f32 {
    0.001
}

fn default_far() -> f32 {
    100.0
}

#[derive(Debug, Deserialize)]
pub struct FogConfig {
    #[serde(default = "default_fog_color")]
    pub color: Color,
    #[serde(default = "default_fog_distance")]
    pub max_distance: f32,
}

fn default_fog_color() -> Color {
    Color::LIGHT_GRAY
}

fn default_fog_distance() -> f32 {
    10.0
}

#[derive(Debug, Deserialize)]
pub struct CameraConfig {
    pub position: [f32; 3],
    #[serde(default)]
    pub target: [f32; 3],
    #[serde(default = "default_up")]
    pub up: [f32; 3],
    #[serde(default = "default_fov")]
    pub fov: f32,
}

fn default_up() -> [f32; 3] {
    [0.0, 1.0, 0.0]
}

fn default_fov() -> f32 {
    60.0
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LightConfig {
    Point {
        position: [f32; 3],
        #[serde(default)]
        off: bool,
    },
    Spot {
        position: [f32; 3],
        direction: [f32; 3],
        #[serde(default = "default_exponent")]
        exponent: i32,
        #[serde(default)]
        off: bool,
    },
}

fn default_exponent() -> i32 {
    12
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShapeConfig {
    Cube,
    Floor,
    Cylinder {
        segments: u32,
        length: f32,
        radius: f32,
    },
    Sphere {
        #[serde(default = "default_subdivisions")]
        subdivisions: u32,
    },
    Obj {
        path: PathBuf,
    },
}

fn default_subdivisions() -> u32 {
    2
}

/// One model-matrix operation; rotations are in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformOp {
    Translate([f32; 3]),
    Scale([f32; 3]),
    RotateX(f32),
    RotateY(f32),
    RotateZ(f32),
}

impl TransformOp {
    /// Left-multiplies the operation into the mesh's model matrix.
    pub fn apply(self, mesh: &mut Mesh) {
        match self {
            TransformOp::Translate([x, y, z]) => mesh.translate(x, y, z),
            TransformOp::Scale([x, y, z]) => mesh.scale(x, y, z),
            TransformOp::RotateX(deg) => mesh.rotate(Axis::X, deg.to_radians()),
            TransformOp::RotateY(deg) => mesh.rotate(Axis::Y, deg.to_radians()),
            TransformOp::RotateZ(deg) => mesh.rotate(Axis::Z, deg.to_radians()),
        };
    }
}

#[derive(Debug, Deserialize)]
pub struct MeshConfig {
    #[serde(flatten)]
    pub shape: ShapeConfig,
    #[serde(default = "default_mesh_color")]
    pub color: Color,
    /// Applied in order, each left-multiplied onto the previous ones.
    #[serde(default)]
    pub transforms: Vec<TransformOp>,
    /// Color for faces the builder marked recolorable.
    #[serde(default)]
    pub marked_color: Option<Color>,
}

fn default_mesh_color() -> Color {
    Color::WHITE
}

/// Rotation of one mesh about a vertical axis between frames.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct SpinConfig {
    pub mesh: usize,
    #[serde(default)]
    pub pivot: [f32; 3],
    pub degrees_per_frame: f32,
}

/// A fully built scene plus the settings to render it.
#[derive(Debug, Clone)]
pub struct SceneSetup {
    pub scene: Scene,
    pub cameras: Vec<Camera>,
    pub active_camera: usize,
    pub render: RenderConfig,
    pub width: u32,
    pub height: u32,
    pub background: Color,
    pub spin: Option<SpinConfig>,
}

impl SceneSetup {
    pub fn camera(&self) -> &Camera {
        &self.cameras[self.active_camera]
    }

    /// Advances the spin animation by one frame, if configured.
    pub fn step(&mut self) {
        let Some(spin) = self.spin else {
            return;
        };
        let [x, y, z] = spin.pivot;
        self.scene.meshes[spin.mesh]
            .translate(-x, -y, -z)
            .rotate(Axis::Y, spin.degrees_per_frame.to_radians())
            .translate(x, y, z);
    }
}

impl SceneConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::parse(&content)?;
        config.base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        info!("Loaded scene file {}", path.display());
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// The embedded arena scene.
    pub fn arena() -> Result<Self, ConfigError> {
        Self::parse(DEFAULT_SCENE)
    }

    pub fn build(&self) -> Result<SceneSetup, ConfigError> {
        if self.cameras.is_empty() {
            return Err(ConfigError::NoCameras);
        }
        if self.active_camera >= self.cameras.len() {
            return Err(ConfigError::CameraOutOfRange {
                index: self.active_camera,
                count: self.cameras.len(),
            });
        }
        if let Some(spin) = self.spin {
            if spin.mesh >= self.meshes.len() {
                return Err(ConfigError::SpinMeshOutOfRange {
                    index: spin.mesh,
                    count: self.meshes.len(),
                });
            }
        }

        let mut scene = Scene::new();
        for light in &self.lights {
            scene.add_light(light.build());
        }
        let spotlight_on = scene.lights.iter().any(|l| l.is_spotlight && !l.off);
        for (index, mesh) in self.meshes.iter().enumerate() {
            let built = mesh
                .build(&self.base_dir, spotlight_on)
                .map_err(|source| ConfigError::Mesh { index, source })?;
            scene.add_mesh(built);
        }

        let cameras = self.cameras.iter().map(CameraConfig::build).collect();
        let render = RenderConfig {
            shading: self.render.shading,
            lighting: self.render.lighting,
            fog: self
                .fog
                .as_ref()
                .map(|fog| Fog::new(fog.color, fog.max_distance)),
            z_near: self.render.z_near,
            z_far: self.render.z_far,
        };

        info!(
            "Scene: {} meshes, {} lights, {} cameras",
            scene.meshes.len(),
            scene.lights.len(),
            self.cameras.len()
        );

        Ok(SceneSetup {
            scene,
            cameras,
            active_camera: self.active_camera,
            render,
            width: self.output.width,
            height: self.output.height,
            background: self.output.background,
            spin: self.spin,
        })
    }
}

impl CameraConfig {
    fn build(&self) -> Camera {
        Camera::new(
            Vec3::from_array(self.position),
            Vec3::from_array(self.target),
            Vec3::from_array(self.up),
            self.fov,
        )
    }
}

impl LightConfig {
    fn build(&self) -> Light {
        match *self {
            LightConfig::Point { position, off } => {
                let mut light = Light::point(Vec3::from_array(position));
                light.off = off;
                light
            }
            LightConfig::Spot {
                position,
                direction,
                exponent,
                off,
            } => {
                let mut light = Light::spot(
                    Vec3::from_array(position),
                    Vec3::from_array(direction),
                    exponent,
                );
                light.off = off;
                light
            }
        }
    }
}

impl MeshConfig {
    fn build(&self, base_dir: &Path, spotlight_on: bool) -> Result<Mesh, LoadError> {
        let mut mesh = match &self.shape {
            ShapeConfig::Cube => shapes::cube(self.color),
            ShapeConfig::Floor => shapes::floor(self.color),
            ShapeConfig::Cylinder {
                segments,
                length,
                radius,
            } => shapes::cylinder(*segments, *length, *radius, self.color),
            ShapeConfig::Sphere { subdivisions } => shapes::icosphere(*subdivisions, self.color),
            ShapeConfig::Obj { path } => Mesh::from_obj(base_dir.join(path), self.color)?,
        };
        for op in &self.transforms {
            op.apply(&mut mesh);
        }
        if let Some(color) = self.marked_color {
            let color = if spotlight_on { color } else { self.color };
            mesh.change_marked_faces_color(color, spotlight_on);
        }
        Ok(mesh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn arena_scene_builds() {
        let setup = SceneConfig::arena().unwrap().build().unwrap();
        assert_eq!(setup.scene.meshes.len(), 10);
        assert_eq!(setup.scene.lights.len(), 2);
        assert_eq!(setup.cameras.len(), 3);
        assert!(setup.render.fog.is_some());
        assert_eq!(setup.render.shading, ShadingMode::Gouraud);
    }

    #[test]
    fn minimal_scene_uses_defaults() {
        let config = SceneConfig::parse(
            r#"
            [[cameras]]
            position = [0.0, 0.0, 5.0]

            [[meshes]]
            kind = "cube"
            "#,
        )
        .unwrap();
        let setup = config.build().unwrap();
        assert_eq!((setup.width, setup.height), (800, 600));
        assert_eq!(setup.render.lighting, LightingCoefficients::default());
        assert_eq!(setup.render.fog, None);
        assert_eq!(setup.camera().up, Vec3::UP);
        assert_eq!(setup.scene.meshes[0].color(), Color::WHITE);
    }

    #[test]
    fn transforms_are_applied_in_order() {
        let config = SceneConfig::parse(
            r#"
            [[cameras]]
            position = [0.0, 0.0, 5.0]

            [[meshes]]
            kind = "cube"
            transforms = [{ translate = [0.0, 0.0, 12.0] }, { scale = [10.2, 0.5, 0.5] }]
            "#,
        )
        .unwrap();
        let setup = config.build().unwrap();
        // Translate first, then scale: the offset is scaled too
        let centre = *setup.scene.meshes[0].model() * Vec3::ZERO;
        assert_relative_eq!(centre.z, 6.0, epsilon = 1e-5);
    }

    #[test]
    fn lights_and_shapes_parse_by_kind() {
        let config = SceneConfig::parse(
            r#"
            [[cameras]]
            position = [0.0, 10.0, -20.0]
            fov = 65.0

            [[lights]]
            kind = "point"
            position = [-5.0, 5.0, 0.0]

            [[lights]]
            kind = "spot"
            position = [0.0, 0.0, 0.0]
            direction = [0.0, 0.0, 1.0]
            exponent = 12
            off = true

            [[meshes]]
            kind = "cylinder"
            segments = 10
            length = 1.5
            radius = 0.2
            color = [165, 42, 42]
            marked_color = [255, 255, 0]
            "#,
        )
        .unwrap();
        let setup = config.build().unwrap();
        assert!(!setup.scene.lights[0].is_spotlight);
        assert!(setup.scene.lights[1].is_spotlight && setup.scene.lights[1].off);

        // Spotlight off: lens keeps the body color and does not shine
        let lens: Vec<_> = setup.scene.meshes[0]
            .faces()
            .iter()
            .filter(|f| f.change_color)
            .collect();
        assert!(!lens.is_empty());
        assert!(lens
            .iter()
            .all(|f| f.color == Color::new(165, 42, 42) && !f.is_shining));
    }

    #[test]
    fn invalid_references_are_reported() {
        let no_cameras = SceneConfig::parse("").unwrap();
        assert!(matches!(no_cameras.build(), Err(ConfigError::NoCameras)));

        let bad_camera = SceneConfig::parse(
            r#"
            active_camera = 3
            [[cameras]]
            position = [0.0, 0.0, 5.0]
            "#,
        )
        .unwrap();
        assert!(matches!(
            bad_camera.build(),
            Err(ConfigError::CameraOutOfRange { index: 3, count: 1 })
        ));

        assert!(matches!(
            SceneConfig::parse("meshes = 3"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn missing_obj_is_a_mesh_error() {
        let config = SceneConfig::parse(
            r#"
            [[cameras]]
            position = [0.0, 0.0, 5.0]

            [[meshes]]
            kind = "obj"
            path = "does/not/exist.obj"
            "#,
        )
        .unwrap();
        assert!(matches!(
            config.build(),
            Err(ConfigError::Mesh { index: 0, .. })
        ));
    }

    #[test]
    fn spin_rotates_about_pivot() {
        let config = SceneConfig::parse(
            r#"
            [[cameras]]
            position = [0.0, 0.0, 5.0]

            [[meshes]]
            kind = "sphere"
            transforms = [{ translate = [4.5, 0.1, 0.0] }]

            [spin]
            mesh = 0
            pivot = [4.5, 0.1, 0.0]
            degrees_per_frame = 90.0
            "#,
        )
        .unwrap();
        let mut setup = config.build().unwrap();
        setup.step();
        let centre = *setup.scene.meshes[0].model() * Vec3::ZERO;
        assert_relative_eq!(centre.x, 4.5, epsilon = 1e-5);
        assert_relative_eq!(centre.y, 0.1, epsilon = 1e-5);
        assert_relative_eq!(centre.z, 0.0, epsilon = 1e-5);
    }
}
