use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::info;

use rastrum::prelude::*;

/// Renders a TOML scene to PNG files.
#[derive(Parser, Debug)]
#[command(name = "rastrum", version)]
#[command(about = "Software scanline renderer for TOML scenes")]
struct Cli {
    /// Scene file (TOML). Defaults to the built-in arena.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output PNG. With several frames, an index is appended to the name.
    #[arg(short, long, value_name = "FILE", default_value = "frame.png")]
    output: PathBuf,

    #[arg(long)]
    width: Option<u32>,

    #[arg(long)]
    height: Option<u32>,

    #[arg(long, value_enum)]
    shading: Option<ShadingMode>,

    /// Index of the camera to render from.
    #[arg(long)]
    camera: Option<usize>,

    #[arg(long)]
    no_fog: bool,

    /// Number of frames, advancing the scene's spin between them.
    #[arg(long, default_value_t = 1)]
    frames: u32,
}

fn frame_path(output: &Path, index: u32, frames: u32) -> PathBuf {
    if frames <= 1 {
        return output.to_path_buf();
    }
    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "frame".to_string());
    let ext = output
        .extension()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "png".to_string());
    output.with_file_name(format!("{stem}_{index:03}.{ext}"))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => SceneConfig::load(path)
            .with_context(|| format!("failed to load scene {}", path.display()))?,
        None => {
            info!("Using built-in arena scene");
            SceneConfig::arena().context("built-in scene is invalid")?
        }
    };
    let mut setup = config.build().context("failed to build scene")?;

    if let Some(width) = cli.width {
        setup.width = width;
    }
    if let Some(height) = cli.height {
        setup.height = height;
    }
    if let Some(shading) = cli.shading {
        setup.render.shading = shading;
    }
    if cli.no_fog {
        setup.render.fog = None;
    }
    if let Some(camera) = cli.camera {
        if camera >= setup.cameras.len() {
            bail!(
                "camera {camera} out of range, scene has {} cameras",
                setup.cameras.len()
            );
        }
        setup.active_camera = camera;
    }

    info!(
        "Rendering {} frame(s) at {}x{} with {} shading",
        cli.frames, setup.width, setup.height, setup.render.shading
    );

    let mut surface = Surface::new(setup.width, setup.height);
    let mut depth = DepthBuffer::default();

    for index in 0..cli.frames {
        let start = Instant::now();
        surface.clear(setup.background);
        let stats = render(
            &setup.scene,
            setup.camera(),
            &setup.render,
            &mut surface,
            &mut depth,
        )?;

        let path = frame_path(&cli.output, index, cli.frames);
        surface
            .save_png(&path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!(
            "{}: {} of {} faces drawn, {} pixels, {:.1} ms",
            path.display(),
            stats.rasterized,
            stats.faces,
            stats.pixels,
            start.elapsed().as_secs_f64() * 1000.0
        );

        setup.step();
    }

    Ok(())
}
