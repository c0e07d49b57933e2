//! Lumen - render a sphere scene to an image file.

mod cli;

use anyhow::{bail, Context, Result};
use clap::Parser;
use lumen_core::{load_scene, CameraSettings, EnvMap, Environment, Scene, SceneDescription};
use lumen_renderer::{render, render_parallel, save_image, Camera};

use crate::cli::Args;

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.into())
        .init();

    log::info!("Starting Lumen");

    let SceneDescription {
        scene,
        camera: scene_camera,
        mut environment,
    } = match &args.scene {
        Some(path) => load_scene(path)
            .with_context(|| format!("Failed to load scene {}", path.display()))?,
        None => {
            log::info!("No scene file given, using the built-in showcase scene");
            SceneDescription {
                scene: Scene::demo(),
                camera: CameraSettings::default(),
                environment: Environment::default(),
            }
        }
    };

    if let Some(path) = &args.envmap {
        let map = EnvMap::load(path)
            .with_context(|| format!("Failed to load environment map {}", path.display()))?;
        log::info!("Environment map: {} ({}x{})", path.display(), map.width(), map.height());
        environment = Environment::Map(map);
    }

    let settings = args.camera_settings(scene_camera);
    if settings.width == 0 || settings.height == 0 {
        bail!("Image resolution must be non-zero, got {}x{}", settings.width, settings.height);
    }
    let camera = Camera::from_settings(&settings);
    let config = args.render_config();

    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to configure the worker pool")?;
    }

    log::info!(
        "Rendering {}x{} (fov {:.1}°, max depth {}) with {} spheres, {} lights",
        camera.image_width,
        camera.image_height,
        camera.fov().to_degrees(),
        config.max_depth,
        scene.spheres.len(),
        scene.lights.len()
    );

    let image = if args.sequential {
        render(&camera, &scene, &environment, &config)
    } else {
        render_parallel(&camera, &scene, &environment, &config)
    };

    save_image(&image, &args.output)
        .with_context(|| format!("Failed to save {}", args.output.display()))?;
    log::info!("Saved to {}", args.output.display());

    Ok(())
}
