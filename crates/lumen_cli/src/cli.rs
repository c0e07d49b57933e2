use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use lumen_core::CameraSettings;
use lumen_renderer::{RenderConfig, MAX_DEPTH};

/// Log levels selectable from the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "lumen")]
#[command(about = "Whitted-style ray tracer for spheres and point lights")]
pub struct Args {
    /// Scene description file (JSON). Uses the built-in showcase scene when omitted.
    #[arg(short, long)]
    pub scene: Option<PathBuf>,

    /// Output file path (.ppm is written as binary P6, other extensions via the image encoders)
    #[arg(short, long, default_value = "out.png")]
    pub output: PathBuf,

    /// Image width in pixels (overrides the scene file)
    #[arg(long)]
    pub width: Option<u32>,

    /// Image height in pixels (overrides the scene file)
    #[arg(long)]
    pub height: Option<u32>,

    /// Field of view in degrees (overrides the scene file)
    #[arg(long)]
    pub fov: Option<f32>,

    /// Environment map image (overrides the scene file)
    #[arg(long)]
    pub envmap: Option<PathBuf>,

    /// Maximum recursion depth
    #[arg(long, default_value_t = MAX_DEPTH)]
    pub max_depth: u32,

    /// Skip reflection/refraction rays whose albedo weight is zero
    #[arg(long)]
    pub prune_zero_weight: bool,

    /// Render on the calling thread only
    #[arg(long, conflicts_with = "threads")]
    pub sequential: bool,

    /// Worker threads for scanline rendering (defaults to all cores)
    #[arg(long)]
    pub threads: Option<usize>,

    /// Set the logging level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

impl Args {
    /// Apply resolution and field of view overrides to scene file settings.
    pub fn camera_settings(&self, from_scene: CameraSettings) -> CameraSettings {
        CameraSettings {
            width: self.width.unwrap_or(from_scene.width),
            height: self.height.unwrap_or(from_scene.height),
            fov_degrees: self.fov.unwrap_or(from_scene.fov_degrees),
        }
    }

    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            max_depth: self.max_depth,
            prune_zero_weight: self.prune_zero_weight,
        }
    }
}
