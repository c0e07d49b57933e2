//! Error types for scene construction and asset loading.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading or validating a scene.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("Invalid scene: {0}")]
    Invalid(String),

    #[error("Sphere {index} references unknown material '{name}'")]
    UnknownMaterial { index: usize, name: String },

    #[error("Failed to read scene file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Scene parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Environment error: {0}")]
    Environment(#[from] EnvMapError),
}

pub type SceneResult<T> = Result<T, SceneError>;

/// Errors that can occur while building an environment map.
#[derive(Error, Debug)]
pub enum EnvMapError {
    #[error("Failed to load environment map {}: {source}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Environment map has invalid resolution: {width}x{height}")]
    InvalidResolution { width: u32, height: u32 },

    #[error("Environment map expects {expected} pixels, got {actual}")]
    PixelCount { expected: usize, actual: usize },
}

pub type EnvMapResult<T> = Result<T, EnvMapError>;
