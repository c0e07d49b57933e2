//! Lumen Core - scene description for the Whitted ray tracer.
//!
//! This crate provides:
//!
//! - **Scene types**: `Material`, `Sphere`, `GroundPlane`, `Light`, `Scene`
//! - **Environment**: solid backgrounds and spherical environment maps
//! - **Scene files**: JSON scene description loading
//!
//! Everything here is built once before a render and then only read.
//!
//! # Example
//!
//! ```ignore
//! use lumen_core::load_scene;
//!
//! let description = load_scene("scenes/showcase.json")?;
//! println!("Loaded {} spheres, {} lights",
//!     description.scene.spheres.len(),
//!     description.scene.lights.len());
//! ```

pub mod environment;
pub mod error;
pub mod ground;
pub mod loader;
pub mod material;
pub mod scene;
pub mod sphere;

// Re-export commonly used types
pub use environment::{EnvMap, Environment};
pub use error::{EnvMapError, EnvMapResult, SceneError, SceneResult};
pub use ground::GroundPlane;
pub use loader::{load_scene, parse_scene, CameraSettings, SceneDescription};
pub use material::{Color, Material};
pub use scene::{Light, Scene, DEFAULT_MAX_DISTANCE};
pub use sphere::Sphere;
