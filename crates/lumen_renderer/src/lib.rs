//! Lumen Renderer - CPU Whitted ray tracing
//!
//! Casts one primary ray per pixel and recursively evaluates mirror
//! reflection, refraction, shadowed point lights and Phong-style local
//! shading. Rays that escape the scene, or run out of depth, sample the
//! environment.

mod camera;
mod integrator;
mod intersect;
mod optics;
mod output;
mod renderer;

pub use camera::Camera;
pub use integrator::{cast_ray, is_occluded, RenderConfig, MAX_DEPTH};
pub use intersect::{find_nearest_hit, HitRecord};
pub use optics::{offset_origin, reflect, refract, SURFACE_EPSILON};
pub use output::{save_image, save_ppm, tonemap, OutputError, OutputResult};
pub use renderer::{render, render_parallel, render_pixel, ImageBuffer};

/// Re-export scene types and common math types
pub use lumen_core::{Color, Environment, Light, Material, Scene, Sphere};
pub use lumen_math::{Ray, Vec3, Vec4};
