//! Scene container: spheres, lights and the optional ground plane.
//!
//! A scene is assembled once and is read-only while rendering.

use lumen_math::Vec3;
use serde::Deserialize;

use crate::error::{SceneError, SceneResult};
use crate::ground::GroundPlane;
use crate::material::Material;
use crate::sphere::Sphere;

/// Hits at or beyond this distance are treated as misses.
pub const DEFAULT_MAX_DISTANCE: f32 = 1000.0;

/// A point light.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Light {
    pub position: Vec3,
    pub intensity: f32,
}

impl Light {
    pub fn new(position: Vec3, intensity: f32) -> Self {
        Self {
            position,
            intensity,
        }
    }
}

/// Everything the integrator needs to know about geometry and lighting.
#[derive(Clone, Debug)]
pub struct Scene {
    pub spheres: Vec<Sphere>,
    pub lights: Vec<Light>,
    pub ground: Option<GroundPlane>,
    pub max_distance: f32,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self {
            spheres: Vec::new(),
            lights: Vec::new(),
            ground: None,
            max_distance: DEFAULT_MAX_DISTANCE,
        }
    }

    pub fn with_sphere(mut self, sphere: Sphere) -> Self {
        self.spheres.push(sphere);
        self
    }

    pub fn with_light(mut self, light: Light) -> Self {
        self.lights.push(light);
        self
    }

    pub fn with_ground(mut self, ground: GroundPlane) -> Self {
        self.ground = Some(ground);
        self
    }

    /// The showcase scene: four spheres over a checkerboard, three lights.
    pub fn demo() -> Self {
        Self::new()
            .with_sphere(Sphere::new(Vec3::new(-3.0, 0.0, -16.0), 2.0, Material::ivory()))
            .with_sphere(Sphere::new(Vec3::new(-1.0, -1.5, -12.0), 2.0, Material::glass()))
            .with_sphere(Sphere::new(Vec3::new(1.5, -0.5, -18.0), 3.0, Material::red_rubber()))
            .with_sphere(Sphere::new(Vec3::new(7.0, 5.0, -18.0), 4.0, Material::mirror()))
            .with_light(Light::new(Vec3::new(-20.0, 20.0, 20.0), 1.5))
            .with_light(Light::new(Vec3::new(30.0, 50.0, -25.0), 1.8))
            .with_light(Light::new(Vec3::new(30.0, 20.0, 30.0), 1.7))
            .with_ground(GroundPlane::default())
    }

    /// Check the scene invariants before rendering.
    pub fn validate(&self) -> SceneResult<()> {
        if !(self.max_distance > 0.0) {
            return Err(SceneError::Invalid(format!(
                "max distance must be positive, got {}",
                self.max_distance
            )));
        }

        for (i, sphere) in self.spheres.iter().enumerate() {
            if !(sphere.radius().is_finite() && sphere.radius() > 0.0) {
                return Err(SceneError::Invalid(format!(
                    "sphere {} has non-positive radius {}",
                    i,
                    sphere.radius()
                )));
            }
            if !sphere.center().is_finite() {
                return Err(SceneError::Invalid(format!(
                    "sphere {} has non-finite center {}",
                    i,
                    sphere.center()
                )));
            }
            sphere.material().validate()?;
        }

        for (i, light) in self.lights.iter().enumerate() {
            if !(light.intensity > 0.0) {
                return Err(SceneError::Invalid(format!(
                    "light {} has non-positive intensity {}",
                    i, light.intensity
                )));
            }
        }

        if self.lights.is_empty() {
            log::warn!("Scene has no lights; only reflections and refractions will be visible");
        }

        Ok(())
    }
}
