//! Surface material for the Phong-style shading model.

use lumen_math::{Vec3, Vec4};
use serde::Deserialize;

use crate::error::{SceneError, SceneResult};

/// Color type alias (linear RGB, nominally 0-1 but left unclamped)
pub type Color = Vec3;

/// A surface material.
///
/// The four albedo components weight the diffuse, specular, reflective
/// and refractive terms of the final color. They are not required to
/// sum to one.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Material {
    /// Index of refraction (1.0 = vacuum, no bending)
    pub refractive_index: f32,

    /// Weights for {diffuse, specular, reflective, refractive}
    pub albedo: Vec4,

    /// Base diffuse color
    pub diffuse_color: Color,

    /// Phong shininess
    pub specular_exponent: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            refractive_index: 1.0,
            albedo: Vec4::new(1.0, 0.0, 0.0, 0.0),
            diffuse_color: Color::ZERO,
            specular_exponent: 0.0,
        }
    }
}

impl Material {
    /// Create a new material.
    pub fn new(refractive_index: f32, albedo: Vec4, diffuse_color: Color, specular_exponent: f32) -> Self {
        Self {
            refractive_index,
            albedo,
            diffuse_color,
            specular_exponent,
        }
    }

    /// Purely diffuse material with the given color.
    pub fn diffuse(diffuse_color: Color) -> Self {
        Self {
            diffuse_color,
            ..Default::default()
        }
    }

    pub fn ivory() -> Self {
        Self::new(1.0, Vec4::new(0.6, 0.3, 0.1, 0.0), Vec3::new(0.4, 0.4, 0.3), 50.0)
    }

    pub fn glass() -> Self {
        Self::new(1.5, Vec4::new(0.0, 0.5, 0.1, 0.8), Vec3::new(0.6, 0.7, 0.8), 125.0)
    }

    pub fn red_rubber() -> Self {
        Self::new(1.0, Vec4::new(0.9, 0.1, 0.0, 0.0), Vec3::new(0.3, 0.1, 0.1), 10.0)
    }

    pub fn mirror() -> Self {
        Self::new(1.0, Vec4::new(0.0, 10.0, 0.8, 0.0), Vec3::new(1.0, 1.0, 1.0), 1425.0)
    }

    /// Check the material's numeric invariants.
    pub fn validate(&self) -> SceneResult<()> {
        if !(self.refractive_index.is_finite() && self.refractive_index > 0.0) {
            return Err(SceneError::Invalid(format!(
                "refractive index must be positive, got {}",
                self.refractive_index
            )));
        }
        if self.specular_exponent.is_nan() || self.specular_exponent < 0.0 {
            return Err(SceneError::Invalid(format!(
                "specular exponent must be non-negative, got {}",
                self.specular_exponent
            )));
        }
        if !self.albedo.is_finite() || !self.diffuse_color.is_finite() {
            return Err(SceneError::Invalid("material weights must be finite".to_string()));
        }
        Ok(())
    }
}
