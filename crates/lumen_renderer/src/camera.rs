//! Pinhole camera for primary ray generation.

use std::f32::consts::PI;

use lumen_core::CameraSettings;
use lumen_math::{Ray, Vec3};

/// Pinhole camera looking down -z.
#[derive(Clone, Debug)]
pub struct Camera {
    // Image settings
    pub image_width: u32,
    pub image_height: u32,

    /// Full field of view in radians
    fov: f32,
    position: Vec3,
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self {
            image_width: 1024,
            image_height: 768,
            fov: PI / 3.0,
            position: Vec3::ZERO,
        }
    }

    /// Create a camera from scene file settings.
    pub fn from_settings(settings: &CameraSettings) -> Self {
        Self::new()
            .with_resolution(settings.width, settings.height)
            .with_fov(settings.fov_degrees.to_radians())
    }

    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.image_width = width;
        self.image_height = height;
        self
    }

    /// Set the field of view in radians.
    pub fn with_fov(mut self, fov: f32) -> Self {
        self.fov = fov;
        self
    }

    /// Set camera position.
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Field of view in radians.
    pub fn fov(&self) -> f32 {
        self.fov
    }

    /// Generate the primary ray through the center of pixel (i, j).
    ///
    /// Row 0 is the top of the image.
    pub fn get_ray(&self, i: u32, j: u32) -> Ray {
        let width = self.image_width as f32;
        let height = self.image_height as f32;
        let half_tan = (self.fov / 2.0).tan();
        let aspect = width / height;

        let x = (2.0 * (i as f32 + 0.5) / width - 1.0) * half_tan * aspect;
        let y = -(2.0 * (j as f32 + 0.5) / height - 1.0) * half_tan;

        Ray::new(self.position, Vec3::new(x, y, -1.0).normalize())
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}
