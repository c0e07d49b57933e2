//! Procedural checkerboard ground.
//!
//! An infinite horizontal plane that only counts as hit inside a bounded
//! window in x and z. The material at a hit point is synthesized from the
//! default material with a checker color.

use lumen_math::{Interval, Ray, Vec3};
use serde::Deserialize;

use crate::material::{Color, Material};

/// Rays flatter than this (|dir.y|) skip the plane test entirely.
pub const PARALLEL_EPSILON: f32 = 1e-3;

/// Horizontal checkerboard plane.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GroundPlane {
    /// Plane height (y)
    pub height: f32,
    /// Hits are accepted for |x| < half_width
    pub half_width: f32,
    /// Nearer z bound of the window (hits need z < z_near)
    pub z_near: f32,
    /// Farther z bound of the window (hits need z > z_far)
    pub z_far: f32,
    /// Checker frequency; cells are 1/check_scale wide
    pub check_scale: f32,
    pub colors: [Color; 2],
}

impl Default for GroundPlane {
    fn default() -> Self {
        Self {
            height: -4.0,
            half_width: 10.0,
            z_near: -10.0,
            z_far: -30.0,
            check_scale: 0.5,
            colors: [Vec3::new(0.3, 0.3, 0.3), Vec3::new(0.3, 0.2, 0.1)],
        }
    }
}

impl GroundPlane {
    /// Distance along `ray` to the plane, if the hit lies inside the window.
    pub fn intersect(&self, ray: &Ray) -> Option<f32> {
        let dir = ray.direction();
        if dir.y.abs() <= PARALLEL_EPSILON {
            return None;
        }

        let d = -(ray.origin().y - self.height) / dir.y;
        if d <= 0.0 {
            return None;
        }

        let p = ray.at(d);
        let x_window = Interval::new(-self.half_width, self.half_width);
        let z_window = Interval::new(self.z_far, self.z_near);
        if x_window.surrounds(p.x) && z_window.surrounds(p.z) {
            Some(d)
        } else {
            None
        }
    }

    /// Upward unit normal.
    pub fn normal(&self) -> Vec3 {
        Vec3::Y
    }

    /// Material at a point on the plane.
    pub fn material_at(&self, p: Vec3) -> Material {
        // Truncation toward zero; the +1000 keeps the x term positive.
        let cx = (self.check_scale * p.x + 1000.0) as i32;
        let cz = (self.check_scale * p.z) as i32;
        let color = if (cx + cz) & 1 == 1 {
            self.colors[0]
        } else {
            self.colors[1]
        };
        Material::diffuse(color)
    }
}
