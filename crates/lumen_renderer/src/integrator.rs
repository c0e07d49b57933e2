//! Recursive Whitted radiance evaluation.
//!
//! Each hit spawns one reflection and one refraction ray, then adds
//! shadowed diffuse and specular terms from every point light. The depth
//! counter is carried explicitly by the caller; primary rays start at 0.

use lumen_core::{Color, Environment, Light, Scene};
use lumen_math::{Ray, Vec3};

use crate::intersect::find_nearest_hit;
use crate::optics::{offset_origin, reflect, refract};

/// Default recursion bound; rays with `depth > MAX_DEPTH` see the environment.
pub const MAX_DEPTH: u32 = 4;

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Maximum recursion depth
    pub max_depth: u32,
    /// Skip reflection/refraction rays whose albedo weight is exactly zero.
    /// The image is unchanged; only wasted work is avoided.
    pub prune_zero_weight: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_depth: MAX_DEPTH,
            prune_zero_weight: false,
        }
    }
}

/// Compute the color seen along a ray.
///
/// Reflection is traced before refraction, and lights are accumulated in
/// scene order, so results are reproducible bit for bit. No clamping is
/// applied here.
pub fn cast_ray(ray: &Ray, scene: &Scene, env: &Environment, depth: u32, config: &RenderConfig) -> Color {
    let dir = ray.direction();
    if depth > config.max_depth {
        return env.sample(dir);
    }

    let hit = match find_nearest_hit(ray, scene) {
        Some(hit) => hit,
        None => return env.sample(dir),
    };
    let material = hit.material;

    let reflect_color = if config.prune_zero_weight && material.albedo[2] == 0.0 {
        Color::ZERO
    } else {
        let reflect_dir = reflect(-dir, hit.normal).normalize();
        let origin = offset_origin(hit.p, hit.normal, reflect_dir);
        cast_ray(&Ray::new(origin, reflect_dir), scene, env, depth + 1, config)
    };

    let refract_color = if config.prune_zero_weight && material.albedo[3] == 0.0 {
        Color::ZERO
    } else {
        let refract_dir = refract(dir, hit.outward_normal(), material.refractive_index);
        if refract_dir == Vec3::ZERO {
            // Total internal reflection transmits nothing
            Color::ZERO
        } else {
            let refract_dir = refract_dir.normalize();
            let origin = offset_origin(hit.p, hit.normal, refract_dir);
            cast_ray(&Ray::new(origin, refract_dir), scene, env, depth + 1, config)
        }
    };

    let mut diffuse = 0.0;
    let mut specular = 0.0;
    for light in &scene.lights {
        let to_light = light.position - hit.p;
        let light_distance = to_light.length();
        // A light sitting on the shaded point has no direction.
        if light_distance <= f32::EPSILON {
            continue;
        }
        let light_dir = to_light / light_distance;

        if is_occluded(scene, hit.p, hit.normal, light) {
            continue;
        }

        diffuse += light.intensity * light_dir.dot(hit.normal).max(0.0);
        specular += light.intensity
            * reflect(light_dir, hit.normal)
                .dot(-dir)
                .max(0.0)
                .powf(material.specular_exponent);
    }

    material.diffuse_color * diffuse * material.albedo[0]
        + Color::ONE * specular * material.albedo[1]
        + reflect_color * material.albedo[2]
        + refract_color * material.albedo[3]
}

/// Whether anything blocks the segment from `point` to `light`.
///
/// The shadow ray starts just off the surface on the light's side, so the
/// surface containing `point` does not shadow itself.
pub fn is_occluded(scene: &Scene, point: Vec3, normal: Vec3, light: &Light) -> bool {
    let to_light = light.position - point;
    let light_distance = to_light.length();
    if light_distance <= f32::EPSILON {
        return false;
    }
    let light_dir = to_light / light_distance;

    let origin = offset_origin(point, normal, light_dir);
    match find_nearest_hit(&Ray::new(origin, light_dir), scene) {
        Some(shadow_hit) => (shadow_hit.p - origin).length() < light_distance,
        None => false,
    }
}
