//! Nearest-hit queries against a scene.

use lumen_core::{Material, Scene, Sphere};
use lumen_math::{Ray, Vec3};

/// Record of a ray-surface intersection.
#[derive(Clone, Copy, Debug)]
pub struct HitRecord {
    /// Point of intersection
    pub p: Vec3,
    /// Unit surface normal, always pointing against the ray
    pub normal: Vec3,
    /// Material at the intersection point
    pub material: Material,
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Whether the ray origin is on the side the outward normal points to
    pub front_face: bool,
}

impl HitRecord {
    fn new(ray: &Ray, t: f32, outward_normal: Vec3, material: Material) -> Self {
        let mut rec = Self {
            p: ray.at(t),
            normal: outward_normal,
            material,
            t,
            front_face: true,
        };
        rec.set_face_normal(ray, outward_normal);
        rec
    }

    /// Set the face normal based on ray direction and outward normal.
    ///
    /// NOTE: `outward_normal` is assumed to have unit length.
    pub fn set_face_normal(&mut self, ray: &Ray, outward_normal: Vec3) {
        // If the ray and normal point in the same direction, we're inside
        self.front_face = ray.direction().dot(outward_normal) < 0.0;
        self.normal = if self.front_face {
            outward_normal
        } else {
            -outward_normal
        };
    }

    /// The geometric normal before front-face correction.
    pub fn outward_normal(&self) -> Vec3 {
        if self.front_face {
            self.normal
        } else {
            -self.normal
        }
    }
}

/// Find the globally nearest hit among all spheres and the ground plane.
///
/// Hits at or beyond the scene's `max_distance` count as misses.
pub fn find_nearest_hit(ray: &Ray, scene: &Scene) -> Option<HitRecord> {
    let mut nearest = f32::MAX;
    let mut closest: Option<&Sphere> = None;

    for sphere in &scene.spheres {
        if let Some(t) = sphere.intersect(ray) {
            if t < nearest {
                nearest = t;
                closest = Some(sphere);
            }
        }
    }

    let mut hit = closest.map(|sphere| {
        let outward = sphere.outward_normal(ray.at(nearest));
        HitRecord::new(ray, nearest, outward, *sphere.material())
    });

    if let Some(ground) = &scene.ground {
        if let Some(d) = ground.intersect(ray) {
            if d < nearest {
                nearest = d;
                let material = ground.material_at(ray.at(d));
                hit = Some(HitRecord::new(ray, d, ground.normal(), material));
            }
        }
    }

    if nearest < scene.max_distance {
        hit
    } else {
        None
    }
}
