//! Sphere primitive and its analytic ray intersection.

use lumen_math::{Ray, Vec3};

use crate::material::Material;

/// A sphere primitive.
///
/// The material is owned by value; two spheres never share one.
#[derive(Clone, Debug, PartialEq)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
    material: Material,
}

impl Sphere {
    /// Create a new sphere.
    ///
    /// The radius must be positive; see [`crate::Scene::validate`].
    pub fn new(center: Vec3, radius: f32, material: Material) -> Self {
        Self {
            center,
            radius,
            material,
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Distance along `ray` to the first intersection in front of its origin.
    ///
    /// Solves `a*t^2 + b*t + c = 0` and prefers the near root, falling back
    /// to the far root when the origin is inside the sphere.
    pub fn intersect(&self, ray: &Ray) -> Option<f32> {
        let l = self.center - ray.origin();
        let a = ray.direction().dot(ray.direction());
        if a == 0.0 {
            return None;
        }
        let b = -2.0 * ray.direction().dot(l);
        let c = l.dot(l) - self.radius * self.radius;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();
        let mut t = (-b - sqrtd) / (2.0 * a);
        if t < 0.0 {
            t = (-b + sqrtd) / (2.0 * a);
        }
        if t < 0.0 {
            return None;
        }
        Some(t)
    }

    /// Outward unit normal at a point on the surface.
    pub fn outward_normal(&self, p: Vec3) -> Vec3 {
        (p - self.center).normalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_sphere(radius: f32) -> Sphere {
        Sphere::new(Vec3::ZERO, radius, Material::default())
    }

    #[test]
    fn test_axis_hit_distance() {
        // From distance d along an axis, the first hit is at d - r
        for (d, r) in [(5.0, 1.0), (10.0, 2.5), (3.0, 2.0)] {
            let sphere = unit_sphere(r);
            let ray = Ray::new(Vec3::new(0.0, 0.0, d), Vec3::new(0.0, 0.0, -1.0));
            let t = sphere.intersect(&ray).unwrap();
            assert!((t - (d - r)).abs() < 1e-5, "d={} r={} t={}", d, r, t);
        }
    }

    #[test]
    fn test_unnormalized_direction() {
        let sphere = unit_sphere(1.0);
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -2.0));
        let t = sphere.intersect(&ray).unwrap();
        assert!((ray.at(t).z - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_inside_uses_far_root() {
        let sphere = unit_sphere(2.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        let t = sphere.intersect(&ray).unwrap();
        assert!((t - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_miss() {
        let sphere = unit_sphere(1.0);

        // Negative discriminant
        let ray = Ray::new(Vec3::new(0.0, 3.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(sphere.intersect(&ray).is_none());

        // Both roots behind the origin
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(sphere.intersect(&ray).is_none());
    }

    #[test]
    fn test_zero_direction() {
        let sphere = unit_sphere(1.0);
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO);
        assert!(sphere.intersect(&ray).is_none());
    }

    #[test]
    fn test_outward_normal() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -5.0), 2.0, Material::default());
        let n = sphere.outward_normal(Vec3::new(0.0, 2.0, -5.0));
        assert!((n - Vec3::Y).length() < 1e-6);
    }
}
