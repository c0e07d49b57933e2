//! Mirror reflection and Snell refraction.

use lumen_math::Vec3;

/// Distance secondary ray origins are pushed off a surface.
pub const SURFACE_EPSILON: f32 = 1e-3;

/// Reflect `l` about `n`.
///
/// `l` points away from the surface, toward where the incoming ray came
/// from; the result points away from the surface on the mirrored side.
#[inline]
pub fn reflect(l: Vec3, n: Vec3) -> Vec3 {
    2.0 * l.dot(n) * n - l
}

/// Refract the incident direction `l` through a surface with outward
/// normal `n` and refractive index `eta_material` (the outside is vacuum).
///
/// Returns `Vec3::ZERO` on total internal reflection.
pub fn refract(l: Vec3, n: Vec3, eta_material: f32) -> Vec3 {
    let mut cosi = -l.dot(n).clamp(-1.0, 1.0);
    let mut etai = 1.0;
    let mut etat = eta_material;
    let mut n = n;

    // Leaving the medium
    if cosi < 0.0 {
        cosi = -cosi;
        std::mem::swap(&mut etai, &mut etat);
        n = -n;
    }

    let eta = etai / etat;
    let k = 1.0 - eta * eta * (1.0 - cosi * cosi);
    if k < 0.0 {
        Vec3::ZERO
    } else {
        eta * l + (eta * cosi - k.sqrt()) * n
    }
}

/// Push `p` off the surface along `n`, on the side `dir` leaves through.
#[inline]
pub fn offset_origin(p: Vec3, n: Vec3, dir: Vec3) -> Vec3 {
    if dir.dot(n) < 0.0 {
        p - n * SURFACE_EPSILON
    } else {
        p + n * SURFACE_EPSILON
    }
}
