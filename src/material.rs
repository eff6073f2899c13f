//! Material system for ray tracing.
//!
//! Implements three material types: Lambertian (diffuse), Metal (specular),
//! and Dielectric (transparent). Materials are immutable and shared between
//! primitives through `Arc`.

use glam::DVec3;
use rand::Rng;

use crate::hittable::HitRecord;
use crate::random;
use crate::ray::Ray;

/// RGB color in linear space.
pub type Color = DVec3;

/// Material types for ray tracing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    /// Lambertian diffuse material for matte surfaces.
    Lambertian {
        /// Surface color/reflectance.
        albedo: Color,
    },

    /// Metallic material with specular reflection.
    Metal {
        /// Metal color.
        albedo: Color,
        /// Surface roughness (0.0 = mirror, 1.0 = rough).
        fuzz: f64,
    },

    /// Dielectric (transparent) material with refraction.
    Dielectric {
        /// Index of refraction (1.0 = air, 1.5 = glass, etc.).
        refraction_index: f64,
    },
}

impl Material {
    /// Diffuse material with the given albedo.
    pub fn lambertian(albedo: Color) -> Self {
        Material::Lambertian { albedo }
    }

    /// Metal material; `fuzz` is clamped to at most 1.0.
    pub fn metal(albedo: Color, fuzz: f64) -> Self {
        Material::Metal {
            albedo,
            fuzz: fuzz.min(1.0),
        }
    }

    /// Clear dielectric with the given index of refraction.
    pub fn dielectric(refraction_index: f64) -> Self {
        Material::Dielectric { refraction_index }
    }

    /// Compute ray scattering for this material.
    ///
    /// Returns the attenuation color and scattered ray, or `None` when the
    /// ray is absorbed.
    pub fn scatter<R: Rng + ?Sized>(
        &self,
        r_in: &Ray,
        rec: &HitRecord<'_>,
        rng: &mut R,
    ) -> Option<(Color, Ray)> {
        match *self {
            Material::Lambertian { albedo } => Some(scatter_lambertian(albedo, rec, rng)),
            Material::Metal { albedo, fuzz } => scatter_metal(albedo, fuzz, r_in, rec, rng),
            Material::Dielectric { refraction_index } => {
                Some(scatter_dielectric(refraction_index, r_in, rec, rng))
            }
        }
    }
}

/// Lambertian diffuse scattering with cosine-weighted distribution.
fn scatter_lambertian<R: Rng + ?Sized>(
    albedo: Color,
    rec: &HitRecord<'_>,
    rng: &mut R,
) -> (Color, Ray) {
    let mut scatter_direction = rec.normal + random::random_unit_vector(rng);

    // Catch degenerate scatter direction
    if near_zero(scatter_direction) {
        scatter_direction = rec.normal;
    }

    (albedo, Ray::new(rec.p, scatter_direction))
}

/// Metallic reflection with optional surface roughness.
fn scatter_metal<R: Rng + ?Sized>(
    albedo: Color,
    fuzz: f64,
    r_in: &Ray,
    rec: &HitRecord<'_>,
    rng: &mut R,
) -> Option<(Color, Ray)> {
    let reflected = reflect(r_in.direction, rec.normal).normalize()
        + fuzz * random::random_unit_vector(rng);

    // Fuzzed rays that end up below the surface are absorbed
    if reflected.dot(rec.normal) > 0.0 {
        Some((albedo, Ray::new(rec.p, reflected)))
    } else {
        None
    }
}

/// Dielectric scattering choosing between reflection and refraction.
fn scatter_dielectric<R: Rng + ?Sized>(
    refraction_index: f64,
    r_in: &Ray,
    rec: &HitRecord<'_>,
    rng: &mut R,
) -> (Color, Ray) {
    let ri = if rec.front_face {
        1.0 / refraction_index
    } else {
        refraction_index
    };

    let unit_direction = r_in.direction.normalize();
    let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
    let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

    let cannot_refract = ri * sin_theta > 1.0;

    let direction = if cannot_refract || reflectance(cos_theta, ri) > random::random_f64(rng) {
        reflect(unit_direction, rec.normal)
    } else {
        refract(unit_direction, rec.normal, ri)
    };

    (Color::ONE, Ray::new(rec.p, direction))
}

/// True when every component is within 1e-8 of zero.
pub fn near_zero(v: DVec3) -> bool {
    const S: f64 = 1e-8;
    v.abs().cmplt(DVec3::splat(S)).all()
}

/// Reflect a vector off a surface using the law of reflection.
pub fn reflect(v: DVec3, n: DVec3) -> DVec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract a unit vector through an interface using Snell's law.
pub fn refract(uv: DVec3, n: DVec3, etai_over_etat: f64) -> DVec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}

/// Compute Fresnel reflectance using Schlick's approximation.
pub fn reflectance(cosine: f64, refraction_index: f64) -> f64 {
    let r0 = (1.0 - refraction_index) / (1.0 + refraction_index);
    let r0 = r0 * r0;
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}
