//! Random number generation for ray tracing.
//!
//! Every sampling function takes the generator explicitly so a render (or a
//! single path in a test) can be reproduced from a seed. Renders use a
//! ChaCha20 PRNG created by [`new_rng`].

use glam::DVec3;
use rand::{rng, Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Create the render PRNG, seeded when a seed is given and from the thread rng otherwise.
pub fn new_rng(seed: Option<u64>) -> ChaCha20Rng {
    match seed {
        Some(seed) => ChaCha20Rng::seed_from_u64(seed),
        None => ChaCha20Rng::from_rng(&mut rng()),
    }
}

/// Generate a random f64 in [0.0, 1.0)
pub fn random_f64<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.random()
}

/// Generate a random f64 in [min, max)
pub fn random_f64_range<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> f64 {
    min + (max - min) * random_f64(rng)
}

/// Generate a random vector with components in [0.0, 1.0)
pub fn random_vec3<R: Rng + ?Sized>(rng: &mut R) -> DVec3 {
    DVec3::new(random_f64(rng), random_f64(rng), random_f64(rng))
}

/// Generate a random vector with components in [min, max)
pub fn random_vec3_range<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> DVec3 {
    DVec3::splat(min) + DVec3::splat(max - min) * random_vec3(rng)
}

/// Generate random unit vector uniformly distributed on unit sphere.
pub fn random_unit_vector<R: Rng + ?Sized>(rng: &mut R) -> DVec3 {
    // Uniform θ in [0, 2π) and uniform cos(φ) in [-1, 1]
    let theta = 2.0 * std::f64::consts::PI * random_f64(rng);
    let cos_phi = 2.0 * random_f64(rng) - 1.0;
    let sin_phi = (1.0 - cos_phi * cos_phi).sqrt();

    DVec3::new(sin_phi * theta.cos(), sin_phi * theta.sin(), cos_phi)
}

/// Generate random point inside the unit disk (z = 0) using rejection sampling.
pub fn random_in_unit_disk<R: Rng + ?Sized>(rng: &mut R) -> DVec3 {
    loop {
        let p = DVec3::new(
            random_f64_range(rng, -1.0, 1.0),
            random_f64_range(rng, -1.0, 1.0),
            0.0,
        );
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}
