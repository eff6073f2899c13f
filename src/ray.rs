//! Ray representation for 3D ray tracing.
//!
//! A ray is defined as r(t) = origin + t * direction, representing a semi-infinite
//! line in 3D space used for intersection testing.

use glam::DVec3;

/// Point in world space.
pub type Point3 = DVec3;

/// Ray in 3D space defined by origin and direction.
///
/// Mathematical representation: r(t) = origin + t * direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Starting point of the ray in world coordinates.
    ///
    /// The camera position (or a point on the lens) for primary rays, a
    /// surface point for scattered rays.
    pub origin: Point3,

    /// Direction vector of the ray.
    ///
    /// Not required to be normalized. Camera rays carry the vector from the
    /// lens to the pixel sample; consumers normalize where they need to.
    pub direction: DVec3,
}

impl Ray {
    /// Create a new ray with origin and direction.
    pub fn new(origin: Point3, direction: DVec3) -> Self {
        Self { origin, direction }
    }

    /// Compute a point at parameter t along the ray.
    ///
    /// Returns r(t) = origin + t * direction.
    pub fn at(&self, t: f64) -> Point3 {
        self.origin + t * self.direction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_at() {
        let ray = Ray::new(DVec3::new(1.0, 2.0, 3.0), DVec3::new(0.0, 0.0, -2.0));

        assert_eq!(ray.at(0.0), DVec3::new(1.0, 2.0, 3.0));
        assert_eq!(ray.at(1.5), DVec3::new(1.0, 2.0, 0.0));
        assert_eq!(ray.at(-1.0), DVec3::new(1.0, 2.0, 5.0));
    }
}
