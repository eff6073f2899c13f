//! Ray-object intersection system.
//!
//! Defines the Hittable trait for geometric primitives, HitRecord for
//! storing intersection data, and HittableList, the scene aggregate.

use std::sync::Arc;

use glam::DVec3;

use crate::interval::Interval;
use crate::material::Material;
use crate::ray::{Point3, Ray};

/// Ray-object intersection information.
///
/// Contains intersection point, surface normal, distance, and the material
/// of the struck surface needed for shading.
#[derive(Debug, Clone, Copy)]
pub struct HitRecord<'a> {
    /// Point where the ray intersects the object
    pub p: Point3,
    /// Surface normal at the intersection point, unit length, facing against the ray
    pub normal: DVec3,
    /// Distance along the ray to the intersection point
    pub t: f64,
    /// True if ray hits the front face, false if hits the back face
    pub front_face: bool,
    /// Material of the object at the hit point
    pub material: &'a Material,
}

impl<'a> HitRecord<'a> {
    /// Build a hit record at parameter `t` along `r`.
    ///
    /// `outward_normal` must be unit length and point out of the surface. The
    /// stored normal always points against the incident ray.
    pub fn new(r: &Ray, t: f64, outward_normal: DVec3, material: &'a Material) -> Self {
        let front_face = r.direction.dot(outward_normal) < 0.0;
        let normal = if front_face {
            outward_normal
        } else {
            -outward_normal
        };

        Self {
            p: r.at(t),
            normal,
            t,
            front_face,
            material,
        }
    }
}

/// Trait for objects that can be intersected by rays.
///
/// Must be thread-safe (Sync + Send) so scenes can be shared read-only.
pub trait Hittable: Sync + Send {
    /// Test for ray intersection strictly inside `ray_t`.
    ///
    /// Returns the hit record of the nearest accepted intersection, if any.
    fn hit(&self, r: &Ray, ray_t: Interval) -> Option<HitRecord<'_>>;
}

/// Collection of objects forming a scene.
///
/// Uses linear search for intersection testing. Members are shared, so a
/// primitive may also be referenced from elsewhere.
#[derive(Default, Clone)]
pub struct HittableList {
    objects: Vec<Arc<dyn Hittable>>,
}

impl HittableList {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
        }
    }

    /// Create a new list with a single hittable object
    pub fn with_object(object: Arc<dyn Hittable>) -> Self {
        let mut list = Self::new();
        list.add(object);
        list
    }

    /// Add an object to the scene.
    pub fn add(&mut self, object: Arc<dyn Hittable>) {
        self.objects.push(object);
    }

    /// Clear all objects from the list
    pub fn clear(&mut self) {
        self.objects.clear();
    }

    /// Number of objects in the scene
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// True when the scene has no objects
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Objects in insertion order
    pub fn objects(&self) -> &[Arc<dyn Hittable>] {
        &self.objects
    }
}

impl Hittable for HittableList {
    fn hit(&self, r: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let mut closest: Option<HitRecord<'_>> = None;
        let mut closest_so_far = ray_t.max;

        for object in &self.objects {
            // Strict bounds: an equally distant later hit never replaces an earlier one
            if let Some(rec) = object.hit(r, ray_t.with_max(closest_so_far)) {
                closest_so_far = rec.t;
                closest = Some(rec);
            }
        }

        closest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sphere::Sphere;

    fn grey() -> Arc<Material> {
        Arc::new(Material::lambertian(DVec3::splat(0.5)))
    }

    #[test]
    fn test_hit_record_normal_opposes_ray() {
        let material = Material::lambertian(DVec3::ONE);
        let ray = Ray::new(DVec3::ZERO, DVec3::new(0.0, 0.0, -1.0));

        let front = HitRecord::new(&ray, 1.0, DVec3::new(0.0, 0.0, 1.0), &material);
        assert!(front.front_face);
        assert_eq!(front.normal, DVec3::new(0.0, 0.0, 1.0));
        assert_eq!(front.p, DVec3::new(0.0, 0.0, -1.0));

        let back = HitRecord::new(&ray, 1.0, DVec3::new(0.0, 0.0, -1.0), &material);
        assert!(!back.front_face);
        assert_eq!(back.normal, DVec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_empty_list_misses() {
        let world = HittableList::new();
        let ray = Ray::new(DVec3::ZERO, DVec3::new(0.0, 0.0, -1.0));

        assert!(world.is_empty());
        assert!(world.hit(&ray, Interval::new(0.001, f64::INFINITY)).is_none());
    }

    #[test]
    fn test_list_returns_closest_hit_regardless_of_order() {
        let mut world = HittableList::new();
        world.add(Arc::new(Sphere::new(DVec3::new(0.0, 0.0, -10.0), 1.0, grey())));
        world.add(Arc::new(Sphere::new(DVec3::new(0.0, 0.0, -3.0), 1.0, grey())));
        world.add(Arc::new(Sphere::new(DVec3::new(0.0, 0.0, -6.0), 1.0, grey())));

        let ray = Ray::new(DVec3::ZERO, DVec3::new(0.0, 0.0, -1.0));
        let rec = world.hit(&ray, Interval::new(0.001, f64::INFINITY)).unwrap();

        assert!((rec.t - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_list_respects_interval() {
        let mut world = HittableList::new();
        world.add(Arc::new(Sphere::new(DVec3::new(0.0, 0.0, -3.0), 1.0, grey())));

        let ray = Ray::new(DVec3::ZERO, DVec3::new(0.0, 0.0, -1.0));

        // Both roots (t = 2 and t = 4) lie outside
        assert!(world.hit(&ray, Interval::new(0.001, 1.5)).is_none());
        // Only the far root is inside
        let rec = world.hit(&ray, Interval::new(2.5, 10.0)).unwrap();
        assert!((rec.t - 4.0).abs() < 1e-12);
        assert!(!rec.front_face);
    }

    #[test]
    fn test_equal_distance_first_member_wins() {
        let first = Arc::new(Material::lambertian(DVec3::new(1.0, 0.0, 0.0)));
        let second = Arc::new(Material::lambertian(DVec3::new(0.0, 1.0, 0.0)));

        let mut world = HittableList::new();
        world.add(Arc::new(Sphere::new(DVec3::new(0.0, 0.0, -3.0), 1.0, first)));
        world.add(Arc::new(Sphere::new(DVec3::new(0.0, 0.0, -3.0), 1.0, second)));

        let ray = Ray::new(DVec3::ZERO, DVec3::new(0.0, 0.0, -1.0));
        let rec = world.hit(&ray, Interval::new(0.001, f64::INFINITY)).unwrap();

        assert!(matches!(rec.material, Material::Lambertian { albedo } if albedo.x == 1.0));
    }

    #[test]
    fn test_add_and_clear() {
        let near: Arc<dyn Hittable> = Arc::new(Sphere::new(DVec3::ZERO, 1.0, grey()));
        let far: Arc<dyn Hittable> = Arc::new(Sphere::new(DVec3::splat(5.0), 1.0, grey()));
        let mut world = HittableList::with_object(near.clone());
        world.add(far.clone());
        world.add(near.clone());

        // Insertion order is kept and shared objects are not copied
        assert_eq!(world.len(), 3);
        assert!(Arc::ptr_eq(&world.objects()[0], &near));
        assert!(Arc::ptr_eq(&world.objects()[1], &far));
        assert!(Arc::ptr_eq(&world.objects()[2], &near));

        world.clear();
        assert!(world.is_empty());
    }
}
