//! ChromaWeekend path tracer
//!
//! Renders spheres with diffuse, metal and glass materials by recursive Monte
//! Carlo path tracing on the CPU, and writes the result as PPM or PNG.

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod camera;
pub mod error;
pub mod hittable;
pub mod interval;
pub mod material;
pub mod output;
pub mod random;
pub mod ray;
pub mod sphere;

pub use camera::{Camera, RenderState, RenderStats};
pub use error::OutputError;
pub use hittable::{HitRecord, Hittable, HittableList};
pub use interval::Interval;
pub use material::{Color, Material};
pub use output::{ImageSink, PngWriter, PpmWriter};
pub use ray::{Point3, Ray};
pub use sphere::Sphere;
