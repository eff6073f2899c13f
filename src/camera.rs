//! Camera for ray generation and scene rendering

use std::time::{Duration, Instant};

use glam::DVec3;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use rand::Rng;

use crate::error::Result;
use crate::hittable::Hittable;
use crate::interval::Interval;
use crate::material::Color;
use crate::output::ImageSink;
use crate::random;
use crate::ray::{Point3, Ray};

/// Lower bound of accepted hit distances; keeps scattered rays from re-hitting their origin.
const SHADOW_ACNE_EPSILON: f64 = 0.001;

/// Largest image height a render will produce.
pub const MAX_IMAGE_HEIGHT: u32 = 16_384;

/// Field of view used when the configured one is unusable.
const FALLBACK_VFOV: f64 = 90.0;

/// Where a camera is in its render cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderState {
    /// Configuration may have changed since the viewport was derived
    Uninitialized,
    /// Viewport basis computed, no pixels written yet
    Ready,
    /// Pixels are being streamed to the sink
    Rendering,
    /// Every pixel was written and the sink finished
    Done,
}

/// Summary of a finished render.
#[derive(Debug, Clone, Copy)]
pub struct RenderStats {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Samples taken per pixel
    pub samples_per_pixel: u32,
    /// Wall time spent rendering and writing
    pub elapsed: Duration,
}

/// Camera for ray generation and scene rendering.
///
/// Uses a thin-lens camera model with depth of field and anti-aliasing via
/// jittered multi-sampling. The public fields are the configuration; the
/// viewport basis derived from them is recomputed at the start of every
/// [`render`](Camera::render).
#[derive(Debug, Clone)]
pub struct Camera {
    /// Ratio of image width over height
    pub aspect_ratio: f64,
    /// Rendered image width in pixel count
    pub image_width: u32,
    /// Number of random samples for each pixel (for anti-aliasing)
    pub samples_per_pixel: u32,
    /// Maximum number of ray bounces (recursion depth limit)
    pub max_depth: u32,
    /// Vertical field of view in degrees
    pub vfov: f64,
    /// Point camera is looking from (camera position)
    pub lookfrom: Point3,
    /// Point camera is looking at (look target)
    pub lookat: Point3,
    /// Camera-relative "up" direction vector
    pub vup: DVec3,
    /// Lens aperture as a cone angle in degrees; 0 disables defocus blur
    pub aperture: f64,
    /// Distance from camera lookfrom point to plane of perfect focus
    pub focus_dist: f64,
    /// Seed for the render PRNG; `None` draws a fresh seed per render
    pub seed: Option<u64>,
    /// Draw a scanline progress bar on stderr while rendering
    pub show_progress: bool,

    state: RenderState,
    /// Rendered image height, derived from width and aspect ratio
    image_height: u32,
    /// Effective samples per pixel (at least 1)
    samples: u32,
    /// Color scale factor for a sum of pixel samples
    pixel_samples_scale: f64,
    center: Point3,
    /// World position of the center of pixel (0, 0)
    pixel00_loc: Point3,
    pixel_delta_u: DVec3,
    pixel_delta_v: DVec3,
    u: DVec3,
    v: DVec3,
    w: DVec3,
    defocus_disk_u: DVec3,
    defocus_disk_v: DVec3,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

impl Camera {
    /// Creates a new camera with default settings.
    ///
    /// Default: 100x100 image, 10 samples per pixel, depth 10, 90° FOV
    /// looking down -Z from the origin, no defocus blur.
    pub fn new() -> Self {
        Self {
            aspect_ratio: 1.0,
            image_width: 100,
            samples_per_pixel: 10,
            max_depth: 10,
            vfov: 90.0,
            lookfrom: Point3::ZERO,
            lookat: Point3::new(0.0, 0.0, -1.0),
            vup: DVec3::Y,
            aperture: 0.0,
            focus_dist: 10.0,
            seed: None,
            show_progress: false,
            state: RenderState::Uninitialized,
            image_height: 0,
            samples: 0,
            pixel_samples_scale: 0.0,
            center: Point3::ZERO,
            pixel00_loc: Point3::ZERO,
            pixel_delta_u: DVec3::ZERO,
            pixel_delta_v: DVec3::ZERO,
            u: DVec3::ZERO,
            v: DVec3::ZERO,
            w: DVec3::ZERO,
            defocus_disk_u: DVec3::ZERO,
            defocus_disk_v: DVec3::ZERO,
        }
    }

    /// Current render state.
    pub fn state(&self) -> RenderState {
        self.state
    }

    /// Image height derived by the last [`initialize`](Camera::initialize).
    pub fn image_height(&self) -> u32 {
        self.image_height
    }

    /// Camera basis `(u, v, w)`: right, up, and opposite the view direction.
    pub fn basis(&self) -> (DVec3, DVec3, DVec3) {
        (self.u, self.v, self.w)
    }

    /// Renders the scene, streaming pixels to `sink` row by row.
    ///
    /// Pixels are produced top to bottom, left to right, each averaged over
    /// `samples_per_pixel` paths. Sink failures abort the render and are
    /// returned; the camera is then left in [`RenderState::Rendering`].
    pub fn render(
        &mut self,
        world: &dyn Hittable,
        sink: &mut dyn ImageSink,
    ) -> Result<RenderStats> {
        self.state = RenderState::Uninitialized;
        self.initialize();

        let mut rng = random::new_rng(self.seed);
        match self.seed {
            Some(seed) => debug!("Render seed: {}", seed),
            None => debug!("Render seed: random"),
        }

        info!(
            "Rendering {}x{} image, {} samples per pixel, max depth {}",
            self.image_width, self.image_height, self.samples, self.max_depth
        );
        let generation_start = Instant::now();
        let pb = self.progress_bar();

        self.state = RenderState::Rendering;
        sink.begin(self.image_width, self.image_height)?;
        for j in 0..self.image_height {
            for i in 0..self.image_width {
                let pixel_color = self.pixel_color(i, j, world, &mut rng);
                sink.write_pixel(pixel_color)?;
            }
            pb.inc(1);
        }
        sink.finish()?;
        pb.finish_and_clear();
        self.state = RenderState::Done;

        let elapsed = generation_start.elapsed();
        info!("Image generated in {:.2?}", elapsed);

        Ok(RenderStats {
            width: self.image_width,
            height: self.image_height,
            samples_per_pixel: self.samples,
            elapsed,
        })
    }

    /// Derive the viewport basis from the current settings.
    ///
    /// Idempotent until the camera is rendered again. Degenerate settings
    /// are replaced by usable ones rather than rejected.
    pub fn initialize(&mut self) {
        if self.state != RenderState::Uninitialized {
            return;
        }

        self.image_width = self.image_width.max(1);

        let aspect_ratio = if self.aspect_ratio.is_finite() && self.aspect_ratio > 0.0 {
            self.aspect_ratio
        } else {
            warn!("Invalid aspect ratio {}, using 1.0", self.aspect_ratio);
            1.0
        };
        let image_height = ((self.image_width as f64 / aspect_ratio) as u32).max(1);
        self.image_height = if image_height > MAX_IMAGE_HEIGHT {
            warn!(
                "Image height {} exceeds {}, clamping",
                image_height, MAX_IMAGE_HEIGHT
            );
            MAX_IMAGE_HEIGHT
        } else {
            image_height
        };

        self.samples = self.samples_per_pixel.max(1);
        self.pixel_samples_scale = 1.0 / self.samples as f64;

        let focus_dist = if self.focus_dist.is_finite() && self.focus_dist > 0.0 {
            self.focus_dist
        } else {
            warn!("Invalid focus distance {}, using 1.0", self.focus_dist);
            1.0
        };

        let vfov = if self.vfov.is_finite() && self.vfov > 0.0 && self.vfov < 180.0 {
            self.vfov
        } else {
            warn!("Invalid vertical field of view {}, using {}", self.vfov, FALLBACK_VFOV);
            FALLBACK_VFOV
        };

        self.center = self.lookfrom;

        // Determine viewport dimensions
        let theta = vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h * focus_dist;
        let viewport_width = viewport_height * (self.image_width as f64 / self.image_height as f64);

        // Orthonormal camera frame; fall back to any valid frame when degenerate
        self.w = (self.lookfrom - self.lookat)
            .try_normalize()
            .unwrap_or(DVec3::Z);
        self.u = self
            .vup
            .cross(self.w)
            .try_normalize()
            .unwrap_or_else(|| self.w.any_orthonormal_vector());
        self.v = self.w.cross(self.u);

        // Vectors across the horizontal and down the vertical viewport edges
        let viewport_u = viewport_width * self.u;
        let viewport_v = viewport_height * -self.v;

        self.pixel_delta_u = viewport_u / self.image_width as f64;
        self.pixel_delta_v = viewport_v / self.image_height as f64;

        let viewport_upper_left =
            self.center - (focus_dist * self.w) - viewport_u / 2.0 - viewport_v / 2.0;
        self.pixel00_loc = viewport_upper_left + 0.5 * (self.pixel_delta_u + self.pixel_delta_v);

        let mut defocus_radius = 0.0;
        if self.aperture > 0.0 {
            defocus_radius = focus_dist * (self.aperture.to_radians() / 2.0).tan();
            if !defocus_radius.is_finite() || defocus_radius < 0.0 {
                warn!("Invalid aperture {}, using a pinhole", self.aperture);
                defocus_radius = 0.0;
            }
        }
        self.defocus_disk_u = self.u * defocus_radius;
        self.defocus_disk_v = self.v * defocus_radius;

        debug!(
            "Viewport {:.3}x{:.3} at focus distance {}, pixel00 {:?}, defocus radius {:.4}",
            viewport_width, viewport_height, focus_dist, self.pixel00_loc, defocus_radius
        );

        self.state = RenderState::Ready;
    }

    /// Average of `samples_per_pixel` path estimates through pixel (i, j).
    pub fn pixel_color<R: Rng + ?Sized>(
        &self,
        i: u32,
        j: u32,
        world: &dyn Hittable,
        rng: &mut R,
    ) -> Color {
        let mut pixel_color = Color::ZERO;
        for _sample in 0..self.samples {
            let r = self.get_ray(i, j, rng);
            pixel_color += self.ray_color(&r, world, self.max_depth, rng);
        }
        pixel_color * self.pixel_samples_scale
    }

    /// Generate a ray through a pixel with random sampling.
    ///
    /// Jitters the target inside the pixel square and, when the aperture is
    /// open, starts the ray from a random point on the lens disk.
    pub fn get_ray<R: Rng + ?Sized>(&self, i: u32, j: u32, rng: &mut R) -> Ray {
        let offset = sample_square(rng);
        let pixel_sample = self.pixel00_loc
            + ((i as f64 + offset.x) * self.pixel_delta_u)
            + ((j as f64 + offset.y) * self.pixel_delta_v);

        let ray_origin = if self.aperture > 0.0 {
            self.defocus_disk_sample(rng)
        } else {
            self.center
        };
        let ray_direction = pixel_sample - ray_origin;

        Ray::new(ray_origin, ray_direction)
    }

    /// Sample random point on the defocus disk for depth-of-field blur.
    fn defocus_disk_sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Point3 {
        let p = random::random_in_unit_disk(rng);
        self.center + (p.x * self.defocus_disk_u) + (p.y * self.defocus_disk_v)
    }

    /// Trace a ray and compute its color contribution.
    ///
    /// Recursively follows ray bounces through the scene, sampling materials
    /// to determine color and next ray direction. Returns sky color if no hit.
    pub fn ray_color<R: Rng + ?Sized>(
        &self,
        r: &Ray,
        world: &dyn Hittable,
        depth: u32,
        rng: &mut R,
    ) -> Color {
        // If we've exceeded the ray bounce limit, no more light is gathered
        if depth == 0 {
            return Color::ZERO;
        }

        if let Some(rec) = world.hit(r, Interval::new(SHADOW_ACNE_EPSILON, f64::INFINITY)) {
            return match rec.material.scatter(r, &rec, rng) {
                Some((attenuation, scattered)) => {
                    attenuation * self.ray_color(&scattered, world, depth - 1, rng)
                }
                None => Color::ZERO,
            };
        }

        background(r)
    }

    fn progress_bar(&self) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(self.image_height as u64);
        let style = ProgressStyle::default_bar()
            .template("{bar:40} {pos}/{len} scanlines ETA: {eta}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        pb.set_style(style);
        pb
    }
}

/// Random offset within the [-0.5, 0.5) pixel square.
fn sample_square<R: Rng + ?Sized>(rng: &mut R) -> DVec3 {
    DVec3::new(
        random::random_f64(rng) - 0.5,
        random::random_f64(rng) - 0.5,
        0.0,
    )
}

/// Sky gradient seen by rays that escape the scene.
///
/// White at the bottom blending to light blue at the top, by the unit
/// direction's y component.
pub fn background(r: &Ray) -> Color {
    let unit_direction = r.direction.normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    (1.0 - a) * Color::new(1.0, 1.0, 1.0) + a * Color::new(0.5, 0.7, 1.0)
}
