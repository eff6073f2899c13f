use std::sync::Arc;

use clap::Parser;
use log::{debug, error, info};
use rand::Rng;

use chromaweekend::camera::Camera;
use chromaweekend::hittable::HittableList;
use chromaweekend::material::{Color, Material};
use chromaweekend::output::open_sink;
use chromaweekend::random;
use chromaweekend::ray::Point3;
use chromaweekend::sphere::Sphere;

mod cli;
mod logger;

use cli::Args;
use logger::init_logger;

const LARGE_SPHERE_RADIUS: f64 = 1.0;
const SMALL_SPHERE_RADIUS: f64 = 0.2;

/// Create the demo scene: three large spheres on a ground sphere surrounded by a grid of small ones
fn create_scene<R: Rng + ?Sized>(rng: &mut R) -> HittableList {
    let mut world = HittableList::new();

    // Ground sphere
    let ground_material = Arc::new(Material::lambertian(Color::new(0.2, 0.2, 0.2)));
    world.add(Arc::new(Sphere::new(Point3::new(0.0, -1000.0, 0.0), 1000.0, ground_material)));

    // Three large feature spheres
    let large_centers = [
        Point3::new(0.0, 1.0, 0.0),
        Point3::new(-4.0, 1.0, 0.0),
        Point3::new(4.0, 1.0, 0.0),
    ];
    let large_materials = [
        Material::dielectric(1.5),
        Material::lambertian(Color::new(0.4, 0.2, 0.1)),
        Material::metal(Color::new(0.7, 0.6, 0.5), 0.0),
    ];
    for (center, material) in large_centers.iter().zip(large_materials) {
        world.add(Arc::new(Sphere::new(*center, LARGE_SPHERE_RADIUS, Arc::new(material))));
    }

    // Small spheres must not intersect the large ones
    let min_distance = LARGE_SPHERE_RADIUS + SMALL_SPHERE_RADIUS;
    let glass = Arc::new(Material::dielectric(1.5));

    for a in -11..11 {
        for b in -11..11 {
            let choose_mat = random::random_f64(rng);
            let center = Point3::new(
                a as f64 + 0.9 * random::random_f64(rng),
                SMALL_SPHERE_RADIUS,
                b as f64 + 0.9 * random::random_f64(rng),
            );

            if large_centers.iter().any(|large| (center - *large).length() <= min_distance) {
                continue;
            }

            let sphere_material = if choose_mat < 0.3 {
                let albedo = random::random_vec3(rng) * random::random_vec3(rng);
                Arc::new(Material::lambertian(albedo))
            } else if choose_mat < 0.6 {
                let albedo = random::random_vec3_range(rng, 0.5, 1.0);
                let fuzz = random::random_f64_range(rng, 0.0, 0.5);
                Arc::new(Material::metal(albedo, fuzz))
            } else {
                glass.clone()
            };

            world.add(Arc::new(Sphere::new(center, SMALL_SPHERE_RADIUS, sphere_material)));
        }
    }

    world
}

/// Create camera from the command line settings
fn create_camera(args: &Args) -> Camera {
    let mut camera = Camera::new();
    camera.aspect_ratio = args.aspect_ratio;
    camera.image_width = args.width;
    camera.samples_per_pixel = args.samples_per_pixel;
    camera.max_depth = args.max_depth;
    camera.vfov = args.vfov;
    camera.lookfrom = args.lookfrom;
    camera.lookat = args.lookat;
    camera.vup = args.vup;
    camera.aperture = args.aperture;
    camera.focus_dist = args.focus_dist;
    camera.seed = args.seed;
    camera.show_progress = !args.no_progress;
    camera
}

fn main() {
    let args = Args::parse();

    init_logger(args.debug_level.clone().into());

    info!("ChromaWeekend - Git Version {} ({})", env!("GIT_HASH"), env!("GIT_DATE"));
    debug!("{:?}", args);

    let mut scene_rng = random::new_rng(args.seed);
    let world = create_scene(&mut scene_rng);
    info!("Scene contains {} spheres", world.len());

    let mut camera = create_camera(&args);

    let mut sink = match open_sink(&args.output) {
        Ok(sink) => sink,
        Err(e) => {
            error!("Cannot open output '{}': {}", args.output, e);
            std::process::exit(1);
        }
    };

    match camera.render(&world, sink.as_mut()) {
        Ok(stats) => info!(
            "Rendered {}x{} at {} spp in {:.2} ms, saved to {}",
            stats.width,
            stats.height,
            stats.samples_per_pixel,
            stats.elapsed.as_secs_f64() * 1000.0,
            args.output
        ),
        Err(e) => {
            error!("Failed to write image: {}", e);
            std::process::exit(1);
        }
    }
}
