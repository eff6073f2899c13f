use std::sync::Arc;

use chromaweekend::camera::background;
use chromaweekend::error::Result;
use chromaweekend::{
    Camera, Color, HittableList, ImageSink, Material, Point3, PpmWriter, Ray, Sphere,
};

/// Sink keeping every pixel in memory, row-major.
#[derive(Default)]
struct MemorySink {
    width: u32,
    pixels: Vec<Color>,
}

impl MemorySink {
    fn pixel(&self, x: u32, y: u32) -> Color {
        self.pixels[(y * self.width + x) as usize]
    }
}

impl ImageSink for MemorySink {
    fn begin(&mut self, width: u32, _height: u32) -> Result<()> {
        self.width = width;
        Ok(())
    }

    fn write_pixel(&mut self, pixel_color: Color) -> Result<()> {
        self.pixels.push(pixel_color);
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

fn single_bounce_camera() -> Camera {
    let mut camera = Camera::new();
    camera.image_width = 21;
    camera.aspect_ratio = 1.0;
    camera.samples_per_pixel = 1;
    camera.max_depth = 1;
    camera.lookfrom = Point3::ZERO;
    camera.lookat = Point3::new(0.0, 0.0, -1.0);
    camera.seed = Some(2024);
    camera
}

fn grey_sphere_scene() -> HittableList {
    let material = Arc::new(Material::lambertian(Color::new(0.5, 0.5, 0.5)));
    HittableList::with_object(Arc::new(Sphere::new(Point3::new(0.0, 0.0, -1.0), 0.5, material)))
}

#[test]
fn sphere_darkens_center_pixel() {
    // Given: the same camera over an empty scene and a single grey sphere
    let empty = HittableList::new();
    let world = grey_sphere_scene();

    // When: both are rendered
    let mut sky = MemorySink::default();
    single_bounce_camera().render(&empty, &mut sky).unwrap();
    let mut lit = MemorySink::default();
    single_bounce_camera().render(&world, &mut lit).unwrap();

    // Then: the center pixel is strictly darker with the sphere present
    let sky_center = sky.pixel(10, 10);
    let lit_center = lit.pixel(10, 10);
    assert!(lit_center.x < sky_center.x);
    assert!(lit_center.y < sky_center.y);
    assert!(lit_center.z < sky_center.z);

    // And: corners miss the sphere and match the empty render exactly
    assert_eq!(sky.pixel(0, 0), lit.pixel(0, 0));
}

#[test]
fn empty_scene_pixels_are_background() {
    let mut camera = single_bounce_camera();
    camera.samples_per_pixel = 4;
    let mut sink = MemorySink::default();

    camera.render(&HittableList::new(), &mut sink).unwrap();

    // Every pixel lies between the horizon white and the zenith blue
    let zenith = background(&Ray::new(Point3::ZERO, Point3::Y));
    for pixel in &sink.pixels {
        assert!(pixel.x <= 1.0 + 1e-12 && pixel.x >= zenith.x - 1e-12);
        assert!(pixel.y <= 1.0 + 1e-12 && pixel.y >= zenith.y - 1e-12);
        assert!((pixel.z - 1.0).abs() < 1e-12);
    }
}

#[test]
fn ppm_output_has_header_and_one_line_per_pixel() {
    let mut camera = single_bounce_camera();
    camera.image_width = 6;
    camera.aspect_ratio = 3.0;
    camera.max_depth = 8;
    let world = grey_sphere_scene();

    let mut writer = PpmWriter::new(Vec::new());
    camera.render(&world, &mut writer).unwrap();
    let text = String::from_utf8(writer.into_inner()).unwrap();

    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("P3"));
    assert_eq!(lines.next(), Some("6 2"));
    assert_eq!(lines.next(), Some("255"));

    let pixels: Vec<&str> = lines.collect();
    assert_eq!(pixels.len(), 12);
    for line in pixels {
        let channels: Vec<u16> = line.split(' ').map(|c| c.parse().unwrap()).collect();
        assert_eq!(channels.len(), 3);
        assert!(channels.iter().all(|&c| c <= 255));
    }
}

#[test]
fn seeded_glass_scene_renders_identically() {
    let mut world = grey_sphere_scene();
    world.add(Arc::new(Sphere::new(
        Point3::new(0.6, 0.0, -1.2),
        0.3,
        Arc::new(Material::dielectric(1.5)),
    )));
    world.add(Arc::new(Sphere::new(
        Point3::new(-0.6, 0.0, -1.2),
        0.3,
        Arc::new(Material::metal(Color::new(0.8, 0.8, 0.8), 0.3)),
    )));

    let render = || {
        let mut camera = single_bounce_camera();
        camera.max_depth = 10;
        camera.samples_per_pixel = 3;
        camera.aperture = 2.0;
        camera.focus_dist = 1.0;
        let mut writer = PpmWriter::new(Vec::new());
        camera.render(&world, &mut writer).unwrap();
        writer.into_inner()
    };

    assert_eq!(render(), render());
}
