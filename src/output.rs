//! # Output Module
//!
//! Encoders that turn linear pixel colors into image files:
//! - ASCII PPM (`P3`), streamed pixel by pixel to any [`Write`]
//! - PNG via the `image` crate, buffered and saved on [`ImageSink::finish`]
//!
//! Both use the same 8-bit mapping: gamma 2 (square root, non-positive values
//! become 0), clamp to `[0.000, 0.999]`, then scale by 256 and truncate.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};
use log::{debug, info};

use crate::error::{OutputError, Result};
use crate::interval::Interval;
use crate::material::Color;

/// Convert a linear color component to gamma 2 space.
pub fn linear_to_gamma(linear_component: f64) -> f64 {
    if linear_component > 0.0 {
        linear_component.sqrt()
    } else {
        0.0
    }
}

/// Map a linear color to 8-bit RGB.
pub fn color_to_rgb8(pixel_color: Color) -> [u8; 3] {
    const INTENSITY: Interval = Interval::new(0.000, 0.999);

    let to_byte = |linear: f64| (256.0 * INTENSITY.clamp(linear_to_gamma(linear))) as u8;
    [
        to_byte(pixel_color.x),
        to_byte(pixel_color.y),
        to_byte(pixel_color.z),
    ]
}

/// Destination for rendered pixels.
///
/// The camera calls [`begin`](ImageSink::begin) once, then
/// [`write_pixel`](ImageSink::write_pixel) for every pixel in row-major order
/// from the top-left, then [`finish`](ImageSink::finish).
pub trait ImageSink {
    /// Start an image of the given size.
    fn begin(&mut self, width: u32, height: u32) -> Result<()>;

    /// Append the next pixel (linear color, averaged over samples).
    fn write_pixel(&mut self, pixel_color: Color) -> Result<()>;

    /// Complete the image and flush it to its destination.
    fn finish(&mut self) -> Result<()>;
}

/// Tracks how many pixels an image expects and has received.
#[derive(Debug, Default, Clone, Copy)]
struct PixelCounter {
    expected: Option<u64>,
    written: u64,
}

impl PixelCounter {
    fn start(&mut self, width: u32, height: u32) {
        self.expected = Some(width as u64 * height as u64);
        self.written = 0;
    }

    /// Count one more pixel, returning its row-major index.
    fn record(&mut self) -> Result<u64> {
        let expected = self.expected.ok_or(OutputError::NotStarted)?;
        if self.written >= expected {
            return Err(OutputError::PixelCount {
                expected,
                written: self.written + 1,
            });
        }
        self.written += 1;
        Ok(self.written - 1)
    }

    fn check_complete(&self) -> Result<()> {
        let expected = self.expected.ok_or(OutputError::NotStarted)?;
        if expected != self.written {
            return Err(OutputError::PixelCount {
                expected,
                written: self.written,
            });
        }
        Ok(())
    }
}

/// Streaming ASCII PPM encoder.
///
/// Writes the `P3` header on `begin` and one `R G B` line per pixel.
pub struct PpmWriter<W: Write> {
    out: W,
    counter: PixelCounter,
}

impl<W: Write> PpmWriter<W> {
    /// Wrap a writer.
    pub fn new(out: W) -> Self {
        Self {
            out,
            counter: PixelCounter::default(),
        }
    }

    /// Recover the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ImageSink for PpmWriter<W> {
    fn begin(&mut self, width: u32, height: u32) -> Result<()> {
        self.counter.start(width, height);
        write!(self.out, "P3\n{} {}\n255\n", width, height)?;
        Ok(())
    }

    fn write_pixel(&mut self, pixel_color: Color) -> Result<()> {
        self.counter.record()?;
        let [r, g, b] = color_to_rgb8(pixel_color);
        writeln!(self.out, "{} {} {}", r, g, b)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.counter.check_complete()?;
        self.out.flush()?;
        Ok(())
    }
}

/// PNG encoder that buffers the image and saves it on `finish`.
pub struct PngWriter {
    path: PathBuf,
    image: RgbImage,
    counter: PixelCounter,
}

impl PngWriter {
    /// Create a writer that will save to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            image: RgbImage::new(0, 0),
            counter: PixelCounter::default(),
        }
    }
}

impl ImageSink for PngWriter {
    fn begin(&mut self, width: u32, height: u32) -> Result<()> {
        self.counter.start(width, height);
        self.image = RgbImage::new(width, height);
        Ok(())
    }

    fn write_pixel(&mut self, pixel_color: Color) -> Result<()> {
        let index = self.counter.record()?;
        let width = self.image.width() as u64;
        let (x, y) = ((index % width) as u32, (index / width) as u32);
        self.image.put_pixel(x, y, Rgb(color_to_rgb8(pixel_color)));
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.counter.check_complete()?;
        self.image.save(&self.path)?;
        Ok(())
    }
}

/// Open an image sink for `output`, chosen by file extension.
///
/// `-` streams PPM to stdout. Missing parent directories are created.
pub fn open_sink(output: &str) -> Result<Box<dyn ImageSink>> {
    if output == "-" {
        debug!("Writing PPM to stdout");
        return Ok(Box::new(PpmWriter::new(BufWriter::new(io::stdout()))));
    }

    let path = Path::new(output);
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    if extension != "ppm" && extension != "png" {
        return Err(OutputError::UnsupportedFormat(output.to_string()));
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    info!("Writing image to {}", path.display());
    if extension == "png" {
        Ok(Box::new(PngWriter::new(path)))
    } else {
        let file = File::create(path)?;
        Ok(Box::new(PpmWriter::new(BufWriter::new(file))))
    }
}
