//! Errors raised while writing rendered images.

use thiserror::Error;

/// Failure of an image sink.
///
/// Rendering itself cannot fail; only handing pixels to the output can.
#[derive(Error, Debug)]
pub enum OutputError {
    /// The destination rejected a write
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// PNG encoding or saving failed
    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    /// Output path has an extension no encoder handles
    #[error("Unsupported output format '{0}' (expected .ppm, .png or -)")]
    UnsupportedFormat(String),

    /// `write_pixel` or `finish` called before `begin`
    #[error("Pixel written before the image was started")]
    NotStarted,

    /// Number of pixels written does not match the image size
    #[error("Pixel count mismatch: expected {expected} pixels, got {written}")]
    PixelCount {
        /// width * height given to `begin`
        expected: u64,
        /// pixels received so far
        written: u64,
    },
}

/// Result alias for output operations.
pub type Result<T> = std::result::Result<T, OutputError>;
