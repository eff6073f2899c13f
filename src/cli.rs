use clap::{Parser, ValueEnum};
use glam::DVec3;
use log::LevelFilter;

/// Custom enum for log levels that can be used with clap's ValueEnum
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convert our custom LogLevel enum to log crate's LevelFilter
impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Parse a vector written as `x,y,z`
fn parse_vec3(s: &str) -> Result<DVec3, String> {
    let parts = s
        .split(',')
        .map(|part| part.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("invalid number in '{}': {}", s, e))?;

    match parts.as_slice() {
        [x, y, z] => Ok(DVec3::new(*x, *y, *z)),
        _ => Err(format!("expected three comma-separated numbers, got '{}'", s)),
    }
}

/// Command line arguments structure using clap derive macros
#[derive(Parser, Debug)]
#[command(name = "chromaweekend")]
#[command(about = "A small sphere path tracer in Rust")]
pub struct Args {
    /// Set the logging level (defaults to "info")
    #[arg(long, default_value = "info", help = "Set the logging level")]
    pub debug_level: LogLevel,

    /// Image width in pixels
    #[arg(long, default_value = "720", help = "Image width in pixels")]
    pub width: u32,

    /// Image width divided by height
    #[arg(long, default_value_t = 16.0 / 9.0, help = "Image width divided by height")]
    pub aspect_ratio: f64,

    /// Number of samples per pixel
    #[arg(long, short = 's', default_value = "10", help = "Number of samples per pixel")]
    pub samples_per_pixel: u32,

    /// Maximum number of bounces per path
    #[arg(long, default_value = "25", help = "Maximum number of bounces per path")]
    pub max_depth: u32,

    /// Vertical field of view in degrees
    #[arg(long, default_value = "20", help = "Vertical field of view in degrees")]
    pub vfov: f64,

    /// Camera position as x,y,z
    #[arg(long, default_value = "13,2,3", value_parser = parse_vec3, allow_hyphen_values = true)]
    pub lookfrom: DVec3,

    /// Point the camera looks at as x,y,z
    #[arg(long, default_value = "0,0,0", value_parser = parse_vec3, allow_hyphen_values = true)]
    pub lookat: DVec3,

    /// Camera up direction as x,y,z
    #[arg(long, default_value = "0,1,0", value_parser = parse_vec3, allow_hyphen_values = true)]
    pub vup: DVec3,

    /// Lens aperture angle in degrees (0 disables depth of field)
    #[arg(
        long,
        default_value = "0.2",
        help = "Lens aperture angle in degrees (0 disables depth of field)"
    )]
    pub aperture: f64,

    /// Distance to the plane of perfect focus
    #[arg(long, default_value = "10", help = "Distance to the plane of perfect focus")]
    pub focus_dist: f64,

    /// Seed for scene generation and sampling (random when omitted)
    #[arg(long, help = "Seed for scene generation and sampling (random when omitted)")]
    pub seed: Option<u64>,

    /// Output file path (.ppm, .png, or - for PPM on stdout)
    #[arg(
        short,
        long,
        default_value = "output/image.ppm",
        help = "Output file path (.ppm, .png, or - for PPM on stdout)"
    )]
    pub output: String,

    /// Hide the scanline progress bar
    #[arg(long, help = "Hide the scanline progress bar")]
    pub no_progress: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_vec3() {
        assert_eq!(parse_vec3("13,2,3").unwrap(), DVec3::new(13.0, 2.0, 3.0));
        assert_eq!(parse_vec3(" -1.5, 0 ,2e1").unwrap(), DVec3::new(-1.5, 0.0, 20.0));
        assert!(parse_vec3("1,2").is_err());
        assert!(parse_vec3("1,x,3").is_err());
    }

    #[test]
    fn test_defaults_match_demo_scene() {
        let args = Args::parse_from(["chromaweekend"]);

        assert_eq!(args.width, 720);
        assert_eq!(args.samples_per_pixel, 10);
        assert_eq!(args.max_depth, 25);
        assert_eq!(args.lookfrom, DVec3::new(13.0, 2.0, 3.0));
        assert_eq!(args.output, "output/image.ppm");
        assert!(args.seed.is_none());
    }

    #[test]
    fn test_negative_vector_argument() {
        let args = Args::parse_from(["chromaweekend", "--lookfrom", "-2,2,1", "--seed", "3"]);

        assert_eq!(args.lookfrom, DVec3::new(-2.0, 2.0, 1.0));
        assert_eq!(args.seed, Some(3));
    }
}
