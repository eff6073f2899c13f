use env_logger::Target;
use log::LevelFilter;

/// Initialize the logger with the specified level.
///
/// Logs always go to stderr since the image itself may be streamed to stdout.
pub fn init_logger(level: LevelFilter) {
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .target(Target::Stderr)
        .format_timestamp_millis()
        .init();
}
