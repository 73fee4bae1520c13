use thiserror::Error;

/// Errors reported by the drawing surface. Input events never produce one;
/// these only come from sizing the persistent raster.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SurfaceError {
    #[error("Invalid surface dimensions {width}x{height}: both must be positive")]
    InvalidDimensions { width: i32, height: i32 },

    #[error("Raster {width}x{height} would require {bytes} bytes (limit {limit})")]
    RasterTooLarge {
        width: i32,
        height: i32,
        bytes: u64,
        limit: u64,
    },

    #[error("Failed to allocate a {width}x{height} raster")]
    RasterAllocation { width: i32, height: i32 },
}

/// Errors that can occur while loading an engine config
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}
