use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::style::{Argb, StrokeStyle};

/// Samples closer than this to the last accepted point, on both axes, are jitter.
pub const DEFAULT_TOUCH_TOLERANCE: f32 = 10.0;

pub const DEFAULT_MAX_POINTERS: usize = 16;

/// Upper bound for `max_pointers`. Slots are indexed by pointer id.
pub const MAX_POINTERS_LIMIT: usize = 256;

pub const DEFAULT_MAX_RASTER_BYTES: u64 = 256 * 1024 * 1024;

/// What an eraser stroke does to the pixels under it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EraseMode {
    /// Paint with the background color. Erased regions stay opaque.
    #[default]
    PaintBackground,
    /// Clear pixels to full transparency.
    Transparent,
}

/// How a stroke ends when its contact is released.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrailingSegment {
    /// Stop at the last midpoint. The final raw sample is never drawn.
    #[default]
    Truncate,
    /// Close the stroke with a segment that reaches the final raw sample.
    Extend,
}

/// Engine settings, loadable from JSON. Missing fields take their defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub touch_tolerance: f32,
    pub pen: StrokeStyle,
    pub background: Argb,
    pub erase_mode: EraseMode,
    pub trailing_segment: TrailingSegment,
    /// Pointer ids at or above this are ignored
    pub max_pointers: usize,
    pub max_raster_bytes: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            touch_tolerance: DEFAULT_TOUCH_TOLERANCE,
            pen: StrokeStyle::default(),
            background: Argb::WHITE,
            erase_mode: EraseMode::default(),
            trailing_segment: TrailingSegment::default(),
            max_pointers: DEFAULT_MAX_POINTERS,
            max_raster_bytes: DEFAULT_MAX_RASTER_BYTES,
        }
    }
}

impl EngineConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded engine config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.touch_tolerance.is_finite() || self.touch_tolerance < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "touch_tolerance must be a non-negative number, got {}",
                self.touch_tolerance
            )));
        }
        if !self.pen.width.is_finite() || self.pen.width < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "pen width must be a non-negative number, got {}",
                self.pen.width
            )));
        }
        if self.max_pointers == 0 || self.max_pointers > MAX_POINTERS_LIMIT {
            return Err(ConfigError::Invalid(format!(
                "max_pointers must be between 1 and {}, got {}",
                MAX_POINTERS_LIMIT, self.max_pointers
            )));
        }
        Ok(())
    }
}
