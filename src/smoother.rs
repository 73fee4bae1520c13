//! Quadratic midpoint smoothing.
//!
//! Each accepted sample emits a curve whose control point is the previous
//! sample and whose end is the midpoint between the two, so the path never
//! kinks at a noisy sample. Only the previous point is needed.

use egui::Pos2;

use crate::config::{DEFAULT_TOUCH_TOLERANCE, EngineConfig, TrailingSegment};
use crate::stroke::QuadSegment;

pub fn midpoint(a: Pos2, b: Pos2) -> Pos2 {
    Pos2::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeSmoother {
    tolerance: f32,
    trailing: TrailingSegment,
}

impl Default for StrokeSmoother {
    fn default() -> Self {
        Self::new(DEFAULT_TOUCH_TOLERANCE, TrailingSegment::Truncate)
    }
}

impl StrokeSmoother {
    pub fn new(tolerance: f32, trailing: TrailingSegment) -> Self {
        Self { tolerance, trailing }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.touch_tolerance, config.trailing_segment)
    }

    /// True when `raw` moved less than the tolerance from `anchor` on both axes.
    pub fn is_jitter(&self, anchor: Pos2, raw: Pos2) -> bool {
        (raw.x - anchor.x).abs() < self.tolerance && (raw.y - anchor.y).abs() < self.tolerance
    }

    pub fn segment(&self, anchor: Pos2, raw: Pos2) -> QuadSegment {
        QuadSegment {
            ctrl: anchor,
            end: midpoint(raw, anchor),
        }
    }

    /// The closing segment for a released contact, if the policy asks for one.
    pub fn finish(&self, anchor: Pos2, path_end: Pos2, last_raw: Pos2) -> Option<QuadSegment> {
        match self.trailing {
            TrailingSegment::Truncate => None,
            TrailingSegment::Extend => (last_raw != path_end).then_some(QuadSegment {
                ctrl: anchor,
                end: last_raw,
            }),
        }
    }
}
