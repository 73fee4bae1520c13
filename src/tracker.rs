use egui::Pos2;
use log::{debug, trace, warn};

use crate::config::{DEFAULT_MAX_POINTERS, EngineConfig, MAX_POINTERS_LIMIT};
use crate::smoother::StrokeSmoother;
use crate::stroke::Stroke;

/// Identifies one touch contact. Unique while the contact is down, reused afterwards.
pub type PointerId = u32;

/// The last accepted sample of a contact, truncated to whole pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LastPoint {
    pub x: i32,
    pub y: i32,
}

impl LastPoint {
    pub fn truncate(pos: Pos2) -> Self {
        Self {
            x: pos.x as i32,
            y: pos.y as i32,
        }
    }

    pub fn to_pos2(self) -> Pos2 {
        Pos2::new(self.x as f32, self.y as f32)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ContactPhase {
    /// Slot allocated, no contact down. Moves and releases are ignored.
    #[default]
    Idle,
    Active,
}

#[derive(Debug)]
struct StrokeSlot {
    stroke: Stroke,
    last_point: LastPoint,
    /// Most recent sample, including ones dropped as jitter
    last_raw: Pos2,
    phase: ContactPhase,
}

/// Per-pointer stroke state, stored in slots indexed by pointer id.
///
/// A slot is created by the first `begin` for an id and stays allocated
/// until [`clear_all`](Self::clear_all), so reused ids find their slot again.
#[derive(Debug)]
pub struct StrokeTracker {
    slots: Vec<Option<StrokeSlot>>,
    smoother: StrokeSmoother,
    max_pointers: usize,
}

impl Default for StrokeTracker {
    fn default() -> Self {
        Self::new(StrokeSmoother::default(), DEFAULT_MAX_POINTERS)
    }
}

impl StrokeTracker {
    /// `max_pointers` is capped at [`MAX_POINTERS_LIMIT`].
    pub fn new(smoother: StrokeSmoother, max_pointers: usize) -> Self {
        Self {
            slots: Vec::new(),
            smoother,
            max_pointers: max_pointers.min(MAX_POINTERS_LIMIT),
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(StrokeSmoother::from_config(config), config.max_pointers)
    }

    fn slot(&self, id: PointerId) -> Option<&StrokeSlot> {
        self.slots.get(id as usize).and_then(Option::as_ref)
    }

    fn active_slot_mut(&mut self, id: PointerId) -> Option<&mut StrokeSlot> {
        self.slots
            .get_mut(id as usize)
            .and_then(Option::as_mut)
            .filter(|slot| slot.phase == ContactPhase::Active)
    }

    /// Contact down. Starts a new contour at `pos`, reusing the pointer's slot if it has one.
    pub fn begin(&mut self, id: PointerId, pos: Pos2) {
        let index = id as usize;
        if index >= self.max_pointers {
            warn!("Ignoring pointer {} beyond slot capacity {}", id, self.max_pointers);
            return;
        }
        if index >= self.slots.len() {
            self.slots.resize_with(index + 1, || None);
        }

        let slot = self.slots[index].get_or_insert_with(|| StrokeSlot {
            stroke: Stroke::new(),
            last_point: LastPoint::default(),
            last_raw: pos,
            phase: ContactPhase::Idle,
        });
        slot.stroke.move_to(pos);
        slot.last_point = LastPoint::truncate(pos);
        slot.last_raw = pos;
        slot.phase = ContactPhase::Active;
        debug!("Pointer {} down at ({}, {})", id, pos.x, pos.y);
    }

    /// Contact move. Returns true if a segment was appended.
    pub fn extend(&mut self, id: PointerId, pos: Pos2) -> bool {
        let smoother = self.smoother;
        let Some(slot) = self.active_slot_mut(id) else {
            return false;
        };

        slot.last_raw = pos;
        let anchor = slot.last_point.to_pos2();
        if smoother.is_jitter(anchor, pos) {
            trace!("Pointer {} sample ({}, {}) within tolerance", id, pos.x, pos.y);
            return false;
        }

        slot.stroke.quad_to(smoother.segment(anchor, pos));
        slot.last_point = LastPoint::truncate(pos);
        trace!("Pointer {} segment towards ({}, {})", id, pos.x, pos.y);
        true
    }

    /// Contact up. Hands back a copy of the finished stroke and leaves the
    /// slot idle with an empty path that keeps its allocation. Returns `None` if the pointer has no contact down,
    /// so a stroke can't be handed out twice.
    pub fn end(&mut self, id: PointerId) -> Option<Stroke> {
        let smoother = self.smoother;
        let slot = self.active_slot_mut(id)?;

        if let Some(path_end) = slot.stroke.current_point() {
            if let Some(segment) = smoother.finish(slot.last_point.to_pos2(), path_end, slot.last_raw) {
                slot.stroke.quad_to(segment);
            }
        }

        slot.phase = ContactPhase::Idle;
        let finished = slot.stroke.clone();
        slot.stroke.reset();
        debug!("Pointer {} up with {} segments", id, finished.segment_count());
        Some(finished)
    }

    pub fn clear_all(&mut self) {
        self.slots.clear();
    }

    /// Whether the pointer has a slot, active or not
    pub fn contains(&self, id: PointerId) -> bool {
        self.slot(id).is_some()
    }

    pub fn is_active(&self, id: PointerId) -> bool {
        self.slot(id).is_some_and(|slot| slot.phase == ContactPhase::Active)
    }

    pub fn phase(&self, id: PointerId) -> Option<ContactPhase> {
        self.slot(id).map(|slot| slot.phase)
    }

    pub fn stroke(&self, id: PointerId) -> Option<&Stroke> {
        self.slot(id).map(|slot| &slot.stroke)
    }

    pub fn last_point(&self, id: PointerId) -> Option<LastPoint> {
        self.slot(id).map(|slot| slot.last_point)
    }

    /// Strokes of every contact currently down, in pointer id order.
    pub fn active_strokes(&self) -> impl Iterator<Item = (PointerId, &Stroke)> + '_ {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.as_ref()
                .filter(|slot| slot.phase == ContactPhase::Active)
                .map(|slot| (index as PointerId, &slot.stroke))
        })
    }

    pub fn active_count(&self) -> usize {
        self.active_strokes().count()
    }
}
