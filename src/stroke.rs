use egui::Pos2;
use tiny_skia::PathBuilder;

/// One quadratic curve segment, starting wherever the previous one ended.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuadSegment {
    pub ctrl: Pos2,
    pub end: Pos2,
}

/// A run of connected segments beginning at `start`.
#[derive(Clone, Debug, PartialEq)]
pub struct Contour {
    start: Pos2,
    segments: Vec<QuadSegment>,
}

impl Contour {
    pub fn start(&self) -> Pos2 {
        self.start
    }

    pub fn segments(&self) -> &[QuadSegment] {
        &self.segments
    }

    /// Where the next segment of this contour would begin
    pub fn end(&self) -> Pos2 {
        self.segments.last().map_or(self.start, |segment| segment.end)
    }
}

/// The path drawn by one touch contact.
///
/// A stroke usually holds a single contour. A pointer that goes down again
/// before its previous contact was released starts a second contour in the
/// same stroke.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Stroke {
    contours: Vec<Contour>,
}

impl Stroke {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new contour at `point`
    pub fn move_to(&mut self, point: Pos2) {
        self.contours.push(Contour {
            start: point,
            segments: Vec::new(),
        });
    }

    /// Append a segment to the current contour. On an empty stroke the
    /// contour starts at the segment's control point.
    pub fn quad_to(&mut self, segment: QuadSegment) {
        match self.contours.last_mut() {
            Some(contour) => contour.segments.push(segment),
            None => self.contours.push(Contour {
                start: segment.ctrl,
                segments: vec![segment],
            }),
        }
    }

    /// Drop all geometry, keeping the allocation.
    pub fn reset(&mut self) {
        self.contours.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.contours.is_empty()
    }

    pub fn contours(&self) -> &[Contour] {
        &self.contours
    }

    pub fn segment_count(&self) -> usize {
        self.contours.iter().map(|contour| contour.segments.len()).sum()
    }

    /// Number of path points: every contour start plus every segment end.
    pub fn point_count(&self) -> usize {
        self.contours.iter().map(|contour| 1 + contour.segments.len()).sum()
    }

    pub fn current_point(&self) -> Option<Pos2> {
        self.contours.last().map(Contour::end)
    }

    /// Returns `None` when there is nothing to stroke, e.g. a contact that
    /// went down and up without moving past the tolerance.
    pub(crate) fn to_skia_path(&self) -> Option<tiny_skia::Path> {
        let mut builder = PathBuilder::new();
        for contour in &self.contours {
            if contour.segments.is_empty() {
                continue;
            }
            builder.move_to(contour.start.x, contour.start.y);
            for segment in &contour.segments {
                builder.quad_to(segment.ctrl.x, segment.ctrl.y, segment.end.x, segment.end.y);
            }
        }
        builder.finish()
    }
}
