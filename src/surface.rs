use log::{info, warn};

use crate::compositor::Compositor;
use crate::config::EngineConfig;
use crate::error::SurfaceError;
use crate::input::{TouchEvent, TouchPhase};
use crate::raster::PixelBuffer;
use crate::style::{Argb, LineCap, StrokeStyle};
use crate::tracker::StrokeTracker;

/// The finger-painting surface: routes touch events to per-pointer strokes,
/// commits them on release and renders the committed raster with every
/// in-progress stroke on top.
///
/// Input never fails. Events for pointers that have no contact down are
/// dropped.
#[derive(Debug)]
pub struct DrawingSurface {
    tracker: StrokeTracker,
    compositor: Compositor,
    style: StrokeStyle,
    redraw_requested: bool,
}

impl DrawingSurface {
    pub fn new(config: &EngineConfig, width: i32, height: i32) -> Result<Self, SurfaceError> {
        Ok(Self {
            tracker: StrokeTracker::from_config(config),
            compositor: Compositor::new(config, width, height)?,
            style: config.pen.clone(),
            redraw_requested: true,
        })
    }

    pub fn with_size(width: i32, height: i32) -> Result<Self, SurfaceError> {
        Self::new(&EngineConfig::default(), width, height)
    }

    pub fn handle_event(&mut self, event: TouchEvent) {
        let TouchEvent {
            pointer_id,
            position,
            phase,
        } = event;

        match phase {
            TouchPhase::Down => self.tracker.begin(pointer_id, position),
            TouchPhase::Move => {
                self.tracker.extend(pointer_id, position);
            }
            TouchPhase::Up => {
                if let Some(stroke) = self.tracker.end(pointer_id) {
                    self.compositor.commit(&stroke, &self.style);
                }
            }
        }
        self.redraw_requested = true;
    }

    /// Handle every record delivered for one frame, in order.
    pub fn handle_events(&mut self, events: impl IntoIterator<Item = TouchEvent>) {
        for event in events {
            self.handle_event(event);
        }
    }

    /// The persistent raster with all in-progress strokes drawn on top in the current style.
    pub fn render(&self) -> PixelBuffer {
        self.compositor
            .compose(self.tracker.active_strokes().map(|(_, stroke)| stroke), &self.style)
    }

    /// Copy of the committed raster only, for export.
    pub fn raster_snapshot(&self) -> PixelBuffer {
        self.compositor.snapshot()
    }

    /// Returns true once after anything visible may have changed.
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }

    pub fn on_surface_size_changed(&mut self, width: i32, height: i32) -> Result<(), SurfaceError> {
        self.compositor.resize(width, height)?;
        self.redraw_requested = true;
        Ok(())
    }

    pub fn on_clear(&mut self) {
        self.compositor.clear(&mut self.tracker);
        self.redraw_requested = true;
    }

    pub fn color(&self) -> Argb {
        self.style.color
    }

    pub fn set_color(&mut self, color: Argb) {
        self.style.color = color;
        self.redraw_requested = true;
    }

    pub fn line_width(&self) -> f32 {
        self.style.width
    }

    /// Negative widths are clamped to zero, non-finite ones are ignored.
    pub fn set_line_width(&mut self, width: f32) {
        if !width.is_finite() {
            warn!("Ignoring non-finite line width {}", width);
            return;
        }
        self.style.width = width.max(0.0);
        self.redraw_requested = true;
    }

    pub fn line_cap(&self) -> LineCap {
        self.style.cap
    }

    pub fn set_line_cap(&mut self, cap: LineCap) {
        self.style.cap = cap;
        self.redraw_requested = true;
    }

    pub fn is_erasing(&self) -> bool {
        self.style.eraser
    }

    pub fn set_erasing(&mut self, erasing: bool) {
        if self.style.eraser != erasing {
            info!("Eraser {}", if erasing { "on" } else { "off" });
        }
        self.style.eraser = erasing;
        self.redraw_requested = true;
    }

    pub fn style(&self) -> &StrokeStyle {
        &self.style
    }

    pub fn set_style(&mut self, style: StrokeStyle) {
        self.set_color(style.color);
        self.set_line_width(style.width);
        self.set_line_cap(style.cap);
        self.set_erasing(style.eraser);
    }

    pub fn width(&self) -> u32 {
        self.compositor.width()
    }

    pub fn height(&self) -> u32 {
        self.compositor.height()
    }

    pub fn tracker(&self) -> &StrokeTracker {
        &self.tracker
    }
}
