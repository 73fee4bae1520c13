use log::{debug, info, warn};
use tiny_skia::{BlendMode, Paint, Pixmap, Transform};

use crate::config::{EngineConfig, EraseMode};
use crate::error::SurfaceError;
use crate::raster::{PixelBuffer, new_raster};
use crate::stroke::Stroke;
use crate::style::{Argb, StrokeStyle};
use crate::tracker::StrokeTracker;

/// Owns the persistent raster and merges finished strokes into it.
#[derive(Debug)]
pub struct Compositor {
    raster: Pixmap,
    background: Argb,
    erase_mode: EraseMode,
    max_raster_bytes: u64,
}

impl Compositor {
    pub fn new(config: &EngineConfig, width: i32, height: i32) -> Result<Self, SurfaceError> {
        let raster = new_raster(width, height, config.background, config.max_raster_bytes)?;
        Ok(Self {
            raster,
            background: config.background,
            erase_mode: config.erase_mode,
            max_raster_bytes: config.max_raster_bytes,
        })
    }

    pub fn width(&self) -> u32 {
        self.raster.width()
    }

    pub fn height(&self) -> u32 {
        self.raster.height()
    }

    /// Rasterize `stroke` onto the persistent raster. Committing the same
    /// stroke twice draws it twice.
    pub fn commit(&mut self, stroke: &Stroke, style: &StrokeStyle) {
        let drawn = rasterize(&mut self.raster, stroke, style, self.background, self.erase_mode);
        if drawn {
            debug!("Committed stroke with {} segments", stroke.segment_count());
        }
    }

    /// Reset the raster to the background and drop every tracked stroke.
    pub fn clear(&mut self, tracker: &mut StrokeTracker) {
        self.raster.fill(self.background.to_skia());
        tracker.clear_all();
        info!("Cleared {}x{} raster", self.width(), self.height());
    }

    /// Replace the raster with a blank one. Committed content is lost. On
    /// error the current raster is kept as is.
    pub fn resize(&mut self, width: i32, height: i32) -> Result<(), SurfaceError> {
        match new_raster(width, height, self.background, self.max_raster_bytes) {
            Ok(raster) => {
                self.raster = raster;
                info!("Resized raster to {}x{}", width, height);
                Ok(())
            }
            Err(err) => {
                warn!("Rejected raster resize: {}", err);
                Err(err)
            }
        }
    }

    pub fn snapshot(&self) -> PixelBuffer {
        PixelBuffer::new(self.raster.clone())
    }

    /// A copy of the raster with `strokes` drawn on top. The raster itself is untouched.
    pub fn compose<'a>(
        &self,
        strokes: impl IntoIterator<Item = &'a Stroke>,
        style: &StrokeStyle,
    ) -> PixelBuffer {
        let mut frame = self.raster.clone();
        for stroke in strokes {
            rasterize(&mut frame, stroke, style, self.background, self.erase_mode);
        }
        PixelBuffer::new(frame)
    }
}

fn paint_for(style: &StrokeStyle, background: Argb, erase_mode: EraseMode) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.anti_alias = true;
    match (style.eraser, erase_mode) {
        (false, _) => paint.set_color(style.color.to_skia()),
        (true, EraseMode::PaintBackground) => paint.set_color(background.to_skia()),
        (true, EraseMode::Transparent) => {
            paint.set_color(Argb::TRANSPARENT.to_skia());
            paint.blend_mode = BlendMode::Clear;
        }
    }
    paint
}

/// Returns false when the stroke has no drawable geometry.
fn rasterize(
    target: &mut Pixmap,
    stroke: &Stroke,
    style: &StrokeStyle,
    background: Argb,
    erase_mode: EraseMode,
) -> bool {
    let Some(path) = stroke.to_skia_path() else {
        return false;
    };
    let paint = paint_for(style, background, erase_mode);
    target.stroke_path(&path, &paint, &style.to_skia_stroke(), Transform::identity(), None);
    true
}
