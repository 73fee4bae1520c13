use std::sync::Arc;

use parking_lot::Mutex;

use crate::input::TouchEvent;
use crate::raster::PixelBuffer;
use crate::surface::DrawingSurface;

/// A [`DrawingSurface`] behind a lock, for hosts that render on a different
/// thread than the one delivering input. Every call holds the lock for its
/// whole duration, so a render never sees half of an event batch.
#[derive(Clone, Debug)]
pub struct SharedSurface {
    inner: Arc<Mutex<DrawingSurface>>,
}

impl SharedSurface {
    pub fn new(surface: DrawingSurface) -> Self {
        Self {
            inner: Arc::new(Mutex::new(surface)),
        }
    }

    pub fn handle_events(&self, events: impl IntoIterator<Item = TouchEvent>) {
        self.inner.lock().handle_events(events);
    }

    pub fn render(&self) -> PixelBuffer {
        self.inner.lock().render()
    }

    /// Render only if something changed since the last call.
    pub fn render_if_dirty(&self) -> Option<PixelBuffer> {
        let mut surface = self.inner.lock();
        surface.take_redraw_request().then(|| surface.render())
    }

    pub fn snapshot(&self) -> PixelBuffer {
        self.inner.lock().raster_snapshot()
    }

    pub fn with<R>(&self, f: impl FnOnce(&mut DrawingSurface) -> R) -> R {
        f(&mut self.inner.lock())
    }
}
