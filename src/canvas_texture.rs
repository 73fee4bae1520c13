use egui::{Context, TextureHandle, TextureOptions};

use crate::raster::PixelBuffer;

/// GPU copy of the latest rendered frame. The texture is allocated on the
/// first upload and overwritten in place afterwards.
#[derive(Default)]
pub struct CanvasTexture {
    handle: Option<TextureHandle>,
    /// Number of uploads so far
    version: u64,
}

impl CanvasTexture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upload(&mut self, ctx: &Context, frame: &PixelBuffer) {
        let image = frame.to_color_image();
        match &mut self.handle {
            Some(handle) => handle.set(image, TextureOptions::NEAREST),
            None => {
                self.handle = Some(ctx.load_texture("finger_paint_canvas", image, TextureOptions::NEAREST));
            }
        }
        self.version += 1;
    }

    pub fn texture(&self) -> Option<&TextureHandle> {
        self.handle.as_ref()
    }

    pub fn is_uploaded(&self) -> bool {
        self.handle.is_some()
    }

    pub fn version(&self) -> u64 {
        self.version
    }
}
