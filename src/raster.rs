use std::fmt;
use std::path::Path;

use image::{ImageFormat, ImageResult, Rgba, RgbaImage};
use tiny_skia::Pixmap;

use crate::error::SurfaceError;
use crate::style::Argb;

const BYTES_PER_PIXEL: u64 = 4;

/// Allocates a raster filled with `background`, refusing sizes that are
/// non-positive or would need more than `max_bytes`.
pub(crate) fn new_raster(
    width: i32,
    height: i32,
    background: Argb,
    max_bytes: u64,
) -> Result<Pixmap, SurfaceError> {
    if width <= 0 || height <= 0 {
        return Err(SurfaceError::InvalidDimensions { width, height });
    }

    let bytes = width as u64 * height as u64 * BYTES_PER_PIXEL;
    if bytes > max_bytes {
        return Err(SurfaceError::RasterTooLarge {
            width,
            height,
            bytes,
            limit: max_bytes,
        });
    }

    let mut pixmap = Pixmap::new(width as u32, height as u32)
        .ok_or(SurfaceError::RasterAllocation { width, height })?;
    pixmap.fill(background.to_skia());
    Ok(pixmap)
}

/// An owned, read-only copy of a raster.
///
/// Pixels are stored premultiplied, row-major RGBA8.
#[derive(Clone)]
pub struct PixelBuffer {
    pixmap: Pixmap,
}

impl PixelBuffer {
    pub(crate) fn new(pixmap: Pixmap) -> Self {
        Self { pixmap }
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn size(&self) -> [usize; 2] {
        [self.width() as usize, self.height() as usize]
    }

    /// Premultiplied RGBA8 bytes
    pub fn data(&self) -> &[u8] {
        self.pixmap.data()
    }

    /// The color at `(x, y)`, unpremultiplied. `None` outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Argb> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        self.pixmap.pixel(x, y).map(|pixel| {
            let color = pixel.demultiply();
            Argb::from_components(color.alpha(), color.red(), color.green(), color.blue())
        })
    }

    pub fn to_color_image(&self) -> egui::ColorImage {
        egui::ColorImage::from_rgba_premultiplied(self.size(), self.data())
    }

    pub fn to_rgba_image(&self) -> RgbaImage {
        let mut image = RgbaImage::new(self.width(), self.height());
        for (dst, src) in image.pixels_mut().zip(self.pixmap.pixels()) {
            let color = src.demultiply();
            *dst = Rgba([color.red(), color.green(), color.blue(), color.alpha()]);
        }
        image
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> ImageResult<()> {
        self.to_rgba_image().save_with_format(path, ImageFormat::Png)
    }
}

impl PartialEq for PixelBuffer {
    fn eq(&self, other: &Self) -> bool {
        self.width() == other.width() && self.height() == other.height() && self.data() == other.data()
    }
}

impl fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}
