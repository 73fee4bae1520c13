use egui::Color32;
use serde::{Deserialize, Serialize};

/// A non-premultiplied color packed as `0xAARRGGBB`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Argb(pub u32);

impl Argb {
    pub const BLACK: Self = Self(0xFF00_0000);
    pub const WHITE: Self = Self(0xFFFF_FFFF);
    pub const TRANSPARENT: Self = Self(0);

    pub const fn from_components(alpha: u8, red: u8, green: u8, blue: u8) -> Self {
        Self(((alpha as u32) << 24) | ((red as u32) << 16) | ((green as u32) << 8) | blue as u32)
    }

    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn blue(self) -> u8 {
        self.0 as u8
    }

    pub fn to_color32(self) -> Color32 {
        Color32::from_rgba_unmultiplied(self.red(), self.green(), self.blue(), self.alpha())
    }

    pub fn from_color32(color: Color32) -> Self {
        let [r, g, b, a] = color.to_srgba_unmultiplied();
        Self::from_components(a, r, g, b)
    }

    pub(crate) fn to_skia(self) -> tiny_skia::Color {
        tiny_skia::Color::from_rgba8(self.red(), self.green(), self.blue(), self.alpha())
    }
}

impl From<u32> for Argb {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<Argb> for u32 {
    fn from(value: Argb) -> Self {
        value.0
    }
}

/// Shape drawn at the open ends of a stroke.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineCap {
    Butt,
    #[default]
    Round,
    Square,
}

impl LineCap {
    pub(crate) fn to_skia(self) -> tiny_skia::LineCap {
        match self {
            Self::Butt => tiny_skia::LineCap::Butt,
            Self::Round => tiny_skia::LineCap::Round,
            Self::Square => tiny_skia::LineCap::Square,
        }
    }
}

/// The current pen. Read whenever a stroke is rasterized, so a change only
/// affects pixels drawn afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrokeStyle {
    pub color: Argb,
    /// Line width in pixels. Zero draws a one pixel hairline.
    pub width: f32,
    pub cap: LineCap,
    /// Draw with the eraser instead of `color`. What erasing means is decided
    /// by the compositor's [`EraseMode`](crate::config::EraseMode).
    pub eraser: bool,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: Argb::BLACK,
            width: 7.0,
            cap: LineCap::Round,
            eraser: false,
        }
    }
}

impl StrokeStyle {
    pub(crate) fn to_skia_stroke(&self) -> tiny_skia::Stroke {
        tiny_skia::Stroke {
            width: self.width,
            line_cap: self.cap.to_skia(),
            ..Default::default()
        }
    }
}
