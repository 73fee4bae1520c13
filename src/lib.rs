#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod canvas_texture;
pub mod compositor;
pub mod config;
pub mod error;
pub mod input;
pub mod panels;
pub mod raster;
pub mod shared;
pub mod smoother;
pub mod stroke;
pub mod style;
pub mod surface;
pub mod tracker;

pub use app::PaintApp;
pub use compositor::Compositor;
pub use config::{EngineConfig, EraseMode, TrailingSegment};
pub use error::{ConfigError, SurfaceError};
pub use input::{InputHandler, TouchEvent, TouchPhase};
pub use raster::PixelBuffer;
pub use shared::SharedSurface;
pub use smoother::StrokeSmoother;
pub use stroke::{Contour, QuadSegment, Stroke};
pub use style::{Argb, LineCap, StrokeStyle};
pub use surface::DrawingSurface;
pub use tracker::{ContactPhase, LastPoint, PointerId, StrokeTracker};
