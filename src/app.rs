use crate::canvas_texture::CanvasTexture;
use crate::config::EngineConfig;
use crate::input::InputHandler;
use crate::panels::{central_panel, tools_panel};
use crate::style::{Argb, StrokeStyle};
use crate::surface::DrawingSurface;

/// Environment variable naming an engine config JSON file
pub const CONFIG_ENV_VAR: &str = "FINGER_PAINT_CONFIG";

/// We derive Deserialize/Serialize so the pen survives restarts.
#[derive(serde::Deserialize, serde::Serialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct PaintApp {
    pen: StrokeStyle,
    export_path: String,

    #[serde(skip)]
    config: EngineConfig,
    // Created once the canvas has a size
    #[serde(skip)]
    surface: Option<DrawingSurface>,
    #[serde(skip)]
    input: InputHandler,
    #[serde(skip)]
    canvas: CanvasTexture,
    #[serde(skip)]
    status: Option<String>,
    // Last canvas size the surface refused, so it isn't retried every frame
    #[serde(skip)]
    rejected_size: Option<(i32, i32)>,
}

impl Default for PaintApp {
    fn default() -> Self {
        let config = EngineConfig::default();
        Self {
            pen: config.pen.clone(),
            export_path: "finger_paint.png".to_owned(),
            config,
            surface: None,
            input: InputHandler::default(),
            canvas: CanvasTexture::new(),
            status: None,
            rejected_size: None,
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn load_config() -> EngineConfig {
    match std::env::var(CONFIG_ENV_VAR) {
        Ok(path) => EngineConfig::load(&path).unwrap_or_else(|err| {
            log::warn!("Falling back to default config: {}", err);
            EngineConfig::default()
        }),
        Err(_) => EngineConfig::default(),
    }
}

#[cfg(target_arch = "wasm32")]
fn load_config() -> EngineConfig {
    EngineConfig::default()
}

impl PaintApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let config = load_config();
        let restored: Option<Self> = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY));

        let mut app = restored.unwrap_or_else(|| Self {
            pen: config.pen.clone(),
            ..Default::default()
        });
        app.config = config;
        app
    }

    pub fn pen(&self) -> &StrokeStyle {
        &self.pen
    }

    pub fn set_color(&mut self, color: Argb) {
        self.pen.color = color;
        if let Some(surface) = &mut self.surface {
            surface.set_color(color);
        }
    }

    pub fn set_line_width(&mut self, width: f32) {
        self.pen.width = width;
        if let Some(surface) = &mut self.surface {
            surface.set_line_width(width);
        }
    }

    pub fn set_erasing(&mut self, erasing: bool) {
        self.pen.eraser = erasing;
        if let Some(surface) = &mut self.surface {
            surface.set_erasing(erasing);
        }
    }

    pub fn clear(&mut self) {
        if let Some(surface) = &mut self.surface {
            surface.on_clear();
        }
        self.status = None;
    }

    pub fn export_path_mut(&mut self) -> &mut String {
        &mut self.export_path
    }

    pub fn save_png(&mut self) {
        let Some(surface) = &self.surface else {
            return;
        };
        let message = match surface.raster_snapshot().save_png(&self.export_path) {
            Ok(()) => {
                log::info!("Saved canvas to {}", self.export_path);
                format!("Image saved to {}", self.export_path)
            }
            Err(err) => {
                log::error!("Failed to save canvas to {}: {}", self.export_path, err);
                format!("Image not saved: {}", err)
            }
        };
        self.status = Some(message);
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn active_contacts(&self) -> usize {
        self.surface
            .as_ref()
            .map_or(0, |surface| surface.tracker().active_count())
    }

    /// Create the surface on first layout and resize it when the canvas
    /// rect changes. A zero-sized canvas (e.g. a minimized window) is skipped
    /// so the drawing survives. A size that was refused once is not retried
    /// until the canvas changes size again.
    pub(crate) fn layout_canvas(&mut self, rect: egui::Rect) {
        self.input.set_canvas_rect(rect);
        let width = rect.width().round() as i32;
        let height = rect.height().round() as i32;
        if width <= 0 || height <= 0 || self.rejected_size == Some((width, height)) {
            return;
        }

        let result = match &mut self.surface {
            Some(surface) => {
                if surface.width() as i32 == width && surface.height() as i32 == height {
                    return;
                }
                surface.on_surface_size_changed(width, height)
            }
            None => DrawingSurface::new(&self.config, width, height).map(|mut surface| {
                surface.set_style(self.pen.clone());
                self.surface = Some(surface);
            }),
        };

        match result {
            Ok(()) => self.rejected_size = None,
            Err(err) => {
                log::error!("Canvas layout to {}x{} failed: {}", width, height, err);
                self.rejected_size = Some((width, height));
            }
        }
    }

    pub(crate) fn handle_input(&mut self, ctx: &egui::Context, canvas_layer: egui::LayerId) {
        let events = self.input.process_input(ctx, canvas_layer);
        if let Some(surface) = &mut self.surface {
            surface.handle_events(events);
        }
    }

    pub(crate) fn paint_canvas(&mut self, painter: &egui::Painter, rect: egui::Rect) {
        let Some(surface) = &mut self.surface else {
            return;
        };
        if surface.take_redraw_request() || !self.canvas.is_uploaded() {
            self.canvas.upload(painter.ctx(), &surface.render());
        }

        if let Some(texture) = self.canvas.texture() {
            let size = egui::vec2(surface.width() as f32, surface.height() as f32);
            painter.image(
                texture.id(),
                egui::Rect::from_min_size(rect.min, size),
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                egui::Color32::WHITE,
            );
        }
    }
}

impl eframe::App for PaintApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, self);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        tools_panel(self, ctx);
        central_panel(self, ctx);
    }
}
