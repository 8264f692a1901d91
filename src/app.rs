use egui::{TextureHandle, TextureOptions};

use crate::engine::{Brush, DrawingEngine};
use crate::input::InputHandler;
use crate::palette;
use crate::panels::{central_panel, tools_panel};
use crate::raster::RasterSurface;
use crate::settings::Settings;

/// The freehand drawing application: a toolbar and one canvas.
pub struct FreehandApp {
    engine: DrawingEngine<RasterSurface>,
    settings: Settings,
    input: InputHandler,
    // Canvas pixels on the GPU, re-uploaded only when the raster changed
    canvas_texture: Option<TextureHandle>,
    uploaded_version: Option<u64>,
    status: Option<String>,
}

impl Default for FreehandApp {
    fn default() -> Self {
        Self::with_settings(Settings::default())
    }
}

impl FreehandApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let settings = Settings::load(cc.storage);
        log::info!(
            "Starting with brush {} width {}",
            palette::swatch_name(settings.brush.color).unwrap_or("custom"),
            settings.brush.width
        );
        Self::with_settings(settings)
    }

    pub fn with_settings(settings: Settings) -> Self {
        let surface = RasterSurface::new(0, 0, palette::BACKGROUND);
        Self {
            engine: DrawingEngine::with_brush(surface, settings.brush),
            settings,
            input: InputHandler::new(egui::Rect::NOTHING),
            canvas_texture: None,
            uploaded_version: None,
            status: None,
        }
    }

    pub fn engine(&self) -> &DrawingEngine<RasterSurface> {
        &self.engine
    }

    pub(crate) fn engine_mut(&mut self) -> &mut DrawingEngine<RasterSurface> {
        &mut self.engine
    }

    pub fn brush(&self) -> Brush {
        self.settings.brush
    }

    pub fn set_brush(&mut self, brush: Brush) {
        let brush = Brush::new(brush.color, palette::clamp_width(brush.width));
        self.settings.brush = brush;
        self.engine.set_brush(brush);
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub(crate) fn input_mut(&mut self) -> &mut InputHandler {
        &mut self.input
    }

    pub fn can_undo(&self) -> bool {
        !self.engine.store().is_empty()
    }

    pub fn undo(&mut self) {
        if self.engine.undo() {
            self.status = None;
        }
    }

    /// Write the canvas to a timestamped PNG in the export directory
    #[cfg(not(target_arch = "wasm32"))]
    pub fn export(&mut self) {
        let file_name = format!("drawing-{}.png", crate::util::time::timestamp_secs());
        let path = self.settings.export_dir.join(file_name);

        match self.engine.surface().save_png(&path) {
            Ok(()) => {
                log::info!("Exported canvas to {}", path.display());
                self.status = Some(format!("Saved {}", path.display()));
            }
            Err(err) => {
                log::error!("Failed to export canvas to {}: {}", path.display(), err);
                self.status = Some(format!("Export failed: {err}"));
            }
        }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn export(&mut self) {
        match self.engine.export_png() {
            Ok(bytes) => {
                log::warn!("Encoded {} bytes but file export is not supported on the web", bytes.len());
                self.status = Some("Export is not available in the browser".to_owned());
            }
            Err(err) => {
                log::error!("Failed to encode canvas: {}", err);
                self.status = Some(format!("Export failed: {err}"));
            }
        }
    }

    /// Upload the raster to the GPU if it changed since the last frame
    pub(crate) fn canvas_texture(&mut self, ctx: &egui::Context) -> Option<&TextureHandle> {
        let surface = self.engine.surface();
        let [w, h] = surface.size();
        if w == 0 || h == 0 {
            return None;
        }

        if self.uploaded_version != Some(surface.version()) || self.canvas_texture.is_none() {
            let image = surface.to_color_image();
            if let Some(texture) = &mut self.canvas_texture {
                texture.set(image, TextureOptions::NEAREST);
            } else {
                self.canvas_texture = Some(ctx.load_texture("canvas", image, TextureOptions::NEAREST));
            }
            self.uploaded_version = Some(surface.version());
        }

        self.canvas_texture.as_ref()
    }
}

impl eframe::App for FreehandApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        self.settings.save(storage);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        tools_panel(self, ctx);
        central_panel(self, ctx);
    }
}
