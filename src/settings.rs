use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::engine::Brush;
use crate::palette;

/// User preferences restored between runs.
///
/// Only the brush and export location are kept; drawn strokes live in memory
/// for the session only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct Settings {
    pub brush: Brush,
    /// Directory PNG exports are written to
    pub export_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            brush: Brush::new(palette::DEFAULT_COLOR, palette::DEFAULT_WIDTH),
            export_dir: PathBuf::from("."),
        }
    }
}

impl Settings {
    /// Load from eframe storage, falling back to defaults
    pub fn load(storage: Option<&dyn eframe::Storage>) -> Self {
        let settings: Self = storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();
        settings.sanitized()
    }

    pub fn save(&self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, self);
    }

    /// Bring persisted values back into the ranges the toolbar offers
    pub fn sanitized(mut self) -> Self {
        self.brush.width = palette::clamp_width(self.brush.width);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::Color32;

    #[test]
    fn test_default_brush_matches_palette() {
        let settings = Settings::default();
        assert_eq!(settings.brush.color, Color32::BLACK);
        assert_eq!(settings.brush.width, 5.0);
    }

    #[test]
    fn test_sanitized_clamps_width() {
        let mut settings = Settings::default();
        settings.brush.width = 500.0;
        assert_eq!(settings.sanitized().brush.width, palette::MAX_WIDTH);
    }

    #[test]
    fn test_load_without_storage() {
        assert_eq!(Settings::load(None), Settings::default());
    }
}
