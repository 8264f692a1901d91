use egui::Color32;

/// Swatches offered in the toolbar, in display order
pub const SWATCHES: [(&str, Color32); 9] = [
    ("Black", Color32::from_rgb(0x00, 0x00, 0x00)),
    ("Pink", Color32::from_rgb(0xf6, 0x33, 0x9a)),
    ("Yellow", Color32::from_rgb(0xef, 0xb1, 0x00)),
    ("Green", Color32::from_rgb(0x00, 0xc9, 0x51)),
    ("Blue", Color32::from_rgb(0x2b, 0x7f, 0xff)),
    ("Purple", Color32::from_rgb(0xad, 0x46, 0xff)),
    ("Red", Color32::from_rgb(0xfb, 0x2c, 0x36)),
    ("Orange", Color32::from_rgb(0xff, 0x69, 0x00)),
    ("Grey", Color32::from_rgb(0x73, 0x73, 0x73)),
];

pub const MIN_WIDTH: f32 = 1.0;
pub const MAX_WIDTH: f32 = 50.0;
pub const WIDTH_STEP: f64 = 5.0;
pub const DEFAULT_WIDTH: f32 = 5.0;
pub const DEFAULT_COLOR: Color32 = SWATCHES[0].1;

/// Canvas color behind the strokes
pub const BACKGROUND: Color32 = Color32::WHITE;

pub fn clamp_width(width: f32) -> f32 {
    if width.is_finite() {
        width.clamp(MIN_WIDTH, MAX_WIDTH)
    } else {
        DEFAULT_WIDTH
    }
}

/// Name of the swatch matching `color`, if it is one of ours
pub fn swatch_name(color: Color32) -> Option<&'static str> {
    SWATCHES
        .iter()
        .find(|(_, swatch)| *swatch == color)
        .map(|(name, _)| *name)
}
