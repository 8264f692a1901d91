use std::io::Cursor;
use std::path::Path;

use egui::{Color32, ColorImage, Pos2};
use image::{ImageFormat, Rgba, RgbaImage};

use crate::error::{ExportError, ExportResult};
use crate::stroke::Point;
use crate::surface::Surface;

/// Software RGBA canvas.
///
/// Like a browser canvas it has no memory of what was drawn: segments are
/// burnt into pixels with round caps, and the only way to take one back is to
/// clear and redraw.
pub struct RasterSurface {
    pixels: RgbaImage,
    background: Color32,
    color: Color32,
    width: f32,
    cursor: Option<Point>,
    // Bumped on every pixel change so texture uploads can be skipped
    version: u64,
}

impl std::fmt::Debug for RasterSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterSurface")
            .field("size", &self.size())
            .field("background", &self.background)
            .field("color", &self.color)
            .field("width", &self.width)
            .field("cursor", &self.cursor)
            .field("version", &self.version)
            .finish()
    }
}

impl RasterSurface {
    pub fn new(width: u32, height: u32, background: Color32) -> Self {
        Self {
            pixels: RgbaImage::from_pixel(width, height, to_rgba(background)),
            background,
            color: Color32::BLACK,
            width: 1.0,
            cursor: None,
            version: 0,
        }
    }

    pub fn size(&self) -> [u32; 2] {
        [self.pixels.width(), self.pixels.height()]
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn background(&self) -> Color32 {
        self.background
    }

    /// Reallocate at a new size, leaving the canvas blank.
    ///
    /// Returns false when the size did not change. Callers must redraw their
    /// history afterwards.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if self.size() == [width, height] {
            return false;
        }
        log::debug!("Resizing raster to {}x{}", width, height);
        self.pixels = RgbaImage::from_pixel(width, height, to_rgba(self.background));
        self.cursor = None;
        self.version += 1;
        true
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color32> {
        if x >= self.pixels.width() || y >= self.pixels.height() {
            return None;
        }
        let [r, g, b, a] = self.pixels.get_pixel(x, y).0;
        Some(Color32::from_rgba_unmultiplied(r, g, b, a))
    }

    /// Whether every pixel still holds the background color
    pub fn is_blank(&self) -> bool {
        let background = to_rgba(self.background);
        self.pixels.pixels().all(|p| *p == background)
    }

    pub fn raw(&self) -> &[u8] {
        self.pixels.as_raw()
    }

    /// Copy the pixels into an egui image for texture upload
    pub fn to_color_image(&self) -> ColorImage {
        let [w, h] = self.size();
        ColorImage::from_rgba_unmultiplied([w as usize, h as usize], self.pixels.as_raw())
    }

    /// Encode the current pixels as a PNG file in memory
    pub fn encode_png(&self) -> ExportResult<Vec<u8>> {
        let [w, h] = self.size();
        if w == 0 || h == 0 {
            return Err(ExportError::EmptySurface);
        }
        let mut bytes = Cursor::new(Vec::new());
        self.pixels.write_to(&mut bytes, ImageFormat::Png)?;
        Ok(bytes.into_inner())
    }

    pub fn save_png(&self, path: &Path) -> ExportResult<()> {
        let bytes = self.encode_png()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    // Paint a capsule around the segment; with round caps the shared end
    // points of consecutive segments form round joins for free.
    fn stamp_segment(&mut self, from: Pos2, to: Pos2) {
        let radius = (self.width / 2.0).max(0.5);
        let [w, h] = self.size();
        if w == 0 || h == 0 {
            return;
        }

        let min_x = (from.x.min(to.x) - radius - 1.0).floor().max(0.0) as u32;
        let min_y = (from.y.min(to.y) - radius - 1.0).floor().max(0.0) as u32;
        let max_x = ((from.x.max(to.x) + radius + 1.0).ceil().max(0.0) as u32).min(w);
        let max_y = ((from.y.max(to.y) + radius + 1.0).ceil().max(0.0) as u32).min(h);

        let [r, g, b, a] = self.color.to_srgba_unmultiplied();
        for y in min_y..max_y {
            for x in min_x..max_x {
                let center = Pos2::new(x as f32 + 0.5, y as f32 + 0.5);
                let distance = distance_to_line_segment(center, from, to);
                // One pixel of linear falloff at the edge
                let coverage = (radius + 0.5 - distance).clamp(0.0, 1.0);
                if coverage <= 0.0 {
                    continue;
                }
                let alpha = f32::from(a) / 255.0 * coverage;
                let dst = self.pixels.get_pixel_mut(x, y);
                blend(dst, [r, g, b], alpha);
            }
        }
        self.version += 1;
    }
}

impl Surface for RasterSurface {
    fn clear(&mut self) {
        let background = to_rgba(self.background);
        for pixel in self.pixels.pixels_mut() {
            *pixel = background;
        }
        self.cursor = None;
        self.version += 1;
    }

    fn set_style(&mut self, color: Color32, width: f32) {
        self.color = color;
        self.width = width;
    }

    fn begin_path(&mut self, point: Point) {
        self.cursor = Some(point);
    }

    fn line_to(&mut self, point: Point) {
        match self.cursor {
            Some(from) => self.stamp_segment(from, point),
            None => log::debug!("line_to without begin_path, starting path at {:?}", point),
        }
        self.cursor = Some(point);
    }
}

fn to_rgba(color: Color32) -> Rgba<u8> {
    Rgba(color.to_srgba_unmultiplied())
}

// Source-over blend of a straight-alpha color onto a straight-alpha pixel
fn blend(dst: &mut Rgba<u8>, src: [u8; 3], src_alpha: f32) {
    let dst_alpha = f32::from(dst.0[3]) / 255.0;
    let out_alpha = src_alpha + dst_alpha * (1.0 - src_alpha);
    if out_alpha <= 0.0 {
        return;
    }
    for i in 0..3 {
        let s = f32::from(src[i]);
        let d = f32::from(dst.0[i]);
        let c = (s * src_alpha + d * dst_alpha * (1.0 - src_alpha)) / out_alpha;
        dst.0[i] = c.round().clamp(0.0, 255.0) as u8;
    }
    dst.0[3] = (out_alpha * 255.0).round().clamp(0.0, 255.0) as u8;
}

/// Calculate distance from a point to a line segment
fn distance_to_line_segment(point: Pos2, line_start: Pos2, line_end: Pos2) -> f32 {
    let line_vec = line_end - line_start;
    let point_vec = point - line_start;

    let line_len = line_vec.length();
    if line_len == 0.0 {
        return point_vec.length();
    }

    let t = ((point_vec.x * line_vec.x + point_vec.y * line_vec.y) / line_len).clamp(0.0, line_len);
    let projection = line_start + (line_vec * t / line_len);
    (point - projection).length()
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn test_new_surface_is_blank() {
        let surface = RasterSurface::new(8, 4, Color32::WHITE);
        assert_eq!(surface.size(), [8, 4]);
        assert!(surface.is_blank());
        assert_eq!(surface.pixel(0, 0), Some(Color32::WHITE));
        assert_eq!(surface.pixel(8, 0), None);
    }

    #[test]
    fn test_line_to_paints_along_segment() {
        let mut surface = RasterSurface::new(40, 40, Color32::WHITE);
        surface.set_style(Color32::RED, 4.0);
        surface.begin_path(pos2(5.0, 20.0));
        surface.line_to(pos2(35.0, 20.0));

        assert_eq!(surface.pixel(20, 19), Some(Color32::RED));
        assert_eq!(surface.pixel(20, 2), Some(Color32::WHITE));
    }

    #[test]
    fn test_begin_path_alone_draws_nothing() {
        let mut surface = RasterSurface::new(10, 10, Color32::WHITE);
        let version = surface.version();
        surface.set_style(Color32::RED, 4.0);
        surface.begin_path(pos2(5.0, 5.0));
        assert!(surface.is_blank());
        assert_eq!(surface.version(), version);
    }

    #[test]
    fn test_clear_restores_background() {
        let mut surface = RasterSurface::new(20, 20, Color32::WHITE);
        surface.set_style(Color32::BLACK, 6.0);
        surface.begin_path(pos2(0.0, 0.0));
        surface.line_to(pos2(20.0, 20.0));
        assert!(!surface.is_blank());

        surface.clear();
        assert!(surface.is_blank());
    }

    #[test]
    fn test_resize_only_when_size_changes() {
        let mut surface = RasterSurface::new(10, 10, Color32::WHITE);
        assert!(!surface.resize(10, 10));
        assert!(surface.resize(12, 6));
        assert_eq!(surface.size(), [12, 6]);
    }

    #[test]
    fn test_encode_png_roundtrips_through_image() {
        let mut surface = RasterSurface::new(16, 16, Color32::WHITE);
        surface.set_style(Color32::BLUE, 3.0);
        surface.begin_path(pos2(2.0, 8.0));
        surface.line_to(pos2(14.0, 8.0));

        let bytes = surface.encode_png().unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (16, 16));
        assert_eq!(decoded.as_raw().as_slice(), surface.raw());
    }

    #[test]
    fn test_encode_empty_surface_fails() {
        let surface = RasterSurface::new(0, 0, Color32::WHITE);
        assert!(matches!(surface.encode_png(), Err(ExportError::EmptySurface)));
    }

    #[test]
    fn test_distance_to_line_segment() {
        let d = distance_to_line_segment(pos2(5.0, 3.0), pos2(0.0, 0.0), pos2(10.0, 0.0));
        assert!((d - 3.0).abs() < 0.001);
        let d = distance_to_line_segment(pos2(13.0, 4.0), pos2(0.0, 0.0), pos2(10.0, 0.0));
        assert!((d - 5.0).abs() < 0.001);
    }
}
