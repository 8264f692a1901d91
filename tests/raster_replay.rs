use egui::{pos2, Color32};
use freehand_canvas::{DrawingEngine, RasterSurface};

const SIZE: u32 = 64;

fn engine() -> DrawingEngine<RasterSurface> {
    DrawingEngine::new(RasterSurface::new(SIZE, SIZE, Color32::WHITE))
}

fn draw(engine: &mut DrawingEngine<RasterSurface>, points: &[(f32, f32)], color: Color32, width: f32) {
    let (first, rest) = points.split_first().unwrap();
    engine.pointer_down(pos2(first.0, first.1), color, width);
    for (x, y) in rest {
        engine.pointer_move(pos2(*x, *y));
    }
    engine.pointer_up();
}

#[test]
fn test_undo_restores_pixels_of_remaining_history() {
    let mut reference = engine();
    draw(&mut reference, &[(5.0, 10.0), (60.0, 10.0)], Color32::RED, 6.0);

    let mut engine = engine();
    draw(&mut engine, &[(5.0, 10.0), (60.0, 10.0)], Color32::RED, 6.0);
    draw(&mut engine, &[(30.0, 0.0), (30.0, 60.0), (50.0, 60.0)], Color32::BLUE, 12.0);
    assert_ne!(engine.surface().raw(), reference.surface().raw());

    engine.undo();
    assert_eq!(engine.surface().raw(), reference.surface().raw());
}

#[test]
fn test_undo_everything_leaves_blank_canvas() {
    let mut engine = engine();
    draw(&mut engine, &[(0.0, 0.0), (64.0, 64.0)], Color32::BLACK, 8.0);
    draw(&mut engine, &[(64.0, 0.0), (0.0, 64.0)], Color32::GREEN, 3.0);

    engine.undo();
    engine.undo();
    assert!(engine.surface().is_blank());

    let version = engine.surface().version();
    assert!(!engine.undo());
    assert_eq!(engine.surface().version(), version);
}

#[test]
fn test_later_strokes_paint_over_earlier_ones() {
    let mut engine = engine();
    draw(&mut engine, &[(0.0, 32.0), (64.0, 32.0)], Color32::RED, 10.0);
    draw(&mut engine, &[(32.0, 0.0), (32.0, 64.0)], Color32::BLUE, 10.0);
    assert_eq!(engine.surface().pixel(32, 32), Some(Color32::BLUE));

    engine.redraw();
    assert_eq!(engine.surface().pixel(32, 32), Some(Color32::BLUE));
    assert_eq!(engine.surface().pixel(5, 32), Some(Color32::RED));
}

#[test]
fn test_resize_rebuilds_from_history() {
    let mut engine = engine();
    draw(&mut engine, &[(4.0, 4.0), (20.0, 4.0)], Color32::RED, 4.0);

    engine.resize(32, 16);
    assert_eq!(engine.surface().size(), [32, 16]);
    assert_eq!(engine.surface().pixel(12, 4), Some(Color32::RED));
}

#[test]
fn test_export_png_decodes_to_canvas() {
    let mut engine = engine();
    draw(&mut engine, &[(10.0, 10.0), (50.0, 50.0)], Color32::BLACK, 5.0);

    let bytes = engine.export_png().unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");

    let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (SIZE, SIZE));
    assert_eq!(decoded.as_raw().as_slice(), engine.surface().raw());
}
