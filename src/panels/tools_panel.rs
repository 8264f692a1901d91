use crate::engine::Brush;
use crate::palette;
use crate::FreehandApp;

const SWATCH_SIZE: f32 = 24.0;

pub fn tools_panel(app: &mut FreehandApp, ctx: &egui::Context) {
    egui::TopBottomPanel::bottom("tools_panel")
        .resizable(false)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                let mut brush = app.brush();

                for (name, color) in palette::SWATCHES {
                    let selected = brush.color == color;
                    let mut button = egui::Button::new("")
                        .fill(color)
                        .rounding(SWATCH_SIZE / 2.0)
                        .min_size(egui::vec2(SWATCH_SIZE, SWATCH_SIZE));
                    if selected {
                        button = button.stroke(egui::Stroke::new(2.0, ui.visuals().strong_text_color()));
                    }
                    if ui.add(button).on_hover_text(name).clicked() {
                        log::info!("Color selected from UI: {}", name);
                        brush.color = color;
                    }
                }

                ui.separator();

                ui.label("Width:");
                ui.add(
                    egui::Slider::new(&mut brush.width, palette::MIN_WIDTH..=palette::MAX_WIDTH)
                        .step_by(palette::WIDTH_STEP),
                );

                if brush != app.brush() {
                    app.set_brush(Brush::new(brush.color, brush.width));
                }

                ui.separator();

                if ui.add_enabled(app.can_undo(), egui::Button::new("Undo")).clicked() {
                    app.undo();
                }
                if ui.button("Export PNG").clicked() {
                    app.export();
                }

                ui.label(format!(
                    "Strokes: {} ({})",
                    app.engine().store().len(),
                    app.engine().state().name()
                ));
                if let Some(status) = app.status() {
                    ui.separator();
                    ui.label(status);
                }
            });
        });
}
