use crate::FreehandApp;

pub fn central_panel(app: &mut FreehandApp, ctx: &egui::Context) {
    egui::CentralPanel::default()
        .frame(egui::Frame::none())
        .show(ctx, |ui| {
            let (response, painter) =
                ui.allocate_painter(ui.available_size(), egui::Sense::drag());
            let canvas_rect = response.rect;

            // One raster pixel per point
            let width = canvas_rect.width().max(0.0).round() as u32;
            let height = canvas_rect.height().max(0.0).round() as u32;
            app.engine_mut().resize(width, height);

            app.input_mut().set_canvas_rect(canvas_rect);
            let events = app.input_mut().process_input(ctx);
            let brush = app.brush();
            for event in events {
                event.apply(app.engine_mut(), brush);
            }

            if let Some(texture) = app.canvas_texture(ctx) {
                let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
                painter.image(texture.id(), canvas_rect, uv, egui::Color32::WHITE);
            }

            if app.engine().is_drawing() {
                ctx.set_cursor_icon(egui::CursorIcon::Crosshair);
            }
        });
}
