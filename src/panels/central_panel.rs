use crate::PaintApp;

pub fn central_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::CentralPanel::default()
        .frame(egui::Frame::none())
        .show(ctx, |ui| {
            // Claim the whole area so drags draw instead of scrolling or moving the window
            let available_size = ui.available_size();
            let (response, painter) = ui.allocate_painter(available_size, egui::Sense::drag());
            let canvas_rect = response.rect;

            app.layout_canvas(canvas_rect);
            app.handle_input(ctx, ui.layer_id());
            app.paint_canvas(&painter, canvas_rect);
        });
}
