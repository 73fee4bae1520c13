use crate::PaintApp;
use crate::style::Argb;

/// Pen pickers and canvas actions.
pub fn tools_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(200.0)
        .show(ctx, |ui| {
            ui.heading("Pen");
            ui.separator();

            let mut color = app.pen().color.to_color32();
            ui.horizontal(|ui| {
                ui.label("Color:");
                let response = egui::color_picker::color_edit_button_srgba(
                    ui,
                    &mut color,
                    egui::color_picker::Alpha::OnlyBlend,
                );
                if response.changed() {
                    app.set_color(Argb::from_color32(color));
                }
            });

            let mut width = app.pen().width;
            ui.horizontal(|ui| {
                ui.label("Width:");
                if ui.add(egui::Slider::new(&mut width, 0.0..=50.0)).changed() {
                    app.set_line_width(width);
                }
            });

            // Preview of the current pen
            let (rect, _) = ui.allocate_exact_size(egui::vec2(160.0, 40.0), egui::Sense::hover());
            ui.painter().rect_filled(rect, 0.0, egui::Color32::WHITE);
            ui.painter().line_segment(
                [rect.left_center() + egui::vec2(15.0, 0.0), rect.right_center() - egui::vec2(15.0, 0.0)],
                egui::Stroke::new(width, color),
            );

            let mut erasing = app.pen().eraser;
            if ui.checkbox(&mut erasing, "Eraser").changed() {
                app.set_erasing(erasing);
            }

            ui.separator();
            if ui.button("Clear").clicked() {
                log::info!("Clear requested from UI");
                app.clear();
            }

            #[cfg(not(target_arch = "wasm32"))]
            {
                ui.separator();
                ui.label("Export:");
                ui.text_edit_singleline(app.export_path_mut());
                if ui.button("Save PNG").clicked() {
                    app.save_png();
                }
            }

            if let Some(status) = app.status() {
                ui.label(status);
            }

            ui.separator();
            ui.label(format!("Active contacts: {}", app.active_contacts()));
        });
}
