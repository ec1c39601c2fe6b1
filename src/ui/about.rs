use crate::ui::app::TrainerApp;
use eframe::egui;

// 展示关于对话框
pub fn show_about_dialog(app: &mut TrainerApp, ctx: &egui::Context) {
    egui::Window::new("CAGED Trainer")
        .collapsible(false)
        .resizable(false)
        .default_width(320.0)
        .show(ctx, |ui| {
            ui.with_layout(egui::Layout::top_down(egui::Align::Center), |ui| {
                ui.add(egui::Label::new(
                    egui::RichText::new("Flash-card practice for CAGED chord shapes").size(14.0),
                ));

                ui.add_space(10.0);

                egui::Frame::group(ui.style())
                    .rounding(4.0)
                    .inner_margin(10.0)
                    .show(ui, |ui| {
                        ui.vertical(|ui| {
                            ui.add(egui::Label::new(
                                egui::RichText::new("Keys:").size(14.0).strong(),
                            ));
                            ui.add_space(5.0);
                            ui.label("Space: reveal the diagram, then move to the next chord");
                        });
                    });

                ui.add_space(10.0);

                ui.horizontal(|ui| {
                    ui.add(egui::Label::new(egui::RichText::new("Version:").size(14.0)));
                    ui.label(env!("CARGO_PKG_VERSION"));
                });

                ui.add_space(15.0);

                if ui.add_sized([80.0, 30.0], egui::Button::new("Close")).clicked() {
                    app.show_about_dialog = false;
                }
            });
        });
}
