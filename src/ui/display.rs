use eframe::egui;

use crate::session::Phase;
use crate::ui::app::TrainerApp;
use crate::ui::diagram_view::show_chord_diagram;
use crate::ui::theme;

fn small_caps(ui: &mut egui::Ui, text: &str) {
    ui.add(egui::Label::new(
        egui::RichText::new(text)
            .size(11.0)
            .color(theme::get_label_color(ui)),
    ));
}

pub fn show_display(app: &mut TrainerApp, ui: &mut egui::Ui) {
    egui::Frame::group(ui.style())
        .fill(theme::get_panel_bg_color(ui))
        .rounding(4.0)
        .inner_margin(12.0)
        .stroke(egui::Stroke::new(1.0, theme::get_border_color(ui)))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());

            ui.horizontal(|ui| {
                small_caps(ui, "PROMPT");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let auto_text = match (app.session.auto, app.session.paused) {
                        (false, _) => "AUTO: OFF",
                        (true, true) => "AUTO: PAUSED",
                        (true, false) => "AUTO: ON",
                    };
                    small_caps(ui, auto_text);
                });
            });

            ui.add_space(8.0);
            ui.add(egui::Label::new(
                egui::RichText::new(app.session.prompt_text())
                    .size(32.0)
                    .strong(),
            ));

            ui.horizontal_wrapped(|ui| {
                let session = &app.session;
                ui.label(format!("ID: {}", session.current_chord.id()));
                ui.label(format!("Prompt: {:.1}s", session.prompt_seconds));
                ui.label(format!("Reveal: {:.1}s", session.reveal_seconds));
                let phase = match session.phase {
                    Phase::Prompt => "PROMPT",
                    Phase::Revealed => "REVEALED",
                };
                ui.label(format!("Phase: {}", phase));
            });

            ui.add_space(10.0);
            ui.separator();

            ui.horizontal(|ui| {
                small_caps(ui, "DIAGRAM");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    small_caps(
                        ui,
                        if app.session.is_revealed() {
                            "VISIBLE"
                        } else {
                            "HIDDEN"
                        },
                    );
                });
            });

            ui.add_space(6.0);
            if app.session.is_revealed() {
                match app.session.voicing() {
                    Some(voicing) => {
                        let options = app.diagram_options();
                        let width = ui.available_width().min(440.0);
                        show_chord_diagram(ui, &voicing, &options, width);
                    }
                    // 该形状和品质还没有模板
                    None => {
                        ui.label("No diagram available for this shape yet.");
                    }
                }
            } else {
                ui.label("Press Reveal (or Space, or wait in Auto mode) to show the diagram.");
            }
        });
}
