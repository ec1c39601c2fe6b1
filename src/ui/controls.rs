use eframe::egui;

use crate::guitar::guitar_chord::{ALL_CAGED_SHAPES, ALL_CHORD_QUALITIES};
use crate::guitar::guitar_string::tuning_presets;
use crate::guitar::music_note::AccidentalPreference;
use crate::randomizer::{CagedMode, RootMode};
use crate::session::{Action, MAX_DELAY_SECONDS, MIN_DELAY_SECONDS};
use crate::ui::app::TrainerApp;
use crate::ui::theme;

pub fn show_controls(app: &mut TrainerApp, ui: &mut egui::Ui) {
    // 收集本帧的操作，绘制结束后统一派发
    let mut actions: Vec<Action> = Vec::new();
    let session = &app.session;

    ui.group(|ui| {
        ui.heading("1. Session");
        ui.separator();

        ui.horizontal(|ui| {
            let reveal_text = if session.is_revealed() { "Next" } else { "Reveal" };
            if ui.button(reveal_text).clicked() {
                actions.push(Action::Advance);
            }
            if ui.button("Skip").clicked() {
                actions.push(Action::Next);
            }
            let auto_text = if session.auto { "Auto: On" } else { "Auto: Off" };
            if ui.button(auto_text).clicked() {
                actions.push(Action::ToggleAuto);
            }
            let pause_text = if session.paused { "Resume" } else { "Pause" };
            if ui
                .add_enabled(session.auto, egui::Button::new(pause_text))
                .clicked()
            {
                actions.push(Action::TogglePause);
            }
        });

        let mut prompt_seconds = session.prompt_seconds;
        ui.horizontal(|ui| {
            ui.label("Prompt delay:");
            if ui
                .add(
                    egui::DragValue::new(&mut prompt_seconds)
                        .range(MIN_DELAY_SECONDS..=MAX_DELAY_SECONDS)
                        .speed(0.1)
                        .suffix(" s"),
                )
                .changed()
            {
                actions.push(Action::SetPromptSeconds(prompt_seconds));
            }
        });

        let mut reveal_seconds = session.reveal_seconds;
        ui.horizontal(|ui| {
            ui.label("Reveal delay:");
            if ui
                .add(
                    egui::DragValue::new(&mut reveal_seconds)
                        .range(MIN_DELAY_SECONDS..=MAX_DELAY_SECONDS)
                        .speed(0.1)
                        .suffix(" s"),
                )
                .changed()
            {
                actions.push(Action::SetRevealSeconds(reveal_seconds));
            }
        });
    });

    ui.add_space(10.0);

    ui.group(|ui| {
        ui.heading("2. Chords");
        ui.separator();

        let settings = &session.randomizer;
        ui.horizontal(|ui| {
            ui.label("Roots:");
            if ui
                .radio(settings.root_mode == RootMode::Full, "All 12")
                .clicked()
            {
                actions.push(Action::SetRootMode(RootMode::Full));
            }
            if ui
                .radio(settings.root_mode == RootMode::CagedOnly, "CAGED only")
                .clicked()
            {
                actions.push(Action::SetRootMode(RootMode::CagedOnly));
            }
        });

        if settings.root_mode == RootMode::CagedOnly {
            ui.horizontal(|ui| {
                ui.label("Shape:");
                if ui
                    .radio(settings.caged_mode == CagedMode::RandomShape, "Random")
                    .clicked()
                {
                    actions.push(Action::SetCagedMode(CagedMode::RandomShape));
                }
                if ui
                    .radio(settings.caged_mode == CagedMode::Lock, "Lock to root")
                    .clicked()
                {
                    actions.push(Action::SetCagedMode(CagedMode::Lock));
                }
            });

            let mut text = session.extra_roots_text.clone();
            ui.horizontal(|ui| {
                ui.label("Extra roots:");
                if ui
                    .add(egui::TextEdit::singleline(&mut text).hint_text("F#, Bb"))
                    .changed()
                {
                    actions.push(Action::SetExtraRootsText(text.clone()));
                }
            });
        }

        ui.label("Qualities:");
        ui.horizontal_wrapped(|ui| {
            for quality in ALL_CHORD_QUALITIES {
                let selected = settings.allowed_qualities.contains(&quality);
                if ui.selectable_label(selected, quality.label()).clicked() {
                    actions.push(Action::ToggleQuality(quality));
                }
            }
        });

        ui.label("Shapes:");
        ui.horizontal_wrapped(|ui| {
            for shape in ALL_CAGED_SHAPES {
                let selected = settings.allowed_shapes.contains(&shape);
                if ui.selectable_label(selected, shape.as_str()).clicked() {
                    actions.push(Action::ToggleShape(shape));
                }
            }
        });
    });

    ui.add_space(10.0);

    ui.group(|ui| {
        ui.heading("3. Display");
        ui.separator();

        let display = &session.display;
        ui.horizontal(|ui| {
            ui.label("Accidentals:");
            for (preference, text) in [
                (AccidentalPreference::Sharp, "♯"),
                (AccidentalPreference::Flat, "♭"),
                (AccidentalPreference::Both, "Both"),
            ] {
                if ui
                    .radio(display.accidental_preference == preference, text)
                    .clicked()
                {
                    actions.push(Action::SetAccidentalPreference(preference));
                }
            }
        });

        ui.horizontal(|ui| {
            ui.label("Tuning:");
            egui::ComboBox::from_id_source("tuning_select")
                .selected_text(&display.tuning.name)
                .show_ui(ui, |ui| {
                    for preset in tuning_presets() {
                        let selected = preset == display.tuning;
                        if ui.selectable_label(selected, &preset.name).clicked() {
                            actions.push(Action::SetTuning(preset.clone()));
                        }
                    }
                });
        });

        ui.horizontal(|ui| {
            ui.label("Frets shown:");
            ui.add(egui::DragValue::new(&mut app.fret_count).range(3..=8));
        });
    });

    ui.add_space(10.0);

    let mut save = false;
    ui.horizontal(|ui| {
        if ui.button("Reset").clicked() {
            actions.push(Action::Reset);
        }
        if ui.button("Save settings").clicked() {
            save = true;
        }
    });

    if !app.status_message.is_empty() {
        ui.add(egui::Label::new(
            egui::RichText::new(&app.status_message)
                .size(12.0)
                .color(theme::get_label_color(ui)),
        ));
    }

    for action in actions {
        app.dispatch(action);
    }
    if save {
        app.save_settings();
    }
}
