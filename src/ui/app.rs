use eframe::egui;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{error, info};

use crate::config::{TrainerConfig, save_config};
use crate::diagram::DiagramOptions;
use crate::session::{Action, PracticeSession};
use crate::ui::about::show_about_dialog;
use crate::ui::theme;

pub struct TrainerApp {
    pub session: PracticeSession,

    pub(crate) config_path: PathBuf,
    pub(crate) fret_count: u8,

    // 主题设置
    pub(crate) dark_mode: bool,

    pub(crate) show_about_dialog: bool,

    // 最近一次操作的提示信息
    pub(crate) status_message: String,
}

impl TrainerApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        session: PracticeSession,
        config: &TrainerConfig,
        config_path: PathBuf,
    ) -> Self {
        theme::apply_theme(config.dark_mode, &cc.egui_ctx);

        Self {
            session,
            config_path,
            fret_count: config.fret_count,
            dark_mode: config.dark_mode,
            show_about_dialog: false,
            status_message: String::new(),
        }
    }

    /// Applies an action to the session, reporting a failed draw in the status line.
    pub fn dispatch(&mut self, action: Action) {
        if let Err(e) = self.session.dispatch(action, Instant::now()) {
            error!(error = %e, "session action failed");
            self.status_message = e.to_string();
        }
    }

    pub fn diagram_options(&self) -> DiagramOptions {
        let display = &self.session.display;
        DiagramOptions {
            fret_count: self.fret_count,
            string_labels: Some(display.tuning.labels(display.accidental_preference)),
        }
    }

    /// Current settings in config form.
    pub fn current_config(&self) -> TrainerConfig {
        TrainerConfig {
            randomizer: self.session.randomizer.clone(),
            accidental_preference: self.session.display.accidental_preference,
            tuning: self.session.display.tuning.clone(),
            prompt_seconds: self.session.prompt_seconds,
            reveal_seconds: self.session.reveal_seconds,
            dark_mode: self.dark_mode,
            fret_count: self.fret_count,
        }
    }

    pub fn save_settings(&mut self) {
        match save_config(&self.config_path, &self.current_config()) {
            Ok(()) => {
                info!(path = %self.config_path.display(), "settings saved");
                self.status_message = format!("Saved to {}", self.config_path.display());
            }
            Err(e) => {
                error!(error = %e, "failed to save settings");
                self.status_message = format!("Save failed: {}", e);
            }
        }
    }

    fn handle_keys(&mut self, ctx: &egui::Context) {
        // 输入框获得焦点时空格不触发切换
        if ctx.wants_keyboard_input() {
            return;
        }
        if ctx.input(|i| i.key_pressed(egui::Key::Space)) {
            self.dispatch(Action::Advance);
        }
    }

    fn drive_timer(&mut self, ctx: &egui::Context) {
        let now = Instant::now();
        if let Err(e) = self.session.tick(now) {
            error!(error = %e, "auto advance failed");
            self.status_message = e.to_string();
        }
        if let Some(wait) = self.session.time_until_advance(now) {
            ctx.request_repaint_after(wait.max(Duration::from_millis(10)));
        }
    }
}

impl eframe::App for TrainerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drive_timer(ctx);
        self.handle_keys(ctx);

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.add(egui::Label::new(
                    egui::RichText::new("CAGED Trainer")
                        .color(theme::get_title_color(ui))
                        .size(20.0),
                ));
                ui.add_space(5.0);
                ui.add(egui::Label::new(egui::RichText::new("🎸").size(20.0)));

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.menu_button("Help", |ui| {
                        if ui.button("About").clicked() {
                            self.show_about_dialog = true;
                            ui.close_menu();
                        }
                    });
                    if ui.checkbox(&mut self.dark_mode, "Dark").changed() {
                        theme::apply_theme(self.dark_mode, ctx);
                    }
                });
            });
        });

        if self.show_about_dialog {
            show_about_dialog(self, ctx);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.horizontal_top(|ui| {
                    ui.vertical(|ui| {
                        ui.set_width(ui.available_width() * 0.58);
                        crate::ui::display::show_display(self, ui);
                    });
                    ui.vertical(|ui| {
                        ui.set_width(ui.available_width());
                        crate::ui::controls::show_controls(self, ui);
                    });
                });
            });
        });
    }
}
