use eframe::egui;

// 应用主题
pub fn apply_theme(dark_mode: bool, ctx: &egui::Context) {
    if dark_mode {
        set_dark_theme(ctx);
    } else {
        set_light_theme(ctx);
    }
}

// 设置黑色主题
fn set_dark_theme(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();

    style.visuals = egui::Visuals::dark();

    style.visuals.extreme_bg_color = egui::Color32::from_rgb(10, 10, 10);
    style.visuals.panel_fill = egui::Color32::from_rgb(15, 15, 15);
    style.visuals.window_fill = egui::Color32::from_rgb(20, 20, 20);
    style.visuals.window_stroke = egui::Stroke::new(1.0, egui::Color32::from_rgb(38, 38, 38));

    style.visuals.override_text_color = Some(egui::Color32::from_rgb(212, 212, 212));
    style.visuals.widgets.inactive.bg_fill = egui::Color32::from_rgb(38, 38, 38);
    style.visuals.widgets.hovered.bg_fill = egui::Color32::from_rgb(64, 64, 64);
    style.visuals.widgets.active.bg_fill = egui::Color32::from_rgb(82, 82, 82);

    // 选中项使用绿色强调色
    style.visuals.selection.bg_fill = egui::Color32::from_rgb(16, 120, 90);
    style.visuals.selection.stroke.color = egui::Color32::WHITE;

    ctx.set_style(style);
}

// 设置浅色主题
fn set_light_theme(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();

    style.visuals = egui::Visuals::light();
    style.visuals.selection.bg_fill = egui::Color32::from_rgb(16, 120, 90);
    style.visuals.selection.stroke.color = egui::Color32::WHITE;

    ctx.set_style(style);
}

// 面板背景色
pub fn get_panel_bg_color(ui: &egui::Ui) -> egui::Color32 {
    if ui.style().visuals.dark_mode {
        egui::Color32::from_rgb(10, 10, 10)
    } else {
        egui::Color32::from_rgb(245, 245, 245)
    }
}

// 获取边框颜色
pub fn get_border_color(ui: &egui::Ui) -> egui::Color32 {
    if ui.style().visuals.dark_mode {
        egui::Color32::from_rgb(38, 38, 38)
    } else {
        egui::Color32::from_rgb(200, 200, 200)
    }
}

// 获取标题颜色
pub fn get_title_color(ui: &egui::Ui) -> egui::Color32 {
    if ui.style().visuals.dark_mode {
        egui::Color32::from_rgb(167, 243, 208)
    } else {
        egui::Color32::from_rgb(6, 95, 70)
    }
}

// 获取标签文字颜色
pub fn get_label_color(ui: &egui::Ui) -> egui::Color32 {
    if ui.style().visuals.dark_mode {
        egui::Color32::from_rgb(115, 115, 115)
    } else {
        egui::Color32::from_rgb(100, 100, 110)
    }
}

/// Colors for the chord diagram: (grid lines, dots and markers, finger numbers).
pub fn get_diagram_colors(ui: &egui::Ui) -> (egui::Color32, egui::Color32, egui::Color32) {
    if ui.style().visuals.dark_mode {
        (
            egui::Color32::from_rgb(64, 64, 64),
            egui::Color32::from_rgb(212, 212, 212),
            egui::Color32::from_rgb(10, 10, 10),
        )
    } else {
        (
            egui::Color32::from_rgb(160, 160, 160),
            egui::Color32::from_rgb(38, 38, 38),
            egui::Color32::from_rgb(245, 245, 245),
        )
    }
}
