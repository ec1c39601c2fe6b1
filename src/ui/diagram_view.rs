use eframe::egui;

use crate::diagram::{DOT_RADIUS, DiagramLayout, DiagramOptions, Point};
use crate::ui::theme;
use crate::voicing::ChordVoicing;

/// Paints a chord diagram scaled to fit `max_width`.
pub fn show_chord_diagram(
    ui: &mut egui::Ui,
    voicing: &ChordVoicing,
    options: &DiagramOptions,
    max_width: f32,
) {
    let layout = DiagramLayout::new(voicing, options);
    let scale = (max_width / layout.width).clamp(0.5, 3.0);
    let size = egui::vec2(layout.width * scale, layout.height * scale);

    let (response, painter) = ui.allocate_painter(size, egui::Sense::hover());
    let origin = response.rect.min;
    let to_screen = |p: Point| egui::pos2(origin.x + p.x * scale, origin.y + p.y * scale);

    let (grid_color, ink_color, finger_color) = theme::get_diagram_colors(ui);
    let font = |size: f32| egui::FontId::proportional(size * scale);

    for line in layout.strings.iter().chain(layout.frets.iter()) {
        painter.line_segment(
            [to_screen(line.from), to_screen(line.to)],
            egui::Stroke::new(1.0, grid_color),
        );
    }

    if let Some(nut) = &layout.nut {
        painter.line_segment(
            [to_screen(nut.from), to_screen(nut.to)],
            egui::Stroke::new(3.0 * scale, ink_color),
        );
    }

    if let Some(label) = &layout.base_fret_label {
        painter.text(
            to_screen(label.at),
            egui::Align2::RIGHT_CENTER,
            &label.text,
            font(10.0),
            ink_color,
        );
    }

    for marker in layout.markers.iter().chain(layout.string_labels.iter()) {
        painter.text(
            to_screen(marker.at),
            egui::Align2::CENTER_CENTER,
            &marker.text,
            font(10.0),
            ink_color,
        );
    }

    // 横按画成一条粗线，两端圆角由两个圆补上
    for barre in &layout.barres {
        let from = to_screen(barre.from);
        let to = to_screen(barre.to);
        let width = 6.0 * scale;
        let color = ink_color.gamma_multiply(0.85);
        painter.line_segment([from, to], egui::Stroke::new(width, color));
        painter.circle_filled(from, width / 2.0, color);
        painter.circle_filled(to, width / 2.0, color);
    }

    for dot in &layout.dots {
        let center = to_screen(dot.center);
        painter.circle_filled(center, DOT_RADIUS * scale, ink_color);
        if let Some(finger) = dot.finger {
            painter.text(
                center,
                egui::Align2::CENTER_CENTER,
                finger.to_string(),
                font(9.0),
                finger_color,
            );
        }
    }
}
