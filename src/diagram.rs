//! Chord diagram geometry and SVG output.
//!
//! Strings run vertically (lowest string on the left), frets horizontally. The window
//! shows `fret_count` frets starting at the voicing's base fret. Both the SVG renderer
//! and the egui view draw from the same `DiagramLayout`.

use crate::guitar::guitar_string::STRING_COUNT;
use crate::voicing::fret::{ChordVoicing, StringFret};

const WIDTH: f32 = 220.0;
const HEIGHT: f32 = 180.0;
const PAD_X: f32 = 18.0;
const PAD_TOP: f32 = 22.0;
const PAD_BOTTOM: f32 = 18.0;
// space above the grid for X/O markers
const MARKER_SPACE: f32 = 10.0;
const LABEL_SPACE: f32 = 14.0;

pub const DOT_RADIUS: f32 = 7.0;
pub const STROKE_COLOR: &str = "#262626";
pub const TEXT_COLOR: &str = "#d4d4d4";
pub const FINGER_TEXT_COLOR: &str = "#0a0a0a";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextMark {
    pub at: Point,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dot {
    pub center: Point,
    pub finger: Option<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DiagramOptions {
    pub fret_count: u8,
    /// Open-string names, low to high. Display only.
    pub string_labels: Option<[String; STRING_COUNT]>,
}

impl Default for DiagramOptions {
    fn default() -> Self {
        DiagramOptions {
            fret_count: 5,
            string_labels: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DiagramLayout {
    pub width: f32,
    pub height: f32,
    pub strings: Vec<Segment>,
    pub frets: Vec<Segment>,
    /// Thick line at the top, only when the window starts at fret 1.
    pub nut: Option<Segment>,
    /// `"{n}fr"` beside the first fret, only when the window starts above fret 1.
    pub base_fret_label: Option<TextMark>,
    /// `X` for muted strings and `O` for open strings.
    pub markers: Vec<TextMark>,
    pub barres: Vec<Segment>,
    pub dots: Vec<Dot>,
    pub string_labels: Vec<TextMark>,
}

impl DiagramLayout {
    pub fn new(voicing: &ChordVoicing, options: &DiagramOptions) -> Self {
        let fret_count = options.fret_count.max(1);
        let label_space = if options.string_labels.is_some() {
            LABEL_SPACE
        } else {
            0.0
        };

        let height = HEIGHT + label_space;
        let grid_top = PAD_TOP + MARKER_SPACE;
        let grid_bottom = HEIGHT - PAD_BOTTOM;
        let grid_left = PAD_X;
        let grid_right = WIDTH - PAD_X;

        let string_gap = (grid_right - grid_left) / (STRING_COUNT as f32 - 1.0);
        let fret_gap = (grid_bottom - grid_top) / fret_count as f32;

        let base_fret = voicing.base_fret;
        let min_visible = base_fret as u32;
        let max_visible = base_fret as u32 + fret_count as u32 - 1;
        let visible = |fret: u8| (min_visible..=max_visible).contains(&(fret as u32));

        let x_for_string = |s: usize| grid_left + s as f32 * string_gap;
        let y_for_fret_line = |i: u8| grid_top + i as f32 * fret_gap;
        let y_for_dot = |fret: u8| {
            let rel = fret as f32 - base_fret as f32;
            grid_top + rel * fret_gap + fret_gap / 2.0
        };

        let strings = (0..STRING_COUNT)
            .map(|s| Segment {
                from: Point {
                    x: x_for_string(s),
                    y: grid_top,
                },
                to: Point {
                    x: x_for_string(s),
                    y: grid_bottom,
                },
            })
            .collect();

        let frets = (0..=fret_count)
            .map(|i| Segment {
                from: Point {
                    x: grid_left,
                    y: y_for_fret_line(i),
                },
                to: Point {
                    x: grid_right,
                    y: y_for_fret_line(i),
                },
            })
            .collect();

        let nut = (base_fret == 1).then(|| Segment {
            from: Point {
                x: grid_left,
                y: grid_top,
            },
            to: Point {
                x: grid_right,
                y: grid_top,
            },
        });

        let base_fret_label = (base_fret > 1).then(|| TextMark {
            at: Point {
                x: grid_left - 10.0,
                y: grid_top + fret_gap / 2.0,
            },
            text: format!("{}fr", base_fret),
        });

        let markers = voicing
            .frets
            .iter()
            .enumerate()
            .filter_map(|(s, f)| {
                let text = match f {
                    StringFret::Muted => "X",
                    StringFret::Fret(0) => "O",
                    StringFret::Fret(_) => return None,
                };
                Some(TextMark {
                    at: Point {
                        x: x_for_string(s),
                        y: PAD_TOP + 8.0,
                    },
                    text: text.to_string(),
                })
            })
            .collect();

        let barres = voicing
            .barres
            .iter()
            .filter(|b| visible(b.fret))
            .map(|b| Segment {
                from: Point {
                    x: x_for_string(b.from_string),
                    y: y_for_dot(b.fret),
                },
                to: Point {
                    x: x_for_string(b.to_string),
                    y: y_for_dot(b.fret),
                },
            })
            .collect();

        let dots = voicing
            .frets
            .iter()
            .enumerate()
            .filter_map(|(s, f)| match f {
                StringFret::Fret(fret) if *fret > 0 && visible(*fret) => Some(Dot {
                    center: Point {
                        x: x_for_string(s),
                        y: y_for_dot(*fret),
                    },
                    finger: voicing.finger_for(s).map(|finger| finger.number()),
                }),
                _ => None,
            })
            .collect();

        let string_labels = options
            .string_labels
            .iter()
            .flat_map(|labels| labels.iter().enumerate())
            .map(|(s, label)| TextMark {
                at: Point {
                    x: x_for_string(s),
                    y: grid_bottom + LABEL_SPACE,
                },
                text: label.clone(),
            })
            .collect();

        DiagramLayout {
            width: WIDTH,
            height,
            strings,
            frets,
            nut,
            base_fret_label,
            markers,
            barres,
            dots,
            string_labels,
        }
    }
}

/// Renders a voicing as a standalone SVG document.
pub fn render_svg(voicing: &ChordVoicing, options: &DiagramOptions) -> String {
    let layout = DiagramLayout::new(voicing, options);
    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}" role="img" aria-label="Chord diagram">"#,
        layout.width, layout.height
    );

    if let Some(label) = &layout.base_fret_label {
        svg.push_str(&text_element(label, "end", 10.0, TEXT_COLOR));
    }
    for marker in &layout.markers {
        svg.push_str(&text_element(marker, "middle", 10.0, TEXT_COLOR));
    }
    for line in layout.strings.iter().chain(layout.frets.iter()) {
        svg.push_str(&line_element(line, STROKE_COLOR, 1.0, ""));
    }
    if let Some(nut) = &layout.nut {
        svg.push_str(&line_element(nut, TEXT_COLOR, 3.0, ""));
    }
    for barre in &layout.barres {
        svg.push_str(&line_element(
            barre,
            TEXT_COLOR,
            6.0,
            r#" stroke-linecap="round" opacity="0.85""#,
        ));
    }
    for dot in &layout.dots {
        svg.push_str(&format!(
            r#"<circle cx="{}" cy="{}" r="{}" fill="{}" opacity="0.95"/>"#,
            dot.center.x, dot.center.y, DOT_RADIUS, TEXT_COLOR
        ));
        if let Some(finger) = dot.finger {
            let mark = TextMark {
                at: Point {
                    x: dot.center.x,
                    y: dot.center.y + 0.5,
                },
                text: finger.to_string(),
            };
            svg.push_str(&text_element(&mark, "middle", 9.0, FINGER_TEXT_COLOR));
        }
    }
    for label in &layout.string_labels {
        svg.push_str(&text_element(label, "middle", 9.0, TEXT_COLOR));
    }

    svg.push_str("</svg>");
    svg
}

fn line_element(segment: &Segment, color: &str, width: f32, extra: &str) -> String {
    format!(
        r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}" vector-effect="non-scaling-stroke"{}/>"#,
        segment.from.x, segment.from.y, segment.to.x, segment.to.y, color, width, extra
    )
}

fn text_element(mark: &TextMark, anchor: &str, size: f32, color: &str) -> String {
    format!(
        r#"<text x="{}" y="{}" text-anchor="{}" dominant-baseline="middle" font-size="{}" fill="{}">{}</text>"#,
        mark.at.x,
        mark.at.y,
        anchor,
        size,
        color,
        escape_text(&mark.text)
    )
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guitar::guitar_chord::{CagedShape, Chord, ChordQuality};
    use crate::guitar::music_note::Root;
    use crate::voicing::voicing_for_chord;

    fn voicing(root: Root, quality: ChordQuality, shape: CagedShape) -> ChordVoicing {
        voicing_for_chord(&Chord::new(root, quality, shape)).unwrap()
    }

    #[test]
    fn test_open_chord_has_nut_and_markers() {
        // C 形状的开放 C 和弦: x 3 2 0 1 0
        let layout = DiagramLayout::new(
            &voicing(Root::C, ChordQuality::Major, CagedShape::C),
            &DiagramOptions::default(),
        );
        assert!(layout.nut.is_some());
        assert!(layout.base_fret_label.is_none());
        let markers: Vec<&str> = layout.markers.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(markers, vec!["X", "O", "O"]);
        assert_eq!(layout.dots.len(), 3);
        assert!(layout.barres.is_empty());
        assert_eq!(layout.strings.len(), 6);
        assert_eq!(layout.frets.len(), 6);
    }

    #[test]
    fn test_transposed_chord_shows_base_fret() {
        let layout = DiagramLayout::new(
            &voicing(Root::G, ChordQuality::Major, CagedShape::E),
            &DiagramOptions::default(),
        );
        assert!(layout.nut.is_none());
        assert_eq!(layout.base_fret_label.as_ref().unwrap().text, "3fr");
        assert!(layout.markers.is_empty());
        assert_eq!(layout.barres.len(), 1);
        assert_eq!(layout.dots.len(), 6);

        // 3品的点在第一格中间，5品的点在第三格中间
        let first_cell = layout.dots[0].center.y;
        let third_cell = layout.dots[1].center.y;
        assert!(third_cell > first_cell);
        assert_eq!(layout.dots[3].finger, Some(1));
        assert_eq!(layout.dots[1].finger, Some(2));
    }

    #[test]
    fn test_frets_outside_window_are_clipped() {
        let layout = DiagramLayout::new(
            &voicing(Root::G, ChordQuality::Major, CagedShape::E),
            &DiagramOptions {
                fret_count: 2,
                string_labels: None,
            },
        );
        // 窗口为3-4品，5品的两个点不显示
        assert_eq!(layout.dots.len(), 4);
        assert_eq!(layout.frets.len(), 3);
    }

    #[test]
    fn test_string_labels_extend_height() {
        let labels = ["E", "A", "D", "G", "B", "E"].map(String::from);
        let layout = DiagramLayout::new(
            &voicing(Root::A, ChordQuality::Minor, CagedShape::A),
            &DiagramOptions {
                fret_count: 5,
                string_labels: Some(labels),
            },
        );
        assert_eq!(layout.string_labels.len(), 6);
        assert!(layout.height > HEIGHT);
    }

    #[test]
    fn test_svg_output() {
        let svg = render_svg(
            &voicing(Root::G, ChordQuality::Major, CagedShape::E),
            &DiagramOptions::default(),
        );
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains(">3fr</text>"));
        assert_eq!(svg.matches("<circle").count(), 6);
        assert!(svg.contains(r#"stroke-linecap="round""#));
    }
}
