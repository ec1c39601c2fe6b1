//! Fret, finger and barre types.
//!
//! Template values are relative to a shape's open anchor chord, voicing values are
//! absolute fret numbers on the neck. They are separate types so untransposed data
//! can never reach a diagram.

use serde::{Serialize, Serializer};

use crate::guitar::guitar_string::{STRING_COUNT, StringIndex};

/// Fretting-hand finger, 1 = index through 4 = pinky.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Finger {
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Finger {
    pub fn from_number(n: u8) -> Option<Finger> {
        match n {
            1 => Some(Finger::Index),
            2 => Some(Finger::Middle),
            3 => Some(Finger::Ring),
            4 => Some(Finger::Pinky),
            _ => None,
        }
    }

    pub fn number(&self) -> u8 {
        match self {
            Finger::Index => 1,
            Finger::Middle => 2,
            Finger::Ring => 3,
            Finger::Pinky => 4,
        }
    }
}

impl Serialize for Finger {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.number())
    }
}

/// Finger hint per string, `None` for open, muted or unassigned strings.
pub type Fingers = [Option<Finger>; STRING_COUNT];

/// A string in a template: muted, or a fret relative to the anchor (0 = open at the anchor).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateFret {
    Muted,
    Fret(u8),
}

/// A string in a voicing: muted, or an absolute fret (0 = open string).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringFret {
    Muted,
    Fret(u8),
}

impl StringFret {
    pub fn fret(&self) -> Option<u8> {
        match self {
            StringFret::Muted => None,
            StringFret::Fret(f) => Some(*f),
        }
    }

    pub fn is_muted(&self) -> bool {
        matches!(self, StringFret::Muted)
    }

    pub fn is_open(&self) -> bool {
        matches!(self, StringFret::Fret(0))
    }
}

// 闷音弦输出为 "x"，其余输出品位数字
impl Serialize for StringFret {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            StringFret::Muted => serializer.serialize_str("x"),
            StringFret::Fret(f) => serializer.serialize_u8(*f),
        }
    }
}

/// One finger pressing strings `from_string..=to_string` at a fret relative to the anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateBarre {
    pub finger: Finger,
    pub fret: u8,
    pub from_string: StringIndex,
    pub to_string: StringIndex,
}

impl TemplateBarre {
    pub fn new(finger: Finger, fret: u8, from_string: StringIndex, to_string: StringIndex) -> Self {
        TemplateBarre {
            finger,
            fret,
            from_string,
            to_string,
        }
    }
}

/// A barre at an absolute fret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Barre {
    pub finger: Finger,
    pub fret: u8,
    pub from_string: StringIndex,
    pub to_string: StringIndex,
}

impl Barre {
    pub fn covers(&self, string_index: StringIndex) -> bool {
        string_index >= self.from_string && string_index <= self.to_string
    }
}

/// Canonical fingering for one (shape, quality) pair, written at the shape's anchor root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoicingTemplate {
    pub frets: [TemplateFret; STRING_COUNT],
    pub fingers: Option<Fingers>,
    pub barres: Vec<TemplateBarre>,
}

/// A playable voicing with absolute frets.
///
/// `base_fret` is the top fret of the diagram window and is always at least 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChordVoicing {
    pub frets: [StringFret; STRING_COUNT],
    pub base_fret: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingers: Option<Fingers>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub barres: Vec<Barre>,
}

impl ChordVoicing {
    pub fn is_string_covered_by_barre(&self, string_index: StringIndex) -> bool {
        self.barres.iter().any(|b| b.covers(string_index))
    }

    pub fn finger_for(&self, string_index: StringIndex) -> Option<Finger> {
        self.fingers
            .as_ref()
            .and_then(|fingers| fingers.get(string_index).copied().flatten())
    }
}

/// Clamps a base fret candidate to a positive fret number.
pub fn check_base_fret(candidate: i32) -> u8 {
    candidate.clamp(1, u8::MAX as i32) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_base_fret() {
        assert_eq!(check_base_fret(0), 1);
        assert_eq!(check_base_fret(-3), 1);
        assert_eq!(check_base_fret(7), 7);
    }

    #[test]
    fn test_barre_covers_inclusive_range() {
        let barre = Barre {
            finger: Finger::Index,
            fret: 3,
            from_string: 1,
            to_string: 5,
        };
        assert!(!barre.covers(0));
        assert!(barre.covers(1));
        assert!(barre.covers(5));
    }

    #[test]
    fn test_voicing_json_shape() {
        let voicing = ChordVoicing {
            frets: [
                StringFret::Muted,
                StringFret::Fret(3),
                StringFret::Fret(2),
                StringFret::Fret(0),
                StringFret::Fret(1),
                StringFret::Fret(0),
            ],
            base_fret: 1,
            fingers: None,
            barres: Vec::new(),
        };
        let json = serde_json::to_string(&voicing).unwrap();
        assert_eq!(json, r#"{"frets":["x",3,2,0,1,0],"baseFret":1}"#);
    }
}
