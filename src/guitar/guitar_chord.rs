use serde::{Deserialize, Serialize};
use std::fmt;

use crate::guitar::music_note::{AccidentalPreference, Root};

/// Chord qualities the trainer knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChordQuality {
    Major,
    Minor,
    #[serde(rename = "7")]
    Dominant7,
    #[serde(rename = "Min7")]
    Minor7,
    #[serde(rename = "Maj7")]
    Major7,
    Power5,
}

pub const ALL_CHORD_QUALITIES: [ChordQuality; 6] = [
    ChordQuality::Major,
    ChordQuality::Minor,
    ChordQuality::Dominant7,
    ChordQuality::Minor7,
    ChordQuality::Major7,
    ChordQuality::Power5,
];

impl ChordQuality {
    /// Stable identifier, also used in chord ids.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChordQuality::Major => "Major",
            ChordQuality::Minor => "Minor",
            ChordQuality::Dominant7 => "7",
            ChordQuality::Minor7 => "Min7",
            ChordQuality::Major7 => "Maj7",
            ChordQuality::Power5 => "Power5",
        }
    }

    /// Short label shown in the prompt.
    pub fn label(&self) -> &'static str {
        match self {
            ChordQuality::Major => "Maj",
            ChordQuality::Minor => "Min",
            ChordQuality::Dominant7 => "7",
            ChordQuality::Minor7 => "m7",
            ChordQuality::Major7 => "Maj7",
            ChordQuality::Power5 => "5",
        }
    }
}

/// The five CAGED shapes. Each shape is named after the open chord it comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CagedShape {
    C,
    A,
    G,
    E,
    D,
}

pub const ALL_CAGED_SHAPES: [CagedShape; 5] = [
    CagedShape::E,
    CagedShape::A,
    CagedShape::D,
    CagedShape::G,
    CagedShape::C,
];

impl CagedShape {
    /// Root of the open chord the shape's template is written for.
    pub fn anchor_root(&self) -> Root {
        match self {
            CagedShape::C => Root::C,
            CagedShape::A => Root::A,
            CagedShape::G => Root::G,
            CagedShape::E => Root::E,
            CagedShape::D => Root::D,
        }
    }

    /// The shape named by this root's letter, if the root is one of C, A, G, E, D.
    pub fn from_root(root: Root) -> Option<CagedShape> {
        match root {
            Root::C => Some(CagedShape::C),
            Root::A => Some(CagedShape::A),
            Root::G => Some(CagedShape::G),
            Root::E => Some(CagedShape::E),
            Root::D => Some(CagedShape::D),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CagedShape::C => "C",
            CagedShape::A => "A",
            CagedShape::G => "G",
            CagedShape::E => "E",
            CagedShape::D => "D",
        }
    }
}

impl fmt::Display for CagedShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What to show the player: a root, a quality and the shape to play it in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Chord {
    pub root: Root,
    pub quality: ChordQuality,
    pub shape: CagedShape,
}

impl Chord {
    pub fn new(root: Root, quality: ChordQuality, shape: CagedShape) -> Self {
        Chord {
            root,
            quality,
            shape,
        }
    }

    /// Prompt text such as `G Maj — E SHAPE`.
    pub fn prompt(&self, preference: AccidentalPreference) -> String {
        format!(
            "{} {} — {} SHAPE",
            self.root.format(preference),
            self.quality.label(),
            self.shape
        )
    }

    /// Compact id such as `G-Major-E`.
    pub fn id(&self) -> String {
        format!("{}-{}-{}", self.root, self.quality.as_str(), self.shape)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_root_matches_letter() {
        for shape in ALL_CAGED_SHAPES {
            assert_eq!(shape.anchor_root().as_str(), shape.as_str());
            assert_eq!(CagedShape::from_root(shape.anchor_root()), Some(shape));
        }
        assert_eq!(CagedShape::from_root(Root::F), None);
    }

    #[test]
    fn test_prompt_and_id() {
        let chord = Chord::new(Root::CSharp, ChordQuality::Minor7, CagedShape::A);
        assert_eq!(chord.prompt(AccidentalPreference::Sharp), "C# m7 — A SHAPE");
        assert_eq!(chord.prompt(AccidentalPreference::Flat), "D♭ m7 — A SHAPE");
        assert_eq!(chord.id(), "C#-Min7-A");
    }

    #[test]
    fn test_quality_serde_names() {
        let json = serde_json::to_string(&ChordQuality::Dominant7).unwrap();
        assert_eq!(json, "\"7\"");
        let back: ChordQuality = serde_json::from_str("\"Maj7\"").unwrap();
        assert_eq!(back, ChordQuality::Major7);
    }
}
