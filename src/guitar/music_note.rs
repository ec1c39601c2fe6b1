use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// One of the 12 pitch classes, spelled with sharps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Root {
    C,
    #[serde(rename = "C#")]
    CSharp,
    D,
    #[serde(rename = "D#")]
    DSharp,
    E,
    F,
    #[serde(rename = "F#")]
    FSharp,
    G,
    #[serde(rename = "G#")]
    GSharp,
    A,
    #[serde(rename = "A#")]
    ASharp,
    B,
}

pub const ALL_ROOTS: [Root; 12] = [
    Root::C,
    Root::CSharp,
    Root::D,
    Root::DSharp,
    Root::E,
    Root::F,
    Root::FSharp,
    Root::G,
    Root::GSharp,
    Root::A,
    Root::ASharp,
    Root::B,
];

lazy_static! {
    /// Every spelling `Root::from_str` accepts, sharps and flats alike.
    static ref SPELLINGS: HashMap<&'static str, Root> = {
        let mut m = HashMap::new();
        for root in ALL_ROOTS {
            m.insert(root.as_str(), root);
        }
        m.insert("Db", Root::CSharp);
        m.insert("D♭", Root::CSharp);
        m.insert("Eb", Root::DSharp);
        m.insert("E♭", Root::DSharp);
        m.insert("Gb", Root::FSharp);
        m.insert("G♭", Root::FSharp);
        m.insert("Ab", Root::GSharp);
        m.insert("A♭", Root::GSharp);
        m.insert("Bb", Root::ASharp);
        m.insert("B♭", Root::ASharp);
        m
    };
}

/// How accidentals are spelled when a root is shown to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccidentalPreference {
    #[default]
    Sharp,
    Flat,
    Both,
}

impl Root {
    /// Semitone value with C as 0.
    pub fn semitone(self) -> u8 {
        match self {
            Root::C => 0,
            Root::CSharp => 1,
            Root::D => 2,
            Root::DSharp => 3,
            Root::E => 4,
            Root::F => 5,
            Root::FSharp => 6,
            Root::G => 7,
            Root::GSharp => 8,
            Root::A => 9,
            Root::ASharp => 10,
            Root::B => 11,
        }
    }

    /// Root for any semitone value, wrapping modulo 12.
    pub fn from_semitone(semitone: i32) -> Root {
        ALL_ROOTS[semitone.rem_euclid(12) as usize]
    }

    /// Moves the root up by `semitones`, wrapping at the octave.
    pub fn add(self, semitones: i32) -> Root {
        Root::from_semitone(self.semitone() as i32 + semitones)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Root::C => "C",
            Root::CSharp => "C#",
            Root::D => "D",
            Root::DSharp => "D#",
            Root::E => "E",
            Root::F => "F",
            Root::FSharp => "F#",
            Root::G => "G",
            Root::GSharp => "G#",
            Root::A => "A",
            Root::ASharp => "A#",
            Root::B => "B",
        }
    }

    /// Flat spelling, only for the five roots that have one.
    pub fn flat_name(self) -> Option<&'static str> {
        match self {
            Root::CSharp => Some("D♭"),
            Root::DSharp => Some("E♭"),
            Root::FSharp => Some("G♭"),
            Root::GSharp => Some("A♭"),
            Root::ASharp => Some("B♭"),
            _ => None,
        }
    }

    /// Spells the root for display, e.g. `C#`, `D♭` or `C#/D♭`.
    pub fn format(self, preference: AccidentalPreference) -> String {
        let Some(flat) = self.flat_name() else {
            return self.as_str().to_string();
        };
        match preference {
            AccidentalPreference::Sharp => self.as_str().to_string(),
            AccidentalPreference::Flat => flat.to_string(),
            AccidentalPreference::Both => format!("{}/{}", self.as_str(), flat),
        }
    }
}

impl fmt::Display for Root {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Root {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SPELLINGS
            .get(s.trim())
            .copied()
            .ok_or_else(|| format!("unknown root: {}", s))
    }
}

/// Forward distance in semitones from `from` up to `to`, always in `0..=11`.
///
/// Shapes only move up the neck, so the distance is never negative.
pub fn semitone_distance(from: Root, to: Root) -> u8 {
    let diff = to.semitone() as i32 - from.semitone() as i32;
    ((diff % 12 + 12) % 12) as u8
}
