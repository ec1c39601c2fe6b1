// guitar_string.rs

use serde::{Deserialize, Serialize};

use crate::guitar::music_note::{AccidentalPreference, Root};

/// Number of strings every voicing and diagram works with.
pub const STRING_COUNT: usize = 6;

/// Index of a string, 0 is the lowest-pitched string. 以最低音弦为0弦
pub type StringIndex = usize;

/// Open-string notes from the lowest string to the highest.
///
/// Only used to label strings in a diagram. Voicing generation never reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tuning {
    pub name: String,
    pub notes: [Root; STRING_COUNT],
}

impl Default for Tuning {
    fn default() -> Self {
        Tuning::standard()
    }
}

impl Tuning {
    pub fn new(name: &str, notes: [Root; STRING_COUNT]) -> Self {
        Tuning {
            name: name.to_string(),
            notes,
        }
    }

    pub fn standard() -> Self {
        Tuning::new(
            "Standard (E A D G B E)",
            [Root::E, Root::A, Root::D, Root::G, Root::B, Root::E],
        )
    }

    /// Label for each string, low to high.
    pub fn labels(&self, preference: AccidentalPreference) -> [String; STRING_COUNT] {
        self.notes.map(|note| note.format(preference))
    }
}

/// Tunings offered in the display settings.
pub fn tuning_presets() -> Vec<Tuning> {
    vec![
        Tuning::standard(),
        Tuning::new(
            "Drop D (D A D G B E)",
            [Root::D, Root::A, Root::D, Root::G, Root::B, Root::E],
        ),
        Tuning::new(
            "Open D (D A D F# A D)",
            [Root::D, Root::A, Root::D, Root::FSharp, Root::A, Root::D],
        ),
        Tuning::new(
            "DADGAD",
            [Root::D, Root::A, Root::D, Root::G, Root::A, Root::D],
        ),
        Tuning::new(
            "Half step down (D# G# C# F# A# D#)",
            [
                Root::DSharp,
                Root::GSharp,
                Root::CSharp,
                Root::FSharp,
                Root::ASharp,
                Root::DSharp,
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_labels() {
        let labels = Tuning::standard().labels(AccidentalPreference::Sharp);
        assert_eq!(labels, ["E", "A", "D", "G", "B", "E"].map(String::from));
    }

    #[test]
    fn test_labels_follow_preference() {
        let presets = tuning_presets();
        let half_down = presets.last().unwrap();
        let labels = half_down.labels(AccidentalPreference::Flat);
        assert_eq!(labels[0], "E♭");
        assert_eq!(labels[4], "B♭");
    }
}
