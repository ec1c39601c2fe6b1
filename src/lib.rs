//! CAGED chord trainer
//!
//! Shows a random chord (root, quality, CAGED shape) and reveals its fretboard diagram.
//! The voicing for any root is derived from one open-position template per shape and
//! quality.

pub mod config;
pub mod diagram;
pub mod error;
pub mod guitar;
pub mod randomizer;
pub mod session;
pub mod ui;
pub mod voicing;

pub use error::{Result, TrainerError};
pub use guitar::guitar_chord::{CagedShape, Chord, ChordQuality};
pub use guitar::music_note::{Root, semitone_distance};
pub use voicing::{ChordVoicing, voicing_for_chord};
