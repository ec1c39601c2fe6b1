//! 吉他模块
//!
//! Pitch classes, chord qualities, CAGED shapes and string labels.

pub mod guitar_chord;
pub mod guitar_string;
pub mod music_note;
