//! CAGED voicings
//!
//! Each (shape, quality) pair has one open-position template. Any other root is reached by
//! sliding that template up the neck by the semitone distance from the shape's anchor root.

pub mod fret;
pub mod generator;
pub mod template;

pub use fret::{Barre, ChordVoicing, Finger, StringFret};
pub use generator::{voicing_for_chord, voicing_from_store};
pub use template::{TemplateStore, template_for};
