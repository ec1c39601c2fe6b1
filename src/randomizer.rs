//! Random chord selection
//!
//! Root, quality and shape are each drawn uniformly and independently.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TrainerError};
use crate::guitar::guitar_chord::{
    ALL_CAGED_SHAPES, ALL_CHORD_QUALITIES, CagedShape, Chord, ChordQuality,
};
use crate::guitar::music_note::{ALL_ROOTS, Root};

/// Roots named by a CAGED letter, in CAGED order.
pub const CAGED_ROOTS: [Root; 5] = [Root::C, Root::A, Root::G, Root::E, Root::D];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RootMode {
    /// Only the five CAGED letter roots, plus any extra roots.
    CagedOnly,
    #[default]
    Full,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CagedMode {
    #[default]
    RandomShape,
    /// A letter root is always played in its own shape (C root → C shape).
    Lock,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RandomizerSettings {
    pub root_mode: RootMode,
    pub caged_mode: CagedMode,
    pub extra_roots: Vec<Root>,
    pub allowed_qualities: Vec<ChordQuality>,
    pub allowed_shapes: Vec<CagedShape>,
}

impl Default for RandomizerSettings {
    fn default() -> Self {
        RandomizerSettings {
            root_mode: RootMode::Full,
            caged_mode: CagedMode::RandomShape,
            extra_roots: Vec::new(),
            allowed_qualities: ALL_CHORD_QUALITIES.to_vec(),
            allowed_shapes: ALL_CAGED_SHAPES.to_vec(),
        }
    }
}

/// Root pool for the settings: the mode's base roots followed by any extra roots not
/// already in it.
pub fn candidate_roots(settings: &RandomizerSettings) -> Vec<Root> {
    let base: &[Root] = match settings.root_mode {
        RootMode::CagedOnly => &CAGED_ROOTS,
        RootMode::Full => &ALL_ROOTS,
    };

    let mut roots: Vec<Root> = Vec::with_capacity(base.len() + settings.extra_roots.len());
    for &root in base.iter().chain(settings.extra_roots.iter()) {
        if !roots.contains(&root) {
            roots.push(root);
        }
    }
    roots
}

fn pick_one<T: Copy, R: Rng + ?Sized>(items: &[T], name: &'static str, rng: &mut R) -> Result<T> {
    items
        .choose(rng)
        .copied()
        .ok_or(TrainerError::EmptyCandidates(name))
}

/// Draws a chord from the settings.
///
/// Fails when the root pool, the allowed qualities or the allowed shapes are empty.
pub fn pick_random_chord<R: Rng + ?Sized>(settings: &RandomizerSettings, rng: &mut R) -> Result<Chord> {
    let roots = candidate_roots(settings);

    let root = pick_one(&roots, "candidate roots", rng)?;
    let quality = pick_one(&settings.allowed_qualities, "allowed qualities", rng)?;
    let shape = pick_one(&settings.allowed_shapes, "allowed shapes", rng)?;

    Ok(Chord::new(root, quality, shape))
}

/// Forces a letter root onto its own shape when the settings are `CagedOnly` + `Lock`.
/// Extra roots keep whatever shape they were given.
pub fn apply_caged_rule(chord: Chord, settings: &RandomizerSettings) -> Chord {
    if settings.root_mode != RootMode::CagedOnly || settings.caged_mode != CagedMode::Lock {
        return chord;
    }

    match CagedShape::from_root(chord.root) {
        Some(shape) => Chord { shape, ..chord },
        None => chord,
    }
}

/// Picks a chord and applies the CAGED training rule.
pub fn next_chord<R: Rng + ?Sized>(settings: &RandomizerSettings, rng: &mut R) -> Result<Chord> {
    let chord = pick_random_chord(settings, rng)?;
    Ok(apply_caged_rule(chord, settings))
}

/// Parses free text like `"F#, Bb  F"` into roots. Unknown tokens are ignored and
/// duplicates are dropped.
pub fn parse_extra_roots(text: &str) -> Vec<Root> {
    let mut roots = Vec::new();
    for token in text.split(|c: char| c == ',' || c.is_whitespace()) {
        if token.is_empty() {
            continue;
        }
        if let Ok(root) = token.parse::<Root>() {
            if !roots.contains(&root) {
                roots.push(root);
            }
        }
    }
    roots
}
