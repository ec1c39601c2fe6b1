use tracing::debug;

use crate::guitar::guitar_chord::Chord;
use crate::guitar::guitar_string::STRING_COUNT;
use crate::guitar::music_note::semitone_distance;
use crate::voicing::fret::{
    Barre, ChordVoicing, StringFret, TemplateFret, VoicingTemplate, check_base_fret,
};
use crate::voicing::template::TemplateStore;

/// Builds the voicing for a chord from the built-in template catalog.
///
/// Returns `None` when no template exists for the chord's shape and quality.
pub fn voicing_for_chord(chord: &Chord) -> Option<ChordVoicing> {
    voicing_from_store(TemplateStore::builtin(), chord)
}

/// Builds the voicing for a chord from the given store.
pub fn voicing_from_store(store: &TemplateStore, chord: &Chord) -> Option<ChordVoicing> {
    let Some(template) = store.get(chord.shape, chord.quality) else {
        debug!(chord = %chord.id(), "no voicing template");
        return None;
    };

    let delta = semitone_distance(chord.shape.anchor_root(), chord.root);
    Some(transpose_template(template, delta))
}

/// Slides a template `delta` frets up the neck.
///
/// Every numeric fret moves, including the anchor's open strings. Muted strings stay
/// muted. Barres that land on fret 0 are dropped, the nut already does that job.
pub(crate) fn transpose_template(template: &VoicingTemplate, delta: u8) -> ChordVoicing {
    let frets: [StringFret; STRING_COUNT] = template.frets.map(|f| transpose_fret(f, delta));

    let barres: Vec<Barre> = template
        .barres
        .iter()
        .map(|b| Barre {
            finger: b.finger,
            fret: b.fret.saturating_add(delta),
            from_string: b.from_string,
            to_string: b.to_string,
        })
        .filter(|b| b.fret > 0)
        .collect();

    let base_fret = compute_base_fret(&frets, &barres);

    ChordVoicing {
        frets,
        base_fret,
        fingers: template.fingers,
        barres,
    }
}

fn transpose_fret(fret: TemplateFret, delta: u8) -> StringFret {
    match fret {
        TemplateFret::Muted => StringFret::Muted,
        TemplateFret::Fret(f) => StringFret::Fret(f.saturating_add(delta)),
    }
}

/// Lowest fretted string or barre, falling back to 1 for all-open or all-muted voicings.
pub fn compute_base_fret(frets: &[StringFret], barres: &[Barre]) -> u8 {
    let fretted = frets.iter().filter_map(|f| f.fret()).filter(|&f| f > 0);
    let barred = barres.iter().map(|b| b.fret);

    match fretted.chain(barred).min() {
        Some(min) => check_base_fret(min as i32),
        None => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guitar::guitar_chord::{
        ALL_CAGED_SHAPES, ALL_CHORD_QUALITIES, CagedShape, ChordQuality,
    };
    use crate::guitar::music_note::{ALL_ROOTS, Root};
    use crate::voicing::fret::{Finger, TemplateBarre};
    use crate::voicing::template::template_for;

    fn frets(values: [i8; 6]) -> [StringFret; 6] {
        values.map(|v| {
            if v < 0 {
                StringFret::Muted
            } else {
                StringFret::Fret(v as u8)
            }
        })
    }

    fn all_chords() -> Vec<Chord> {
        let mut chords = Vec::new();
        for root in ALL_ROOTS {
            for quality in ALL_CHORD_QUALITIES {
                for shape in ALL_CAGED_SHAPES {
                    chords.push(Chord::new(root, quality, shape));
                }
            }
        }
        chords
    }

    #[test]
    fn test_e_shape_major_at_g() {
        let chord = Chord::new(Root::G, ChordQuality::Major, CagedShape::E);
        let voicing = voicing_for_chord(&chord).unwrap();

        assert_eq!(voicing.frets, frets([3, 5, 5, 4, 3, 3]));
        assert_eq!(
            voicing.barres,
            vec![Barre {
                finger: Finger::Index,
                fret: 3,
                from_string: 0,
                to_string: 5,
            }]
        );
        assert_eq!(voicing.base_fret, 3);
    }

    #[test]
    fn test_e_shape_major_at_anchor() {
        let chord = Chord::new(Root::E, ChordQuality::Major, CagedShape::E);
        let voicing = voicing_for_chord(&chord).unwrap();

        assert_eq!(voicing.frets, frets([0, 2, 2, 1, 0, 0]));
        // 未移调时0品的横按没有意义，应该被去掉
        assert!(voicing.barres.is_empty());
        assert_eq!(voicing.base_fret, 1);
    }

    #[test]
    fn test_anchor_root_reproduces_every_template() {
        for shape in ALL_CAGED_SHAPES {
            for quality in ALL_CHORD_QUALITIES {
                let template = template_for(shape, quality).unwrap();
                let chord = Chord::new(shape.anchor_root(), quality, shape);
                let voicing = voicing_for_chord(&chord).unwrap();

                for (t, v) in template.frets.iter().zip(voicing.frets.iter()) {
                    match t {
                        TemplateFret::Muted => assert_eq!(*v, StringFret::Muted),
                        TemplateFret::Fret(f) => assert_eq!(*v, StringFret::Fret(*f)),
                    }
                }
                let kept: Vec<u8> = voicing.barres.iter().map(|b| b.fret).collect();
                let expected: Vec<u8> = template
                    .barres
                    .iter()
                    .map(|b| b.fret)
                    .filter(|&f| f != 0)
                    .collect();
                assert_eq!(kept, expected, "{:?}-{:?}", shape, quality);
                assert_eq!(voicing.fingers, template.fingers);
            }
        }
    }

    #[test]
    fn test_c_shape_minor7_keeps_nonzero_barre_at_anchor() {
        let chord = Chord::new(Root::C, ChordQuality::Minor7, CagedShape::C);
        let voicing = voicing_for_chord(&chord).unwrap();
        assert_eq!(voicing.barres.len(), 1);
        assert_eq!(voicing.barres[0].fret, 1);
        assert_eq!(voicing.barres[0].from_string, 3);
        assert!(voicing.is_string_covered_by_barre(4));
        assert!(!voicing.is_string_covered_by_barre(2));
    }

    #[test]
    fn test_transposition_is_uniform_shift() {
        for chord in all_chords() {
            let template = template_for(chord.shape, chord.quality).unwrap();
            let delta = semitone_distance(chord.shape.anchor_root(), chord.root);
            let voicing = voicing_for_chord(&chord).unwrap();

            for (t, v) in template.frets.iter().zip(voicing.frets.iter()) {
                match (t, v) {
                    (TemplateFret::Muted, StringFret::Muted) => {}
                    (TemplateFret::Fret(tf), StringFret::Fret(vf)) => assert_eq!(*vf, tf + delta),
                    _ => panic!("muting changed for {}", chord.id()),
                }
            }
        }
    }

    #[test]
    fn test_octave_up_returns_same_shape() {
        for chord in all_chords() {
            let octave_up = Chord::new(chord.root.add(12), chord.quality, chord.shape);
            assert_eq!(voicing_for_chord(&chord), voicing_for_chord(&octave_up));
        }
    }

    #[test]
    fn test_base_fret_is_positive_and_below_barres() {
        for chord in all_chords() {
            let voicing = voicing_for_chord(&chord).unwrap();
            assert!(voicing.base_fret >= 1, "{}", chord.id());
            for barre in &voicing.barres {
                assert!(barre.fret >= voicing.base_fret, "{}", chord.id());
            }
            for fret in voicing.frets.iter().filter_map(|f| f.fret()).filter(|&f| f > 0) {
                assert!(fret >= voicing.base_fret, "{}", chord.id());
            }
        }
    }

    #[test]
    fn test_frets_stay_on_the_neck() {
        for chord in all_chords() {
            let voicing = voicing_for_chord(&chord).unwrap();
            let highest = voicing.frets.iter().filter_map(|f| f.fret()).max().unwrap_or(0);
            assert!(highest <= 14, "{}", chord.id());
        }

        let template = template_for(CagedShape::G, ChordQuality::Major).unwrap();
        let voicing = transpose_template(template, 250);
        assert!(voicing.frets.iter().filter_map(|f| f.fret()).all(|f| f >= 250));
        assert_eq!(voicing.base_fret, 250);
    }

    #[test]
    fn test_all_open_or_muted_defaults_to_first_fret() {
        let template = VoicingTemplate {
            frets: [
                TemplateFret::Muted,
                TemplateFret::Fret(0),
                TemplateFret::Fret(0),
                TemplateFret::Muted,
                TemplateFret::Fret(0),
                TemplateFret::Muted,
            ],
            fingers: None,
            barres: vec![TemplateBarre::new(Finger::Index, 0, 0, 5)],
        };
        let voicing = transpose_template(&template, 0);
        assert_eq!(voicing.base_fret, 1);
        assert!(voicing.barres.is_empty());

        let all_muted = VoicingTemplate {
            frets: [TemplateFret::Muted; 6],
            fingers: None,
            barres: Vec::new(),
        };
        let voicing = transpose_template(&all_muted, 7);
        assert_eq!(voicing.frets, [StringFret::Muted; 6]);
        assert_eq!(voicing.base_fret, 1);
    }

    #[test]
    fn test_missing_template_is_none() {
        let mut store = TemplateStore::new();
        store.insert(
            CagedShape::E,
            ChordQuality::Major,
            template_for(CagedShape::E, ChordQuality::Major).unwrap().clone(),
        );

        let missing = Chord::new(Root::A, ChordQuality::Minor, CagedShape::A);
        assert_eq!(voicing_from_store(&store, &missing), None);

        let present = Chord::new(Root::A, ChordQuality::Major, CagedShape::E);
        let voicing = voicing_from_store(&store, &present).unwrap();
        assert_eq!(voicing.frets, frets([5, 7, 7, 6, 5, 5]));
        assert_eq!(voicing.base_fret, 5);
    }
}
