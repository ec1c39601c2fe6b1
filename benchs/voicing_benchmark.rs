use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use caged_trainer::diagram::{DiagramOptions, render_svg};
use caged_trainer::guitar::guitar_chord::{ALL_CAGED_SHAPES, ALL_CHORD_QUALITIES, Chord};
use caged_trainer::guitar::music_note::ALL_ROOTS;
use caged_trainer::randomizer::{RandomizerSettings, next_chord};
use caged_trainer::voicing::voicing_for_chord;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn all_chords() -> Vec<Chord> {
    let mut chords = Vec::with_capacity(360);
    for root in ALL_ROOTS {
        for quality in ALL_CHORD_QUALITIES {
            for shape in ALL_CAGED_SHAPES {
                chords.push(Chord::new(root, quality, shape));
            }
        }
    }
    chords
}

fn benchmark_voicings(c: &mut Criterion) {
    let chords = all_chords();

    // 全部360个和弦生成一次
    c.bench_function("voicing_for_all_chords", |b| {
        b.iter(|| {
            for chord in &chords {
                black_box(voicing_for_chord(black_box(chord)));
            }
        })
    });

    c.bench_function("next_chord_and_svg", |b| {
        let settings = RandomizerSettings::default();
        let options = DiagramOptions::default();
        let mut rng = StdRng::seed_from_u64(0);
        b.iter(|| {
            let Ok(chord) = next_chord(&settings, &mut rng) else {
                return;
            };
            if let Some(voicing) = voicing_for_chord(&chord) {
                black_box(render_svg(&voicing, &options));
            }
        })
    });
}

criterion_group!(benches, benchmark_voicings);
criterion_main!(benches);
