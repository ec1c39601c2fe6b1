use lazy_static::lazy_static;
use std::collections::HashMap;

use crate::guitar::guitar_chord::{CagedShape, ChordQuality};
use crate::voicing::fret::{Finger, TemplateBarre, TemplateFret, VoicingTemplate};

/// Marks a muted string in the template tables below.
const X: i8 = -1;

/// Templates keyed by (shape, quality). A missing key means no voicing is known yet.
#[derive(Debug, Clone, Default)]
pub struct TemplateStore {
    templates: HashMap<(CagedShape, ChordQuality), VoicingTemplate>,
}

lazy_static! {
    static ref BUILTIN: TemplateStore = TemplateStore::with_builtin_templates();
}

impl TemplateStore {
    pub fn new() -> Self {
        TemplateStore::default()
    }

    /// The compiled-in catalog.
    pub fn builtin() -> &'static TemplateStore {
        &*BUILTIN
    }

    pub fn get(&self, shape: CagedShape, quality: ChordQuality) -> Option<&VoicingTemplate> {
        self.templates.get(&(shape, quality))
    }

    pub fn insert(&mut self, shape: CagedShape, quality: ChordQuality, template: VoicingTemplate) {
        self.templates.insert((shape, quality), template);
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &(CagedShape, ChordQuality)> {
        self.templates.keys()
    }

    fn add(&mut self, shape: CagedShape, quality: ChordQuality, frets: [i8; 6], fingers: [u8; 6], barre: (u8, usize)) {
        let (barre_fret, from_string) = barre;
        self.insert(
            shape,
            quality,
            VoicingTemplate {
                frets: template_frets(frets),
                fingers: Some(fingers.map(Finger::from_number)),
                barres: vec![TemplateBarre::new(Finger::Index, barre_fret, from_string, 5)],
            },
        );
    }

    fn with_builtin_templates() -> Self {
        use CagedShape as S;
        use ChordQuality as Q;

        let mut store = TemplateStore::new();

        // E 形状：整个六弦都用食指横按
        store.add(S::E, Q::Major, [0, 2, 2, 1, 0, 0], [0, 2, 3, 1, 0, 0], (0, 0));
        store.add(S::E, Q::Minor, [0, 2, 2, 0, 0, 0], [0, 1, 2, 0, 0, 0], (0, 0));
        store.add(S::E, Q::Dominant7, [0, 2, 0, 1, 0, 0], [0, 2, 0, 1, 0, 0], (0, 0));
        store.add(S::E, Q::Minor7, [0, 2, 0, 0, 0, 0], [0, 1, 0, 0, 0, 0], (0, 0));
        store.add(S::E, Q::Major7, [1, X, 2, 2, 1, 0], [1, 0, 3, 4, 2, 0], (0, 0));
        store.add(S::E, Q::Power5, [0, 2, 2, X, X, X], [0, 2, 3, 0, 0, 0], (0, 0));

        store.add(S::A, Q::Major, [X, 0, 2, 2, 2, 0], [0, 0, 1, 2, 3, 0], (0, 1));
        store.add(S::A, Q::Minor, [X, 0, 2, 2, 1, 0], [0, 0, 2, 3, 1, 0], (0, 1));
        store.add(S::A, Q::Dominant7, [X, 0, 2, 0, 2, 0], [0, 0, 1, 0, 3, 0], (0, 1));
        store.add(S::A, Q::Minor7, [X, 0, 2, 0, 1, 0], [0, 0, 2, 0, 1, 0], (0, 1));
        store.add(S::A, Q::Major7, [X, 0, 2, 1, 2, 0], [0, 0, 2, 1, 3, 0], (0, 1));
        store.add(S::A, Q::Power5, [X, 0, 2, 2, X, X], [0, 0, 2, 3, 0, 0], (0, 1));

        store.add(S::D, Q::Major, [X, X, 0, 2, 3, 2], [0, 0, 0, 1, 3, 2], (0, 1));
        store.add(S::D, Q::Minor, [X, X, 0, 2, 3, 1], [0, 0, 0, 2, 3, 1], (0, 1));
        store.add(S::D, Q::Dominant7, [X, X, 0, 2, 1, 2], [0, 0, 0, 2, 1, 3], (0, 1));
        store.add(S::D, Q::Minor7, [X, X, 0, 2, 1, 1], [0, 0, 0, 2, 1, 1], (0, 1));
        store.add(S::D, Q::Major7, [X, X, 0, 2, 2, 2], [0, 0, 0, 1, 1, 1], (0, 1));
        store.add(S::D, Q::Power5, [X, X, 0, 2, 3, X], [0, 0, 0, 1, 2, 0], (0, 1));

        store.add(S::G, Q::Major, [3, 2, 0, 0, 0, 3], [2, 1, 0, 0, 0, 3], (0, 1));
        store.add(S::G, Q::Minor, [3, 1, 0, 0, X, X], [3, 1, 0, 0, 0, 0], (0, 1));
        store.add(S::G, Q::Dominant7, [3, 2, 0, 0, 0, 1], [3, 2, 0, 0, 0, 1], (0, 1));
        store.add(S::G, Q::Minor7, [3, 1, 3, 0, X, X], [3, 1, 4, 0, 0, 0], (0, 1));
        store.add(S::G, Q::Major7, [3, X, 0, 0, 0, 2], [3, 0, 0, 0, 0, 1], (0, 1));
        store.add(S::G, Q::Power5, [X, X, X, 0, 3, 3], [0, 0, 0, 0, 2, 3], (0, 1));

        store.add(S::C, Q::Major, [X, 3, 2, 0, 1, 0], [0, 3, 2, 0, 1, 0], (0, 1));
        store.add(S::C, Q::Minor, [X, 3, 1, 0, 1, X], [0, 4, 1, 0, 2, 0], (0, 1));
        store.add(S::C, Q::Dominant7, [X, 3, 2, 3, 1, 0], [0, 3, 2, 4, 1, 0], (0, 1));
        // Cm7 的横按在1品，只压高音三根弦
        store.add(S::C, Q::Minor7, [X, 3, 1, 3, 1, X], [0, 3, 1, 4, 1, 0], (1, 3));
        store.add(S::C, Q::Major7, [X, 3, 2, 0, 0, 0], [0, 3, 2, 0, 0, 0], (0, 1));
        store.add(S::C, Q::Power5, [X, 3, X, 0, 1, X], [0, 3, 0, 0, 1, 0], (0, 1));

        store
    }
}

/// Looks up the built-in template for a shape and quality.
pub fn template_for(shape: CagedShape, quality: ChordQuality) -> Option<&'static VoicingTemplate> {
    TemplateStore::builtin().get(shape, quality)
}

fn template_frets(values: [i8; 6]) -> [TemplateFret; 6] {
    values.map(|v| {
        if v < 0 {
            TemplateFret::Muted
        } else {
            TemplateFret::Fret(v as u8)
        }
    })
}
