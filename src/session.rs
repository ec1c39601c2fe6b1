//! Practice session state machine
//!
//! The session alternates between showing a chord name (`Prompt`) and showing its
//! diagram (`Revealed`). In auto mode an advance is armed with a deadline. Any change to
//! auto, pause, phase or a delay bumps the timer generation, so an advance armed for an
//! older state can never fire.

use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::guitar::guitar_chord::{CagedShape, Chord, ChordQuality};
use crate::guitar::guitar_string::Tuning;
use crate::guitar::music_note::AccidentalPreference;
use crate::randomizer::{CagedMode, RandomizerSettings, RootMode, next_chord, parse_extra_roots};
use crate::voicing::{ChordVoicing, voicing_for_chord};

/// Shortest prompt or reveal delay the session accepts, in seconds.
pub const MIN_DELAY_SECONDS: f64 = 0.2;
/// Longest prompt or reveal delay the session accepts, in seconds.
pub const MAX_DELAY_SECONDS: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Prompt,
    Revealed,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DisplaySettings {
    pub accidental_preference: AccidentalPreference,
    pub tuning: Tuning,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Next,
    Reveal,
    /// Reveal while prompting, otherwise move to the next chord.
    Advance,
    ToggleAuto,
    TogglePause,
    SetPromptSeconds(f64),
    SetRevealSeconds(f64),
    SetRootMode(RootMode),
    SetCagedMode(CagedMode),
    ToggleQuality(ChordQuality),
    ToggleShape(CagedShape),
    SetExtraRootsText(String),
    SetAccidentalPreference(AccidentalPreference),
    SetTuning(Tuning),
    Reset,
}

/// A scheduled advance. Only the ticket matching the session's current generation fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerTicket {
    pub generation: u64,
    pub due: Instant,
}

/// Everything the session needs to start from.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionDefaults {
    pub randomizer: RandomizerSettings,
    pub display: DisplaySettings,
    pub prompt_seconds: f64,
    pub reveal_seconds: f64,
}

impl Default for SessionDefaults {
    fn default() -> Self {
        SessionDefaults {
            randomizer: RandomizerSettings::default(),
            display: DisplaySettings::default(),
            prompt_seconds: 2.0,
            reveal_seconds: 2.0,
        }
    }
}

pub struct PracticeSession {
    defaults: SessionDefaults,
    rng: StdRng,

    pub randomizer: RandomizerSettings,
    pub display: DisplaySettings,
    pub current_chord: Chord,
    pub phase: Phase,
    pub auto: bool,
    pub paused: bool,
    pub prompt_seconds: f64,
    pub reveal_seconds: f64,
    pub extra_roots_text: String,

    generation: u64,
    pending: Option<TimerTicket>,
}

impl PracticeSession {
    pub fn new(defaults: SessionDefaults) -> Result<Self> {
        Self::with_rng(defaults, StdRng::from_entropy())
    }

    /// Starts from `defaults`, falling back to the built-in defaults when they leave
    /// nothing to pick from.
    pub fn new_or_default(defaults: SessionDefaults) -> Result<Self> {
        Self::new(defaults).or_else(|e| {
            warn!(error = %e, "settings leave nothing to pick from, using defaults");
            Self::new(SessionDefaults::default())
        })
    }

    /// Session with a reproducible chord sequence.
    pub fn with_seed(defaults: SessionDefaults, seed: u64) -> Result<Self> {
        Self::with_rng(defaults, StdRng::seed_from_u64(seed))
    }

    fn with_rng(defaults: SessionDefaults, mut rng: StdRng) -> Result<Self> {
        let current_chord = next_chord(&defaults.randomizer, &mut rng)?;
        let extra_roots_text = extra_roots_text(&defaults.randomizer);

        Ok(PracticeSession {
            randomizer: defaults.randomizer.clone(),
            display: defaults.display.clone(),
            current_chord,
            phase: Phase::Prompt,
            auto: false,
            paused: false,
            prompt_seconds: clamp_delay(defaults.prompt_seconds, 2.0),
            reveal_seconds: clamp_delay(defaults.reveal_seconds, 2.0),
            extra_roots_text,
            defaults,
            rng,
            generation: 0,
            pending: None,
        })
    }

    /// Voicing for the current chord, `None` when no template exists.
    pub fn voicing(&self) -> Option<ChordVoicing> {
        voicing_for_chord(&self.current_chord)
    }

    pub fn prompt_text(&self) -> String {
        self.current_chord.prompt(self.display.accidental_preference)
    }

    pub fn is_revealed(&self) -> bool {
        self.phase == Phase::Revealed
    }

    /// Delay of the current phase.
    pub fn current_delay(&self) -> Duration {
        let seconds = match self.phase {
            Phase::Prompt => self.prompt_seconds,
            Phase::Revealed => self.reveal_seconds,
        };
        Duration::from_secs_f64(seconds)
    }

    /// The advance currently armed, if any.
    pub fn pending(&self) -> Option<TimerTicket> {
        self.pending
    }

    pub fn time_until_advance(&self, now: Instant) -> Option<Duration> {
        self.pending
            .map(|ticket| ticket.due.saturating_duration_since(now))
    }

    /// Applies an action. `now` is used to re-arm the auto-advance timer.
    pub fn dispatch(&mut self, action: Action, now: Instant) -> Result<()> {
        let before = self.timer_inputs();

        match action {
            Action::Next => self.next()?,
            Action::Reveal => self.phase = Phase::Revealed,
            Action::Advance => match self.phase {
                Phase::Prompt => self.phase = Phase::Revealed,
                Phase::Revealed => self.next()?,
            },
            Action::ToggleAuto => {
                self.auto = !self.auto;
                if self.auto {
                    self.paused = false;
                }
                info!(auto = self.auto, "auto mode toggled");
            }
            Action::TogglePause => self.paused = !self.paused,
            Action::SetPromptSeconds(seconds) => {
                self.prompt_seconds = clamp_delay(seconds, self.prompt_seconds)
            }
            Action::SetRevealSeconds(seconds) => {
                self.reveal_seconds = clamp_delay(seconds, self.reveal_seconds)
            }
            Action::SetRootMode(mode) => {
                self.randomizer.root_mode = mode;
                if mode == RootMode::CagedOnly {
                    self.randomizer.caged_mode = CagedMode::RandomShape;
                }
                self.next()?;
            }
            Action::SetCagedMode(mode) => {
                self.randomizer.caged_mode = mode;
                self.next()?;
            }
            Action::ToggleQuality(quality) => {
                if toggle_keep_one(&mut self.randomizer.allowed_qualities, quality) {
                    self.next()?;
                }
            }
            Action::ToggleShape(shape) => {
                if toggle_keep_one(&mut self.randomizer.allowed_shapes, shape) {
                    self.next()?;
                }
            }
            Action::SetExtraRootsText(text) => {
                // 输入过程中不重新抽取和弦
                self.randomizer.extra_roots = parse_extra_roots(&text);
                self.extra_roots_text = text;
            }
            Action::SetAccidentalPreference(preference) => {
                self.display.accidental_preference = preference
            }
            Action::SetTuning(tuning) => self.display.tuning = tuning,
            Action::Reset => self.reset()?,
        }

        if self.timer_inputs() != before {
            self.rearm(now);
        }
        Ok(())
    }

    /// Fires the armed advance if its deadline has passed. Returns whether it fired.
    pub fn tick(&mut self, now: Instant) -> Result<bool> {
        match self.pending {
            Some(ticket) => self.fire(ticket, now),
            None => Ok(false),
        }
    }

    /// Fires a specific ticket. Stale or early tickets are ignored.
    pub fn fire(&mut self, ticket: TimerTicket, now: Instant) -> Result<bool> {
        if ticket.generation != self.generation || self.pending != Some(ticket) {
            debug!(generation = ticket.generation, "stale timer ignored");
            return Ok(false);
        }
        if now < ticket.due {
            return Ok(false);
        }

        self.pending = None;
        self.dispatch(Action::Advance, now)?;
        Ok(true)
    }

    fn next(&mut self) -> Result<()> {
        self.current_chord = next_chord(&self.randomizer, &mut self.rng)?;
        self.phase = Phase::Prompt;
        info!(chord = %self.current_chord.id(), "next chord");
        Ok(())
    }

    fn reset(&mut self) -> Result<()> {
        self.randomizer = self.defaults.randomizer.clone();
        self.display = self.defaults.display.clone();
        self.auto = false;
        self.paused = false;
        self.prompt_seconds = clamp_delay(self.defaults.prompt_seconds, 2.0);
        self.reveal_seconds = clamp_delay(self.defaults.reveal_seconds, 2.0);
        self.extra_roots_text = extra_roots_text(&self.randomizer);
        self.next()
    }

    /// What the timer depends on. A chord change counts as well, so Next re-arms even
    /// when the phase was already `Prompt`.
    fn timer_inputs(&self) -> (bool, bool, Phase, u64, u64, Chord) {
        (
            self.auto,
            self.paused,
            self.phase,
            self.prompt_seconds.to_bits(),
            self.reveal_seconds.to_bits(),
            self.current_chord,
        )
    }

    fn rearm(&mut self, now: Instant) {
        self.generation += 1;
        self.pending = if self.auto && !self.paused {
            Some(TimerTicket {
                generation: self.generation,
                due: now + self.current_delay(),
            })
        } else {
            None
        };
        debug!(generation = self.generation, armed = self.pending.is_some(), "timer re-armed");
    }
}

fn clamp_delay(seconds: f64, fallback: f64) -> f64 {
    let seconds = if seconds.is_finite() { seconds } else { fallback };
    seconds.clamp(MIN_DELAY_SECONDS, MAX_DELAY_SECONDS)
}

fn extra_roots_text(settings: &RandomizerSettings) -> String {
    settings
        .extra_roots
        .iter()
        .map(|r| r.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Adds or removes `item`, refusing to remove the last one. Returns whether anything changed.
fn toggle_keep_one<T: PartialEq>(items: &mut Vec<T>, item: T) -> bool {
    match items.iter().position(|x| *x == item) {
        Some(_) if items.len() == 1 => false,
        Some(index) => {
            items.remove(index);
            true
        }
        None => {
            items.push(item);
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guitar::music_note::Root;

    fn session() -> PracticeSession {
        PracticeSession::with_seed(SessionDefaults::default(), 11).unwrap()
    }

    #[test]
    fn test_reveal_then_next() {
        let now = Instant::now();
        let mut s = session();
        assert_eq!(s.phase, Phase::Prompt);

        s.dispatch(Action::Advance, now).unwrap();
        assert!(s.is_revealed());

        s.dispatch(Action::Advance, now).unwrap();
        assert_eq!(s.phase, Phase::Prompt);
    }

    #[test]
    fn test_auto_cycle_uses_both_delays() {
        let start = Instant::now();
        let mut s = session();
        s.dispatch(Action::SetPromptSeconds(3.0), start).unwrap();
        s.dispatch(Action::SetRevealSeconds(1.0), start).unwrap();
        s.dispatch(Action::ToggleAuto, start).unwrap();

        assert_eq!(s.time_until_advance(start), Some(Duration::from_secs(3)));
        assert!(!s.tick(start + Duration::from_secs(2)).unwrap());
        assert!(s.tick(start + Duration::from_secs(3)).unwrap());
        assert_eq!(s.phase, Phase::Revealed);

        let revealed_at = start + Duration::from_secs(3);
        assert_eq!(
            s.time_until_advance(revealed_at),
            Some(Duration::from_secs(1))
        );
        assert!(s.tick(revealed_at + Duration::from_secs(1)).unwrap());
        assert_eq!(s.phase, Phase::Prompt);
        assert!(s.pending().is_some());
    }

    #[test]
    fn test_stale_ticket_never_fires() {
        let start = Instant::now();
        let mut s = session();
        s.dispatch(Action::ToggleAuto, start).unwrap();
        let old = s.pending().unwrap();

        // 手动揭示后旧的定时器作废
        s.dispatch(Action::Reveal, start).unwrap();
        let later = start + Duration::from_secs(60);
        assert!(!s.fire(old, later).unwrap());
        assert_eq!(s.phase, Phase::Revealed);

        s.dispatch(Action::SetRevealSeconds(5.0), start).unwrap();
        let current = s.pending().unwrap();
        assert_ne!(current.generation, old.generation);
        assert!(s.fire(current, later).unwrap());
        assert_eq!(s.phase, Phase::Prompt);
    }

    #[test]
    fn test_pause_and_auto_off_disarm() {
        let start = Instant::now();
        let mut s = session();
        s.dispatch(Action::ToggleAuto, start).unwrap();
        let armed = s.pending().unwrap();

        s.dispatch(Action::TogglePause, start).unwrap();
        assert!(s.pending().is_none());
        assert!(!s.fire(armed, start + Duration::from_secs(60)).unwrap());
        assert_eq!(s.phase, Phase::Prompt);

        s.dispatch(Action::TogglePause, start).unwrap();
        assert!(s.pending().is_some());

        s.dispatch(Action::ToggleAuto, start).unwrap();
        assert!(s.pending().is_none());
        assert!(!s.tick(start + Duration::from_secs(60)).unwrap());
    }

    #[test]
    fn test_auto_on_clears_pause() {
        let now = Instant::now();
        let mut s = session();
        s.dispatch(Action::TogglePause, now).unwrap();
        assert!(s.paused);
        s.dispatch(Action::ToggleAuto, now).unwrap();
        assert!(s.auto);
        assert!(!s.paused);
    }

    #[test]
    fn test_delays_are_clamped() {
        let now = Instant::now();
        let mut s = session();
        s.dispatch(Action::SetPromptSeconds(0.01), now).unwrap();
        assert_eq!(s.prompt_seconds, MIN_DELAY_SECONDS);
        s.dispatch(Action::SetRevealSeconds(f64::NAN), now).unwrap();
        assert_eq!(s.reveal_seconds, 2.0);
    }

    #[test]
    fn test_toggles_keep_one_selected() {
        let now = Instant::now();
        let mut s = session();
        for shape in [CagedShape::E, CagedShape::A, CagedShape::D, CagedShape::G] {
            s.dispatch(Action::ToggleShape(shape), now).unwrap();
        }
        assert_eq!(s.randomizer.allowed_shapes, vec![CagedShape::C]);

        s.dispatch(Action::ToggleShape(CagedShape::C), now).unwrap();
        assert_eq!(s.randomizer.allowed_shapes, vec![CagedShape::C]);
        assert_eq!(s.current_chord.shape, CagedShape::C);

        s.dispatch(Action::ToggleShape(CagedShape::E), now).unwrap();
        assert_eq!(s.randomizer.allowed_shapes.len(), 2);
    }

    #[test]
    fn test_root_mode_switch_resets_caged_mode() {
        let now = Instant::now();
        let mut s = session();
        s.dispatch(Action::SetCagedMode(CagedMode::Lock), now).unwrap();
        s.dispatch(Action::SetRootMode(RootMode::CagedOnly), now).unwrap();
        assert_eq!(s.randomizer.caged_mode, CagedMode::RandomShape);
    }

    #[test]
    fn test_extra_roots_text_does_not_reroll() {
        let now = Instant::now();
        let mut s = session();
        s.dispatch(Action::Reveal, now).unwrap();
        let chord = s.current_chord;

        s.dispatch(Action::SetExtraRootsText("F#, Bb".to_string()), now)
            .unwrap();
        assert_eq!(s.current_chord, chord);
        assert!(s.is_revealed());
        assert_eq!(s.randomizer.extra_roots, vec![Root::FSharp, Root::ASharp]);
        assert_eq!(s.extra_roots_text, "F#, Bb");
    }

    #[test]
    fn test_reset_restores_defaults() {
        let now = Instant::now();
        let mut s = session();
        s.dispatch(Action::ToggleAuto, now).unwrap();
        s.dispatch(Action::ToggleQuality(ChordQuality::Major), now).unwrap();
        s.dispatch(Action::SetAccidentalPreference(AccidentalPreference::Flat), now)
            .unwrap();

        s.dispatch(Action::Reset, now).unwrap();
        assert!(!s.auto);
        assert!(s.pending().is_none());
        assert_eq!(s.randomizer, RandomizerSettings::default());
        assert_eq!(s.display.accidental_preference, AccidentalPreference::Sharp);
    }

    #[test]
    fn test_reset_keeps_configured_extra_roots_text() {
        let now = Instant::now();
        let mut defaults = SessionDefaults::default();
        defaults.randomizer.root_mode = RootMode::CagedOnly;
        defaults.randomizer.extra_roots = vec![Root::FSharp];
        let mut s = PracticeSession::with_seed(defaults, 5).unwrap();
        assert_eq!(s.extra_roots_text, "F#");

        s.dispatch(Action::SetExtraRootsText("Bb".to_string()), now)
            .unwrap();
        s.dispatch(Action::Reset, now).unwrap();
        assert_eq!(s.randomizer.extra_roots, vec![Root::FSharp]);
        assert_eq!(s.extra_roots_text, "F#");
    }

    #[test]
    fn test_configured_delays_are_bounded() {
        let now = Instant::now();
        let defaults = SessionDefaults {
            prompt_seconds: 1e300,
            reveal_seconds: f64::INFINITY,
            ..SessionDefaults::default()
        };
        let mut s = PracticeSession::with_seed(defaults, 3).unwrap();
        assert_eq!(s.prompt_seconds, MAX_DELAY_SECONDS);
        assert_eq!(s.reveal_seconds, 2.0);

        s.dispatch(Action::ToggleAuto, now).unwrap();
        assert_eq!(
            s.time_until_advance(now),
            Some(Duration::from_secs_f64(MAX_DELAY_SECONDS))
        );

        s.dispatch(Action::SetRevealSeconds(1e18), now).unwrap();
        assert_eq!(s.reveal_seconds, MAX_DELAY_SECONDS);
        s.dispatch(Action::SetPromptSeconds(0.0), now).unwrap();
        assert_eq!(s.prompt_seconds, MIN_DELAY_SECONDS);
    }

    #[test]
    fn test_empty_settings_fall_back_to_defaults() {
        let mut defaults = SessionDefaults::default();
        defaults.randomizer.allowed_qualities.clear();
        assert!(PracticeSession::new(defaults.clone()).is_err());

        let s = PracticeSession::new_or_default(defaults).unwrap();
        assert_eq!(s.randomizer, RandomizerSettings::default());
    }

    #[test]
    fn test_voicing_matches_current_chord() {
        let s = session();
        let voicing = s.voicing().unwrap();
        assert_eq!(Some(voicing), voicing_for_chord(&s.current_chord));
    }
}
