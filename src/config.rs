//! Trainer configuration, read from a JSON file.
//!
//! Every field has a default, so a partial file (or `{}`) is valid.

use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::Path;
use tracing::warn;

use crate::error::Result;
use crate::guitar::guitar_string::Tuning;
use crate::guitar::music_note::AccidentalPreference;
use crate::randomizer::RandomizerSettings;
use crate::session::{DisplaySettings, SessionDefaults};

pub const DEFAULT_CONFIG_PATH: &str = "asset/config/trainer_config.json";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct TrainerConfig {
    pub randomizer: RandomizerSettings,
    pub accidental_preference: AccidentalPreference,
    pub tuning: Tuning,
    pub prompt_seconds: f64,
    pub reveal_seconds: f64,
    pub dark_mode: bool,
    /// Frets shown in the diagram window.
    pub fret_count: u8,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        TrainerConfig {
            randomizer: RandomizerSettings::default(),
            accidental_preference: AccidentalPreference::Sharp,
            tuning: Tuning::standard(),
            prompt_seconds: 2.0,
            reveal_seconds: 2.0,
            dark_mode: true,
            fret_count: 5,
        }
    }
}

impl TrainerConfig {
    pub fn session_defaults(&self) -> SessionDefaults {
        SessionDefaults {
            randomizer: self.randomizer.clone(),
            display: DisplaySettings {
                accidental_preference: self.accidental_preference,
                tuning: self.tuning.clone(),
            },
            prompt_seconds: self.prompt_seconds,
            reveal_seconds: self.reveal_seconds,
        }
    }
}

pub fn load_config(path: &Path) -> Result<TrainerConfig> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Loads the config, falling back to defaults when the file is missing or invalid.
pub fn load_or_default(path: &Path) -> TrainerConfig {
    if !path.exists() {
        return TrainerConfig::default();
    }
    match load_config(path) {
        Ok(config) => config,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "using default config");
            TrainerConfig::default()
        }
    }
}

pub fn save_config(path: &Path, config: &TrainerConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, config)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guitar::guitar_chord::{CagedShape, ChordQuality};
    use crate::guitar::music_note::Root;
    use crate::randomizer::RootMode;

    #[test]
    fn test_partial_config_uses_defaults() {
        let json = r#"{
            "randomizer": {
                "rootMode": "cagedOnly",
                "extraRoots": ["F#", "A#"],
                "allowedQualities": ["Major", "7"]
            },
            "accidentalPreference": "flat",
            "promptSeconds": 4.5
        }"#;
        let config: TrainerConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.randomizer.root_mode, RootMode::CagedOnly);
        assert_eq!(config.randomizer.extra_roots, vec![Root::FSharp, Root::ASharp]);
        assert_eq!(
            config.randomizer.allowed_qualities,
            vec![ChordQuality::Major, ChordQuality::Dominant7]
        );
        assert_eq!(config.randomizer.allowed_shapes.len(), 5);
        assert_eq!(config.accidental_preference, AccidentalPreference::Flat);
        assert_eq!(config.prompt_seconds, 4.5);
        assert_eq!(config.reveal_seconds, 2.0);
        assert_eq!(config.fret_count, 5);
    }

    #[test]
    fn test_save_and_load() {
        let dir = std::env::temp_dir().join(format!("caged_trainer_cfg_{}", std::process::id()));
        let path = dir.join("trainer_config.json");

        let mut config = TrainerConfig::default();
        config.randomizer.allowed_shapes = vec![CagedShape::A];
        config.dark_mode = false;
        save_config(&path, &config).unwrap();

        let loaded = load_config(&path).unwrap();
        assert_eq!(loaded, config);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_invalid_file_falls_back() {
        let dir = std::env::temp_dir().join(format!("caged_trainer_bad_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(load_config(&path).is_err());
        assert_eq!(load_or_default(&path), TrainerConfig::default());
        assert_eq!(
            load_or_default(&dir.join("missing.json")),
            TrainerConfig::default()
        );

        let _ = fs::remove_dir_all(&dir);
    }
}
