//! Error types for the trainer
//!
//! A missing voicing template is not an error: the generator returns `None` for it.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrainerError {
    /// A randomizer candidate set was empty. The settings layer must keep at
    /// least one quality and one shape selected.
    #[error("Cannot pick from an empty candidate set: {0}")]
    EmptyCandidates(&'static str),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TrainerError>;
