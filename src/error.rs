//! Setup errors
//!
//! Gameplay itself never fails. These only come out of config loading and
//! session construction, where bad data must be rejected up front.

use thiserror::Error;

use crate::sim::state::FruitKind;

#[derive(Debug, Error)]
pub enum SetupError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed tuning JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid tuning: {0}")]
    InvalidTuning(String),

    #[error("room requires no fruit; the gate could never be earned")]
    EmptyRequirement,

    #[error("required fruit not present anywhere in the room: {missing:?}")]
    UnsatisfiableFruits { missing: Vec<FruitKind> },

    #[error("{locked} locked boxes hold required fruit but only {keys} keys exist")]
    NotEnoughKeys { locked: usize, keys: usize },

    #[error("switch palette: {0}")]
    SwitchPalette(String),
}
