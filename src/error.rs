//! Error types surfaced by the controller crate.
//!
//! Runtime operations on [`crate::ActorController`] never fail; these errors
//! only cover construction and configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Reasons a [`crate::ControllerSettings`] value is rejected.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// A tunable is NaN or infinite.
    #[error("setting `{field}` must be finite, got {value}")]
    NonFinite {
        /// Name of the offending field.
        field: &'static str,
        /// Rejected value.
        value: f32,
    },
    /// A tunable that must be strictly positive is zero or negative.
    #[error("setting `{field}` must be positive, got {value}")]
    NonPositive {
        /// Name of the offending field.
        field: &'static str,
        /// Rejected value.
        value: f32,
    },
    /// The Flying descent cap must point downwards.
    #[error("descent cap must be negative, got {0}")]
    DescentCapNotNegative(f32),
    /// The Flying ascent cap must point upwards.
    #[error("ascent cap must be positive, got {0}")]
    AscentCapNotPositive(f32),
    /// A cue name is empty.
    #[error("sound name `{0}` must not be empty")]
    EmptySoundName(&'static str),
    /// The settings file could not be read.
    #[error("failed to read settings from {}", path.display())]
    Io {
        /// File that failed to load.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The settings document is not valid JSON for this schema.
    #[error("malformed settings: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Failure to interpret a locomotion mode from text or a legacy game state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModeParseError {
    /// The name matches none of the known modes.
    #[error("unknown locomotion mode `{0}`")]
    UnknownName(String),
    /// The numeric game state is outside `0..=2`.
    #[error("unknown game state {0}")]
    UnknownState(u8),
}
