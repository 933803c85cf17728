//! Locomotion modes selecting the input mapping and per-tick physics rule.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModeParseError;

/// The actor's current way of moving through a level.
///
/// Exactly one mode is active at a time. The controller reads it every step
/// but only an external level trigger changes it.
///
/// # Examples
///
/// ```
/// use jetrunner::LocomotionMode;
/// let mode: LocomotionMode = "flying".parse().unwrap();
/// assert_eq!(mode, LocomotionMode::Flying);
/// assert_eq!(LocomotionMode::try_from(1).unwrap(), LocomotionMode::Flapping);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocomotionMode {
    /// Ground runner: a press jumps when grounded.
    #[default]
    Running,
    /// Every press flaps upwards regardless of ground contact.
    Flapping,
    /// Holding the input fires a jetpack that rises softly.
    Flying,
}

impl LocomotionMode {
    /// Every mode, in legacy game-state order.
    pub const ALL: [Self; 3] = [Self::Running, Self::Flapping, Self::Flying];

    /// Lowercase name used in configuration and on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Flapping => "flapping",
            Self::Flying => "flying",
        }
    }
}

impl fmt::Display for LocomotionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LocomotionMode {
    type Err = ModeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ModeParseError::UnknownName(s.to_owned()))
    }
}

/// Level data still stores the mode as `0`, `1` or `2`.
impl TryFrom<u8> for LocomotionMode {
    type Error = ModeParseError;

    fn try_from(state: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(usize::from(state))
            .copied()
            .ok_or(ModeParseError::UnknownState(state))
    }
}
