//! Tunable controller settings and their JSON loader.

use std::fs;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::constants::{
    ASCEND_IMPULSE, ASCEND_THRUST, ASCENT_CAP, DEATH_SOUND, DESCENT_CAP, FALL_BOOST, FLAP_FACTOR,
    GRAVITY, GROUND_PROBE_HALF_EXTENTS, GROUND_PROBE_OFFSET, HORIZONTAL_SPEED, JETPACK_SOUND,
    JUMP_SOUND,
};
use crate::error::SettingsError;

/// Names of the sounds the controller asks the audio sink to play.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoundNames {
    /// Jump and flap.
    pub jump: String,
    /// Looping jetpack.
    pub jetpack: String,
    /// Death sting.
    pub death: String,
}

impl Default for SoundNames {
    fn default() -> Self {
        Self {
            jump: JUMP_SOUND.to_owned(),
            jetpack: JETPACK_SOUND.to_owned(),
            death: DEATH_SOUND.to_owned(),
        }
    }
}

/// Runtime configuration for [`crate::ActorController`].
///
/// Every field has a default, so a settings file only needs the values it
/// overrides.
///
/// # Examples
///
/// ```
/// use jetrunner::ControllerSettings;
/// let settings = ControllerSettings::from_json_str(r#"{ "ascend_impulse": 12.0 }"#).unwrap();
/// assert_eq!(settings.ascend_impulse, 12.0);
/// assert_eq!(settings.flap_factor, 0.8);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerSettings {
    /// Forward speed forced every tick, in units per second.
    pub horizontal_speed: f32,
    /// Vertical velocity set by a jump.
    pub ascend_impulse: f32,
    /// Extra gravity multiplier applied while falling in Running mode.
    pub fall_boost: f32,
    /// Flap velocity as a fraction of `ascend_impulse`.
    pub flap_factor: f32,
    /// Lowest vertical velocity allowed in Flying mode.
    pub descent_cap: f32,
    /// Upward clamp applied before thrust while the jetpack is held.
    pub ascent_cap: f32,
    /// Upward velocity added on every held tick in Flying mode.
    pub ascend_thrust: f32,
    /// World gravity along the vertical axis.
    pub gravity: f32,
    /// Ground probe anchor relative to the body's position.
    pub ground_probe_offset: Vec2,
    /// Half size of the ground probe box.
    pub ground_probe_half_extents: Vec2,
    /// Audio cue names.
    pub sounds: SoundNames,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            horizontal_speed: HORIZONTAL_SPEED,
            ascend_impulse: ASCEND_IMPULSE,
            fall_boost: FALL_BOOST,
            flap_factor: FLAP_FACTOR,
            descent_cap: DESCENT_CAP,
            ascent_cap: ASCENT_CAP,
            ascend_thrust: ASCEND_THRUST,
            gravity: GRAVITY,
            ground_probe_offset: Vec2::from_array(GROUND_PROBE_OFFSET),
            ground_probe_half_extents: Vec2::from_array(GROUND_PROBE_HALF_EXTENTS),
            sounds: SoundNames::default(),
        }
    }
}

impl ControllerSettings {
    /// Parses and validates settings from a JSON document.
    ///
    /// # Errors
    /// Returns [`SettingsError::Parse`] for malformed JSON and any validation
    /// error from [`ControllerSettings::validate`].
    pub fn from_json_str(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reads, parses and validates a JSON settings file.
    ///
    /// # Errors
    /// Returns [`SettingsError::Io`] if the file cannot be read, otherwise
    /// the errors of [`ControllerSettings::from_json_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Checks that every tunable is usable by the controller.
    ///
    /// # Errors
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let scalars = [
            ("horizontal_speed", self.horizontal_speed),
            ("ascend_impulse", self.ascend_impulse),
            ("fall_boost", self.fall_boost),
            ("flap_factor", self.flap_factor),
            ("descent_cap", self.descent_cap),
            ("ascent_cap", self.ascent_cap),
            ("ascend_thrust", self.ascend_thrust),
            ("gravity", self.gravity),
            ("ground_probe_offset.x", self.ground_probe_offset.x),
            ("ground_probe_offset.y", self.ground_probe_offset.y),
            ("ground_probe_half_extents.x", self.ground_probe_half_extents.x),
            ("ground_probe_half_extents.y", self.ground_probe_half_extents.y),
        ];
        if let Some((field, value)) = scalars.into_iter().find(|(_, v)| !v.is_finite()) {
            return Err(SettingsError::NonFinite { field, value });
        }

        let positives = [
            ("ascend_impulse", self.ascend_impulse),
            ("flap_factor", self.flap_factor),
            ("ground_probe_half_extents.x", self.ground_probe_half_extents.x),
            ("ground_probe_half_extents.y", self.ground_probe_half_extents.y),
        ];
        if let Some((field, value)) = positives.into_iter().find(|(_, v)| *v <= 0.0) {
            return Err(SettingsError::NonPositive { field, value });
        }
        if self.fall_boost < 0.0 {
            return Err(SettingsError::NonPositive {
                field: "fall_boost",
                value: self.fall_boost,
            });
        }
        if self.descent_cap >= 0.0 {
            return Err(SettingsError::DescentCapNotNegative(self.descent_cap));
        }
        if self.ascent_cap <= 0.0 {
            return Err(SettingsError::AscentCapNotPositive(self.ascent_cap));
        }

        let sounds = [
            ("jump", &self.sounds.jump),
            ("jetpack", &self.sounds.jetpack),
            ("death", &self.sounds.death),
        ];
        if let Some((name, _)) = sounds.into_iter().find(|(_, s)| s.is_empty()) {
            return Err(SettingsError::EmptySoundName(name));
        }
        Ok(())
    }

    /// Vertical velocity of a flap.
    #[must_use]
    pub fn flap_velocity(&self) -> f32 {
        self.flap_factor * self.ascend_impulse
    }
}
