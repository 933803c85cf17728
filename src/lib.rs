#![cfg_attr(docsrs, feature(doc_cfg))]
//! Movement and survival state machine for a side-scrolling runner.
//!
//! [`ActorController`] owns the actor's locomotion mode, turns input into
//! velocity changes, classifies collisions and reports death to the session.
//! The physics solver, animator, audio and particles are collaborators
//! reached through the traits in [`ports`]; [`sim`] provides headless
//! implementations and [`plugin`] runs everything inside a Bevy `App`.
pub mod collision;
pub mod constants;
pub mod controller;
pub mod error;
pub mod input;
pub mod logging;
pub mod mode;
pub mod plugin;
pub mod ports;
pub mod settings;
pub mod sim;
pub use constants::*;

// Re-export commonly used items
pub use collision::{classify_contact, Aabb, ColliderTag, ContactKind, ContactOutcome, LayerMask};
pub use controller::ActorController;
pub use error::{ModeParseError, SettingsError};
pub use input::{InputAction, PrimaryInput};
pub use logging::init as init_logging;
pub use mode::LocomotionMode;
pub use plugin::{ActorCue, ActorDied, ActorPlugin, ActorPluginError, ActorRuntime, ModeTrigger};
pub use ports::{
    ActorServices, AnimationSink, AnimationTrigger, AudioSink, EffectSink, GroundProbe, RigidBody,
    SessionAuthority,
};
pub use settings::{ControllerSettings, SoundNames};
pub use sim::{Contact, Course, Cue, CueLog, HeadlessWorld, SessionFlag, SimBody};

pub mod prelude {
    //! Prelude exports used in documentation examples.
    //!
    //! ```rust,no_run
    //! use jetrunner::prelude::*;
    //! ```

    pub use crate::ActorController;
    pub use crate::ActorPlugin;
    pub use crate::ActorServices;
    pub use crate::ControllerSettings;
    pub use crate::HeadlessWorld;
    pub use crate::LocomotionMode;
    pub use crate::PrimaryInput;
    pub use glam::Vec2;
}
