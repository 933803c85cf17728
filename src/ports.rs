//! Collaborators the controller drives but does not implement.
//!
//! The physics solver, animation, audio, particle effects and the game
//! session all live outside the controller. Each is reached through a small
//! trait so hosts can plug in an engine, the headless [`crate::sim`] world, or
//! test doubles.

use glam::Vec2;

use crate::collision::LayerMask;

/// Velocity-bearing body advanced by an external solver.
pub trait RigidBody {
    /// World position of the body's origin.
    fn position(&self) -> Vec2;
    /// Current linear velocity.
    fn velocity(&self) -> Vec2;
    /// Replaces the linear velocity.
    fn set_velocity(&mut self, velocity: Vec2);
    /// Makes the body static with zero velocity so the solver stops
    /// integrating it.
    fn freeze(&mut self);
    /// Whether [`RigidBody::freeze`] has been applied.
    fn is_frozen(&self) -> bool;
}

/// Box overlap query against layered world geometry.
pub trait GroundProbe {
    /// Returns `true` if any collider on `layers` intersects the box.
    fn overlaps(&self, centre: Vec2, half_extents: Vec2, layers: LayerMask) -> bool;
}

/// Animation state triggers understood by the actor's animator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationTrigger {
    /// Back on the ground.
    Running,
    /// Left the ground.
    Jump,
    /// Wing flap.
    Flap,
}

impl AnimationTrigger {
    /// Trigger name as authored in the animator.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Jump => "jump",
            Self::Flap => "flap",
        }
    }
}

/// Fire-and-forget animation triggers.
pub trait AnimationSink {
    /// Fires a named trigger.
    fn trigger(&mut self, trigger: AnimationTrigger);
    /// Enables or disables the animator; disabled animators ignore triggers.
    fn set_enabled(&mut self, enabled: bool);
}

/// Named sound playback.
pub trait AudioSink {
    /// Starts the sound called `name`.
    fn play(&mut self, name: &str);
    /// Stops the sound called `name`; stopping a silent sound is harmless.
    fn stop(&mut self, name: &str);
}

/// Jetpack particle effect.
pub trait EffectSink {
    /// Starts emitting.
    fn start(&mut self);
    /// Stops emitting.
    fn stop(&mut self);
}

/// Owner of the overall game session.
pub trait SessionAuthority {
    /// Whether the simulation is running (not paused or over).
    fn is_active(&self) -> bool;
    /// Told once when the actor dies.
    fn notify_death(&mut self);
}

/// Collaborators injected into an [`crate::ActorController`] at construction.
pub struct ActorServices {
    /// The actor's rigid body.
    pub body: Box<dyn RigidBody>,
    /// Ground overlap query.
    pub probe: Box<dyn GroundProbe>,
    /// Animator.
    pub animation: Box<dyn AnimationSink>,
    /// Sound player.
    pub audio: Box<dyn AudioSink>,
    /// Jetpack particles.
    pub effects: Box<dyn EffectSink>,
    /// Game session.
    pub session: Box<dyn SessionAuthority>,
}
