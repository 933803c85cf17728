//! Movement and survival state machine for the player's actor.
//!
//! The controller is driven by two entry points owned by the host loop:
//! [`ActorController::on_input`] once per input poll and
//! [`ActorController::on_tick`] once per fixed physics step. Collision
//! callbacks arrive between them from the solver. Death is terminal: once
//! [`ActorController::die`] has run, every entry point is a no-op.

use std::fmt;

use glam::Vec2;
use log::{debug, info};

use crate::collision::{classify_contact, Aabb, ColliderTag, ContactKind, ContactOutcome, LayerMask};
use crate::error::SettingsError;
use crate::input::{InputAction, PrimaryInput};
use crate::mode::LocomotionMode;
use crate::ports::{ActorServices, AnimationTrigger};
use crate::settings::ControllerSettings;

/// Per-actor locomotion controller.
pub struct ActorController {
    mode: LocomotionMode,
    settings: ControllerSettings,
    alive: bool,
    ascend_held: bool,
    ascend_effect_started: bool,
    just_jumped: bool,
    services: ActorServices,
}

impl fmt::Debug for ActorController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActorController")
            .field("mode", &self.mode)
            .field("alive", &self.alive)
            .field("ascend_held", &self.ascend_held)
            .field("ascend_effect_started", &self.ascend_effect_started)
            .field("just_jumped", &self.just_jumped)
            .finish_non_exhaustive()
    }
}

impl ActorController {
    /// Creates a living controller in `mode`.
    ///
    /// # Errors
    /// Returns a [`SettingsError`] when `settings` fail validation.
    pub fn new(
        mode: LocomotionMode,
        settings: ControllerSettings,
        services: ActorServices,
    ) -> Result<Self, SettingsError> {
        settings.validate()?;
        info!("Creating actor controller in {mode} mode");
        Ok(Self {
            mode,
            settings,
            alive: true,
            ascend_held: false,
            ascend_effect_started: false,
            just_jumped: false,
            services,
        })
    }

    /// Active locomotion mode.
    #[must_use]
    pub const fn mode(&self) -> LocomotionMode {
        self.mode
    }

    /// Settings the controller was built with.
    #[must_use]
    pub const fn settings(&self) -> &ControllerSettings {
        &self.settings
    }

    /// `false` once the actor has died.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.alive
    }

    /// Whether the jetpack input is currently held.
    #[must_use]
    pub const fn is_ascend_held(&self) -> bool {
        self.ascend_held
    }

    /// Whether the jetpack sound and particles run for the current hold.
    #[must_use]
    pub const fn has_started_ascend_effect(&self) -> bool {
        self.ascend_effect_started
    }

    /// Whether a jump is waiting for the next landing.
    #[must_use]
    pub const fn has_just_jumped(&self) -> bool {
        self.just_jumped
    }

    /// Current body velocity.
    #[must_use]
    pub fn velocity(&self) -> Vec2 {
        self.services.body.velocity()
    }

    /// Current body position.
    #[must_use]
    pub fn position(&self) -> Vec2 {
        self.services.body.position()
    }

    /// Switches locomotion mode on behalf of a level trigger.
    ///
    /// Leaving Flying ends any jetpack hold first. Ignored once dead.
    pub fn set_mode(&mut self, mode: LocomotionMode) {
        if !self.alive || mode == self.mode {
            return;
        }
        if self.mode == LocomotionMode::Flying {
            self.end_ascend_session();
        }
        self.just_jumped = false;
        info!("Locomotion mode {} -> {mode}", self.mode);
        self.mode = mode;
    }

    /// Handles one primary input edge.
    pub fn on_input(&mut self, input: PrimaryInput) {
        if !self.alive {
            return;
        }
        match InputAction::resolve(self.mode, input) {
            Some(InputAction::Ascend) => {
                self.ascend();
            }
            Some(InputAction::Flap) => {
                self.flap();
            }
            Some(InputAction::HoldAscend) => self.hold_ascend(),
            Some(InputAction::StopAscending) => {
                self.stop_ascending();
            }
            None => {}
        }
    }

    /// Advances the controller by one fixed step of `dt` seconds.
    ///
    /// Does nothing while dead or while the session is paused.
    pub fn on_tick(&mut self, dt: f32) {
        if !self.alive || !self.services.session.is_active() {
            return;
        }
        if self.mode == LocomotionMode::Running {
            self.rearm_after_landing();
        }

        let mut velocity = self.services.body.velocity();
        velocity.x = self.settings.horizontal_speed;
        match self.mode {
            LocomotionMode::Running => {
                if velocity.y < 0.0 {
                    velocity.y += self.settings.gravity * self.settings.fall_boost * dt;
                }
            }
            LocomotionMode::Flapping => {}
            LocomotionMode::Flying => {
                velocity.y = velocity.y.max(self.settings.descent_cap);
                if self.ascend_held {
                    self.start_ascend_effect();
                    velocity.y = velocity.y.min(self.settings.ascent_cap);
                    velocity.y += self.settings.ascend_thrust;
                }
            }
        }
        self.services.body.set_velocity(velocity);
    }

    /// Jumps if the actor is grounded or at vertical rest.
    ///
    /// Only valid in Running mode. Returns `true` when the jump happened.
    pub fn ascend(&mut self) -> bool {
        if !self.accepts_action(LocomotionMode::Running) {
            return false;
        }
        let velocity = self.services.body.velocity();
        if velocity.y != 0.0 && !self.is_grounded() {
            debug!("Jump ignored while airborne (vy = {:.3})", velocity.y);
            return false;
        }

        self.services.audio.play(&self.settings.sounds.jump);
        self.just_jumped = true;
        self.services.animation.trigger(AnimationTrigger::Jump);
        self.services
            .body
            .set_velocity(Vec2::new(velocity.x, self.settings.ascend_impulse));
        debug!("Jumped with impulse {}", self.settings.ascend_impulse);
        true
    }

    /// Flaps upwards regardless of ground contact.
    ///
    /// Only valid in Flapping mode. Returns `true` when the flap happened.
    pub fn flap(&mut self) -> bool {
        if !self.accepts_action(LocomotionMode::Flapping) {
            return false;
        }
        self.services.audio.play(&self.settings.sounds.jump);
        self.services.animation.trigger(AnimationTrigger::Flap);
        let velocity = self.services.body.velocity();
        self.services
            .body
            .set_velocity(Vec2::new(velocity.x, self.settings.flap_velocity()));
        debug!("Flapped");
        true
    }

    /// Ends the current jetpack hold, stopping its sound and particles.
    ///
    /// Returns `false` without side effects when nothing is held or the
    /// actor is dead.
    pub fn stop_ascending(&mut self) -> bool {
        if !self.alive {
            return false;
        }
        self.end_ascend_session()
    }

    /// Handles a solid collision reported by the solver.
    ///
    /// Only ground contacts matter: landing on top is safe, anything else
    /// kills the actor.
    pub fn on_solid_contact(&mut self, tag: ColliderTag, own: Aabb, other: Aabb) -> ContactOutcome {
        if !self.alive || tag != ColliderTag::Ground {
            return ContactOutcome::Ignored;
        }
        match classify_contact(own.min.y, other.max.y) {
            ContactKind::Landing => {
                debug!("Landed on ground topped at {:.3}", other.max.y);
                ContactOutcome::Landed
            }
            ContactKind::Lethal => {
                debug!(
                    "Struck ground from the side (bottom {:.3}, top {:.3})",
                    own.min.y, other.max.y
                );
                self.die();
                ContactOutcome::Killed
            }
        }
    }

    /// Handles a trigger overlap; obstacles are always lethal.
    pub fn on_trigger_contact(&mut self, tag: ColliderTag) -> ContactOutcome {
        if !self.alive || tag != ColliderTag::Obstacle {
            return ContactOutcome::Ignored;
        }
        debug!("Touched an obstacle");
        self.die();
        ContactOutcome::Killed
    }

    /// Kills the actor. Only the first call has any effect.
    ///
    /// Stops the jetpack, freezes the body, disables animation, plays the
    /// death sound and notifies the session. Returns `true` on that first call.
    pub fn die(&mut self) -> bool {
        if !self.alive {
            return false;
        }
        if self.mode == LocomotionMode::Flying {
            self.end_ascend_session();
        }
        self.services.body.freeze();
        self.services.animation.set_enabled(false);
        self.alive = false;
        self.services.audio.play(&self.settings.sounds.death);
        self.services.session.notify_death();
        info!("Actor died at {:?}", self.services.body.position());
        true
    }

    /// Whether the ground probe under the actor touches ground.
    #[must_use]
    pub fn is_grounded(&self) -> bool {
        let centre = self.services.body.position() + self.settings.ground_probe_offset;
        self.services.probe.overlaps(
            centre,
            self.settings.ground_probe_half_extents,
            LayerMask::GROUND,
        )
    }

    fn accepts_action(&self, mode: LocomotionMode) -> bool {
        self.alive && self.mode == mode && self.services.session.is_active()
    }

    fn hold_ascend(&mut self) {
        if !self.ascend_held && self.services.session.is_active() {
            debug!("Jetpack hold started");
            self.ascend_held = true;
        }
    }

    fn start_ascend_effect(&mut self) {
        if self.ascend_effect_started {
            return;
        }
        self.services.audio.play(&self.settings.sounds.jetpack);
        self.services.effects.start();
        self.ascend_effect_started = true;
    }

    fn end_ascend_session(&mut self) -> bool {
        if !self.ascend_held {
            return false;
        }
        if self.ascend_effect_started {
            self.services.audio.stop(&self.settings.sounds.jetpack);
            self.services.effects.stop();
        }
        self.ascend_held = false;
        self.ascend_effect_started = false;
        debug!("Jetpack hold ended");
        true
    }

    // The body must have stopped rising; otherwise the probe still touches the
    // ground on the step right after take-off.
    fn rearm_after_landing(&mut self) {
        if self.just_jumped && self.services.body.velocity().y <= 0.0 && self.is_grounded() {
            self.just_jumped = false;
            self.services.animation.trigger(AnimationTrigger::Running);
        }
    }
}
