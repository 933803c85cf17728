//! A controller wired to a headless world, with helpers to pose it.

use glam::Vec2;
use jetrunner::{
    ActorController, ContactOutcome, ControllerSettings, Course, Cue, HeadlessWorld,
    LocomotionMode, CONTACT_SKIN,
};

/// Fixed step used by the rigs: 60 Hz.
pub const DT: f32 = 1.0 / 60.0;

/// Half size of the rig's body.
pub const HALF_EXTENTS: Vec2 = Vec2::splat(0.5);

/// Controller plus the world that owns its collaborators.
#[derive(Debug)]
pub struct Rig {
    /// Controller under test.
    pub controller: ActorController,
    /// Headless collaborators.
    pub world: HeadlessWorld,
}

impl Rig {
    /// Actor resting on an endless floor at height zero.
    ///
    /// # Examples
    /// ```
    /// use jetrunner::LocomotionMode;
    /// use test_utils::Rig;
    /// let rig = Rig::grounded(LocomotionMode::Running);
    /// assert!(rig.controller.is_grounded());
    /// ```
    pub fn grounded(mode: LocomotionMode) -> Self {
        Self::with_settings(mode, ControllerSettings::default(), 0.0)
    }

    /// Actor whose bottom edge hangs `height` above an endless floor.
    pub fn airborne(mode: LocomotionMode, height: f32) -> Self {
        Self::with_settings(mode, ControllerSettings::default(), height)
    }

    /// Actor with custom settings, bottom edge `height` above the floor.
    ///
    /// # Panics
    /// Panics if `settings` are rejected by the controller.
    pub fn with_settings(mode: LocomotionMode, settings: ControllerSettings, height: f32) -> Self {
        let spawn = Vec2::new(0.0, HALF_EXTENTS.y + CONTACT_SKIN + height);
        let world = HeadlessWorld::new(Course::flat(0.0), spawn, HALF_EXTENTS)
            .with_gravity(settings.gravity);
        let controller = ActorController::new(mode, settings, world.services())
            .unwrap_or_else(|e| panic!("rig settings rejected: {e}"));
        Self { controller, world }
    }

    /// Current body velocity.
    pub fn velocity(&self) -> Vec2 {
        self.controller.velocity()
    }

    /// Forces the body's velocity, as the solver would.
    pub fn set_velocity(&self, velocity: Vec2) {
        self.world.body().set_velocity(velocity);
    }

    /// Runs one full fixed step: controller, then world, then contacts.
    pub fn tick(&mut self) -> Vec<ContactOutcome> {
        self.world.tick(&mut self.controller, DT)
    }

    /// Runs `steps` controller ticks without moving the body.
    pub fn tick_controller(&mut self, steps: usize) {
        for _ in 0..steps {
            self.controller.on_tick(DT);
        }
    }

    /// Removes and returns the cues recorded so far.
    pub fn drain_cues(&self) -> Vec<Cue> {
        self.world.cues().drain()
    }

    /// Number of death notifications the session received.
    pub fn deaths(&self) -> u32 {
        self.world.session().deaths()
    }
}
