//! Headless stand-ins for the engine collaborators.
//!
//! [`HeadlessWorld`] owns a single box-shaped body, a static [`Course`] and
//! recorders for every outgoing cue. It integrates gravity, moves the body
//! one axis at a time, pushes it out of ground it penetrates and reports
//! contacts the way an engine's enter callbacks would. It is enough to drive
//! an [`ActorController`] end to end; it is not a general solver.
//!
//! Handles share state through `Rc`, matching the single-threaded contract of
//! the controller.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use glam::Vec2;
use log::trace;

use crate::collision::{Aabb, ColliderTag, ContactOutcome, LayerMask};
use crate::constants::{CONTACT_SKIN, GRAVITY};
use crate::controller::ActorController;
use crate::ports::{
    ActorServices, AnimationSink, AnimationTrigger, AudioSink, EffectSink, GroundProbe, RigidBody,
    SessionAuthority,
};

/// Mutable state of the simulated body.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyState {
    /// Centre of the body's box.
    pub position: Vec2,
    /// Linear velocity.
    pub velocity: Vec2,
    /// Half size of the body's box.
    pub half_extents: Vec2,
    /// Static bodies are no longer integrated.
    pub frozen: bool,
}

impl BodyState {
    /// World-space bounds of the body.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_centre(self.position, self.half_extents)
    }
}

/// Shared handle to the simulated body.
#[derive(Debug, Clone)]
pub struct SimBody(Rc<RefCell<BodyState>>);

impl SimBody {
    /// Creates a moving body centred on `position`.
    #[must_use]
    pub fn new(position: Vec2, half_extents: Vec2) -> Self {
        Self(Rc::new(RefCell::new(BodyState {
            position,
            velocity: Vec2::ZERO,
            half_extents,
            frozen: false,
        })))
    }

    /// Copy of the current state.
    #[must_use]
    pub fn state(&self) -> BodyState {
        self.0.borrow().clone()
    }

    /// World-space bounds of the body.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        self.0.borrow().bounds()
    }

    /// Teleports the body.
    pub fn set_position(&self, position: Vec2) {
        self.0.borrow_mut().position = position;
    }

    /// Overrides the velocity from outside the controller.
    pub fn set_velocity(&self, velocity: Vec2) {
        self.0.borrow_mut().velocity = velocity;
    }
}

impl RigidBody for SimBody {
    fn position(&self) -> Vec2 {
        self.0.borrow().position
    }

    fn velocity(&self) -> Vec2 {
        self.0.borrow().velocity
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        self.0.borrow_mut().velocity = velocity;
    }

    fn freeze(&mut self) {
        let mut state = self.0.borrow_mut();
        state.frozen = true;
        state.velocity = Vec2::ZERO;
    }

    fn is_frozen(&self) -> bool {
        self.0.borrow().frozen
    }
}

/// Static level geometry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Course {
    /// Solid, ground-tagged boxes.
    pub ground: Vec<Aabb>,
    /// Obstacle-tagged trigger boxes.
    pub obstacles: Vec<Aabb>,
}

impl Course {
    /// An endless floor whose top face sits at `top`.
    #[must_use]
    pub fn flat(top: f32) -> Self {
        Self {
            ground: vec![floor(top, -1_000.0, 100_000.0)],
            obstacles: Vec::new(),
        }
    }

    /// Short course with a crate to hop on, a spike and a tall wall.
    #[must_use]
    pub fn demo() -> Self {
        Self {
            ground: vec![
                floor(0.0, -10.0, 400.0),
                Aabb::new(Vec2::new(15.0, 0.0), Vec2::new(17.0, 1.0)),
                Aabb::new(Vec2::new(60.0, 0.0), Vec2::new(62.0, 4.0)),
            ],
            obstacles: vec![Aabb::new(Vec2::new(35.0, 0.0), Vec2::new(35.6, 0.6))],
        }
    }

    fn boxes(&self, layers: LayerMask) -> impl Iterator<Item = &Aabb> {
        let ground = layers
            .intersects(LayerMask::GROUND)
            .then_some(self.ground.iter());
        let obstacles = layers
            .intersects(LayerMask::OBSTACLE)
            .then_some(self.obstacles.iter());
        ground.into_iter().flatten().chain(obstacles.into_iter().flatten())
    }
}

fn floor(top: f32, from_x: f32, to_x: f32) -> Aabb {
    Aabb::new(Vec2::new(from_x, top - 10.0), Vec2::new(to_x, top))
}

/// Overlap queries against a [`Course`].
#[derive(Debug, Clone)]
pub struct CourseProbe(Rc<Course>);

impl GroundProbe for CourseProbe {
    fn overlaps(&self, centre: Vec2, half_extents: Vec2, layers: LayerMask) -> bool {
        let probe = Aabb::from_centre(centre, half_extents);
        self.0.boxes(layers).any(|b| b.overlaps(&probe))
    }
}

/// Something the controller asked a presentation collaborator to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cue {
    /// Animation trigger fired.
    Animation(AnimationTrigger),
    /// Animator switched on or off.
    AnimationEnabled(bool),
    /// Sound started.
    PlaySound(String),
    /// Sound stopped.
    StopSound(String),
    /// Jetpack particles started.
    EffectStarted,
    /// Jetpack particles stopped.
    EffectStopped,
}

/// Records animation, audio and particle requests in order.
///
/// Triggers sent while the animator is disabled are dropped, as an engine
/// animator would ignore them.
#[derive(Debug, Clone)]
pub struct CueLog {
    cues: Rc<RefCell<Vec<Cue>>>,
    animation_enabled: Rc<Cell<bool>>,
}

impl Default for CueLog {
    fn default() -> Self {
        Self {
            cues: Rc::default(),
            animation_enabled: Rc::new(Cell::new(true)),
        }
    }
}

impl CueLog {
    /// Removes and returns every cue recorded so far.
    #[must_use]
    pub fn drain(&self) -> Vec<Cue> {
        self.cues.take()
    }

    /// Whether the animator still honours triggers.
    #[must_use]
    pub fn animation_enabled(&self) -> bool {
        self.animation_enabled.get()
    }

    fn record(&self, cue: Cue) {
        trace!("cue {cue:?}");
        self.cues.borrow_mut().push(cue);
    }
}

impl AnimationSink for CueLog {
    fn trigger(&mut self, trigger: AnimationTrigger) {
        if self.animation_enabled.get() {
            self.record(Cue::Animation(trigger));
        }
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.animation_enabled.set(enabled);
        self.record(Cue::AnimationEnabled(enabled));
    }
}

impl AudioSink for CueLog {
    fn play(&mut self, name: &str) {
        self.record(Cue::PlaySound(name.to_owned()));
    }

    fn stop(&mut self, name: &str) {
        self.record(Cue::StopSound(name.to_owned()));
    }
}

impl EffectSink for CueLog {
    fn start(&mut self) {
        self.record(Cue::EffectStarted);
    }

    fn stop(&mut self) {
        self.record(Cue::EffectStopped);
    }
}

/// Session running flag plus a count of death notifications.
#[derive(Debug, Clone)]
pub struct SessionFlag {
    active: Rc<Cell<bool>>,
    deaths: Rc<Cell<u32>>,
}

impl Default for SessionFlag {
    fn default() -> Self {
        Self {
            active: Rc::new(Cell::new(true)),
            deaths: Rc::default(),
        }
    }
}

impl SessionFlag {
    /// Pauses or resumes the session.
    pub fn set_active(&self, active: bool) {
        self.active.set(active);
    }

    /// Number of death notifications received.
    #[must_use]
    pub fn deaths(&self) -> u32 {
        self.deaths.get()
    }
}

impl SessionAuthority for SessionFlag {
    fn is_active(&self) -> bool {
        self.active.get()
    }

    fn notify_death(&mut self) {
        self.deaths.set(self.deaths.get() + 1);
    }
}

/// Collision reported by [`HeadlessWorld::step`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Contact {
    /// The body started touching a solid collider.
    Solid {
        /// Tag of the struck collider.
        tag: ColliderTag,
        /// Body bounds at the moment of contact.
        own: Aabb,
        /// Bounds of the struck collider.
        other: Aabb,
    },
    /// The body entered a trigger.
    Trigger(ColliderTag),
}

impl Contact {
    /// Forwards the contact to the matching controller callback.
    pub fn deliver_to(self, controller: &mut ActorController) -> ContactOutcome {
        match self {
            Self::Solid { tag, own, other } => controller.on_solid_contact(tag, own, other),
            Self::Trigger(tag) => controller.on_trigger_contact(tag),
        }
    }
}

/// One body on one course with recording collaborators.
#[derive(Debug)]
pub struct HeadlessWorld {
    course: Rc<Course>,
    body: SimBody,
    cues: CueLog,
    session: SessionFlag,
    gravity: f32,
    touching_ground: Vec<bool>,
    touching_obstacles: Vec<bool>,
}

impl HeadlessWorld {
    /// Places a body of `half_extents` centred on `position`.
    #[must_use]
    pub fn new(course: Course, position: Vec2, half_extents: Vec2) -> Self {
        let touching_ground = vec![false; course.ground.len()];
        let touching_obstacles = vec![false; course.obstacles.len()];
        Self {
            course: Rc::new(course),
            body: SimBody::new(position, half_extents),
            cues: CueLog::default(),
            session: SessionFlag::default(),
            gravity: GRAVITY,
            touching_ground,
            touching_obstacles,
        }
    }

    /// Replaces the world gravity.
    #[must_use]
    pub const fn with_gravity(mut self, gravity: f32) -> Self {
        self.gravity = gravity;
        self
    }

    /// Collaborators wired to this world, ready for a controller.
    #[must_use]
    pub fn services(&self) -> ActorServices {
        ActorServices {
            body: Box::new(self.body.clone()),
            probe: Box::new(CourseProbe(Rc::clone(&self.course))),
            animation: Box::new(self.cues.clone()),
            audio: Box::new(self.cues.clone()),
            effects: Box::new(self.cues.clone()),
            session: Box::new(self.session.clone()),
        }
    }

    /// Handle to the body.
    #[must_use]
    pub fn body(&self) -> SimBody {
        self.body.clone()
    }

    /// Handle to the cue recorder.
    #[must_use]
    pub fn cues(&self) -> CueLog {
        self.cues.clone()
    }

    /// Handle to the session flag.
    #[must_use]
    pub fn session(&self) -> SessionFlag {
        self.session.clone()
    }

    /// Runs the controller's fixed step, advances the body and delivers the
    /// resulting contacts.
    ///
    /// A paused session stops the whole world, not just the controller.
    pub fn tick(&mut self, controller: &mut ActorController, dt: f32) -> Vec<ContactOutcome> {
        if !self.session.is_active() {
            return Vec::new();
        }
        controller.on_tick(dt);
        self.step(dt)
            .into_iter()
            .map(|contact| contact.deliver_to(controller))
            .collect()
    }

    /// Integrates the body over `dt` and returns contacts that began this step.
    ///
    /// Frozen bodies do not move and report nothing.
    pub fn step(&mut self, dt: f32) -> Vec<Contact> {
        let mut state = self.body.0.borrow_mut();
        if state.frozen {
            return Vec::new();
        }
        state.velocity.y += self.gravity * dt;

        let mut touching = vec![false; self.course.ground.len()];
        let mut contacts = Vec::new();

        let before = state.bounds();
        state.position.y += state.velocity.y * dt;
        for (index, ground) in self.course.ground.iter().enumerate() {
            let own = state.bounds();
            if !own.overlaps(ground) {
                continue;
            }
            if before.min.y >= ground.max.y - CONTACT_SKIN {
                state.position.y = ground.max.y + CONTACT_SKIN + state.half_extents.y;
                state.velocity.y = state.velocity.y.max(0.0);
                contacts.push((index, state.bounds()));
            } else {
                if before.max.y <= ground.min.y {
                    state.position.y = ground.min.y - CONTACT_SKIN - state.half_extents.y;
                    state.velocity.y = state.velocity.y.min(0.0);
                }
                contacts.push((index, own));
            }
        }

        let previous_x = state.position.x;
        state.position.x += state.velocity.x * dt;
        for (index, ground) in self.course.ground.iter().enumerate() {
            let own = state.bounds();
            if own.overlaps(ground) {
                state.position.x = previous_x;
                state.velocity.x = 0.0;
                contacts.push((index, own));
            }
        }

        // Contact persists while the body rests within the skin gap.
        let resting = state
            .bounds()
            .expanded(Vec2::new(0.0, 2.0 * CONTACT_SKIN));
        for (index, ground) in self.course.ground.iter().enumerate() {
            let was_touching = self.touching_ground.get(index).copied().unwrap_or(false);
            let hit = contacts.iter().any(|(seen, _)| *seen == index);
            if let Some(flag) = touching.get_mut(index) {
                *flag = hit || (was_touching && resting.overlaps(ground));
            }
        }

        let mut reported = Vec::new();
        for (index, own) in contacts {
            let was_touching = self.touching_ground.get(index).copied().unwrap_or(false);
            let first_for_box = !reported.iter().any(|(seen, _)| *seen == index);
            if !was_touching && first_for_box {
                reported.push((index, own));
            }
        }
        self.touching_ground = touching;

        let bounds = state.bounds();
        drop(state);

        let mut events: Vec<Contact> = reported
            .into_iter()
            .filter_map(|(index, own)| {
                self.course.ground.get(index).map(|other| Contact::Solid {
                    tag: ColliderTag::Ground,
                    own,
                    other: *other,
                })
            })
            .collect();

        for (index, obstacle) in self.course.obstacles.iter().enumerate() {
            let inside = bounds.overlaps(obstacle);
            if let Some(flag) = self.touching_obstacles.get_mut(index) {
                if inside && !*flag {
                    events.push(Contact::Trigger(ColliderTag::Obstacle));
                }
                *flag = inside;
            }
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const DT: f32 = 1.0 / 60.0;

    fn world_at(course: Course, position: Vec2) -> HeadlessWorld {
        HeadlessWorld::new(course, position, Vec2::splat(0.5))
    }

    #[rstest]
    fn falling_body_lands_on_top() {
        let mut world = world_at(Course::flat(0.0), Vec2::new(0.0, 0.6));
        world.body().set_velocity(Vec2::new(0.0, -6.0));
        let contacts = world.step(DT);

        assert_eq!(contacts.len(), 1);
        match contacts.first() {
            Some(Contact::Solid { tag, own, other }) => {
                assert_eq!(*tag, ColliderTag::Ground);
                assert!(own.min.y > other.max.y);
            }
            other => panic!("expected a solid contact, got {other:?}"),
        }
        let state = world.body().state();
        assert!((state.position.y - (0.5 + CONTACT_SKIN)).abs() < 1e-5);
        assert!(state.velocity.y.abs() < f32::EPSILON);
    }

    #[rstest]
    fn resting_body_reports_contact_once() {
        let mut world = world_at(Course::flat(0.0), Vec2::new(0.0, 0.6));
        let mut solid = 0;
        for _ in 0..120 {
            solid += world.step(DT).len();
        }
        assert_eq!(solid, 1);
        assert!(world.body().state().position.y > 0.5);
    }

    #[rstest]
    fn running_into_a_wall_reports_side_contact() {
        let course = Course {
            ground: vec![Aabb::new(Vec2::new(1.0, -5.0), Vec2::new(2.0, 5.0))],
            obstacles: Vec::new(),
        };
        let mut world = world_at(course, Vec2::new(0.45, 0.0)).with_gravity(0.0);
        world.body().set_velocity(Vec2::new(6.0, 0.0));
        let contacts = world.step(DT);

        match contacts.as_slice() {
            [Contact::Solid { own, other, .. }] => assert!(own.min.y <= other.max.y),
            other => panic!("expected one side contact, got {other:?}"),
        }
        assert!((world.body().state().position.x - 0.45).abs() < 1e-6);
    }

    #[rstest]
    fn entering_an_obstacle_fires_one_trigger() {
        let course = Course {
            ground: Vec::new(),
            obstacles: vec![Aabb::new(Vec2::new(0.55, -1.0), Vec2::new(3.0, 1.0))],
        };
        let mut world = world_at(course, Vec2::ZERO).with_gravity(0.0);
        world.body().set_velocity(Vec2::new(6.0, 0.0));
        let first = world.step(DT);
        let second = world.step(DT);
        assert_eq!(first, vec![Contact::Trigger(ColliderTag::Obstacle)]);
        assert!(second.is_empty());
    }

    #[rstest]
    fn frozen_body_stays_put() {
        let mut world = world_at(Course::flat(0.0), Vec2::new(0.0, 3.0));
        let mut body = world.body();
        body.freeze();
        assert!(world.step(DT).is_empty());
        assert_eq!(world.body().state().position, Vec2::new(0.0, 3.0));
        assert!(body.is_frozen());
    }

    #[rstest]
    fn probe_respects_layers() {
        let world = world_at(Course::demo(), Vec2::ZERO);
        let services = world.services();
        let spike_centre = Vec2::new(35.3, 0.3);
        let half = Vec2::splat(0.05);
        assert!(services.probe.overlaps(spike_centre, half, LayerMask::OBSTACLE));
        assert!(!services.probe.overlaps(Vec2::new(35.3, 2.0), half, LayerMask::GROUND));
    }

    #[rstest]
    fn disabled_animator_drops_triggers() {
        let mut log = CueLog::default();
        log.trigger(AnimationTrigger::Jump);
        log.set_enabled(false);
        log.trigger(AnimationTrigger::Flap);
        assert!(!log.animation_enabled());
        assert_eq!(
            log.drain(),
            vec![
                Cue::Animation(AnimationTrigger::Jump),
                Cue::AnimationEnabled(false),
            ]
        );
        assert!(log.drain().is_empty());
    }

    #[rstest]
    fn session_counts_deaths() {
        let mut session = SessionFlag::default();
        assert!(session.is_active());
        session.notify_death();
        session.set_active(false);
        assert_eq!(session.deaths(), 1);
        assert!(!session.is_active());
    }
}
