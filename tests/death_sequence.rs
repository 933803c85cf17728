//! Order and multiplicity of collaborator calls made by the controller.
//!
//! Uses mocked collaborators so each side effect is counted exactly.
use glam::Vec2;
use jetrunner::{
    ActorController, ActorServices, AnimationSink, AnimationTrigger, AudioSink, ColliderTag,
    ContactOutcome, ControllerSettings, EffectSink, GroundProbe, LayerMask, LocomotionMode,
    PrimaryInput, RigidBody, SessionAuthority,
};
use mockall::{mock, Sequence};

mock! {
    pub Body {}
    impl RigidBody for Body {
        fn position(&self) -> Vec2;
        fn velocity(&self) -> Vec2;
        fn set_velocity(&mut self, velocity: Vec2);
        fn freeze(&mut self);
        fn is_frozen(&self) -> bool;
    }
}

mock! {
    pub Probe {}
    impl GroundProbe for Probe {
        fn overlaps(&self, centre: Vec2, half_extents: Vec2, layers: LayerMask) -> bool;
    }
}

mock! {
    pub Animator {}
    impl AnimationSink for Animator {
        fn trigger(&mut self, trigger: AnimationTrigger);
        fn set_enabled(&mut self, enabled: bool);
    }
}

mock! {
    pub Audio {}
    impl AudioSink for Audio {
        fn play(&mut self, name: &str);
        fn stop(&mut self, name: &str);
    }
}

mock! {
    pub Effects {}
    impl EffectSink for Effects {
        fn start(&mut self);
        fn stop(&mut self);
    }
}

mock! {
    pub Session {}
    impl SessionAuthority for Session {
        fn is_active(&self) -> bool;
        fn notify_death(&mut self);
    }
}

#[derive(Default)]
struct Mocks {
    body: MockBody,
    probe: MockProbe,
    animation: MockAnimator,
    audio: MockAudio,
    effects: MockEffects,
    session: MockSession,
}

impl Mocks {
    fn into_controller(self, mode: LocomotionMode) -> ActorController {
        let services = ActorServices {
            body: Box::new(self.body),
            probe: Box::new(self.probe),
            animation: Box::new(self.animation),
            audio: Box::new(self.audio),
            effects: Box::new(self.effects),
            session: Box::new(self.session),
        };
        ActorController::new(mode, ControllerSettings::default(), services)
            .expect("default settings are valid")
    }
}

#[test]
fn death_runs_each_side_effect_once_in_order() {
    let mut mocks = Mocks::default();
    let mut seq = Sequence::new();
    mocks
        .body
        .expect_freeze()
        .times(1)
        .in_sequence(&mut seq)
        .return_const(());
    mocks
        .animation
        .expect_set_enabled()
        .withf(|enabled| !*enabled)
        .times(1)
        .in_sequence(&mut seq)
        .return_const(());
    mocks
        .audio
        .expect_play()
        .withf(|name: &str| name == "fart")
        .times(1)
        .in_sequence(&mut seq)
        .return_const(());
    mocks
        .session
        .expect_notify_death()
        .times(1)
        .in_sequence(&mut seq)
        .return_const(());
    mocks.body.expect_position().return_const(Vec2::new(3.0, 1.0));

    let mut controller = mocks.into_controller(LocomotionMode::Running);
    assert_eq!(
        controller.on_trigger_contact(ColliderTag::Obstacle),
        ContactOutcome::Killed
    );
    assert_eq!(
        controller.on_trigger_contact(ColliderTag::Obstacle),
        ContactOutcome::Ignored
    );
    assert!(!controller.die());
}

#[test]
fn flying_death_stops_the_jetpack_before_freezing() {
    let mut mocks = Mocks::default();
    let mut seq = Sequence::new();
    mocks.session.expect_is_active().return_const(true);
    mocks.body.expect_velocity().return_const(Vec2::ZERO);
    mocks.body.expect_position().return_const(Vec2::ZERO);
    mocks.body.expect_set_velocity().return_const(());
    mocks
        .audio
        .expect_play()
        .withf(|name: &str| name == "jetpack")
        .times(1)
        .in_sequence(&mut seq)
        .return_const(());
    mocks
        .effects
        .expect_start()
        .times(1)
        .in_sequence(&mut seq)
        .return_const(());
    mocks
        .audio
        .expect_stop()
        .withf(|name: &str| name == "jetpack")
        .times(1)
        .in_sequence(&mut seq)
        .return_const(());
    mocks
        .effects
        .expect_stop()
        .times(1)
        .in_sequence(&mut seq)
        .return_const(());
    mocks
        .body
        .expect_freeze()
        .times(1)
        .in_sequence(&mut seq)
        .return_const(());
    mocks
        .animation
        .expect_set_enabled()
        .times(1)
        .in_sequence(&mut seq)
        .return_const(());
    mocks
        .audio
        .expect_play()
        .withf(|name: &str| name == "fart")
        .times(1)
        .in_sequence(&mut seq)
        .return_const(());
    mocks
        .session
        .expect_notify_death()
        .times(1)
        .in_sequence(&mut seq)
        .return_const(());

    let mut controller = mocks.into_controller(LocomotionMode::Flying);
    controller.on_input(PrimaryInput::HOLD);
    controller.on_tick(1.0 / 60.0);
    controller.on_tick(1.0 / 60.0);
    assert!(controller.die());
    assert!(!controller.is_ascend_held());
}

#[test]
fn ascend_reads_the_probe_only_when_moving() {
    let mut mocks = Mocks::default();
    mocks.session.expect_is_active().return_const(true);
    mocks.body.expect_position().return_const(Vec2::new(0.0, 4.0));
    mocks.body.expect_velocity().return_const(Vec2::new(6.0, -3.0));
    mocks
        .probe
        .expect_overlaps()
        .withf(|centre, half_extents, layers| {
            *centre == Vec2::new(0.0, 3.5)
                && *half_extents == Vec2::new(0.05, 0.15)
                && *layers == LayerMask::GROUND
        })
        .times(1)
        .return_const(false);

    let mut controller = mocks.into_controller(LocomotionMode::Running);
    assert!(!controller.ascend());
    assert!(!controller.has_just_jumped());
}
