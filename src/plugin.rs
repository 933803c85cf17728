//! Bevy plugin running the actor controller inside an `App`.
//!
//! The controller and its headless world live in a non-send [`ActorRuntime`]
//! resource because their collaborators share state through `Rc`. Input
//! arrives as [`PrimaryInput`] messages during `Update`; physics advances in
//! `FixedUpdate`. Cues the controller emits are re-published as observer
//! events so presentation code can react without touching the runtime.

use bevy::ecs::prelude::On;
use bevy::prelude::*;
use log::{debug, error, info};
use thiserror::Error;

use crate::controller::ActorController;
use crate::input::PrimaryInput;
use crate::mode::LocomotionMode;
use crate::settings::ControllerSettings;
use crate::sim::{Course, Cue, HeadlessWorld};

/// Raised when the plugin cannot build the controller.
#[derive(Event, Debug, Clone, Error)]
#[error("actor plugin failed to start: {detail}")]
pub struct ActorPluginError {
    /// Description of the underlying error.
    pub detail: String,
}

impl ActorPluginError {
    /// Convenience constructor used while building the plugin.
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

/// A presentation cue emitted by the controller.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct ActorCue(pub Cue);

/// Triggered once when the actor dies.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ActorDied {
    /// Where the body came to rest.
    pub position: Vec2,
}

/// Level trigger switching the actor's locomotion mode.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeTrigger(pub LocomotionMode);

/// Controller plus the world it moves through.
pub struct ActorRuntime {
    /// The actor's state machine.
    pub controller: ActorController,
    /// Headless collaborators driving the controller.
    pub world: HeadlessWorld,
    death_reported: bool,
}

impl ActorRuntime {
    /// Pairs a controller with the world that produced its services.
    #[must_use]
    pub const fn new(controller: ActorController, world: HeadlessWorld) -> Self {
        Self {
            controller,
            world,
            death_reported: false,
        }
    }

    /// Pauses or resumes the game session.
    pub fn set_session_active(&self, active: bool) {
        self.world.session().set_active(active);
    }
}

/// Installs an actor on a course and the systems that drive it.
#[derive(Debug, Clone)]
pub struct ActorPlugin {
    /// Starting locomotion mode.
    pub mode: LocomotionMode,
    /// Controller tunables.
    pub settings: ControllerSettings,
    /// Level geometry.
    pub course: Course,
    /// Initial body centre.
    pub spawn: Vec2,
    /// Half size of the body's box.
    pub half_extents: Vec2,
}

impl Default for ActorPlugin {
    fn default() -> Self {
        Self {
            mode: LocomotionMode::default(),
            settings: ControllerSettings::default(),
            course: Course::demo(),
            spawn: Vec2::new(0.0, 0.51),
            half_extents: Vec2::splat(0.5),
        }
    }
}

impl Plugin for ActorPlugin {
    fn build(&self, app: &mut App) {
        app.add_observer(log_plugin_error);

        let world = HeadlessWorld::new(self.course.clone(), self.spawn, self.half_extents)
            .with_gravity(self.settings.gravity);
        let controller =
            match ActorController::new(self.mode, self.settings.clone(), world.services()) {
                Ok(controller) => controller,
                Err(e) => {
                    app.world_mut().trigger(ActorPluginError::new(e.to_string()));
                    return;
                }
            };

        app.insert_non_send_resource(ActorRuntime::new(controller, world));
        app.add_message::<PrimaryInput>();
        app.add_message::<ModeTrigger>();
        app.add_observer(log_actor_cue);
        app.add_observer(log_actor_death);
        app.add_systems(
            Update,
            (apply_mode_triggers_system, apply_primary_input_system).chain(),
        );
        app.add_systems(
            FixedUpdate,
            (tick_actor_system, publish_cues_system).chain(),
        );
    }
}

/// Applies level mode triggers received this frame.
pub fn apply_mode_triggers_system(
    mut triggers: MessageReader<ModeTrigger>,
    mut runtime: NonSendMut<ActorRuntime>,
) {
    for ModeTrigger(mode) in triggers.read() {
        runtime.controller.set_mode(*mode);
    }
}

/// Feeds primary input messages to the controller.
pub fn apply_primary_input_system(
    mut inputs: MessageReader<PrimaryInput>,
    mut runtime: NonSendMut<ActorRuntime>,
) {
    for input in inputs.read() {
        runtime.controller.on_input(*input);
    }
}

/// Runs the controller's fixed step and advances the headless world.
pub fn tick_actor_system(time: Res<Time>, mut runtime: NonSendMut<ActorRuntime>) {
    let ActorRuntime {
        controller, world, ..
    } = &mut *runtime;
    world.tick(controller, time.delta_secs());
}

/// Re-publishes recorded cues and the death notification as events.
pub fn publish_cues_system(mut commands: Commands, mut runtime: NonSendMut<ActorRuntime>) {
    for cue in runtime.world.cues().drain() {
        commands.trigger(ActorCue(cue));
    }
    if !runtime.controller.is_alive() && !runtime.death_reported {
        runtime.death_reported = true;
        commands.trigger(ActorDied {
            position: runtime.controller.position(),
        });
    }
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value for Events V2."
)]
fn log_plugin_error(event: On<ActorPluginError>) {
    error!("{}", event.event());
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value for Events V2."
)]
fn log_actor_cue(event: On<ActorCue>) {
    debug!("Actor cue: {:?}", event.event().0);
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value for Events V2."
)]
fn log_actor_death(event: On<ActorDied>) {
    info!("Actor died at {:?}", event.event().position);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn plugin_installs_runtime() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(ActorPlugin::default());
        let runtime = app
            .world()
            .get_non_send_resource::<ActorRuntime>()
            .expect("runtime installed");
        assert!(runtime.controller.is_alive());
        assert_eq!(runtime.controller.mode(), LocomotionMode::Running);
    }

    #[rstest]
    fn invalid_settings_install_nothing() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(ActorPlugin {
            settings: ControllerSettings {
                descent_cap: 2.0,
                ..ControllerSettings::default()
            },
            ..ActorPlugin::default()
        });
        assert!(app.world().get_non_send_resource::<ActorRuntime>().is_none());
    }
}
