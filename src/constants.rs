//! Default controller tunables and cue names shared across systems.
//!
//! These values mirror the feel of the shipped levels and seed
//! [`crate::ControllerSettings::default`].

/// Forward speed forced on the body every tick, in units per second.
pub const HORIZONTAL_SPEED: f32 = 6.0;
/// Vertical velocity set by a jump.
pub const ASCEND_IMPULSE: f32 = 10.0;
/// Extra gravity multiplier applied while falling in Running mode.
pub const FALL_BOOST: f32 = 3.0;
/// Flap velocity as a fraction of [`ASCEND_IMPULSE`].
pub const FLAP_FACTOR: f32 = 0.8;
/// Lowest vertical velocity allowed in Flying mode.
pub const DESCENT_CAP: f32 = -5.0;
/// Upward clamp applied before thrust while the jetpack is held.
pub const ASCENT_CAP: f32 = 5.0;
/// Upward velocity added on every held tick in Flying mode.
pub const ASCEND_THRUST: f32 = 0.9;
/// World gravity along the vertical axis.
pub const GRAVITY: f32 = -9.81;
/// Ground probe anchor relative to the body's position.
pub const GROUND_PROBE_OFFSET: [f32; 2] = [0.0, -0.5];
/// Half size of the ground probe box.
pub const GROUND_PROBE_HALF_EXTENTS: [f32; 2] = [0.05, 0.15];
/// Gap left between a landed body and the ground it rests on.
pub const CONTACT_SKIN: f32 = 0.01;

/// Sound played for jumps and flaps.
pub const JUMP_SOUND: &str = "jump";
/// Looping sound played while the jetpack fires.
pub const JETPACK_SOUND: &str = "jetpack";
/// Sound played once on death.
pub const DEATH_SOUND: &str = "fart";
