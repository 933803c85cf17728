//! Headless demo runner for the actor controller.
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, ensure, Context, Result};
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use clap::Parser;
use jetrunner::{
    init_logging, ActorPlugin, ActorRuntime, ControllerSettings, LocomotionMode, PrimaryInput,
};
use log::info;

/// Runs a scripted, headless session on the demo course
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Locomotion mode to start in (running, flapping or flying)
    #[arg(short, long, default_value_t = LocomotionMode::Running)]
    mode: LocomotionMode,

    /// JSON file overriding controller settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of frames to simulate
    #[arg(short, long, default_value_t = 600)]
    ticks: usize,

    /// Fixed simulation rate in hertz
    #[arg(long, default_value_t = 60.0)]
    hz: f64,

    /// Input per frame, repeated: p press, h hold, r release, u press over UI, . idle
    #[arg(short, long, default_value = "p.............................")]
    script: String,
}

fn parse_frame(frame: char) -> Result<Option<PrimaryInput>> {
    Ok(match frame {
        'p' => Some(PrimaryInput::PRESS),
        'h' => Some(PrimaryInput::HOLD),
        'r' => Some(PrimaryInput::Released),
        'u' => Some(PrimaryInput::Pressed { over_ui: true }),
        '.' => None,
        other => bail!("unknown input script character `{other}`"),
    })
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    ensure!(
        args.hz.is_finite() && args.hz > 0.0,
        "simulation rate must be positive, got {}",
        args.hz
    );
    let frames = args
        .script
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(parse_frame)
        .collect::<Result<Vec<_>>>()?;
    ensure!(!frames.is_empty(), "input script is empty");

    let settings = match &args.config {
        Some(path) => ControllerSettings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => ControllerSettings::default(),
    };

    let step = Duration::from_secs_f64(args.hz.recip());
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(Time::<Fixed>::from_duration(step))
        .insert_resource(TimeUpdateStrategy::ManualDuration(step))
        .add_plugins(ActorPlugin {
            mode: args.mode,
            settings,
            ..ActorPlugin::default()
        });
    ensure!(
        app.world().get_non_send_resource::<ActorRuntime>().is_some(),
        "actor plugin failed to start"
    );

    info!("Running {} frames in {} mode", args.ticks, args.mode);
    // The first update only establishes the time baseline.
    app.update();
    for (frame, input) in frames.iter().cycle().take(args.ticks).enumerate() {
        if let Some(input) = input {
            app.world_mut().write_message(*input);
        }
        app.update();

        let runtime = app
            .world()
            .get_non_send_resource::<ActorRuntime>()
            .context("actor runtime disappeared")?;
        if !runtime.controller.is_alive() {
            info!("Run ended on frame {frame}");
            break;
        }
    }

    let runtime = app
        .world()
        .get_non_send_resource::<ActorRuntime>()
        .context("actor runtime disappeared")?;
    info!(
        "Final position {:?}, velocity {:?}, alive: {}, deaths reported: {}",
        runtime.controller.position(),
        runtime.controller.velocity(),
        runtime.controller.is_alive(),
        runtime.world.session().deaths()
    );
    Ok(())
}
