//! Eviction Run headless entry point
//!
//! Plays a scripted run (hold right, jump on a fixed beat) at 60 fps host
//! frames and prints snapshots as JSON lines.
//!
//! Usage: `eviction-run [config.json] [seed]`

use std::process::ExitCode;

use eviction_run::GameConfig;
use eviction_run::sim::{FixedStepper, FrameSnapshot, InputEvent, World};

/// Host frame time
const FRAME_DT: f32 = 1.0 / 60.0;
/// Give up after this many frames (2 minutes)
const MAX_FRAMES: u32 = 60 * 120;
/// Jump every this many frames
const JUMP_EVERY: u32 = 45;
/// Print a snapshot at least this often even when nothing happens
const REPORT_EVERY: u32 = 60;

fn load_config(path: Option<&str>) -> Result<GameConfig, String> {
    let Some(path) = path else {
        return Ok(GameConfig::default());
    };
    let json = std::fs::read_to_string(path).map_err(|e| format!("reading {path}: {e}"))?;
    GameConfig::from_json(&json).map_err(|e| format!("{path}: {e}"))
}

fn emit(snapshot: &FrameSnapshot) {
    match serde_json::to_string(snapshot) {
        Ok(line) => println!("{line}"),
        Err(e) => log::warn!("failed to serialize snapshot: {e}"),
    }
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Eviction Run (headless) starting...");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match load_config(args.first().map(String::as_str)) {
        Ok(config) => config,
        Err(e) => {
            log::error!("invalid config: {e}");
            return ExitCode::FAILURE;
        }
    };
    let seed = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(0x5EED);

    let mut world = match World::new(config, seed) {
        Ok(world) => world,
        Err(e) => {
            log::error!("invalid config: {e}");
            return ExitCode::FAILURE;
        }
    };
    log::info!("Started run with seed: {seed}");

    let mut stepper = FixedStepper::new();
    world.apply_input(InputEvent::MoveRight);

    for frame in 0..MAX_FRAMES {
        if frame % JUMP_EVERY == 0 {
            world.apply_input(InputEvent::JumpRequested);
        }

        let snapshot = stepper.frame(&mut world, FRAME_DT);
        for message in &snapshot.hud_messages {
            log::info!("[t={:.2}] {message}", snapshot.time);
        }
        if !snapshot.hud_messages.is_empty() || frame % REPORT_EVERY == 0 || snapshot.game_over {
            emit(&snapshot);
        }
        if snapshot.game_over {
            log::info!(
                "Run over at t={:.2}s, x={:.0}",
                snapshot.time,
                world.player().pos.x
            );
            return ExitCode::SUCCESS;
        }
    }

    log::info!("Survived {MAX_FRAMES} frames, x={:.0}", world.player().pos.x);
    ExitCode::SUCCESS
}
