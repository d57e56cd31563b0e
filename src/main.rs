//! Orbit-Bloom entry point
//!
//! Runs a scripted headless session against the simulation core. A real
//! frontend would swap the script for device events and draw the world;
//! everything it needs is `InputCollector`, `tick` and the HUD snapshot.

use std::time::{SystemTime, UNIX_EPOCH};

use glam::Vec2;

use orbit_bloom::Tuning;
use orbit_bloom::input::{InputCollector, Key};
use orbit_bloom::sim::{GameMode, GameState, tick};

const FRAME_DT: f32 = 1.0 / 60.0;

fn load_tuning() -> Tuning {
    let Some(path) = std::env::args().nth(1) else {
        return Tuning::default();
    };
    match std::fs::read_to_string(&path) {
        Ok(json) => match Tuning::from_json(&json) {
            Ok(tuning) => {
                log::info!("tuning loaded from {path}");
                tuning
            }
            Err(err) => {
                log::error!("bad tuning file {path}: {err}, using defaults");
                Tuning::default()
            }
        },
        Err(err) => {
            log::error!("cannot read {path}: {err}, using defaults");
            Tuning::default()
        }
    }
}

fn main() {
    env_logger::init();

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_millis() as u64);
    let mut state = GameState::new(seed, load_tuning());
    let mut input = InputCollector::new();

    log::info!("Orbit-Bloom headless demo (seed {seed})");

    // Press a key on the title screen
    input.key_down(Some(Key::Right));
    input.key_up(Key::Right);

    // 90 simulated seconds: strafe side to side, dash on each reversal
    let mut frame = 0u32;
    while state.mode != GameMode::GameOver && frame < 90 * 60 {
        let period = frame / 120;
        let dir = if period % 2 == 0 { Key::Right } else { Key::Left };
        if frame % 120 == 0 {
            input.key_up(Key::Left);
            input.key_up(Key::Right);
            input.key_down(Some(dir));
            input.key_down(Some(Key::Dash));
        }

        // A pointer flick partway through, for the gesture path
        if frame == 600 {
            input.pointer_down(Vec2::new(180.0, 500.0));
        }
        if frame == 605 {
            input.pointer_move(Vec2::new(260.0, 500.0));
            input.pointer_up();
        }

        input.update(FRAME_DT);
        let frame_input = input.snapshot();
        tick(&mut state, &frame_input, FRAME_DT);

        if frame % 300 == 0 {
            let hud = state.hud();
            log::info!(
                "t={:>5.1}s stage {} score {} lives {} power {} enemies {}",
                state.elapsed_time,
                hud.stage_index + 1,
                hud.score,
                hud.lives,
                hud.power_level,
                state.enemies.len(),
            );
        }
        frame += 1;
    }

    let hud = state.hud();
    println!(
        "session over after {:.1}s: score {}, power level {}",
        frame as f32 * FRAME_DT,
        hud.score,
        hud.power_level
    );
}
