//! Per-frame simulation driver
//!
//! `tick` advances the world by one frame: clamp the wall-clock delta,
//! run the fixed pipeline (timers, player, spawner, enemies, bullets,
//! particles, stars, collisions), prune dead entities. The pipeline
//! order is load-bearing; see the module docs in `sim`.

use glam::Vec2;

use crate::consts::{FALLBACK_BULLET_SPEED, MAX_FRAME_DT};
use crate::sim::bullet::Bullet;
use crate::sim::collision;
use crate::sim::power;
use crate::sim::spawn;
use crate::sim::state::{GameMode, GameState};

/// Normalized input for a single frame, produced by the input
/// collaborator. The simulation never sees raw device events.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameInput {
    /// Movement direction, magnitude <= 1
    pub movement: Vec2,
    /// Edge trigger: dash requested this frame
    pub dash: bool,
    /// Edge trigger: start/restart requested this frame
    pub start: bool,
}

/// Advance the game by one frame. `raw_dt` is the wall-clock delta in
/// seconds; it is clamped before any timer or position update uses it.
pub fn tick(state: &mut GameState, input: &FrameInput, raw_dt: f32) {
    let dt = raw_dt.clamp(0.0, MAX_FRAME_DT);

    match state.mode {
        GameMode::Title | GameMode::GameOver => {
            // Only the start trigger is honored outside Playing
            if input.start {
                state.start_game();
            }
            return;
        }
        GameMode::Playing => {}
    }

    // Stage timer; clearing the stage grants a power level and moves to
    // the next stage (the final stage loops)
    state.elapsed_time += dt;
    let duration = match state.tuning.stage(state.stage_index) {
        Some(stage) => stage.duration,
        None => return,
    };
    state.time_left = duration - state.elapsed_time;
    if state.time_left <= 0.0 {
        power::trigger_power_up(state);
        state.elapsed_time = 0.0;
        if state.stage_index + 1 < state.tuning.stages.len() {
            state.stage_index += 1;
        }
        state.time_left = state
            .tuning
            .stage(state.stage_index)
            .map_or(0.0, |s| s.duration);
    }

    power::update_power_timer(state, dt);

    // Player
    let player_mults = power::player_multipliers(state.power_level);
    if let Some(player) = state.player.as_mut() {
        player.update(
            dt,
            input.movement,
            input.dash,
            &state.tuning.player,
            &player_mults,
            state.tuning.bullets.player_radius,
            &mut state.bullets,
            &mut state.particles,
            &mut state.rng,
        );
    }

    // New enemies for this frame
    spawn::spawn_enemies(state, dt);

    // Enemies; volleys are queued and merged after the pass
    let bullet_speed = state
        .tuning
        .stage(state.stage_index)
        .and_then(|stage| spawn::current_phase(stage, state.elapsed_time))
        .map_or(FALLBACK_BULLET_SPEED, |phase| phase.bullet_speed);
    let player_pos = state.player.as_ref().map(|p| p.pos);
    let enemy_bullet_radius = state.tuning.bullets.enemy_radius;
    let mut fired: Vec<Bullet> = Vec::new();
    for enemy in state.enemies.iter_mut() {
        enemy.update(dt, player_pos, bullet_speed, enemy_bullet_radius, &mut fired);
    }
    state.bullets.append(&mut fired);
    state.enemies.retain(|e| !e.is_off_screen());

    // Bullets
    for bullet in state.bullets.iter_mut() {
        bullet.update(dt);
    }
    state.bullets.retain(|b| !b.is_off_screen());

    // Particles
    for particle in state.particles.iter_mut() {
        particle.update(dt);
    }
    state.particles.retain(|p| !p.is_dead());

    // Backdrop
    for star in state.stars.iter_mut() {
        star.update(dt, &mut state.rng);
    }

    // Resolve against post-update positions
    collision::check_collisions(state);
}
