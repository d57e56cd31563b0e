//! Phase lookup and the enemy spawner
//!
//! Spawning is rate-limited by a token bucket: credit accrues at
//! rate x dt and one whole token buys one enemy, so spawn counts stay
//! bounded by elapsed time regardless of frame-rate variance.

use glam::Vec2;
use rand::Rng;

use crate::consts::{ENEMY_SPAWN_Y, GAME_WIDTH};
use crate::sim::enemy::Enemy;
use crate::sim::power;
use crate::sim::state::GameState;
use crate::tuning::{PhaseConfig, StageConfig};

/// Phase matching `elapsed` in `[start_time, end_time)`, falling back to
/// the last configured phase (clamp-to-final policy). None only when the
/// stage has no phases at all.
pub fn current_phase(stage: &StageConfig, elapsed: f32) -> Option<&PhaseConfig> {
    stage
        .phases
        .iter()
        .find(|p| elapsed >= p.start_time && elapsed < p.end_time)
        .or_else(|| stage.phases.last())
}

/// Accrue spawn credit and convert whole tokens into enemies, honoring
/// the phase's population cap. Called once per simulated frame while
/// Playing.
pub fn spawn_enemies(state: &mut GameState, dt: f32) {
    let Some(stage) = state.tuning.stage(state.stage_index) else {
        return;
    };
    let Some(phase) = current_phase(stage, state.elapsed_time) else {
        return;
    };

    let power = power::enemy_multipliers(state.power_level);
    state.spawn_accumulator += phase.spawn_rate * power.spawn_rate * dt;

    while state.spawn_accumulator >= 1.0 && state.enemies.len() < phase.max_enemies {
        state.spawn_accumulator -= 1.0;

        if phase.allowed_kinds.is_empty() {
            return;
        }
        let kind = phase.allowed_kinds[state.rng.random_range(0..phase.allowed_kinds.len())];
        let Some(entry) = state.tuning.enemy(kind) else {
            log::warn!("no tuning entry for {kind:?}, skipping spawn");
            continue;
        };

        let x = state.rng.random_range(0.0..GAME_WIDTH);
        state.enemies.push(Enemy::spawn(
            kind,
            Vec2::new(x, ENEMY_SPAWN_Y),
            entry,
            phase.enemy_speed_multiplier,
            &power,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::GameMode;
    use crate::tuning::{EnemyKind, Tuning};

    fn playing_world() -> GameState {
        let mut state = GameState::new(11, Tuning::default());
        state.start_game();
        state
    }

    #[test]
    fn test_phase_boundaries() {
        let tuning = Tuning::default();
        let stage = &tuning.stages[0];
        // [0,20) / [20,40) / [40,60)
        assert_eq!(current_phase(stage, 0.0).unwrap().max_enemies, 5);
        assert_eq!(current_phase(stage, 19.999).unwrap().max_enemies, 5);
        assert_eq!(current_phase(stage, 20.0).unwrap().max_enemies, 8);
        assert_eq!(current_phase(stage, 40.0).unwrap().max_enemies, 12);
        // Beyond all ranges clamps to the final phase
        assert_eq!(current_phase(stage, 75.0).unwrap().max_enemies, 12);
    }

    #[test]
    fn test_token_bucket_bound() {
        let mut state = playing_world();
        assert_eq!(state.mode, GameMode::Playing);

        // Phase 1: rate 0.3/s at power 0. Over 11.67s of 60 Hz frames the
        // credit is 3.5 tokens: floor(3.5) spawns, or one more at the
        // accumulator boundary, never beyond.
        for _ in 0..700 {
            spawn_enemies(&mut state, 1.0 / 60.0);
        }
        assert!(state.enemies.len() == 3 || state.enemies.len() == 4);
    }

    #[test]
    fn test_population_cap() {
        let mut state = playing_world();
        // Enough credit for far more than the phase cap of 5
        state.spawn_accumulator = 50.0;
        spawn_enemies(&mut state, 0.0);
        assert_eq!(state.enemies.len(), 5);
    }

    #[test]
    fn test_only_allowed_kinds_spawn() {
        let mut state = playing_world();
        state.spawn_accumulator = 5.0;
        spawn_enemies(&mut state, 0.0);
        for enemy in &state.enemies {
            assert_eq!(enemy.kind, EnemyKind::Basic);
        }
    }

    #[test]
    fn test_spawn_position_on_top_margin() {
        let mut state = playing_world();
        state.spawn_accumulator = 3.0;
        spawn_enemies(&mut state, 0.0);
        for enemy in &state.enemies {
            assert_eq!(enemy.pos.y, crate::consts::ENEMY_SPAWN_Y);
            assert!((0.0..crate::consts::GAME_WIDTH).contains(&enemy.pos.x));
        }
    }

    #[test]
    fn test_power_level_raises_rate() {
        let mut fast = playing_world();
        fast.power_level = 10; // spawn rate x2.5
        for _ in 0..600 {
            spawn_enemies(&mut fast, 1.0 / 60.0);
        }
        // 0.3 * 2.5 * 10s = 7.5 tokens, capped at 5 live enemies
        assert_eq!(fast.enemies.len(), 5);
    }
}
