//! Progressive power scaling
//!
//! A monotonically increasing power level buffs both sides: the player
//! gets faster movement and shooting, enemies get tougher and more
//! numerous. Linear-in-level and unbounded; endless-mode pacing.

use glam::Vec2;
use rand::Rng;

use crate::consts::{GAME_HEIGHT, GAME_WIDTH, POWER_UP_FLASH_SECS};
use crate::sim::state::{GameState, Particle};

/// Player-side multipliers derived from the current power level
#[derive(Debug, Clone, Copy)]
pub struct PlayerMultipliers {
    pub move_speed: f32,
    pub fire_rate: f32,
    pub bullet_speed: f32,
}

/// Enemy-side multipliers derived from the current power level
#[derive(Debug, Clone, Copy)]
pub struct EnemyMultipliers {
    pub hp: f32,
    pub speed: f32,
    pub spawn_rate: f32,
}

pub fn player_multipliers(level: u32) -> PlayerMultipliers {
    let level = level as f32;
    PlayerMultipliers {
        move_speed: 1.0 + level * 0.1,
        fire_rate: 1.0 + level * 0.15,
        bullet_speed: 1.0 + level * 0.1,
    }
}

pub fn enemy_multipliers(level: u32) -> EnemyMultipliers {
    let level = level as f32;
    EnemyMultipliers {
        hp: 1.0 + level * 0.3,
        speed: 1.0 + level * 0.12,
        spawn_rate: 1.0 + level * 0.15,
    }
}

/// Stage cleared: bump the power level, start the HUD flash and throw a
/// celebratory burst from the playfield center.
pub fn trigger_power_up(state: &mut GameState) {
    state.power_level += 1;
    state.power_up_timer = POWER_UP_FLASH_SECS;
    log::info!("power level {}", state.power_level);

    let center = Vec2::new(GAME_WIDTH / 2.0, GAME_HEIGHT / 2.0);
    const COLORS: [u32; 4] = [0xFFD95A, 0x40E0FF, 0xFF5AF2, 0x7CFF5A];

    // Colorful burst
    for i in 0..50 {
        let angle = std::f32::consts::TAU * i as f32 / 50.0;
        let speed = 100.0 + state.rng.random_range(0.0..150.0);
        let color = COLORS[state.rng.random_range(0..COLORS.len())];
        let vel = Vec2::new(angle.cos(), angle.sin()) * speed;
        state
            .particles
            .push(Particle::new(center, color, 1.0, 4.0, vel));
    }

    // White ring
    for i in 0..30 {
        let angle = std::f32::consts::TAU * i as f32 / 30.0;
        let speed = 200.0 + state.rng.random_range(0.0..100.0);
        let vel = Vec2::new(angle.cos(), angle.sin()) * speed;
        state
            .particles
            .push(Particle::new(center, 0xFFFFFF, 0.8, 3.0, vel));
    }
}

pub fn update_power_timer(state: &mut GameState, dt: f32) {
    if state.power_up_timer > 0.0 {
        state.power_up_timer -= dt;
    }
}
