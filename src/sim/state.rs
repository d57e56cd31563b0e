//! World state and the small self-contained entities
//!
//! `GameState` is the single mutable aggregate for a session. It is an
//! explicitly passed handle, never a global, so tests can construct fresh
//! worlds freely.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::sim::bullet::Bullet;
use crate::sim::enemy::Enemy;
use crate::sim::player::Player;
use crate::tuning::Tuning;

/// Player identity color, forwarded to hit/trail particles
pub const PLAYER_COLOR: u32 = 0x40E0FF;

/// Which subsystems run this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    Title,
    Playing,
    GameOver,
}

/// A short-lived visual effect. Not gameplay-affecting.
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Packed 0xRRGGBB
    pub color: u32,
    /// Seconds remaining; removed at <= 0
    pub lifetime: f32,
    pub max_lifetime: f32,
    pub size: f32,
}

impl Particle {
    pub fn new(pos: Vec2, color: u32, lifetime: f32, size: f32, vel: Vec2) -> Self {
        Self {
            pos,
            vel,
            color,
            lifetime,
            max_lifetime: lifetime,
            size,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.pos += self.vel * dt;
        self.lifetime -= dt;
        // Drag
        self.vel *= 0.95;
    }

    pub fn is_dead(&self) -> bool {
        self.lifetime <= 0.0
    }
}

/// Emit a radial burst of `count` particles at `pos` with speeds drawn
/// uniformly from `[speed_min, speed_max)` and sizes from
/// `[size_min, size_max)`.
pub fn spawn_burst(
    particles: &mut Vec<Particle>,
    rng: &mut Pcg32,
    pos: Vec2,
    color: u32,
    count: usize,
    speed_min: f32,
    speed_max: f32,
    lifetime: f32,
    size_min: f32,
    size_max: f32,
) {
    for _ in 0..count {
        let angle = rng.random_range(0.0..std::f32::consts::TAU);
        let speed = rng.random_range(speed_min..speed_max);
        let size = if size_max > size_min {
            rng.random_range(size_min..size_max)
        } else {
            size_min
        };
        let vel = Vec2::new(angle.cos(), angle.sin()) * speed;
        particles.push(Particle::new(pos, color, lifetime, size, vel));
    }
}

/// Decorative background star with twinkle and downward parallax scroll.
/// Stars persist across sessions and are never reset on restart.
#[derive(Debug, Clone)]
pub struct Star {
    pub pos: Vec2,
    pub size: f32,
    pub brightness: f32,
    fade_speed: f32,
    fade_dir: f32,
    scroll_speed: f32,
}

impl Star {
    pub fn new(rng: &mut Pcg32) -> Self {
        Self {
            pos: Vec2::new(
                rng.random_range(0.0..GAME_WIDTH),
                rng.random_range(0.0..GAME_HEIGHT),
            ),
            size: 0.5 + rng.random_range(0.0..1.5),
            brightness: rng.random_range(0.0..1.0),
            fade_speed: 0.5 + rng.random_range(0.0..1.5),
            fade_dir: if rng.random_bool(0.5) { 1.0 } else { -1.0 },
            scroll_speed: rng.random_range(30.0..80.0),
        }
    }

    pub fn update(&mut self, dt: f32, rng: &mut Pcg32) {
        // Twinkle: brightness ping-pongs in [0, 1]
        self.brightness += self.fade_dir * self.fade_speed * dt;
        if self.brightness >= 1.0 {
            self.brightness = 1.0;
            self.fade_dir = -1.0;
        } else if self.brightness <= 0.0 {
            self.brightness = 0.0;
            self.fade_dir = 1.0;
        }

        self.pos.y += self.scroll_speed * dt;
        if self.pos.y > GAME_HEIGHT + 10.0 {
            self.pos.y = -10.0;
            self.pos.x = rng.random_range(0.0..GAME_WIDTH);
        }
    }
}

/// Read-only view for the UI collaborator
#[derive(Debug, Clone, Copy)]
pub struct HudSnapshot {
    pub mode: GameMode,
    pub score: u32,
    pub lives: i32,
    pub time_left: f32,
    pub stage_index: usize,
    pub power_level: u32,
    /// > 0 while the power-up flash should be shown
    pub power_up_timer: f32,
}

/// The authoritative mutable world state for one game session
pub struct GameState {
    pub mode: GameMode,
    pub score: u32,
    pub lives: i32,
    /// Seconds into the active stage
    pub elapsed_time: f32,
    /// Seconds until the active stage clears
    pub time_left: f32,
    pub stage_index: usize,
    pub power_level: u32,
    /// Visual-only countdown started on each power-up
    pub power_up_timer: f32,
    /// Fractional spawn credit (token bucket)
    pub spawn_accumulator: f32,
    /// Present only while Playing
    pub player: Option<Player>,
    pub enemies: Vec<Enemy>,
    pub bullets: Vec<Bullet>,
    pub particles: Vec<Particle>,
    /// Fixed-size decorative backdrop, persistent across sessions
    pub stars: Vec<Star>,
    pub tuning: Tuning,
    pub rng: Pcg32,
}

impl GameState {
    /// Create a world on the title screen with the backdrop initialized
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let stars = (0..STAR_COUNT).map(|_| Star::new(&mut rng)).collect();
        Self {
            mode: GameMode::Title,
            score: 0,
            lives: tuning.player.initial_lives as i32,
            elapsed_time: 0.0,
            time_left: 0.0,
            stage_index: 0,
            power_level: 0,
            power_up_timer: 0.0,
            spawn_accumulator: 0.0,
            player: None,
            enemies: Vec::new(),
            bullets: Vec::new(),
            particles: Vec::new(),
            stars,
            tuning,
            rng,
        }
    }

    /// Start (or fully restart) a session: all per-session state resets,
    /// the player is recreated, stars are left untouched.
    pub fn start_game(&mut self) {
        self.mode = GameMode::Playing;
        self.score = 0;
        self.lives = self.tuning.player.initial_lives as i32;
        self.stage_index = 0;
        self.elapsed_time = 0.0;
        self.time_left = self.tuning.stage(0).map_or(0.0, |s| s.duration);
        self.power_level = 0;
        self.power_up_timer = 0.0;
        self.spawn_accumulator = 0.0;
        self.player = Some(Player::new(&self.tuning.player));
        self.enemies.clear();
        self.bullets.clear();
        self.particles.clear();
        log::info!("session started ({} lives)", self.lives);
    }

    pub fn hud(&self) -> HudSnapshot {
        HudSnapshot {
            mode: self.mode,
            score: self.score,
            lives: self.lives,
            time_left: self.time_left,
            stage_index: self.stage_index,
            power_level: self.power_level,
            power_up_timer: self.power_up_timer,
        }
    }
}
