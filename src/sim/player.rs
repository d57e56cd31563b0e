//! The player avatar
//!
//! Movement, auto-fire, dash and invincibility. All timers count down
//! every update and may go below zero internally; consumers always test
//! `<= 0`, never `== 0`.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use crate::consts::{GAME_HEIGHT, GAME_WIDTH, PLAYER_BULLET_SPEED};
use crate::sim::bullet::{Bullet, Owner};
use crate::sim::power::PlayerMultipliers;
use crate::sim::state::{PLAYER_COLOR, Particle};
use crate::tuning::PlayerTuning;

#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    /// Hurt-box radius used by collision, smaller than the body
    pub hit_radius: f32,
    pub dashing: bool,
    shot_timer: f32,
    dash_timer: f32,
    dash_cooldown_timer: f32,
    invincible_timer: f32,
}

impl Player {
    pub fn new(tuning: &PlayerTuning) -> Self {
        Self {
            pos: Vec2::new(GAME_WIDTH / 2.0, GAME_HEIGHT - 80.0),
            radius: tuning.radius,
            hit_radius: tuning.hit_radius,
            dashing: false,
            shot_timer: 0.0,
            dash_timer: 0.0,
            dash_cooldown_timer: 0.0,
            invincible_timer: 0.0,
        }
    }

    /// Advance the avatar by `dt` seconds. `movement` is the normalized
    /// input direction (magnitude <= 1 after clamping here); fired bullets
    /// and trail particles are pushed onto the world queues.
    #[allow(clippy::too_many_arguments)]
    pub fn update(
        &mut self,
        dt: f32,
        movement: Vec2,
        dash_requested: bool,
        tuning: &PlayerTuning,
        mults: &PlayerMultipliers,
        bullet_radius: f32,
        bullets: &mut Vec<Bullet>,
        particles: &mut Vec<Particle>,
        rng: &mut Pcg32,
    ) {
        if dash_requested {
            self.dash(tuning);
        }

        // Diagonal input must not be faster than axis-aligned input
        let magnitude = movement.length();
        let movement = if magnitude > 1.0 {
            movement / magnitude
        } else {
            movement
        };

        let mut speed = tuning.move_speed * mults.move_speed;
        if self.dashing {
            speed *= tuning.dash_speed_multiplier;
        }
        self.pos += movement * speed * dt;

        // Keep the full body inside the playfield
        self.pos = self.pos.clamp(
            Vec2::splat(self.radius),
            Vec2::new(GAME_WIDTH - self.radius, GAME_HEIGHT - self.radius),
        );

        self.shot_timer -= dt;
        self.dash_cooldown_timer -= dt;
        self.invincible_timer -= dt;

        if self.dashing {
            self.dash_timer -= dt;
            if self.dash_timer <= 0.0 {
                self.dashing = false;
            }
        }

        // Auto-fire straight up-field
        if self.shot_timer <= 0.0 {
            bullets.push(Bullet::new(
                Owner::Player,
                self.pos,
                Vec2::new(0.0, -1.0),
                PLAYER_BULLET_SPEED * mults.bullet_speed,
                bullet_radius,
            ));
            self.shot_timer = tuning.shot_interval / mults.fire_rate;
        }

        // Engine trail while moving; visual only
        if magnitude.min(1.0) > 0.1 && rng.random_range(0.0..1.0) < 0.3 {
            particles.push(Particle::new(self.pos, PLAYER_COLOR, 0.5, 2.0, Vec2::ZERO));
        }
    }

    /// Start a dash unless one is active or cooling down. Dashing grants
    /// invincibility for the dash duration.
    pub fn dash(&mut self, tuning: &PlayerTuning) {
        if self.dash_cooldown_timer <= 0.0 && !self.dashing {
            self.dashing = true;
            self.dash_timer = tuning.dash_duration;
            self.dash_cooldown_timer = tuning.dash_cooldown;
            self.invincible_timer = self.invincible_timer.max(tuning.dash_duration);
        }
    }

    /// Register an incoming hit. No-op while invincible; otherwise starts
    /// the post-hit invincibility window and returns true so the caller
    /// applies the world-side effects (life loss, burst, game over).
    pub fn register_hit(&mut self, tuning: &PlayerTuning) -> bool {
        if self.is_invincible() {
            return false;
        }
        self.invincible_timer = tuning.invincible_duration_on_hit;
        true
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible_timer > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::power::player_multipliers;
    use rand::SeedableRng;

    struct Ctx {
        tuning: PlayerTuning,
        bullets: Vec<Bullet>,
        particles: Vec<Particle>,
        rng: Pcg32,
    }

    impl Ctx {
        fn new() -> Self {
            Self {
                tuning: PlayerTuning::default(),
                bullets: Vec::new(),
                particles: Vec::new(),
                rng: Pcg32::seed_from_u64(42),
            }
        }

        fn step(&mut self, player: &mut Player, dt: f32, movement: Vec2, dash: bool) {
            let mults = player_multipliers(0);
            player.update(
                dt,
                movement,
                dash,
                &self.tuning,
                &mults,
                3.0,
                &mut self.bullets,
                &mut self.particles,
                &mut self.rng,
            );
        }
    }

    #[test]
    fn test_diagonal_matches_axis_aligned_displacement() {
        let mut ctx = Ctx::new();
        let mut axis = Player::new(&ctx.tuning);
        let mut diag = Player::new(&ctx.tuning);
        axis.pos = Vec2::new(180.0, 320.0);
        diag.pos = Vec2::new(180.0, 320.0);

        ctx.step(&mut axis, 0.1, Vec2::new(1.0, 0.0), false);
        ctx.step(&mut diag, 0.1, Vec2::new(1.0, 1.0), false);

        let axis_dist = (axis.pos - Vec2::new(180.0, 320.0)).length();
        let diag_dist = (diag.pos - Vec2::new(180.0, 320.0)).length();
        assert!((axis_dist - diag_dist).abs() < 1e-3);
        assert!((axis_dist - 200.0 * 0.1).abs() < 1e-3);
    }

    #[test]
    fn test_position_clamped_to_playfield() {
        let mut ctx = Ctx::new();
        let mut player = Player::new(&ctx.tuning);
        player.pos = Vec2::new(5.0, 5.0);
        ctx.step(&mut player, 0.1, Vec2::new(-1.0, -1.0), false);
        assert!(player.pos.x >= player.radius);
        assert!(player.pos.y >= player.radius);
    }

    #[test]
    fn test_auto_fire_interval() {
        let mut ctx = Ctx::new();
        let mut player = Player::new(&ctx.tuning);

        // First update fires immediately (timer starts at 0)
        ctx.step(&mut player, 0.016, Vec2::ZERO, false);
        assert_eq!(ctx.bullets.len(), 1);
        assert_eq!(ctx.bullets[0].owner, Owner::Player);
        assert!(ctx.bullets[0].vel.y < 0.0);

        // Within the cooldown no further shot
        ctx.step(&mut player, 0.016, Vec2::ZERO, false);
        assert_eq!(ctx.bullets.len(), 1);

        // After the interval elapses the next shot fires
        for _ in 0..13 {
            ctx.step(&mut player, 0.016, Vec2::ZERO, false);
        }
        assert_eq!(ctx.bullets.len(), 2);
    }

    #[test]
    fn test_fire_rate_multiplier_shortens_interval() {
        let ctx = Ctx::new();
        let mut player = Player::new(&ctx.tuning);
        let mut bullets = Vec::new();
        let mut particles = Vec::new();
        let mut rng = Pcg32::seed_from_u64(1);
        let mults = player_multipliers(2); // fire rate 1.3

        player.update(
            0.016,
            Vec2::ZERO,
            false,
            &ctx.tuning,
            &mults,
            3.0,
            &mut bullets,
            &mut particles,
            &mut rng,
        );
        assert!((player.shot_timer - 0.2 / 1.3).abs() < 1e-4);
        // Bullet speed scales too
        assert!((bullets[0].vel.length() - 300.0 * 1.2).abs() < 1e-3);
    }

    #[test]
    fn test_dash_gating_and_expiry() {
        let mut ctx = Ctx::new();
        let mut player = Player::new(&ctx.tuning);

        ctx.step(&mut player, 0.016, Vec2::ZERO, true);
        assert!(player.dashing);
        assert!(player.is_invincible());

        // A second request mid-dash changes nothing
        let timer_before = player.dash_timer;
        ctx.step(&mut player, 0.016, Vec2::ZERO, true);
        assert!(player.dash_timer < timer_before);

        // Dash ends after its duration
        for _ in 0..20 {
            ctx.step(&mut player, 0.016, Vec2::ZERO, false);
        }
        assert!(!player.dashing);

        // Cooldown still running: request ignored
        ctx.step(&mut player, 0.016, Vec2::ZERO, true);
        assert!(!player.dashing);

        // After the cooldown the dash works again
        for _ in 0..125 {
            ctx.step(&mut player, 0.016, Vec2::ZERO, false);
        }
        ctx.step(&mut player, 0.016, Vec2::ZERO, true);
        assert!(player.dashing);
    }

    #[test]
    fn test_register_hit_is_noop_while_invincible() {
        let ctx = Ctx::new();
        let mut player = Player::new(&ctx.tuning);
        assert!(player.register_hit(&ctx.tuning));
        assert!(player.is_invincible());
        // Second hit inside the window does nothing
        assert!(!player.register_hit(&ctx.tuning));
    }

    #[test]
    fn test_dash_speed_multiplier_applies() {
        let mut ctx = Ctx::new();
        let mut player = Player::new(&ctx.tuning);
        player.pos = Vec2::new(50.0, 320.0);
        ctx.step(&mut player, 0.05, Vec2::new(1.0, 0.0), true);
        let moved = player.pos.x - 50.0;
        assert!((moved - 200.0 * 2.5 * 0.05).abs() < 1e-3);
    }
}
