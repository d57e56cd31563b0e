//! Enemy entities
//!
//! One struct covers the whole closed variant set; per-kind motion and
//! attack state live in tagged unions selected at construction. Power
//! and phase multipliers are applied once at spawn time and frozen for
//! the enemy's lifetime.

use glam::Vec2;
use std::f32::consts::{FRAC_PI_2, TAU};

use crate::consts::{ENEMY_DESPAWN_MARGIN, GAME_HEIGHT, GAME_WIDTH};
use crate::sim::bullet::{Bullet, Owner};
use crate::sim::power::EnemyMultipliers;
use crate::tuning::{EnemyKind, EnemyTuning};

/// Angular advance of a spiral-stream volley
const SPIRAL_STREAM_STEP: f32 = 0.35;
/// Angular advance of a radial volley's base angle
const RADIAL_VOLLEY_STEP: f32 = 0.4;
/// Aimed-spread half angle, radians
const SPREAD_OFFSET: f32 = 0.3;
/// Bullets per radial volley
const RADIAL_COUNT: u32 = 6;
/// Cap on the expanding spiral offset radius
const SPIRAL_MAX_RADIUS: f32 = 80.0;

/// Per-kind movement state
#[derive(Debug, Clone)]
enum Motion {
    /// Straight descent
    Straight,
    /// Lateral triangle-wave offset around the spawn column
    Zigzag { start_x: f32, amp: f32, freq: f32 },
    /// Lateral sine-wave offset around the spawn column
    Wave { start_x: f32, amp: f32, freq: f32 },
    /// Descent plus a rotating offset whose radius grows over time
    Spiral { start_x: f32, growth: f32, freq: f32 },
    /// Heading-seeking pursuit with a bounded per-interval turn
    Homing {
        heading: f32,
        turn_timer: f32,
        turn_interval: f32,
        turn_angle: f32,
    },
}

/// Per-kind attack state
#[derive(Debug, Clone)]
enum Attack {
    None,
    /// Single bullet aimed at the player
    Aimed { timer: f32, interval: f32 },
    /// Three bullets aimed at the player with fixed angular offsets
    Spread { timer: f32, interval: f32 },
    /// Evenly spaced ring, base angle rotating per volley
    Radial { timer: f32, interval: f32, phase: f32 },
    /// Two continuous counter-rotating streams
    SpiralStream { timer: f32, interval: f32, angle: f32 },
}

#[derive(Debug, Clone)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub radius: f32,
    pub hp: i32,
    pub score: u32,
    /// Packed 0xRRGGBB identity, forwarded to the death burst
    pub color: u32,
    /// Effective speed: base x phase multiplier x power multiplier, frozen
    speed: f32,
    time: f32,
    motion: Motion,
    attack: Attack,
}

impl Enemy {
    /// Construct at the top spawn margin. Hit points round half-up after
    /// power scaling; speed combines the phase and power multipliers and
    /// never changes afterwards.
    pub fn spawn(
        kind: EnemyKind,
        pos: Vec2,
        tuning: &EnemyTuning,
        phase_speed_multiplier: f32,
        power: &EnemyMultipliers,
    ) -> Self {
        let hp = (tuning.hp as f32 * power.hp).round().max(1.0) as i32;
        let speed = tuning.speed * phase_speed_multiplier * power.speed;

        let motion = match kind {
            EnemyKind::Basic
            | EnemyKind::Shooter
            | EnemyKind::ShooterSpread
            | EnemyKind::ShooterRadial
            | EnemyKind::ShooterSpiral => Motion::Straight,
            EnemyKind::Zigzag => Motion::Zigzag {
                start_x: pos.x,
                amp: tuning.amp_x,
                freq: tuning.freq,
            },
            EnemyKind::Wave => Motion::Wave {
                start_x: pos.x,
                amp: tuning.amp_x,
                freq: tuning.freq,
            },
            EnemyKind::Spiral => Motion::Spiral {
                start_x: pos.x,
                growth: tuning.spiral_speed * 0.5,
                freq: tuning.freq,
            },
            EnemyKind::Homing => Motion::Homing {
                heading: FRAC_PI_2, // straight down
                turn_timer: 0.0,
                turn_interval: tuning.turn_interval,
                turn_angle: tuning.turn_angle,
            },
        };

        let attack = match kind {
            EnemyKind::Shooter => Attack::Aimed {
                timer: tuning.shot_interval,
                interval: tuning.shot_interval,
            },
            EnemyKind::ShooterSpread => Attack::Spread {
                timer: tuning.shot_interval,
                interval: tuning.shot_interval,
            },
            EnemyKind::ShooterRadial => Attack::Radial {
                timer: tuning.shot_interval,
                interval: tuning.shot_interval,
                phase: 0.0,
            },
            EnemyKind::ShooterSpiral => Attack::SpiralStream {
                timer: tuning.shot_interval,
                interval: tuning.shot_interval,
                angle: 0.0,
            },
            _ => Attack::None,
        };

        Self {
            kind,
            pos,
            radius: tuning.radius,
            hp,
            score: tuning.score,
            color: tuning.color,
            speed,
            time: 0.0,
            motion,
            attack,
        }
    }

    /// Advance motion and attacks by `dt`. Fired bullets are pushed onto
    /// `out` so the caller can merge them into the world after the enemy
    /// pass (the player may be absent; aimed attacks then hold fire).
    pub fn update(
        &mut self,
        dt: f32,
        player_pos: Option<Vec2>,
        bullet_speed: f32,
        bullet_radius: f32,
        out: &mut Vec<Bullet>,
    ) {
        self.time += dt;

        match &mut self.motion {
            Motion::Straight => {
                self.pos.y += self.speed * dt;
            }
            Motion::Zigzag { start_x, amp, freq } => {
                self.pos.y += self.speed * dt;
                self.pos.x = *start_x + triangle_wave(self.time * *freq) * *amp;
            }
            Motion::Wave { start_x, amp, freq } => {
                self.pos.y += self.speed * dt;
                self.pos.x = *start_x + (self.time * *freq).sin() * *amp;
            }
            Motion::Spiral {
                start_x,
                growth,
                freq,
            } => {
                self.pos.y += self.speed * dt;
                let r = (*growth * self.time).min(SPIRAL_MAX_RADIUS);
                self.pos.x = *start_x + (self.time * *freq).cos() * r;
            }
            Motion::Homing {
                heading,
                turn_timer,
                turn_interval,
                turn_angle,
            } => {
                *turn_timer += dt;
                if *turn_timer >= *turn_interval {
                    *turn_timer = 0.0;
                    if let Some(target) = player_pos {
                        let to_target = target - self.pos;
                        let bearing = to_target.y.atan2(to_target.x);
                        let delta = crate::wrap_angle(bearing - *heading);
                        *heading += delta.signum() * delta.abs().min(*turn_angle);
                    }
                }
                let dir = Vec2::new(heading.cos(), heading.sin());
                self.pos += dir * self.speed * dt;
            }
        }

        let pos = self.pos;
        match &mut self.attack {
            Attack::None => {}
            Attack::Aimed { timer, interval } => {
                *timer -= dt;
                if *timer <= 0.0 {
                    if let Some(target) = player_pos {
                        *timer = *interval;
                        let dir = (target - pos).normalize_or_zero();
                        if dir != Vec2::ZERO {
                            out.push(Bullet::new(
                                Owner::Enemy,
                                pos,
                                dir,
                                bullet_speed,
                                bullet_radius,
                            ));
                        }
                    }
                }
            }
            Attack::Spread { timer, interval } => {
                *timer -= dt;
                if *timer <= 0.0 {
                    if let Some(target) = player_pos {
                        *timer = *interval;
                        let to_target = target - pos;
                        if to_target != Vec2::ZERO {
                            let base = to_target.y.atan2(to_target.x);
                            for offset in [-SPREAD_OFFSET, 0.0, SPREAD_OFFSET] {
                                let a = base + offset;
                                out.push(Bullet::new(
                                    Owner::Enemy,
                                    pos,
                                    Vec2::new(a.cos(), a.sin()),
                                    bullet_speed,
                                    bullet_radius,
                                ));
                            }
                        }
                    }
                }
            }
            Attack::Radial {
                timer,
                interval,
                phase,
            } => {
                *timer -= dt;
                if *timer <= 0.0 {
                    *timer = *interval;
                    for i in 0..RADIAL_COUNT {
                        let a = *phase + TAU * i as f32 / RADIAL_COUNT as f32;
                        out.push(Bullet::new(
                            Owner::Enemy,
                            pos,
                            Vec2::new(a.cos(), a.sin()),
                            bullet_speed,
                            bullet_radius,
                        ));
                    }
                    *phase += RADIAL_VOLLEY_STEP;
                }
            }
            Attack::SpiralStream {
                timer,
                interval,
                angle,
            } => {
                *timer -= dt;
                if *timer <= 0.0 {
                    *timer = *interval;
                    // Mirrored streams around straight-down rotate against
                    // each other
                    for a in [FRAC_PI_2 + *angle, FRAC_PI_2 - *angle] {
                        out.push(Bullet::new(
                            Owner::Enemy,
                            pos,
                            Vec2::new(a.cos(), a.sin()),
                            bullet_speed,
                            bullet_radius,
                        ));
                    }
                    *angle += SPIRAL_STREAM_STEP;
                }
            }
        }
    }

    /// Apply damage. Returns true exactly once, when hp first reaches
    /// <= 0; the caller awards score, emits the burst and removes the
    /// enemy in the same frame.
    pub fn hit(&mut self, damage: i32) -> bool {
        self.hp -= damage;
        self.hp <= 0
    }

    pub fn is_off_screen(&self) -> bool {
        self.pos.y > GAME_HEIGHT + ENEMY_DESPAWN_MARGIN
            || self.pos.y < -ENEMY_DESPAWN_MARGIN
            || self.pos.x < -ENEMY_DESPAWN_MARGIN
            || self.pos.x > GAME_WIDTH + ENEMY_DESPAWN_MARGIN
    }
}

/// Triangle wave with period 2π and range [-1, 1], phase-aligned with sin
fn triangle_wave(t: f32) -> f32 {
    let phase = (t / TAU).rem_euclid(1.0);
    if phase < 0.25 {
        phase * 4.0
    } else if phase < 0.75 {
        2.0 - phase * 4.0
    } else {
        phase * 4.0 - 4.0
    }
}
