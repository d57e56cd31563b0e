//! Ballistic bullets

use glam::Vec2;

use crate::consts::{BULLET_DESPAWN_MARGIN, GAME_HEIGHT, GAME_WIDTH};

/// Which side fired the bullet. Immutable for the bullet's lifetime and
/// decides which entities it can damage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Owner {
    Player,
    Enemy,
}

#[derive(Debug, Clone)]
pub struct Bullet {
    pub owner: Owner,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Bullet {
    /// `dir` must be a unit vector; velocity is constant thereafter.
    pub fn new(owner: Owner, pos: Vec2, dir: Vec2, speed: f32, radius: f32) -> Self {
        Self {
            owner,
            pos,
            vel: dir * speed,
            radius,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.pos += self.vel * dt;
    }

    pub fn is_off_screen(&self) -> bool {
        self.pos.x < -BULLET_DESPAWN_MARGIN
            || self.pos.x > GAME_WIDTH + BULLET_DESPAWN_MARGIN
            || self.pos.y < -BULLET_DESPAWN_MARGIN
            || self.pos.y > GAME_HEIGHT + BULLET_DESPAWN_MARGIN
    }
}
