//! Simulation core
//!
//! All gameplay logic lives here. The module is platform-free:
//! - Variable timestep, clamped per frame
//! - World-owned RNG
//! - No rendering or input-device dependencies
//!
//! One logical thread of mutation: `tick` runs the whole frame pipeline
//! to completion against the single `GameState` aggregate.

pub mod bullet;
pub mod collision;
pub mod enemy;
pub mod player;
pub mod power;
pub mod spawn;
pub mod state;
pub mod tick;

pub use bullet::{Bullet, Owner};
pub use enemy::Enemy;
pub use player::Player;
pub use state::{GameMode, GameState, HudSnapshot, Particle, Star};
pub use tick::{FrameInput, tick};
