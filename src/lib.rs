//! Orbit-Bloom - a fixed-playfield arcade shooter simulation core
//!
//! Core modules:
//! - `sim`: the per-frame simulation (entities, spawning, collision, power scaling)
//! - `tuning`: data-driven game balance tables
//! - `input`: normalized input collaborator (key set, virtual joystick, flick gesture)
//!
//! Rendering and UI are external collaborators: they read `sim::GameState`
//! (or the `HudSnapshot` view) once per frame and never mutate it.

pub mod input;
pub mod sim;
pub mod tuning;

pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Playfield logical width (independent of display resolution)
    pub const GAME_WIDTH: f32 = 360.0;
    /// Playfield logical height
    pub const GAME_HEIGHT: f32 = 640.0;

    /// Maximum wall-clock delta accepted per frame. Larger pauses (tab
    /// switch, debugger break) are clamped so entities cannot tunnel and
    /// timers cannot skip whole phases in one step.
    pub const MAX_FRAME_DT: f32 = 0.05;

    /// Persistent background stars
    pub const STAR_COUNT: usize = 100;

    /// Margin outside the playfield at which enemies are pruned
    pub const ENEMY_DESPAWN_MARGIN: f32 = 50.0;
    /// Margin outside the playfield at which bullets are pruned
    pub const BULLET_DESPAWN_MARGIN: f32 = 10.0;
    /// Enemies spawn this far above the top edge
    pub const ENEMY_SPAWN_Y: f32 = -20.0;

    /// Player bullet base speed (power-scaled at fire time)
    pub const PLAYER_BULLET_SPEED: f32 = 300.0;
    /// Enemy bullet speed when the active phase supplies none
    pub const FALLBACK_BULLET_SPEED: f32 = 150.0;

    /// Duration of the power-up HUD flash (visual only)
    pub const POWER_UP_FLASH_SECS: f32 = 2.0;
}

/// Signed shortest angular difference, wrapped to [-π, π)
#[inline]
pub fn wrap_angle(mut angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    while angle >= PI {
        angle -= TAU;
    }
    while angle < -PI {
        angle += TAU;
    }
    angle
}

#[cfg(test)]
mod tests {
    use super::wrap_angle;
    use std::f32::consts::PI;

    #[test]
    fn test_wrap_angle() {
        assert!(wrap_angle(0.0).abs() < 1e-6);
        assert!((wrap_angle(PI + 0.1) - (-PI + 0.1)).abs() < 1e-5);
        assert!((wrap_angle(-PI - 0.1) - (PI - 0.1)).abs() < 1e-5);
        assert!((wrap_angle(3.0 * PI + 0.2) - (-PI + 0.2)).abs() < 1e-4);
    }
}
