//! Data-driven game balance
//!
//! All per-entity parameters and the stage/phase schedule live here.
//! Compiled-in defaults ship the tuned values; a JSON file with the same
//! shape can override them before the first frame. The tables are
//! immutable for the lifetime of a session.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Player avatar parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerTuning {
    pub move_speed: f32,
    pub radius: f32,
    /// Hurt-box radius, smaller than the visual radius
    pub hit_radius: f32,
    pub shot_interval: f32,
    pub dash_speed_multiplier: f32,
    pub dash_duration: f32,
    pub dash_cooldown: f32,
    pub invincible_duration_on_hit: f32,
    pub initial_lives: u32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            move_speed: 200.0,
            radius: 10.0,
            hit_radius: 6.0,
            shot_interval: 0.2,
            dash_speed_multiplier: 2.5,
            dash_duration: 0.2,
            dash_cooldown: 2.0,
            invincible_duration_on_hit: 1.0,
            initial_lives: 3,
        }
    }
}

/// The closed set of enemy variants. New variants are added by extending
/// the tuning table plus one motion/attack branch in `sim::enemy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyKind {
    Basic,
    Zigzag,
    Wave,
    Spiral,
    Homing,
    Shooter,
    ShooterSpread,
    ShooterRadial,
    ShooterSpiral,
}

/// Static per-kind parameters. Fields that a kind does not use stay at
/// their zero default.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyTuning {
    pub speed: f32,
    pub radius: f32,
    pub hp: u32,
    pub score: u32,
    /// Packed 0xRRGGBB identity color, forwarded to death particles
    pub color: u32,
    /// Lateral oscillation amplitude (zigzag, wave)
    #[serde(default)]
    pub amp_x: f32,
    /// Oscillation / spiral angular rate in rad/s
    #[serde(default)]
    pub freq: f32,
    /// Spiral offset growth rate
    #[serde(default)]
    pub spiral_speed: f32,
    /// Seconds between heading corrections (homing)
    #[serde(default)]
    pub turn_interval: f32,
    /// Maximum heading correction per interval, radians (homing)
    #[serde(default)]
    pub turn_angle: f32,
    /// Seconds between volleys (shooter kinds)
    #[serde(default)]
    pub shot_interval: f32,
}

/// Bullet radii by owner side
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulletTuning {
    pub player_radius: f32,
    pub enemy_radius: f32,
}

impl Default for BulletTuning {
    fn default() -> Self {
        Self {
            player_radius: 3.0,
            enemy_radius: 3.0,
        }
    }
}

/// A time-bounded difficulty segment within a stage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseConfig {
    pub start_time: f32,
    pub end_time: f32,
    /// Enemy spawns per second before power scaling
    pub spawn_rate: f32,
    /// Live enemy population cap while this phase is active
    pub max_enemies: usize,
    pub allowed_kinds: Vec<EnemyKind>,
    pub enemy_speed_multiplier: f32,
    /// Speed handed to enemy volleys fired during this phase
    pub bullet_speed: f32,
}

/// An ordered run of phases; completing the full duration grants a power
/// level and restarts the timer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageConfig {
    pub duration: f32,
    pub phases: Vec<PhaseConfig>,
}

/// Complete balance table, loaded once before the first frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tuning {
    pub player: PlayerTuning,
    pub enemies: BTreeMap<EnemyKind, EnemyTuning>,
    pub bullets: BulletTuning,
    pub stages: Vec<StageConfig>,
}

impl Default for Tuning {
    fn default() -> Self {
        let mut enemies = BTreeMap::new();
        enemies.insert(
            EnemyKind::Basic,
            EnemyTuning {
                speed: 60.0,
                radius: 8.0,
                hp: 1,
                score: 10,
                color: 0xFFD95A,
                ..EnemyTuning::zeroed()
            },
        );
        enemies.insert(
            EnemyKind::Zigzag,
            EnemyTuning {
                speed: 70.0,
                radius: 10.0,
                hp: 1,
                score: 15,
                color: 0xFF5AF2,
                amp_x: 30.0,
                freq: 2.0,
                ..EnemyTuning::zeroed()
            },
        );
        enemies.insert(
            EnemyKind::Wave,
            EnemyTuning {
                speed: 65.0,
                radius: 9.0,
                hp: 1,
                score: 18,
                color: 0xFFB3E6,
                amp_x: 50.0,
                freq: 1.5,
                ..EnemyTuning::zeroed()
            },
        );
        enemies.insert(
            EnemyKind::Spiral,
            EnemyTuning {
                speed: 55.0,
                radius: 10.0,
                hp: 2,
                score: 22,
                color: 0xB3E6FF,
                freq: 2.0,
                spiral_speed: 120.0,
                ..EnemyTuning::zeroed()
            },
        );
        enemies.insert(
            EnemyKind::Homing,
            EnemyTuning {
                speed: 80.0,
                radius: 9.0,
                hp: 2,
                score: 25,
                color: 0x7CFF5A,
                turn_interval: 0.25,
                turn_angle: 0.2,
                ..EnemyTuning::zeroed()
            },
        );
        enemies.insert(
            EnemyKind::Shooter,
            EnemyTuning {
                speed: 50.0,
                radius: 12.0,
                hp: 2,
                score: 30,
                color: 0xFFA05A,
                shot_interval: 2.0,
                ..EnemyTuning::zeroed()
            },
        );
        enemies.insert(
            EnemyKind::ShooterSpread,
            EnemyTuning {
                speed: 45.0,
                radius: 12.0,
                hp: 3,
                score: 35,
                color: 0xFF8AC9,
                shot_interval: 2.5,
                ..EnemyTuning::zeroed()
            },
        );
        enemies.insert(
            EnemyKind::ShooterRadial,
            EnemyTuning {
                speed: 40.0,
                radius: 14.0,
                hp: 3,
                score: 45,
                color: 0x8AFFEF,
                shot_interval: 3.5,
                ..EnemyTuning::zeroed()
            },
        );
        enemies.insert(
            EnemyKind::ShooterSpiral,
            EnemyTuning {
                speed: 40.0,
                radius: 14.0,
                hp: 4,
                score: 60,
                color: 0xFFEF8A,
                shot_interval: 0.15,
                ..EnemyTuning::zeroed()
            },
        );

        let stages = vec![StageConfig {
            duration: 60.0,
            phases: vec![
                PhaseConfig {
                    start_time: 0.0,
                    end_time: 20.0,
                    spawn_rate: 0.3,
                    max_enemies: 5,
                    allowed_kinds: vec![EnemyKind::Basic],
                    enemy_speed_multiplier: 0.9,
                    bullet_speed: 120.0,
                },
                PhaseConfig {
                    start_time: 20.0,
                    end_time: 40.0,
                    spawn_rate: 0.5,
                    max_enemies: 8,
                    allowed_kinds: vec![EnemyKind::Basic, EnemyKind::Zigzag, EnemyKind::Wave],
                    enemy_speed_multiplier: 1.0,
                    bullet_speed: 130.0,
                },
                PhaseConfig {
                    start_time: 40.0,
                    end_time: 60.0,
                    spawn_rate: 0.7,
                    max_enemies: 12,
                    allowed_kinds: vec![
                        EnemyKind::Basic,
                        EnemyKind::Zigzag,
                        EnemyKind::Wave,
                        EnemyKind::Shooter,
                        EnemyKind::ShooterRadial,
                    ],
                    enemy_speed_multiplier: 1.0,
                    bullet_speed: 140.0,
                },
            ],
        }];

        Self {
            player: PlayerTuning::default(),
            enemies,
            bullets: BulletTuning::default(),
            stages,
        }
    }
}

impl EnemyTuning {
    /// All-zero template for table entries; required fields are filled at
    /// the insertion site.
    fn zeroed() -> Self {
        Self {
            speed: 0.0,
            radius: 0.0,
            hp: 0,
            score: 0,
            color: 0xFFFFFF,
            amp_x: 0.0,
            freq: 0.0,
            spiral_speed: 0.0,
            turn_interval: 0.0,
            turn_angle: 0.0,
            shot_interval: 0.0,
        }
    }
}

impl Tuning {
    /// Parse a tuning override from JSON. Rejects tables that would leave
    /// the simulation without a usable schedule.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        use serde::de::Error;

        let tuning: Tuning = serde_json::from_str(json)?;
        if tuning.stages.is_empty() {
            return Err(serde_json::Error::custom("tuning has no stages"));
        }
        if tuning.stages.iter().any(|s| s.phases.is_empty()) {
            return Err(serde_json::Error::custom("stage has no phases"));
        }
        Ok(tuning)
    }

    /// Stage by index, clamped to the last configured stage
    pub fn stage(&self, index: usize) -> Option<&StageConfig> {
        let clamped = index.min(self.stages.len().saturating_sub(1));
        self.stages.get(clamped)
    }

    pub fn enemy(&self, kind: EnemyKind) -> Option<&EnemyTuning> {
        self.enemies.get(&kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_complete() {
        let tuning = Tuning::default();
        assert_eq!(tuning.enemies.len(), 9);
        assert_eq!(tuning.stages.len(), 1);
        assert_eq!(tuning.stages[0].phases.len(), 3);
        // Every kind referenced by the schedule has a table entry
        for stage in &tuning.stages {
            for phase in &stage.phases {
                for kind in &phase.allowed_kinds {
                    assert!(tuning.enemy(*kind).is_some(), "missing entry for {kind:?}");
                }
            }
        }
    }

    #[test]
    fn test_json_roundtrip() {
        let tuning = Tuning::default();
        let json = serde_json::to_string(&tuning).unwrap();
        let back = Tuning::from_json(&json).unwrap();
        assert_eq!(back.player.initial_lives, 3);
        assert_eq!(back.enemy(EnemyKind::ShooterSpiral).unwrap().hp, 4);
    }

    #[test]
    fn test_kind_names_snake_case() {
        let json = serde_json::to_string(&EnemyKind::ShooterRadial).unwrap();
        assert_eq!(json, "\"shooter_radial\"");
    }

    #[test]
    fn test_rejects_empty_schedule() {
        let mut tuning = Tuning::default();
        tuning.stages.clear();
        let json = serde_json::to_string(&tuning).unwrap();
        assert!(Tuning::from_json(&json).is_err());
    }

    #[test]
    fn test_stage_index_clamps() {
        let tuning = Tuning::default();
        let last = tuning.stage(99).unwrap();
        assert_eq!(last.duration, tuning.stages.last().unwrap().duration);
    }
}
