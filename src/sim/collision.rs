//! Collision detection
//!
//! Three pairwise passes per frame over post-update positions. Every test
//! is a circle-circle overlap; entity counts are tens, so the full scans
//! are fine. All passes no-op while no player exists.

use glam::Vec2;
use rand_pcg::Pcg32;

use crate::sim::bullet::Owner;
use crate::sim::player::Player;
use crate::sim::state::{GameMode, GameState, PLAYER_COLOR, Particle, spawn_burst};
use crate::tuning::PlayerTuning;

#[inline]
fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    a.distance_squared(b) < (ra + rb) * (ra + rb)
}

/// Run all three collision passes, mutating the world in place:
/// 1. player bullets x enemies (bullet consumed on first hit)
/// 2. enemy bullets x player hurt-box
/// 3. enemies x player hurt-box (skipped while invincible, one hit max)
pub fn check_collisions(state: &mut GameState) {
    let GameState {
        mode,
        score,
        lives,
        player,
        enemies,
        bullets,
        particles,
        rng,
        tuning,
        ..
    } = state;
    let Some(player) = player.as_mut() else {
        return;
    };

    // Pass 1: player bullets vs enemies. A bullet harms at most one enemy.
    let mut i = 0;
    while i < bullets.len() {
        if bullets[i].owner != Owner::Player {
            i += 1;
            continue;
        }
        let (bpos, brad) = (bullets[i].pos, bullets[i].radius);
        let mut consumed = false;

        let mut j = 0;
        while j < enemies.len() {
            if circles_overlap(bpos, brad, enemies[j].pos, enemies[j].radius) {
                consumed = true;
                if enemies[j].hit(1) {
                    let destroyed = &enemies[j];
                    *score += destroyed.score;
                    spawn_burst(
                        particles,
                        rng,
                        destroyed.pos,
                        destroyed.color,
                        15,
                        30.0,
                        110.0,
                        0.6,
                        2.0,
                        4.0,
                    );
                    enemies.swap_remove(j);
                }
                break;
            }
            j += 1;
        }

        if consumed {
            bullets.swap_remove(i);
        } else {
            i += 1;
        }
    }

    // Pass 2: enemy bullets vs player hurt-box
    let mut i = 0;
    while i < bullets.len() {
        if bullets[i].owner == Owner::Enemy
            && circles_overlap(bullets[i].pos, bullets[i].radius, player.pos, player.hit_radius)
        {
            bullets.swap_remove(i);
            hit_player(player, &tuning.player, lives, mode, particles, rng);
        } else {
            i += 1;
        }
    }

    // Pass 3: enemy bodies vs player hurt-box. At most one hit applies
    // per frame even when several enemies overlap simultaneously.
    if !player.is_invincible() {
        for enemy in enemies.iter() {
            if circles_overlap(enemy.pos, enemy.radius, player.pos, player.hit_radius) {
                hit_player(player, &tuning.player, lives, mode, particles, rng);
                break;
            }
        }
    }
}

/// World-side effects of a player hit: life loss, burst, game over on the
/// frame lives first reach zero. Invincibility makes this a no-op.
fn hit_player(
    player: &mut Player,
    tuning: &PlayerTuning,
    lives: &mut i32,
    mode: &mut GameMode,
    particles: &mut Vec<Particle>,
    rng: &mut Pcg32,
) {
    if !player.register_hit(tuning) {
        return;
    }
    *lives = (*lives - 1).max(0);
    spawn_burst(
        particles,
        rng,
        player.pos,
        PLAYER_COLOR,
        20,
        50.0,
        150.0,
        0.8,
        3.0,
        3.0,
    );
    if *lives <= 0 {
        *mode = GameMode::GameOver;
        log::info!("game over");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::bullet::Bullet;
    use crate::sim::enemy::Enemy;
    use crate::sim::power::enemy_multipliers;
    use crate::tuning::{EnemyKind, Tuning};

    fn world() -> GameState {
        let mut state = GameState::new(3, Tuning::default());
        state.start_game();
        state.particles.clear(); // ignore any start-up effects
        state
    }

    fn basic_enemy(state: &GameState, pos: Vec2) -> Enemy {
        let entry = state.tuning.enemy(EnemyKind::Basic).unwrap();
        Enemy::spawn(EnemyKind::Basic, pos, entry, 1.0, &enemy_multipliers(0))
    }

    fn player_bullet(pos: Vec2) -> Bullet {
        Bullet::new(Owner::Player, pos, Vec2::new(0.0, -1.0), 300.0, 3.0)
    }

    #[test]
    fn test_circle_overlap_thresholds() {
        // radius 3 + radius 8 = 11: distance 2 collides, distance 20 does not
        let mut state = world();
        let mut enemy = basic_enemy(&state, Vec2::new(102.0, 100.0));
        enemy.radius = 8.0;
        state.enemies.push(enemy);
        state.bullets.push(player_bullet(Vec2::new(100.0, 100.0)));
        check_collisions(&mut state);
        assert!(state.enemies.is_empty());
        assert!(state.bullets.is_empty());

        let mut far = basic_enemy(&state, Vec2::new(120.0, 100.0));
        far.radius = 8.0;
        state.enemies.push(far);
        state.bullets.push(player_bullet(Vec2::new(100.0, 100.0)));
        check_collisions(&mut state);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.bullets.len(), 1);
    }

    #[test]
    fn test_destruction_awards_score_and_burst_once() {
        let mut state = world();
        state.enemies.push(basic_enemy(&state, Vec2::new(100.0, 100.0)));
        state.bullets.push(player_bullet(Vec2::new(100.0, 100.0)));
        check_collisions(&mut state);
        assert_eq!(state.score, 10);
        assert_eq!(state.particles.len(), 15);
        assert!(state.enemies.is_empty());
    }

    #[test]
    fn test_bullet_harms_at_most_one_enemy() {
        let mut state = world();
        // Two overlapping enemies, one bullet: only one dies
        state.enemies.push(basic_enemy(&state, Vec2::new(100.0, 100.0)));
        state.enemies.push(basic_enemy(&state, Vec2::new(101.0, 100.0)));
        state.bullets.push(player_bullet(Vec2::new(100.0, 100.0)));
        check_collisions(&mut state);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.score, 10);
    }

    #[test]
    fn test_multi_hp_enemy_survives_first_hit() {
        let mut state = world();
        let entry = state.tuning.enemy(EnemyKind::Shooter).unwrap();
        let enemy = Enemy::spawn(
            EnemyKind::Shooter,
            Vec2::new(100.0, 100.0),
            entry,
            1.0,
            &enemy_multipliers(0),
        );
        assert_eq!(enemy.hp, 2);
        state.enemies.push(enemy);
        state.bullets.push(player_bullet(Vec2::new(100.0, 100.0)));
        check_collisions(&mut state);
        // Bullet consumed, enemy damaged but alive, no score yet
        assert!(state.bullets.is_empty());
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_enemy_bullet_hits_player() {
        let mut state = world();
        let ppos = state.player.as_ref().unwrap().pos;
        state.bullets.push(Bullet::new(
            Owner::Enemy,
            ppos,
            Vec2::new(0.0, 1.0),
            120.0,
            3.0,
        ));
        check_collisions(&mut state);
        assert_eq!(state.lives, 2);
        assert!(state.bullets.is_empty());
        assert_eq!(state.particles.len(), 20);
        assert!(state.player.as_ref().unwrap().is_invincible());
    }

    #[test]
    fn test_enemy_bullets_do_not_hit_enemies() {
        let mut state = world();
        state.enemies.push(basic_enemy(&state, Vec2::new(100.0, 100.0)));
        state.bullets.push(Bullet::new(
            Owner::Enemy,
            Vec2::new(100.0, 100.0),
            Vec2::new(0.0, 1.0),
            120.0,
            3.0,
        ));
        check_collisions(&mut state);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.bullets.len(), 1);
    }

    #[test]
    fn test_contact_pass_applies_one_hit() {
        let mut state = world();
        let ppos = state.player.as_ref().unwrap().pos;
        // Several enemies stacked on the player: one life lost, not three
        for _ in 0..3 {
            state.enemies.push(basic_enemy(&state, ppos));
        }
        check_collisions(&mut state);
        assert_eq!(state.lives, 2);
    }

    #[test]
    fn test_contact_pass_skipped_while_invincible() {
        let mut state = world();
        let ppos = state.player.as_ref().unwrap().pos;
        let player_tuning = state.tuning.player.clone();
        state.player.as_mut().unwrap().register_hit(&player_tuning);
        state.enemies.push(basic_enemy(&state, ppos));
        check_collisions(&mut state);
        assert_eq!(state.lives, 3);
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_game_over_on_last_life() {
        let mut state = world();
        state.lives = 1;
        let ppos = state.player.as_ref().unwrap().pos;
        state.enemies.push(basic_enemy(&state, ppos));
        check_collisions(&mut state);
        assert_eq!(state.lives, 0);
        assert_eq!(state.mode, GameMode::GameOver);
    }

    #[test]
    fn test_no_player_no_faults() {
        let mut state = world();
        state.player = None;
        state.enemies.push(basic_enemy(&state, Vec2::new(100.0, 100.0)));
        state.bullets.push(player_bullet(Vec2::new(100.0, 100.0)));
        check_collisions(&mut state);
        // Passes skipped entirely
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.bullets.len(), 1);
    }
}
