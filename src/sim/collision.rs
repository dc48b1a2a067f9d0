//! Collision resolution
//!
//! All tests are axis-aligned boxes. Bullet hits resolve in collection order;
//! a bullet is spent on the first enemy it overlaps.

use glam::Vec2;
use rand::Rng;

use super::enemy::Enemy;
use super::state::{Bullet, Coin, GameEvent, GameState};
use crate::Rect;

/// Apply `bullets` to `enemies`, removing spent bullets and dead enemies.
/// Returns the top-left position of every enemy destroyed.
pub fn resolve_bullet_hits(bullets: &mut Vec<Bullet>, enemies: &mut Vec<Enemy>) -> Vec<Vec2> {
    let mut kills = Vec::new();

    bullets.retain(|bullet| {
        let bullet_rect = bullet.rect();
        let Some(idx) = enemies.iter().position(|e| bullet_rect.overlaps(&e.rect())) else {
            return true;
        };

        let enemy = &mut enemies[idx];
        enemy.health -= bullet.damage;
        if enemy.is_dead() {
            kills.push(enemy.pos);
            enemies.remove(idx);
        }
        false
    });

    kills
}

/// Remove enemy bullets touching `player_rect`. Returns how many hit.
pub fn resolve_player_hits(bullets: &mut Vec<Bullet>, player_rect: &Rect) -> usize {
    let before = bullets.len();
    bullets.retain(|b| !b.rect().overlaps(player_rect));
    before - bullets.len()
}

/// Index of the first coin whose bounds contain `click` (edges included)
pub fn coin_at(coins: &[Coin], click: Vec2) -> Option<usize> {
    coins.iter().position(|c| c.rect().contains(click))
}

/// Run every collision category for one tick and apply score, coin, lives
/// and gold changes to `state`.
pub fn resolve_collisions(state: &mut GameState, click: Option<Vec2>) {
    let mut kills = resolve_bullet_hits(&mut state.player.bullets, &mut state.enemies);

    let player_rect = state.player.rect();
    for _ in 0..resolve_player_hits(&mut state.enemy_bullets, &player_rect) {
        state.player.lose_life();
        state.events.push(GameEvent::PlayerHit {
            lives: state.player.lives,
        });
    }

    kills.extend(resolve_bullet_hits(
        &mut state.turret_bullets,
        &mut state.enemies,
    ));

    for pos in kills {
        state.score += state.tuning.kill_score;
        state.events.push(GameEvent::EnemyDestroyed { pos });
        if state.rng.random_bool(state.tuning.coin_drop_chance) {
            state.coins.push(Coin::new(pos));
            state.events.push(GameEvent::CoinDropped { pos });
        }
    }

    if let Some(idx) = click.and_then(|c| coin_at(&state.coins, c)) {
        state.coins.remove(idx);
        let total = state.wallet.deposit(1);
        state.events.push(GameEvent::CoinCollected { total });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::enemy::{EnemyState, EnemyVariant};
    use crate::sim::state::BulletOwner;

    fn idle_enemy(pos: Vec2, variant: EnemyVariant) -> Enemy {
        let mut enemy = Enemy::new(pos, pos, variant);
        enemy.state = EnemyState::Idle;
        enemy
    }

    fn bullet_at(pos: Vec2, damage: f32, owner: BulletOwner) -> Bullet {
        Bullet::new(pos, Vec2::ZERO, damage, owner)
    }

    fn running_state() -> GameState {
        let mut state = GameState::with_seed(9);
        state.start_session();
        state.enemies.clear();
        state.drain_events();
        state
    }

    #[test]
    fn test_two_hits_destroy_teal() {
        let mut state = running_state();
        state.tuning.coin_drop_chance = 0.0;
        state.enemies.push(idle_enemy(Vec2::new(100.0, 100.0), EnemyVariant::Teal));

        state
            .player
            .bullets
            .push(bullet_at(Vec2::new(110.0, 105.0), 1.0, BulletOwner::Player));
        resolve_collisions(&mut state, None);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].health, 1.0);
        assert!(state.player.bullets.is_empty());
        assert_eq!(state.score, 0);

        state
            .player
            .bullets
            .push(bullet_at(Vec2::new(110.0, 105.0), 1.0, BulletOwner::Player));
        resolve_collisions(&mut state, None);
        assert!(state.enemies.is_empty());
        assert_eq!(state.score, 100);
        assert!(
            state
                .drain_events()
                .contains(&GameEvent::EnemyDestroyed {
                    pos: Vec2::new(100.0, 100.0)
                })
        );
    }

    #[test]
    fn test_bullet_spent_on_first_enemy() {
        let mut bullets = vec![bullet_at(Vec2::new(110.0, 105.0), 1.0, BulletOwner::Player)];
        // Two overlapping enemies under one bullet
        let mut enemies = vec![
            idle_enemy(Vec2::new(100.0, 100.0), EnemyVariant::Teal),
            idle_enemy(Vec2::new(105.0, 100.0), EnemyVariant::Teal),
        ];
        let kills = resolve_bullet_hits(&mut bullets, &mut enemies);
        assert!(kills.is_empty());
        assert!(bullets.is_empty());
        assert_eq!(enemies[0].health, 1.0);
        assert_eq!(enemies[1].health, 2.0);
    }

    #[test]
    fn test_fractional_damage_accumulates() {
        let mut enemies = vec![idle_enemy(Vec2::new(0.0, 0.0), EnemyVariant::Purple)];
        for hit in 1..=4 {
            let mut bullets = vec![bullet_at(Vec2::new(5.0, 5.0), 0.25, BulletOwner::Turret)];
            let kills = resolve_bullet_hits(&mut bullets, &mut enemies);
            if hit < 4 {
                assert!(kills.is_empty());
                assert!((enemies[0].health - (1.0 - 0.25 * hit as f32)).abs() < 1e-6);
            } else {
                assert_eq!(kills, vec![Vec2::ZERO]);
                assert!(enemies.is_empty());
            }
        }
    }

    #[test]
    fn test_edge_contact_is_not_a_hit() {
        // Bullet's right edge touches the enemy's left edge
        let mut bullets = vec![bullet_at(Vec2::new(96.0, 100.0), 1.0, BulletOwner::Player)];
        let mut enemies = vec![idle_enemy(Vec2::new(100.0, 100.0), EnemyVariant::Purple)];
        assert!(resolve_bullet_hits(&mut bullets, &mut enemies).is_empty());
        assert_eq!(bullets.len(), 1);
        assert_eq!(enemies.len(), 1);
    }

    #[test]
    fn test_enemy_bullet_costs_a_life() {
        let mut state = running_state();
        let hit_pos = state.player.pos + Vec2::new(10.0, 5.0);
        state
            .enemy_bullets
            .push(bullet_at(hit_pos, 1.0, BulletOwner::Enemy));
        state
            .enemy_bullets
            .push(bullet_at(Vec2::new(5.0, 5.0), 1.0, BulletOwner::Enemy));

        resolve_collisions(&mut state, None);
        assert_eq!(state.player.lives, 2);
        assert_eq!(state.enemy_bullets.len(), 1);
        assert_eq!(state.drain_events(), vec![GameEvent::PlayerHit { lives: 2 }]);
    }

    #[test]
    fn test_turret_bullets_score_kills() {
        let mut state = running_state();
        state.tuning.coin_drop_chance = 1.0;
        state.enemies.push(idle_enemy(Vec2::new(300.0, 80.0), EnemyVariant::Purple));
        state
            .turret_bullets
            .push(bullet_at(Vec2::new(310.0, 85.0), 1.0, BulletOwner::Turret));

        resolve_collisions(&mut state, None);
        assert!(state.enemies.is_empty());
        assert_eq!(state.score, 100);
        assert_eq!(state.coins.len(), 1);
        assert_eq!(state.coins[0].pos, Vec2::new(300.0, 80.0));
    }

    #[test]
    fn test_click_collects_one_coin() {
        let mut state = running_state();
        state.coins.push(Coin::new(Vec2::new(50.0, 50.0)));
        state.coins.push(Coin::new(Vec2::new(50.0, 50.0)));

        // Misses leave coins alone
        resolve_collisions(&mut state, Some(Vec2::new(10.0, 10.0)));
        assert_eq!(state.coins.len(), 2);

        // Far corner is inside (inclusive bounds)
        resolve_collisions(&mut state, Some(Vec2::new(62.0, 62.0)));
        assert_eq!(state.coins.len(), 1);
        assert_eq!(state.gold(), 1);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::CoinCollected { total: 1 }]
        );
    }

    #[test]
    fn test_no_coins_when_chance_is_zero() {
        let mut state = running_state();
        state.tuning.coin_drop_chance = 0.0;
        for i in 0..20 {
            let pos = Vec2::new(i as f32 * 40.0, 100.0);
            state.enemies.push(idle_enemy(pos, EnemyVariant::Purple));
            state
                .player
                .bullets
                .push(bullet_at(pos + Vec2::new(5.0, 5.0), 1.0, BulletOwner::Player));
        }
        resolve_collisions(&mut state, None);
        assert!(state.enemies.is_empty());
        assert!(state.coins.is_empty());
        assert_eq!(state.score, 2000);
    }

    #[test]
    fn test_coin_drop_rate_near_two_percent() {
        let mut state = running_state();
        let mut kills = 0;
        for _ in 0..50 {
            for i in 0..100 {
                let pos = Vec2::new((i % 10) as f32 * 40.0, 100.0 + (i / 10) as f32 * 40.0);
                state.enemies.push(idle_enemy(pos, EnemyVariant::Purple));
                state
                    .player
                    .bullets
                    .push(bullet_at(pos + Vec2::new(5.0, 5.0), 1.0, BulletOwner::Player));
            }
            resolve_collisions(&mut state, None);
            assert!(state.enemies.is_empty());
            kills += 100;
        }

        // 5000 kills at 2%: expect about 100 coins
        let coins = state.coins.len();
        assert_eq!(kills, 5000);
        assert!((50..=160).contains(&coins), "{coins} coins dropped");
    }
}
