//! Wave and level progression
//!
//! A level is `waves_per_level` waves. Clearing the field starts the spawn
//! delay; after the last wave of a level the player picks one of the offers
//! and the next level begins.

use glam::Vec2;
use rand::Rng;

use super::enemy::{Enemy, EnemyState, EnemyVariant};
use super::loot::{Offer, UpgradeEffect, generate_offers};
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Rows and columns of the formation for `level` on a playfield `width` wide
pub fn formation_size(level: u32, width: f32) -> (usize, usize) {
    let rows = (level as usize + 1).min(FORMATION_MAX_ROWS);
    let fit = ((width - ENEMY_WIDTH) / FORMATION_COL_SPACING).floor().max(0.0) as usize + 1;
    let cols = fit.clamp(1, FORMATION_MAX_COLS);
    (rows, cols)
}

/// Build the enemies for `level`. Slots are centered horizontally; each
/// enemy starts above the top-left or top-right corner depending on which
/// half its column sits in.
pub fn build_formation<R: Rng>(rng: &mut R, level: u32, width: f32) -> Vec<Enemy> {
    let (rows, cols) = formation_size(level, width);
    let grid_width = (cols - 1) as f32 * FORMATION_COL_SPACING + ENEMY_WIDTH;
    let left = width / 2.0 - grid_width / 2.0;

    let mut enemies = Vec::with_capacity(rows * cols);
    for row in 0..rows {
        for col in 0..cols {
            let slot = Vec2::new(
                left + col as f32 * FORMATION_COL_SPACING,
                FORMATION_TOP + row as f32 * FORMATION_ROW_SPACING,
            );
            let spawn_x = if col < cols / 2 {
                -40.0 - rng.random_range(0.0..80.0)
            } else {
                width + 40.0 + rng.random_range(0.0..80.0)
            };
            let spawn_y = -40.0 - row as f32 * 20.0 - rng.random_range(0.0..60.0);
            enemies.push(Enemy::new(
                Vec2::new(spawn_x, spawn_y),
                slot,
                EnemyVariant::for_row(row),
            ));
        }
    }
    enemies
}

/// Replace the field with a fresh wave for the current level/wave
pub fn spawn_wave(state: &mut GameState) {
    state.enemies = build_formation(&mut state.rng, state.level, state.width);
    state.wave_spawn_timer = 0.0;
    state.enemy_shoot_timer = 0.0;

    log::info!(
        "Spawning level {} wave {}/{} ({} enemies)",
        state.level,
        state.wave_in_level,
        state.waves_per_level,
        state.enemies.len()
    );
    state.events.push(GameEvent::WaveSpawned {
        level: state.level,
        wave: state.wave_in_level,
        enemies: state.enemies.len(),
    });
}

/// Inter-wave timing. Returns true when the level was just cleared and the
/// session moved to offer selection.
pub fn update_director(state: &mut GameState, dt: f32) -> bool {
    if !state.enemies.is_empty() {
        return false;
    }

    state.wave_spawn_timer += dt;
    if state.wave_spawn_timer < state.tuning.wave_spawn_delay {
        return false;
    }

    if state.wave_in_level < state.waves_per_level {
        state.wave_in_level += 1;
        spawn_wave(state);
        return false;
    }

    state.offers = generate_offers(&mut state.rng, state.player.weapon);
    state.phase = GamePhase::OfferSelect;
    log::info!(
        "Level {} cleared, offering: {}",
        state.level,
        state
            .offers
            .iter()
            .map(Offer::name)
            .collect::<Vec<_>>()
            .join(", ")
    );
    state.events.push(GameEvent::LevelCleared { level: state.level });
    true
}

/// Dive scheduling. Runs only while some enemy is not already diving.
pub fn trigger_enemy_attack(state: &mut GameState, dt: f32) {
    let all_diving = state
        .enemies
        .iter()
        .all(|e| e.state == EnemyState::Attacking);
    if state.enemies.is_empty() || all_diving {
        return;
    }

    state.enemy_shoot_timer += dt;
    if state.enemy_shoot_timer < state.tuning.enemy_shoot_interval {
        return;
    }
    state.enemy_shoot_timer = 0.0;

    let idle: Vec<usize> = state
        .enemies
        .iter()
        .enumerate()
        .filter(|(_, e)| e.state == EnemyState::Idle)
        .map(|(i, _)| i)
        .collect();
    if idle.is_empty() {
        return;
    }

    let pick = idle[state.rng.random_range(0..idle.len())];
    let (player_x, height) = (state.player.pos.x, state.height);
    state.enemies[pick].start_attack(player_x, height);
}

/// Apply offer `index` and start the next level. Ignored outside offer
/// selection or for an index with no offer.
pub fn select_offer(state: &mut GameState, index: usize) -> bool {
    if state.phase != GamePhase::OfferSelect {
        return false;
    }
    let Some(&offer) = state.offers.get(index) else {
        return false;
    };

    match offer {
        Offer::Weapon(def) => {
            state.player.switch_weapon(def.weapon);
            state.player.reset_damage_modifier();
        }
        Offer::Upgrade(def) => match def.effect {
            UpgradeEffect::DamageIncrease(bonus) => state.player.apply_damage_modifier(bonus),
        },
    }
    log::info!(
        "Selected {} (weapon {}, damage x{:.2})",
        offer.name(),
        state.player.weapon.as_str(),
        state.player.damage_modifier
    );
    state.events.push(GameEvent::OfferSelected { offer });

    state.level += 1;
    state.waves_per_level = state.level;
    state.wave_in_level = 1;
    state.turrets.clear();
    state.turret_bullets.clear();
    state.offers.clear();
    spawn_wave(state);
    state.phase = GamePhase::Running;
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::loot::{UPGRADES, WEAPONS};
    use crate::sim::player::Weapon;
    use crate::sim::turret::Turret;

    fn cleared_state() -> GameState {
        let mut state = GameState::with_seed(21);
        state.start_session();
        state.enemies.clear();
        state.drain_events();
        state
    }

    #[test]
    fn test_formation_grows_with_level() {
        assert_eq!(formation_size(1, 800.0), (2, 8));
        assert_eq!(formation_size(3, 800.0), (4, 8));
        assert_eq!(formation_size(10, 800.0), (5, 8));
        // Narrow field: 30 + 2 * 45 = 120 fits three columns
        assert_eq!(formation_size(1, 120.0), (2, 3));
        assert_eq!(formation_size(1, 10.0), (2, 1));
    }

    #[test]
    fn test_formation_layout() {
        let mut rng = rand_pcg::Pcg32::new(1, 1);
        let enemies = build_formation(&mut rng, 2, 800.0);
        assert_eq!(enemies.len(), 3 * 8);

        // Centered: grid is 7 * 45 + 30 = 345 wide
        let left = enemies.iter().map(|e| e.formation.x).fold(f32::MAX, f32::min);
        let right = enemies
            .iter()
            .map(|e| e.formation.x + e.size.x)
            .fold(f32::MIN, f32::max);
        assert!((left - (800.0 - right)).abs() < 1e-3);

        for (i, enemy) in enemies.iter().enumerate() {
            let row = i / 8;
            assert_eq!(enemy.variant, EnemyVariant::for_row(row));
            assert_eq!(enemy.state, EnemyState::Entering);
            assert_eq!(enemy.pos, enemy.spawn);
            assert!(enemy.spawn.y < 0.0);
            assert!(enemy.spawn.x < 0.0 || enemy.spawn.x > 800.0);
            assert!(!enemy.is_stray(800.0, 600.0));
        }
    }

    #[test]
    fn test_next_wave_after_delay() {
        let mut state = cleared_state();
        state.waves_per_level = 2;

        assert!(!update_director(&mut state, 2.9));
        assert!(state.enemies.is_empty());
        assert!(!update_director(&mut state, 0.2));
        assert_eq!(state.wave_in_level, 2);
        assert!(!state.enemies.is_empty());
        assert_eq!(state.wave_spawn_timer, 0.0);
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_last_wave_clear_offers_three() {
        let mut state = cleared_state();
        assert_eq!(state.waves_per_level, 1);

        let mut elapsed = 0.0;
        while !update_director(&mut state, 0.1) {
            elapsed += 0.1;
            assert!(elapsed < 5.0, "level never completed");
        }

        assert_eq!(state.phase, GamePhase::OfferSelect);
        assert_eq!(state.offers.len(), 3);
        assert_eq!(state.offers.iter().filter(|o| o.is_upgrade()).count(), 1);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::LevelCleared { level: 1 }]
        );
    }

    #[test]
    fn test_select_weapon_offer_resets_modifier() {
        let mut state = cleared_state();
        state.player.damage_modifier = 1.35;
        state.phase = GamePhase::OfferSelect;
        state.offers = vec![Offer::Weapon(&WEAPONS[2]), Offer::Upgrade(&UPGRADES[0])];
        state.turrets.push(Turret::new(Vec2::new(100.0, 100.0), &state.tuning));

        assert!(select_offer(&mut state, 0));
        assert_eq!(state.player.weapon, Weapon::Shotgun);
        assert_eq!(state.player.damage_modifier, 1.0);
        assert_eq!(state.level, 2);
        assert_eq!(state.waves_per_level, 2);
        assert_eq!(state.wave_in_level, 1);
        assert!(state.offers.is_empty());
        assert!(state.turrets.is_empty());
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.enemies.len(), 3 * 8);
    }

    #[test]
    fn test_select_same_weapon_still_resets_modifier() {
        let mut state = cleared_state();
        state.player.damage_modifier = 1.2;
        state.phase = GamePhase::OfferSelect;
        state.offers = vec![Offer::Weapon(&WEAPONS[0])];
        assert!(select_offer(&mut state, 0));
        assert_eq!(state.player.weapon, Weapon::Pistol);
        assert_eq!(state.player.damage_modifier, 1.0);
    }

    #[test]
    fn test_select_upgrade_keeps_weapon() {
        let mut state = cleared_state();
        state.player.weapon = Weapon::Smg;
        state.phase = GamePhase::OfferSelect;
        state.offers = vec![Offer::Weapon(&WEAPONS[0]), Offer::Upgrade(&UPGRADES[1])];

        assert!(select_offer(&mut state, 1));
        assert_eq!(state.player.weapon, Weapon::Smg);
        assert!((state.player.damage_modifier - 1.1).abs() < 1e-6);
    }

    #[test]
    fn test_select_offer_ignored_when_not_offering() {
        let mut state = cleared_state();
        state.offers = vec![Offer::Weapon(&WEAPONS[1])];
        assert!(!select_offer(&mut state, 0));
        assert_eq!(state.level, 1);

        state.phase = GamePhase::OfferSelect;
        assert!(!select_offer(&mut state, 5));
        assert_eq!(state.phase, GamePhase::OfferSelect);
    }

    #[test]
    fn test_attack_trigger_picks_idle_enemy() {
        let mut state = cleared_state();
        let mut idle = Enemy::new(Vec2::new(100.0, 60.0), Vec2::new(100.0, 60.0), EnemyVariant::Purple);
        idle.state = EnemyState::Idle;
        let entering = Enemy::new(Vec2::new(-50.0, -50.0), Vec2::new(200.0, 60.0), EnemyVariant::Teal);
        state.enemies = vec![entering, idle];

        trigger_enemy_attack(&mut state, 1.0);
        assert!(state.enemies.iter().all(|e| e.state != EnemyState::Attacking));

        trigger_enemy_attack(&mut state, 0.5);
        assert_eq!(state.enemies[1].state, EnemyState::Attacking);
        assert_eq!(state.enemies[0].state, EnemyState::Entering);
        assert_eq!(state.enemy_shoot_timer, 0.0);
    }

    #[test]
    fn test_attack_timer_paused_while_all_dive() {
        let mut state = cleared_state();
        let mut diver = Enemy::new(Vec2::ZERO, Vec2::ZERO, EnemyVariant::Purple);
        diver.state = EnemyState::Attacking;
        state.enemies = vec![diver];

        trigger_enemy_attack(&mut state, 5.0);
        assert_eq!(state.enemy_shoot_timer, 0.0);

        state.enemies.clear();
        trigger_enemy_attack(&mut state, 5.0);
        assert_eq!(state.enemy_shoot_timer, 0.0);
    }
}
