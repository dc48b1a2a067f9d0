//! Simulation tick
//!
//! One call advances the session by `dt` seconds. Menu phases only react to
//! clicks and commands; the Running phase steps every system in a fixed order.

use glam::Vec2;

use super::collision::resolve_collisions;
use super::menu::{self, MenuButton};
use super::player::FireOutcome;
use super::state::{GameEvent, GamePhase, GameState};
use super::wave::{select_offer, trigger_enemy_attack, update_director};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Move key held
    pub move_left: bool,
    pub move_right: bool,
    /// Fire pressed since the last tick
    pub fire_pressed: bool,
    /// Fire button currently held (automatic weapons)
    pub fire_held: bool,
    /// Click position since the last tick
    pub click: Option<Vec2>,
    /// Pause toggle
    pub pause: bool,
    /// Restart after game over
    pub restart: bool,
}

/// Advance the game state by `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if input.pause {
        state.toggle_pause();
    }

    match state.phase {
        GamePhase::Paused => {}
        GamePhase::Menu => {
            let hit = input
                .click
                .and_then(|c| menu::button_at(&menu::MAIN_MENU, c, state.width, state.height));
            match hit {
                Some(MenuButton::Start) => state.start_session(),
                Some(MenuButton::Upgrades) => state.phase = GamePhase::Shop,
                _ => {}
            }
        }
        GamePhase::Shop => {
            let hit = input
                .click
                .and_then(|c| menu::button_at(&menu::SHOP_MENU, c, state.width, state.height));
            if hit == Some(MenuButton::Back) {
                state.phase = GamePhase::Menu;
            }
        }
        GamePhase::GameOver => {
            if input.restart {
                log::info!("Restarting after game over");
                state.start_session();
            }
        }
        GamePhase::OfferSelect => {
            let picked = input
                .click
                .and_then(|c| menu::offer_at(c, state.offers.len(), state.width, state.height));
            if let Some(index) = picked {
                select_offer(state, index);
            }
        }
        GamePhase::Running => run(state, input, dt),
    }
}

fn run(state: &mut GameState, input: &TickInput, dt: f32) {
    if update_director(state, dt) {
        return;
    }

    state.update_stars(dt);

    let weapon = state.player.weapon;
    match state
        .player
        .update(dt, input, state.width, &state.tuning)
    {
        Some(FireOutcome::Shot { .. }) => {
            state.events.push(GameEvent::WeaponFired { weapon });
        }
        Some(FireOutcome::Deployed(turret)) => {
            state.events.push(GameEvent::TurretDeployed { pos: turret.pos });
            state.turrets.push(turret);
        }
        None => {}
    }

    let (speed, bullet_speed) = (state.tuning.enemy_speed, state.tuning.enemy_bullet_speed);
    for enemy in &mut state.enemies {
        if let Some(bullet) = enemy.update(dt, speed, bullet_speed) {
            state.enemy_bullets.push(bullet);
        }
    }
    let (width, height) = (state.width, state.height);
    let before = state.enemies.len();
    state.enemies.retain(|e| !e.is_stray(width, height));
    if state.enemies.len() < before {
        log::debug!("Removed {} stray enemies", before - state.enemies.len());
    }

    for bullet in &mut state.enemy_bullets {
        bullet.update(dt);
    }
    state.enemy_bullets.retain(|b| !b.off_vertical(height));

    for turret in &mut state.turrets {
        if let Some(bullet) = turret.update(dt, &state.enemies) {
            state.turret_bullets.push(bullet);
        }
    }
    for bullet in &mut state.turret_bullets {
        bullet.update(dt);
    }
    state
        .turret_bullets
        .retain(|b| !b.off_vertical(height) && !b.off_horizontal(width));

    resolve_collisions(state, input.click);

    if state.player.lives == 0 {
        log::info!("Game over: score {} at level {}", state.score, state.level);
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::GameOver {
            score: state.score,
            level: state.level,
        });
        return;
    }

    trigger_enemy_attack(state, dt);
}
