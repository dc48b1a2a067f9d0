//! Frame building
//!
//! Turns a read-only `GameState` into colored triangles plus text labels.
//! The host owns the actual drawing surface (canvas, WebGL, terminal...).

pub mod shapes;
pub mod vertex;

use glam::Vec2;
use serde::Serialize;

pub use vertex::{Vertex, as_floats, colors};

use crate::Rect;
use crate::sim::menu::{self, MenuButton};
use crate::sim::{BulletOwner, EnemyVariant, GamePhase, GameState, Rarity};

/// Star squares are this many pixels on a side
const STAR_SIZE: f32 = 2.0;

/// Text for the host to draw, centered on `pos` unless `left_aligned`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Label {
    pub text: String,
    pub pos: Vec2,
    /// Font size in pixels
    pub size: f32,
    pub color: [f32; 4],
    pub left_aligned: bool,
}

impl Label {
    fn centered(text: impl Into<String>, pos: Vec2, size: f32, color: [f32; 4]) -> Self {
        Self {
            text: text.into(),
            pos,
            size,
            color,
            left_aligned: false,
        }
    }

    fn left(text: impl Into<String>, pos: Vec2, size: f32) -> Self {
        Self {
            text: text.into(),
            pos,
            size,
            color: colors::TEXT,
            left_aligned: true,
        }
    }
}

pub fn rarity_color(rarity: Rarity) -> [f32; 4] {
    match rarity {
        Rarity::Common => colors::RARITY_COMMON,
        Rarity::Uncommon => colors::RARITY_UNCOMMON,
        Rarity::Rare => colors::RARITY_RARE,
        Rarity::Legendary => colors::RARITY_LEGENDARY,
    }
}

/// All triangles for the current frame, back to front
pub fn build_frame(state: &GameState) -> Vec<Vertex> {
    let screen = Rect::new(0.0, 0.0, state.width, state.height);
    let mut verts = shapes::rect(&screen, colors::BACKGROUND);

    match state.phase {
        GamePhase::Menu => {
            for button in menu::MAIN_MENU {
                verts.extend(button_shape(button, state));
            }
        }
        GamePhase::Shop => {
            for button in menu::SHOP_MENU {
                verts.extend(button_shape(button, state));
            }
        }
        GamePhase::Running | GamePhase::Paused => playfield(state, &mut verts),
        GamePhase::GameOver => {
            playfield(state, &mut verts);
            verts.extend(shapes::rect(&screen, colors::OVERLAY));
        }
        GamePhase::OfferSelect => {
            playfield(state, &mut verts);
            verts.extend(shapes::rect(&screen, colors::OVERLAY));
            let cards = menu::offer_cards(state.offers.len(), state.width, state.height);
            for (offer, card) in state.offers.iter().zip(&cards) {
                verts.extend(shapes::rect(card, colors::CARD));
                verts.extend(shapes::rect_outline(card, 2.0, rarity_color(offer.rarity())));
            }
        }
    }

    verts
}

fn button_shape(button: MenuButton, state: &GameState) -> Vec<Vertex> {
    shapes::rect(&button.rect(state.width, state.height), colors::BUTTON)
}

fn playfield(state: &GameState, verts: &mut Vec<Vertex>) {
    for star in &state.stars {
        let dot = Rect::from_pos_size(star.pos, Vec2::splat(STAR_SIZE));
        verts.extend(shapes::rect(&dot, colors::STAR));
    }

    for coin in &state.coins {
        let center = coin.pos + Vec2::splat(coin.radius);
        verts.extend(shapes::circle(center, coin.radius, colors::COIN, 12));
    }

    for enemy in &state.enemies {
        let hull = match enemy.variant {
            EnemyVariant::Purple => colors::ENEMY_PURPLE,
            EnemyVariant::Teal => colors::ENEMY_TEAL,
        };
        verts.extend(shapes::saucer(
            &enemy.rect(),
            hull,
            colors::ENEMY_DOME,
            colors::ENEMY_COCKPIT,
        ));
    }

    for turret in &state.turrets {
        verts.extend(shapes::circle(turret.pos, turret.radius, colors::TURRET, 16));
        verts.extend(shapes::circle(
            turret.pos,
            turret.radius * 0.5,
            colors::TURRET_CORE,
            12,
        ));
    }

    verts.extend(shapes::rect(&state.player.rect(), colors::PLAYER));

    let bullets = state
        .player
        .bullets
        .iter()
        .chain(&state.enemy_bullets)
        .chain(&state.turret_bullets);
    for bullet in bullets {
        let color = match bullet.owner {
            BulletOwner::Player => colors::PLAYER_BULLET,
            BulletOwner::Enemy => colors::ENEMY_BULLET,
            BulletOwner::Turret => colors::TURRET_BULLET,
        };
        verts.extend(shapes::rect(&bullet.rect(), color));
    }
}

/// Text overlays for the current frame
pub fn build_labels(state: &GameState) -> Vec<Label> {
    let (w, h) = (state.width, state.height);
    let mut labels = Vec::new();

    let button_label = |button: MenuButton| {
        let rect = button.rect(w, h);
        Label::centered(button.label(), rect.center(), 20.0, colors::TEXT)
    };

    match state.phase {
        GamePhase::Menu => {
            labels.push(Label::centered(
                "STAR ROGUE",
                Vec2::new(w / 2.0, h / 2.0 - 80.0),
                40.0,
                colors::TEXT,
            ));
            labels.extend(menu::MAIN_MENU.map(button_label));
        }
        GamePhase::Shop => {
            labels.push(Label::centered(
                "Upgrades",
                Vec2::new(w / 2.0, h / 2.0 - 80.0),
                40.0,
                colors::TEXT,
            ));
            labels.push(Label::centered(
                format!("Gold: {}", state.gold()),
                Vec2::new(w / 2.0, h / 2.0 - 30.0),
                24.0,
                colors::TEXT,
            ));
            labels.extend(menu::SHOP_MENU.map(button_label));
        }
        GamePhase::Running | GamePhase::Paused | GamePhase::GameOver | GamePhase::OfferSelect => {
            labels.push(Label::left(format!("Score: {}", state.score), Vec2::new(10.0, 30.0), 20.0));
            labels.push(Label::left(
                format!("Lives: {}", state.player.lives),
                Vec2::new(w - 100.0, 30.0),
                20.0,
            ));
            labels.push(Label::left(
                format!(
                    "Level {} - Wave {}/{}",
                    state.level, state.wave_in_level, state.waves_per_level
                ),
                Vec2::new(10.0, 55.0),
                16.0,
            ));
            labels.push(Label::left(
                format!("Gold: {}", state.gold()),
                Vec2::new(w - 100.0, 55.0),
                16.0,
            ));
        }
    }

    match state.phase {
        GamePhase::Paused => labels.push(Label::centered(
            "PAUSED",
            Vec2::new(w / 2.0, h / 2.0),
            40.0,
            colors::TEXT,
        )),
        GamePhase::GameOver => {
            labels.push(Label::centered(
                "GAME OVER",
                Vec2::new(w / 2.0, h / 2.0),
                48.0,
                colors::GAME_OVER,
            ));
            labels.push(Label::centered(
                "Press R to Restart",
                Vec2::new(w / 2.0, h / 2.0 + 40.0),
                20.0,
                colors::TEXT,
            ));
        }
        GamePhase::OfferSelect => {
            let cards = menu::offer_cards(state.offers.len(), w, h);
            if let Some(first) = cards.first() {
                labels.push(Label::centered(
                    "Choose Your Upgrade",
                    Vec2::new(w / 2.0, first.pos.y - 40.0),
                    30.0,
                    colors::TEXT,
                ));
            }
            for (offer, card) in state.offers.iter().zip(&cards) {
                let x = card.center().x;
                let prefix = if offer.is_upgrade() { "Upgrade: " } else { "" };
                labels.push(Label::centered(
                    format!("{prefix}{}", offer.name()),
                    Vec2::new(x, card.pos.y + 40.0),
                    20.0,
                    colors::TEXT,
                ));
                for (i, line) in offer.description().iter().enumerate() {
                    labels.push(Label::centered(
                        *line,
                        Vec2::new(x, card.pos.y + 75.0 + i as f32 * 22.0),
                        16.0,
                        colors::TEXT,
                    ));
                }
                labels.push(Label::centered(
                    offer.rarity().as_str(),
                    Vec2::new(x, card.bottom() - 20.0),
                    16.0,
                    rarity_color(offer.rarity()),
                ));
            }
        }
        _ => {}
    }

    labels
}
