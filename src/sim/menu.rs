//! Screen layouts shared by click handling and the renderer
//!
//! Buttons and offer cards are laid out relative to the playfield center so
//! hit testing and drawing can never disagree.

use glam::Vec2;

use crate::Rect;

pub const BUTTON_WIDTH: f32 = 200.0;
pub const BUTTON_HEIGHT: f32 = 40.0;

pub const CARD_WIDTH: f32 = 200.0;
pub const CARD_HEIGHT: f32 = 200.0;
pub const CARD_SPACING: f32 = 80.0;

/// A clickable menu button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuButton {
    /// Main menu: begin a session
    Start,
    /// Main menu: open the gold screen
    Upgrades,
    /// Gold screen: return to the main menu
    Back,
}

impl MenuButton {
    pub fn label(&self) -> &'static str {
        match self {
            MenuButton::Start => "Start",
            MenuButton::Upgrades => "Upgrades",
            MenuButton::Back => "Back",
        }
    }

    pub fn rect(&self, width: f32, height: f32) -> Rect {
        let x = width / 2.0 - BUTTON_WIDTH / 2.0;
        let y = match self {
            MenuButton::Start => height / 2.0 - 30.0,
            MenuButton::Upgrades => height / 2.0 + 10.0,
            MenuButton::Back => height / 2.0 + 50.0,
        };
        Rect::new(x, y, BUTTON_WIDTH, BUTTON_HEIGHT)
    }
}

/// Buttons on the main menu
pub const MAIN_MENU: [MenuButton; 2] = [MenuButton::Start, MenuButton::Upgrades];
/// Buttons on the gold screen
pub const SHOP_MENU: [MenuButton; 1] = [MenuButton::Back];

/// First button in `buttons` under `click`
pub fn button_at(buttons: &[MenuButton], click: Vec2, width: f32, height: f32) -> Option<MenuButton> {
    buttons
        .iter()
        .copied()
        .find(|b| b.rect(width, height).contains(click))
}

/// Offer cards, left to right, centered in the playfield
pub fn offer_cards(count: usize, width: f32, height: f32) -> Vec<Rect> {
    if count == 0 {
        return Vec::new();
    }
    let total = CARD_WIDTH * count as f32 + CARD_SPACING * (count as f32 - 1.0);
    let start_x = width / 2.0 - total / 2.0;
    let y = height / 2.0 - CARD_HEIGHT / 2.0;
    (0..count)
        .map(|i| {
            Rect::new(
                start_x + i as f32 * (CARD_WIDTH + CARD_SPACING),
                y,
                CARD_WIDTH,
                CARD_HEIGHT,
            )
        })
        .collect()
}

/// Index of the offer card under `click`
pub fn offer_at(click: Vec2, count: usize, width: f32, height: f32) -> Option<usize> {
    offer_cards(count, width, height)
        .iter()
        .position(|card| card.contains(click))
}
