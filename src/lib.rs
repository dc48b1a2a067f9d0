//! Star Rogue - A Galaga-style arcade shooter with roguelike offers
//!
//! Core modules:
//! - `sim`: Simulation (entities, collisions, wave/level state machine)
//! - `renderer`: Vertex geometry built from a read-only game state
//! - `platform`: Frame clock, input aggregation, browser bridge
//! - `persistence`: Gold storage (the only state that outlives a session)
//! - `tuning`: Data-driven game balance

pub mod error;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use error::{StorageError, TuningError};
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Default playfield size (the browser host resizes to the window)
    pub const DEFAULT_WIDTH: f32 = 800.0;
    pub const DEFAULT_HEIGHT: f32 = 600.0;

    /// Frame gaps longer than this (ms) are treated as a hiccup
    pub const MAX_FRAME_GAP_MS: f64 = 100.0;
    /// Delta substituted for an oversized frame gap (ms)
    pub const FALLBACK_FRAME_MS: f64 = 16.0;

    /// Player ship
    pub const PLAYER_WIDTH: f32 = 30.0;
    pub const PLAYER_HEIGHT: f32 = 30.0;
    /// Gap between the ship and the bottom edge
    pub const PLAYER_BOTTOM_MARGIN: f32 = 10.0;
    pub const PLAYER_START_LIVES: u8 = 3;

    /// Bullets (shared shape for every owner)
    pub const BULLET_WIDTH: f32 = 4.0;
    pub const BULLET_HEIGHT: f32 = 10.0;

    /// Enemies
    pub const ENEMY_WIDTH: f32 = 30.0;
    pub const ENEMY_HEIGHT: f32 = 20.0;
    /// Enemies further than this outside the playfield are removed
    pub const STRAY_MARGIN: f32 = 200.0;

    /// Formation grid
    pub const FORMATION_MAX_COLS: usize = 8;
    pub const FORMATION_MAX_ROWS: usize = 5;
    pub const FORMATION_COL_SPACING: f32 = 45.0;
    pub const FORMATION_ROW_SPACING: f32 = 35.0;
    pub const FORMATION_TOP: f32 = 60.0;

    /// Coins
    pub const COIN_RADIUS: f32 = 6.0;

    /// Turret body
    pub const TURRET_RADIUS: f32 = 10.0;

    /// Background stars
    pub const STAR_COUNT: usize = 100;
    pub const STAR_MIN_SPEED: f32 = 20.0;
    pub const STAR_MAX_SPEED: f32 = 50.0;
}

/// Axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Strict overlap: rectangles that only touch along an edge do not intersect
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.pos.x < other.right()
            && self.right() > other.pos.x
            && self.pos.y < other.bottom()
            && self.bottom() > other.pos.y
    }

    /// Inclusive point test (used for clicks)
    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.pos.x
            && point.x <= self.right()
            && point.y >= self.pos.y
            && point.y <= self.bottom()
    }
}
