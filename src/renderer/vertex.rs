//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position (playfield pixels) and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    /// Floats per vertex when flattened for a host buffer
    pub const FLOATS: usize = 6;

    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }
}

/// Flatten vertices into `[x, y, r, g, b, a, ...]`
pub fn as_floats(vertices: &[Vertex]) -> &[f32] {
    bytemuck::cast_slice(vertices)
}

/// Colors for game elements
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const STAR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const PLAYER: [f32; 4] = [0.0, 0.0, 1.0, 1.0];
    pub const PLAYER_BULLET: [f32; 4] = [1.0, 1.0, 0.0, 1.0];
    pub const ENEMY_BULLET: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    pub const TURRET_BULLET: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
    pub const ENEMY_PURPLE: [f32; 4] = [1.0, 0.0, 1.0, 1.0];
    pub const ENEMY_TEAL: [f32; 4] = [0.25, 0.88, 0.82, 1.0];
    pub const ENEMY_DOME: [f32; 4] = [0.75, 0.75, 0.75, 1.0];
    pub const ENEMY_COCKPIT: [f32; 4] = [0.53, 1.0, 1.0, 1.0];
    pub const TURRET: [f32; 4] = [0.0, 0.8, 0.0, 1.0];
    pub const TURRET_CORE: [f32; 4] = [0.0, 0.53, 0.0, 1.0];
    pub const COIN: [f32; 4] = [1.0, 0.84, 0.0, 1.0];
    pub const BUTTON: [f32; 4] = [0.5, 0.5, 0.5, 1.0];
    pub const OVERLAY: [f32; 4] = [0.0, 0.0, 0.0, 0.7];
    pub const CARD: [f32; 4] = [0.08, 0.08, 0.08, 0.8];
    pub const TEXT: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const GAME_OVER: [f32; 4] = [1.0, 0.0, 0.0, 1.0];

    pub const RARITY_COMMON: [f32; 4] = [0.67, 0.67, 0.67, 1.0];
    pub const RARITY_UNCOMMON: [f32; 4] = [0.2, 0.8, 0.2, 1.0];
    pub const RARITY_RARE: [f32; 4] = [0.2, 0.6, 1.0, 1.0];
    pub const RARITY_LEGENDARY: [f32; 4] = [1.0, 0.6, 0.2, 1.0];
}
