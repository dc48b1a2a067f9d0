//! Game state and core simulation types
//!
//! `GameState` is the single owner of every entity for a session. Every
//! system takes it (or a piece of it) explicitly; there are no globals.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::enemy::Enemy;
use super::loot::Offer;
use super::player::{Player, Weapon};
use super::turret::Turret;
use crate::Rect;
use crate::consts::*;
use crate::persistence::Wallet;
use crate::tuning::Tuning;

/// Current screen / phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Title screen with Start and Upgrades buttons
    Menu,
    /// Gold overview reached from the menu
    Shop,
    /// Active gameplay
    Running,
    /// Frozen; only the pause toggle is processed
    Paused,
    /// Lives exhausted; waiting for restart
    GameOver,
    /// Level cleared; waiting for the player to pick an offer
    OfferSelect,
}

/// Who fired a bullet (also picks its color)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulletOwner {
    Player,
    Enemy,
    Turret,
}

/// A bullet. Same shape for every owner.
#[derive(Debug, Clone, PartialEq)]
pub struct Bullet {
    /// Top-left corner
    pub pos: Vec2,
    /// Velocity in pixels/second
    pub vel: Vec2,
    pub damage: f32,
    pub owner: BulletOwner,
}

impl Bullet {
    pub const SIZE: Vec2 = Vec2::new(BULLET_WIDTH, BULLET_HEIGHT);

    pub fn new(pos: Vec2, vel: Vec2, damage: f32, owner: BulletOwner) -> Self {
        Self {
            pos,
            vel,
            damage,
            owner,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.pos += self.vel * dt;
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, Self::SIZE)
    }

    /// Above the top edge
    pub fn above(&self) -> bool {
        self.pos.y < 0.0
    }

    /// Entirely below the bottom edge, or fully above the top
    pub fn off_vertical(&self, height: f32) -> bool {
        self.pos.y > height || self.pos.y < -BULLET_HEIGHT
    }

    /// Entirely left or right of the playfield
    pub fn off_horizontal(&self, width: f32) -> bool {
        self.pos.x < -BULLET_WIDTH || self.pos.x > width
    }
}

/// A dropped coin; clicking it adds one gold
#[derive(Debug, Clone, PartialEq)]
pub struct Coin {
    /// Top-left of the bounding square
    pub pos: Vec2,
    pub radius: f32,
}

impl Coin {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            radius: COIN_RADIUS,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, Vec2::splat(self.radius * 2.0))
    }
}

/// Background star (decoration only)
#[derive(Debug, Clone)]
pub struct Star {
    pub pos: Vec2,
    /// Fall speed in pixels/second
    pub speed: f32,
}

/// Things that happened during a tick, drained by the host
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    WaveSpawned { level: u32, wave: u32, enemies: usize },
    WeaponFired { weapon: Weapon },
    TurretDeployed { pos: Vec2 },
    EnemyDestroyed { pos: Vec2 },
    CoinDropped { pos: Vec2 },
    CoinCollected { total: u64 },
    PlayerHit { lives: u8 },
    LevelCleared { level: u32 },
    OfferSelected { offer: Offer },
    GameOver { score: u64, level: u32 },
}

/// Complete session state
#[derive(Debug)]
pub struct GameState {
    /// Playfield size in pixels
    pub width: f32,
    pub height: f32,
    /// Current phase
    pub phase: GamePhase,
    /// Balance values
    pub tuning: Tuning,
    /// Session RNG
    pub rng: Pcg32,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub enemy_bullets: Vec<Bullet>,
    pub turrets: Vec<Turret>,
    pub turret_bullets: Vec<Bullet>,
    pub coins: Vec<Coin>,
    pub stars: Vec<Star>,
    pub score: u64,
    /// Persistent gold
    pub wallet: Wallet,
    /// Current level (1-based)
    pub level: u32,
    /// Waves that must be cleared to finish the level
    pub waves_per_level: u32,
    /// Current wave within the level (1-based)
    pub wave_in_level: u32,
    /// Time since the field was cleared (seconds)
    pub wave_spawn_timer: f32,
    /// Time since the last dive command (seconds)
    pub enemy_shoot_timer: f32,
    /// Pending level-end offers (empty unless in OfferSelect)
    pub offers: Vec<Offer>,
    /// Events since the last drain
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a session sitting at the main menu
    pub fn new(seed: u64, width: f32, height: f32, tuning: Tuning, wallet: Wallet) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let stars = (0..STAR_COUNT)
            .map(|_| Star {
                pos: Vec2::new(rng.random::<f32>() * width, rng.random::<f32>() * height),
                speed: rng.random_range(STAR_MIN_SPEED..STAR_MAX_SPEED),
            })
            .collect();

        Self {
            width,
            height,
            phase: GamePhase::Menu,
            tuning,
            rng,
            player: Player::new(width, height),
            enemies: Vec::new(),
            enemy_bullets: Vec::new(),
            turrets: Vec::new(),
            turret_bullets: Vec::new(),
            coins: Vec::new(),
            stars,
            score: 0,
            wallet,
            level: 1,
            waves_per_level: 1,
            wave_in_level: 1,
            wave_spawn_timer: 0.0,
            enemy_shoot_timer: 0.0,
            offers: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Default-sized session with default tuning and an in-memory wallet
    pub fn with_seed(seed: u64) -> Self {
        Self::new(
            seed,
            DEFAULT_WIDTH,
            DEFAULT_HEIGHT,
            Tuning::default(),
            Wallet::in_memory(),
        )
    }

    /// Wipe all transient state and start level 1. Gold is kept.
    pub fn start_session(&mut self) {
        self.level = 1;
        self.waves_per_level = 1;
        self.wave_in_level = 1;
        self.wave_spawn_timer = 0.0;
        self.enemy_shoot_timer = 0.0;

        self.player = Player::new(self.width, self.height);
        self.enemies.clear();
        self.enemy_bullets.clear();
        self.coins.clear();
        self.turrets.clear();
        self.turret_bullets.clear();
        self.offers.clear();
        self.score = 0;

        log::info!("New session (gold: {})", self.wallet.gold());
        super::wave::spawn_wave(self);
        self.phase = GamePhase::Running;
    }

    /// Toggle between Running and Paused; other phases ignore it
    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            GamePhase::Running => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Running,
            other => other,
        };
    }

    /// Host window resized
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        self.player.pos.y = height - self.player.size.y - PLAYER_BOTTOM_MARGIN;
        self.player.pos.x = self.player.pos.x.clamp(0.0, (width - self.player.size.x).max(0.0));
    }

    pub fn gold(&self) -> u64 {
        self.wallet.gold()
    }

    /// Take all events emitted since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Scroll stars downward, wrapping to the top at a random column
    pub fn update_stars(&mut self, dt: f32) {
        for star in &mut self.stars {
            star.pos.y += star.speed * dt;
            if star.pos.y > self.height {
                star.pos.y = 0.0;
                star.pos.x = self.rng.random::<f32>() * self.width;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_sits_at_menu() {
        let state = GameState::with_seed(1);
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.stars.len(), STAR_COUNT);
        assert!(state.enemies.is_empty());
        assert_eq!(state.player.lives, PLAYER_START_LIVES);
    }

    #[test]
    fn test_start_session_spawns_first_wave() {
        let mut state = GameState::with_seed(2);
        state.start_session();
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.level, 1);
        assert_eq!(state.wave_in_level, 1);
        assert!(!state.enemies.is_empty());
        assert!(
            state
                .drain_events()
                .iter()
                .any(|e| matches!(e, GameEvent::WaveSpawned { level: 1, wave: 1, .. }))
        );
    }

    #[test]
    fn test_start_session_keeps_gold() {
        let mut state = GameState::with_seed(3);
        state.wallet.deposit(5);
        state.score = 900;
        state.level = 4;
        state.coins.push(Coin::new(Vec2::new(10.0, 10.0)));
        state.start_session();
        assert_eq!(state.gold(), 5);
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert!(state.coins.is_empty());
    }

    #[test]
    fn test_toggle_pause_only_from_running() {
        let mut state = GameState::with_seed(4);
        state.toggle_pause();
        assert_eq!(state.phase, GamePhase::Menu);

        state.phase = GamePhase::Running;
        state.toggle_pause();
        assert_eq!(state.phase, GamePhase::Paused);
        state.toggle_pause();
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_stars_wrap() {
        let mut state = GameState::with_seed(5);
        state.stars[0].pos.y = state.height - 0.1;
        state.stars[0].speed = 50.0;
        state.update_stars(0.1);
        assert_eq!(state.stars[0].pos.y, 0.0);
        assert!((0.0..=state.width).contains(&state.stars[0].pos.x));
    }

    #[test]
    fn test_bullet_bounds() {
        let b = Bullet::new(Vec2::new(10.0, -0.5), Vec2::ZERO, 1.0, BulletOwner::Player);
        assert!(b.above());
        assert!(!b.off_vertical(600.0));
        let b = Bullet::new(Vec2::new(10.0, 600.5), Vec2::ZERO, 1.0, BulletOwner::Enemy);
        assert!(b.off_vertical(600.0));
    }
}
