//! Game balance values
//!
//! Everything a designer would want to tweak without touching the
//! simulation code. Persisted as JSON in LocalStorage on the web build so a
//! tweaked balance survives reloads; missing fields fall back to defaults.

use serde::{Deserialize, Serialize};

use crate::error::TuningError;

/// Balance knobs read by the simulation every tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    /// Horizontal ship speed (pixels/second)
    pub player_max_speed: f32,
    /// Upward speed of player bullets (pixels/second)
    pub player_bullet_speed: f32,
    /// Horizontal speed of the outer shotgun pellets (pixels/second)
    pub shotgun_spread_speed: f32,

    // === Weapon cooldowns (seconds) ===
    pub pistol_cooldown: f32,
    pub smg_cooldown: f32,
    pub shotgun_cooldown: f32,
    /// Time between turret deployments
    pub turret_deploy_cooldown: f32,

    // === Turret ===
    pub turret_fire_cooldown: f32,
    pub turret_bullet_speed: f32,
    pub turret_bullet_damage: f32,

    // === Enemies ===
    /// Movement speed in every non-idle state (pixels/second)
    pub enemy_speed: f32,
    /// Downward speed of enemy bullets (pixels/second)
    pub enemy_bullet_speed: f32,
    /// Seconds between dive commands
    pub enemy_shoot_interval: f32,

    // === Waves & rewards ===
    /// Seconds between a cleared wave and the next spawn
    pub wave_spawn_delay: f32,
    /// Probability (0-1) that a destroyed enemy drops a coin
    pub coin_drop_chance: f64,
    /// Score awarded per destroyed enemy
    pub kill_score: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_max_speed: 420.0,
            player_bullet_speed: 300.0,
            shotgun_spread_speed: 90.0,

            pistol_cooldown: 0.3,
            smg_cooldown: 0.2,
            shotgun_cooldown: 0.6,
            turret_deploy_cooldown: 3.0,

            turret_fire_cooldown: 0.5,
            turret_bullet_speed: 240.0,
            turret_bullet_damage: 0.25,

            enemy_speed: 180.0,
            enemy_bullet_speed: 300.0,
            enemy_shoot_interval: 1.5,

            wave_spawn_delay: 3.0,
            coin_drop_chance: 0.02,
            kill_score: 100,
        }
    }
}

impl Tuning {
    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "star_rogue_tuning";

    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values that would stall or break the simulation
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("player_max_speed", self.player_max_speed),
            ("player_bullet_speed", self.player_bullet_speed),
            ("turret_bullet_speed", self.turret_bullet_speed),
            ("enemy_speed", self.enemy_speed),
            ("enemy_bullet_speed", self.enemy_bullet_speed),
            ("enemy_shoot_interval", self.enemy_shoot_interval),
        ];
        for (field, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(TuningError::Invalid {
                    field,
                    reason: "must be positive",
                });
            }
        }

        let non_negative = [
            ("shotgun_spread_speed", self.shotgun_spread_speed),
            ("pistol_cooldown", self.pistol_cooldown),
            ("smg_cooldown", self.smg_cooldown),
            ("shotgun_cooldown", self.shotgun_cooldown),
            ("turret_deploy_cooldown", self.turret_deploy_cooldown),
            ("turret_fire_cooldown", self.turret_fire_cooldown),
            ("turret_bullet_damage", self.turret_bullet_damage),
            ("wave_spawn_delay", self.wave_spawn_delay),
        ];
        for (field, value) in non_negative {
            if value.is_nan() || value < 0.0 {
                return Err(TuningError::Invalid {
                    field,
                    reason: "must not be negative",
                });
            }
        }

        if !(0.0..=1.0).contains(&self.coin_drop_chance) {
            return Err(TuningError::Invalid {
                field: "coin_drop_chance",
                reason: "must be between 0 and 1",
            });
        }

        Ok(())
    }

    /// Load tuning from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(tuning) => {
                        log::info!("Loaded tuning from LocalStorage");
                        return tuning;
                    }
                    Err(e) => log::warn!("Ignoring stored tuning: {e}"),
                }
            }
        }

        log::info!("Using default tuning");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
