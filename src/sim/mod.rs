//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering and
//! platform dependencies:
//! - Time only advances through `tick`
//! - Seeded RNG only
//! - Stable iteration order (collection order)

pub mod collision;
pub mod enemy;
pub mod loot;
pub mod menu;
pub mod player;
pub mod state;
pub mod tick;
pub mod turret;
pub mod wave;

pub use enemy::{Enemy, EnemyState, EnemyVariant};
pub use loot::{Offer, Rarity, generate_offers};
pub use menu::MenuButton;
pub use player::{FireOutcome, Player, Weapon};
pub use state::{Bullet, BulletOwner, Coin, GameEvent, GamePhase, GameState, Star};
pub use tick::{TickInput, tick};
pub use turret::{Turret, intercept_point};
pub use wave::select_offer;
