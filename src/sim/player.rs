//! The player's ship: movement, weapons and fire-rate gating

use glam::Vec2;

use super::state::{Bullet, BulletOwner};
use super::tick::TickInput;
use super::turret::Turret;
use crate::Rect;
use crate::consts::*;
use crate::tuning::Tuning;

/// Weapon the ship is wielding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Weapon {
    Pistol,
    Smg,
    Shotgun,
    /// Deploys an auto-targeting turret instead of firing
    Turret,
}

impl Weapon {
    pub fn as_str(&self) -> &'static str {
        match self {
            Weapon::Pistol => "Pistol",
            Weapon::Smg => "SMG",
            Weapon::Shotgun => "Shotgun",
            Weapon::Turret => "Turret Cannon",
        }
    }

    /// Damage per bullet before the player's modifier
    pub fn base_damage(&self) -> f32 {
        match self {
            Weapon::Pistol => 1.0,
            Weapon::Smg => 0.25,
            Weapon::Shotgun => 0.5,
            Weapon::Turret => 0.0,
        }
    }

    /// Seconds the ship must wait after using this weapon
    pub fn cooldown(&self, tuning: &Tuning) -> f32 {
        match self {
            Weapon::Pistol => tuning.pistol_cooldown,
            Weapon::Smg => tuning.smg_cooldown,
            Weapon::Shotgun => tuning.shotgun_cooldown,
            Weapon::Turret => tuning.turret_deploy_cooldown,
        }
    }

    /// Keeps firing while the button is held
    pub fn is_automatic(&self) -> bool {
        matches!(self, Weapon::Smg)
    }
}

/// What a successful trigger pull produced
#[derive(Debug, Clone, PartialEq)]
pub enum FireOutcome {
    /// Bullets were added to the player's collection
    Shot { bullets: usize },
    /// A turret was placed at the target position
    Deployed(Turret),
}

/// The player's ship
#[derive(Debug, Clone)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Current horizontal velocity (pixels/second)
    pub speed: f32,
    pub lives: u8,
    pub weapon: Weapon,
    /// Multiplier on bullet damage (1.0 = neutral)
    pub damage_modifier: f32,
    /// Seconds until a gun can fire again (0 = ready)
    pub fire_cooldown: f32,
    /// Seconds until another turret can be deployed
    pub deploy_cooldown: f32,
    /// Bullets in flight
    pub bullets: Vec<Bullet>,
}

impl Player {
    /// Centered near the bottom of the playfield
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(
                width / 2.0 - PLAYER_WIDTH / 2.0,
                height - PLAYER_HEIGHT - PLAYER_BOTTOM_MARGIN,
            ),
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            speed: 0.0,
            lives: PLAYER_START_LIVES,
            weapon: Weapon::Pistol,
            damage_modifier: 1.0,
            fire_cooldown: 0.0,
            deploy_cooldown: 0.0,
            bullets: Vec::new(),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    /// False while the current weapon's cooldown is running
    pub fn is_ready(&self) -> bool {
        match self.weapon {
            Weapon::Turret => self.deploy_cooldown <= 0.0,
            _ => self.fire_cooldown <= 0.0,
        }
    }

    pub fn move_left(&mut self, max_speed: f32) {
        self.speed = -max_speed;
    }

    pub fn move_right(&mut self, max_speed: f32) {
        self.speed = max_speed;
    }

    pub fn stop(&mut self) {
        self.speed = 0.0;
    }

    /// Change weapon; the damage modifier only carries over if the type is unchanged
    pub fn switch_weapon(&mut self, weapon: Weapon) {
        if weapon != self.weapon {
            self.weapon = weapon;
            self.reset_damage_modifier();
        }
    }

    pub fn reset_damage_modifier(&mut self) {
        self.damage_modifier = 1.0;
    }

    /// Additive damage bonus (0.05 = +5%)
    pub fn apply_damage_modifier(&mut self, bonus: f32) {
        self.damage_modifier += bonus;
    }

    pub fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
    }

    /// Pull the trigger. Returns None when on cooldown, or when the turret
    /// has nowhere to go.
    pub fn fire(&mut self, target: Option<Vec2>, tuning: &Tuning) -> Option<FireOutcome> {
        if !self.is_ready() {
            return None;
        }

        let origin = Vec2::new(self.pos.x + self.size.x / 2.0 - 2.0, self.pos.y);
        let up = -tuning.player_bullet_speed;
        let damage = self.weapon.base_damage() * self.damage_modifier;

        let outcome = match self.weapon {
            Weapon::Pistol | Weapon::Smg => {
                self.bullets.push(Bullet::new(
                    origin,
                    Vec2::new(0.0, up),
                    damage,
                    BulletOwner::Player,
                ));
                FireOutcome::Shot { bullets: 1 }
            }
            Weapon::Shotgun => {
                let spread = tuning.shotgun_spread_speed;
                for vx in [-spread, 0.0, spread] {
                    self.bullets.push(Bullet::new(
                        origin,
                        Vec2::new(vx, up),
                        damage,
                        BulletOwner::Player,
                    ));
                }
                FireOutcome::Shot { bullets: 3 }
            }
            Weapon::Turret => FireOutcome::Deployed(Turret::new(target?, tuning)),
        };

        let cooldown = self.weapon.cooldown(tuning);
        match self.weapon {
            Weapon::Turret => self.deploy_cooldown = cooldown,
            _ => self.fire_cooldown = cooldown,
        }
        Some(outcome)
    }

    /// Advance one tick: cooldown, trigger, movement, bullets.
    /// A deployed turret is handed back to the caller.
    pub fn update(
        &mut self,
        dt: f32,
        input: &TickInput,
        width: f32,
        tuning: &Tuning,
    ) -> Option<FireOutcome> {
        self.fire_cooldown = (self.fire_cooldown - dt).max(0.0);
        self.deploy_cooldown = (self.deploy_cooldown - dt).max(0.0);

        let trigger = input.fire_pressed || (self.weapon.is_automatic() && input.fire_held);
        let outcome = if trigger {
            self.fire(input.click, tuning)
        } else {
            None
        };

        // Left wins when both keys are held
        if input.move_left {
            self.move_left(tuning.player_max_speed);
        } else if input.move_right {
            self.move_right(tuning.player_max_speed);
        } else {
            self.stop();
        }
        self.pos.x = (self.pos.x + self.speed * dt).clamp(0.0, (width - self.size.x).max(0.0));

        for bullet in &mut self.bullets {
            bullet.update(dt);
        }
        self.bullets
            .retain(|b| !b.above() && !b.off_horizontal(width));

        outcome
    }
}
