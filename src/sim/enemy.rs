//! Enemy behavior state machine
//!
//! Entering -> Idle -> Attacking -> Returning -> Idle, until destroyed.
//! Every moving state heads for a point at a fixed speed and snaps once the
//! point is reachable within the current tick, so frame-rate jitter never
//! causes overshoot.

use glam::Vec2;

use super::state::{Bullet, BulletOwner};
use crate::Rect;
use crate::consts::*;

/// Enemy color variant (determines toughness)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyVariant {
    /// 1 hp
    Purple,
    /// 2 hp
    Teal,
}

impl EnemyVariant {
    pub fn max_health(&self) -> f32 {
        match self {
            EnemyVariant::Purple => 1.0,
            EnemyVariant::Teal => 2.0,
        }
    }

    /// Alternates per formation row
    pub fn for_row(row: usize) -> Self {
        if row.is_multiple_of(2) {
            EnemyVariant::Purple
        } else {
            EnemyVariant::Teal
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyState {
    /// Flying in from the spawn point to the formation slot
    Entering,
    /// Parked in formation
    Idle,
    /// Diving toward the player
    Attacking,
    /// Flying back to the formation slot
    Returning,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    /// Top-left corner
    pub pos: Vec2,
    /// Formation slot
    pub formation: Vec2,
    /// Where the enemy appeared
    pub spawn: Vec2,
    pub size: Vec2,
    pub variant: EnemyVariant,
    pub health: f32,
    pub state: EnemyState,
    /// Velocity applied this tick (pixels/second)
    pub vel: Vec2,
    /// Where the current dive ends
    pub dive_target: Vec2,
    /// Armed at dive start, spent when the dive shot is fired
    pub may_fire: bool,
}

impl Enemy {
    pub fn new(spawn: Vec2, formation: Vec2, variant: EnemyVariant) -> Self {
        Self {
            pos: spawn,
            formation,
            spawn,
            size: Vec2::new(ENEMY_WIDTH, ENEMY_HEIGHT),
            variant,
            health: variant.max_health(),
            state: EnemyState::Entering,
            vel: Vec2::ZERO,
            dive_target: Vec2::ZERO,
            may_fire: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    /// Begin a dive toward the player's last x, halfway down the screen.
    /// Only idle enemies accept the command.
    pub fn start_attack(&mut self, player_x: f32, playfield_height: f32) -> bool {
        if self.state != EnemyState::Idle {
            return false;
        }
        self.state = EnemyState::Attacking;
        self.dive_target = Vec2::new(player_x, playfield_height / 2.0);
        self.may_fire = true;
        true
    }

    /// Far enough outside the playfield to be considered lost
    pub fn is_stray(&self, width: f32, height: f32) -> bool {
        self.pos.x < -STRAY_MARGIN
            || self.pos.x > width + STRAY_MARGIN
            || self.pos.y < -STRAY_MARGIN
            || self.pos.y > height + STRAY_MARGIN
    }

    /// Head for `target`. Returns true (and leaves velocity at zero) when the
    /// target is reachable within `dt`.
    fn steer(&mut self, target: Vec2, dt: f32, speed: f32) -> bool {
        let delta = target - self.pos;
        let distance = delta.length();
        if distance <= f32::EPSILON || distance / speed < dt {
            self.vel = Vec2::ZERO;
            return true;
        }
        self.vel = delta / distance * speed;
        false
    }

    /// Bullet dropped at the end of a dive
    fn dive_shot(&self, bullet_speed: f32) -> Bullet {
        Bullet::new(
            Vec2::new(self.pos.x + self.size.x / 2.0 - 2.0, self.pos.y + self.size.y),
            Vec2::new(0.0, bullet_speed),
            1.0,
            BulletOwner::Enemy,
        )
    }

    /// Advance one tick. Returns the bullet fired at the bottom of a dive.
    pub fn update(&mut self, dt: f32, speed: f32, bullet_speed: f32) -> Option<Bullet> {
        let mut shot = None;

        match self.state {
            EnemyState::Entering | EnemyState::Returning => {
                if self.steer(self.formation, dt, speed) {
                    self.pos = self.formation;
                    self.state = EnemyState::Idle;
                }
            }
            EnemyState::Idle => {
                self.vel = Vec2::ZERO;
            }
            EnemyState::Attacking => {
                if self.steer(self.dive_target, dt, speed) {
                    if self.may_fire {
                        shot = Some(self.dive_shot(bullet_speed));
                        self.may_fire = false;
                    }
                    self.state = EnemyState::Returning;
                }
            }
        }

        self.pos += self.vel * dt;
        shot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;
    const SPEED: f32 = 180.0;

    fn idle_enemy_at(pos: Vec2) -> Enemy {
        let mut enemy = Enemy::new(pos, pos, EnemyVariant::Purple);
        enemy.state = EnemyState::Idle;
        enemy
    }

    #[test]
    fn test_variant_health() {
        assert_eq!(Enemy::new(Vec2::ZERO, Vec2::ZERO, EnemyVariant::Purple).health, 1.0);
        assert_eq!(Enemy::new(Vec2::ZERO, Vec2::ZERO, EnemyVariant::Teal).health, 2.0);
        assert_eq!(EnemyVariant::for_row(0), EnemyVariant::Purple);
        assert_eq!(EnemyVariant::for_row(1), EnemyVariant::Teal);
    }

    #[test]
    fn test_entering_snaps_to_formation() {
        let formation = Vec2::new(300.0, 100.0);
        let mut enemy = Enemy::new(Vec2::new(-50.0, -50.0), formation, EnemyVariant::Teal);

        let mut ticks = 0;
        while enemy.state == EnemyState::Entering {
            enemy.update(DT, SPEED, 300.0);
            ticks += 1;
            assert!(ticks < 1000, "enemy never arrived");
        }

        assert_eq!(enemy.state, EnemyState::Idle);
        assert_eq!(enemy.pos, formation);
        assert_eq!(enemy.vel, Vec2::ZERO);
    }

    #[test]
    fn test_entering_moves_at_fixed_speed() {
        let mut enemy = Enemy::new(Vec2::ZERO, Vec2::new(1000.0, 0.0), EnemyVariant::Purple);
        enemy.update(0.5, SPEED, 300.0);
        assert!((enemy.pos.x - 90.0).abs() < 1e-3);
        assert!((enemy.vel.length() - SPEED).abs() < 1e-3);
    }

    #[test]
    fn test_large_step_does_not_overshoot() {
        let formation = Vec2::new(10.0, 0.0);
        let mut enemy = Enemy::new(Vec2::ZERO, formation, EnemyVariant::Purple);
        enemy.update(1.0, SPEED, 300.0);
        assert_eq!(enemy.pos, formation);
        assert_eq!(enemy.state, EnemyState::Idle);
    }

    #[test]
    fn test_start_attack_only_from_idle() {
        let mut entering = Enemy::new(Vec2::ZERO, Vec2::new(100.0, 100.0), EnemyVariant::Purple);
        assert!(!entering.start_attack(50.0, 600.0));
        assert_eq!(entering.state, EnemyState::Entering);

        let mut idle = idle_enemy_at(Vec2::new(100.0, 100.0));
        assert!(idle.start_attack(250.0, 600.0));
        assert_eq!(idle.state, EnemyState::Attacking);
        assert_eq!(idle.dive_target, Vec2::new(250.0, 300.0));
        assert!(idle.may_fire);
    }

    #[test]
    fn test_full_dive_cycle_fires_once() {
        let home = Vec2::new(100.0, 100.0);
        let mut enemy = idle_enemy_at(home);
        enemy.start_attack(300.0, 600.0);

        let mut shots = Vec::new();
        let mut saw_returning = false;
        for _ in 0..1000 {
            if let Some(b) = enemy.update(DT, SPEED, 300.0) {
                shots.push(b);
            }
            saw_returning |= enemy.state == EnemyState::Returning;
            if saw_returning && enemy.state == EnemyState::Idle {
                break;
            }
        }

        assert!(saw_returning);
        assert_eq!(enemy.state, EnemyState::Idle);
        assert_eq!(enemy.pos, home);
        assert_eq!(shots.len(), 1);
        assert!(!enemy.may_fire);

        let shot = &shots[0];
        assert_eq!(shot.owner, BulletOwner::Enemy);
        assert_eq!(shot.vel, Vec2::new(0.0, 300.0));
        assert_eq!(shot.damage, 1.0);
    }

    #[test]
    fn test_idle_has_zero_velocity() {
        let mut enemy = idle_enemy_at(Vec2::new(40.0, 40.0));
        enemy.vel = Vec2::new(5.0, 5.0);
        enemy.update(DT, SPEED, 300.0);
        assert_eq!(enemy.vel, Vec2::ZERO);
        assert_eq!(enemy.pos, Vec2::new(40.0, 40.0));
    }

    #[test]
    fn test_stray_detection() {
        let enemy = idle_enemy_at(Vec2::new(-201.0, 10.0));
        assert!(enemy.is_stray(800.0, 600.0));
        let enemy = idle_enemy_at(Vec2::new(-199.0, -199.0));
        assert!(!enemy.is_stray(800.0, 600.0));
        let enemy = idle_enemy_at(Vec2::new(100.0, 801.0));
        assert!(enemy.is_stray(800.0, 600.0));
    }
}
