//! Deployable auto-turret: nearest-enemy targeting with ballistic lead

use glam::Vec2;

use super::enemy::Enemy;
use super::state::{Bullet, BulletOwner};
use crate::consts::TURRET_RADIUS;
use crate::tuning::Tuning;

/// Below this fraction of `s²`, |a| is treated as zero and the intercept
/// quadratic solved as linear. f32 cannot resolve `|v|² − s²` much finer.
const LINEAR_TOLERANCE: f32 = 1e-4;

/// A turret fixed at its deploy point. Never expires; cleared with the level.
#[derive(Debug, Clone, PartialEq)]
pub struct Turret {
    /// Center
    pub pos: Vec2,
    pub radius: f32,
    /// Seconds until the next shot is allowed
    pub shoot_timer: f32,
    pub shoot_cooldown: f32,
    pub bullet_speed: f32,
    pub bullet_damage: f32,
}

impl Turret {
    /// New turrets wait one full cooldown before the first shot
    pub fn new(pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            pos,
            radius: TURRET_RADIUS,
            shoot_timer: tuning.turret_fire_cooldown,
            shoot_cooldown: tuning.turret_fire_cooldown,
            bullet_speed: tuning.turret_bullet_speed,
            bullet_damage: tuning.turret_bullet_damage,
        }
    }

    /// Closest enemy by squared distance to its center; ties keep the first
    pub fn find_target<'a>(&self, enemies: &'a [Enemy]) -> Option<&'a Enemy> {
        let mut best: Option<(&Enemy, f32)> = None;
        for enemy in enemies {
            let dist_sq = enemy.center().distance_squared(self.pos);
            if best.is_none_or(|(_, min)| dist_sq < min) {
                best = Some((enemy, dist_sq));
            }
        }
        best.map(|(enemy, _)| enemy)
    }

    /// Bullet velocity that leads `target`, or aims straight at it when no
    /// intercept exists. None when the target sits exactly on the turret.
    pub fn aim(&self, target: &Enemy) -> Option<Vec2> {
        let center = target.center();
        let aim_point = intercept_point(self.pos, center, target.vel, self.bullet_speed)
            .unwrap_or(center);
        let dir = aim_point - self.pos;
        if dir.length_squared() == 0.0 {
            return None;
        }
        Some(dir.normalize() * self.bullet_speed)
    }

    /// Advance one tick, returning a bullet when one was fired. The cooldown
    /// only resets on an actual shot, so an empty field retries every tick.
    pub fn update(&mut self, dt: f32, enemies: &[Enemy]) -> Option<Bullet> {
        self.shoot_timer -= dt;
        if self.shoot_timer > 0.0 {
            return None;
        }

        let vel = self.find_target(enemies).and_then(|target| self.aim(target))?;
        self.shoot_timer = self.shoot_cooldown;
        Some(Bullet::new(self.pos, vel, self.bullet_damage, BulletOwner::Turret))
    }
}

/// Where a bullet fired now from `shooter` at `bullet_speed` meets a target
/// moving at constant velocity. Solves
/// `(|v|² − s²)t² + 2(d·v)t + |d|² = 0` for the smallest positive `t`.
pub fn intercept_point(
    shooter: Vec2,
    target: Vec2,
    target_vel: Vec2,
    bullet_speed: f32,
) -> Option<Vec2> {
    let offset = target - shooter;
    let a = target_vel.length_squared() - bullet_speed * bullet_speed;
    let b = 2.0 * offset.dot(target_vel);
    let c = offset.length_squared();

    let t = if a.abs() <= LINEAR_TOLERANCE * bullet_speed * bullet_speed {
        if b == 0.0 {
            return None;
        }
        -c / b
    } else {
        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }
        // Numerically stable form of the two roots
        let q = -0.5 * (b + b.signum() * discriminant.sqrt());
        if q == 0.0 {
            return None;
        }
        let (t1, t2) = (q / a, c / q);
        match (t1 > 0.0, t2 > 0.0) {
            (true, true) => t1.min(t2),
            (true, false) => t1,
            (false, true) => t2,
            (false, false) => return None,
        }
    };
    if t.is_nan() || t <= 0.0 {
        return None;
    }

    Some(target + target_vel * t)
}
