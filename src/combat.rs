//! Collision and combat resolution
//!
//! The only code allowed to change enemy or player hp.

use glam::Vec2;

use crate::config::CombatRules;
use crate::entities::{Enemy, Player, Projectile};
use crate::geometry::{Field, distance};

/// Outcome of a projectile striking an enemy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Strike {
    /// Where the enemy stood when it was hit
    pub at: Vec2,
    /// Enemy hp after the hit
    pub remaining_hp: i32,
    pub killed: bool,
}

/// Hit test between a projectile and an enemy.
///
/// Only the enemy's radius counts; the projectile is treated as a point.
pub fn projectile_hits(projectile: &Projectile, enemy: &Enemy) -> bool {
    distance(projectile.pos, enemy.pos) < enemy.radius
}

pub fn enemy_touches_player(enemy: &Enemy, player: &Player) -> bool {
    distance(player.pos, enemy.pos) < player.radius + enemy.radius
}

/// How far outside the field a projectile may be before no enemy can reach it.
///
/// An enemy faster than its distance to the player overshoots past it, and a
/// player pinned to a wall lets that overshoot land up to `speed - player.radius`
/// beyond the edge. Enemies already outside only move back toward the player.
pub fn cull_margin(base: f32, field: &Field, enemies: &[Enemy], player: &Player) -> f32 {
    enemies
        .iter()
        .map(|enemy| {
            let overshoot = (enemy.speed - player.radius).max(0.0);
            enemy.radius + field.distance_outside(enemy.pos).max(overshoot)
        })
        .fold(base, f32::max)
}

/// Resolves one projectile against the enemy list.
///
/// The first enemy in list order that the projectile overlaps takes the
/// damage. A killed enemy is removed from `enemies` and its xp goes to the
/// player. Returns `None` when nothing was hit; on `Some` the caller must
/// discard the projectile.
pub fn resolve_projectile(
    projectile: &Projectile,
    enemies: &mut Vec<Enemy>,
    player: &mut Player,
    rules: &CombatRules,
) -> Option<Strike> {
    let index = enemies
        .iter()
        .position(|enemy| projectile_hits(projectile, enemy))?;

    let enemy = &mut enemies[index];
    enemy.take_damage(rules.projectile_damage);
    let strike = Strike {
        at: enemy.pos,
        remaining_hp: enemy.hp(),
        killed: !enemy.is_alive(),
    };

    if strike.killed {
        enemies.remove(index);
        player.gain_xp(rules.xp_per_kill);
    }

    Some(strike)
}

/// Applies contact damage if `enemy` overlaps the player. Returns whether it did.
pub fn resolve_contact(enemy: &Enemy, player: &mut Player, rules: &CombatRules) -> bool {
    if enemy_touches_player(enemy, player) {
        player.take_damage(rules.contact_damage);
        true
    } else {
        false
    }
}
