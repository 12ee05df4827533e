#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Circle overlap detection standing in for the physics collaborator.
//!
//! Overlaps are reported as resolver commands in a fixed order: projectile
//! hits (by projectile id, then enemy id), then player contacts (by enemy id),
//! then pickup collections (by pickup id). The world skips any report whose
//! entities disappeared while earlier reports were resolved.

use arena_survivor_core::{
    Command, EnemyView, PickupView, PlayerSnapshot, ProjectileView, Vec2,
};

/// Pure system reporting every overlap present in the latest snapshot.
#[derive(Debug, Default)]
pub struct Collision;

impl Collision {
    /// Emits resolver commands for every overlapping pair.
    pub fn handle(
        &mut self,
        player: Option<&PlayerSnapshot>,
        enemies: &EnemyView,
        projectiles: &ProjectileView,
        pickups: &PickupView,
        out: &mut Vec<Command>,
    ) {
        for projectile in projectiles.iter() {
            for enemy in enemies.iter() {
                if overlaps(projectile.position, projectile.radius, enemy.position, enemy.radius) {
                    out.push(Command::ResolveProjectileHit {
                        projectile: projectile.id,
                        enemy: enemy.id,
                    });
                }
            }
        }

        let Some(player) = player else {
            return;
        };

        for enemy in enemies.iter() {
            if overlaps(player.position, player.radius, enemy.position, enemy.radius) {
                out.push(Command::ResolvePlayerContact { enemy: enemy.id });
            }
        }

        for pickup in pickups.iter() {
            if overlaps(player.position, player.radius, pickup.position, pickup.radius) {
                out.push(Command::CollectPickup { pickup: pickup.id });
            }
        }
    }
}

/// Reports whether two circles intersect; touching edges do not count.
#[must_use]
pub fn overlaps(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> bool {
    let reach = a_radius + b_radius;
    a.distance_squared(b) < reach * reach
}
