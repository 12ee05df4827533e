//! Combat resolution for overlaps reported by the collision provider.
//!
//! Every resolver is idempotent with respect to entities that already left the
//! store: a hit against a dead enemy, a hit from a consumed projectile, or a
//! second contact with a removed enemy is skipped without side effects.

use arena_survivor_core::{EnemyId, Event, ProjectileId};
use rand::Rng;
use tracing::trace;

use crate::{entities::ProjectileVariant, World};

/// Outcome of rolling the damage for a single hit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DamageRoll {
    /// Damage dealt after applying the critical multiplier.
    pub amount: f32,
    /// Whether the roll was critical.
    pub critical: bool,
}

/// Rolls the damage of one hit.
///
/// A chance of `0.0` never crits and `1.0` always does; values outside that
/// range behave like the nearest bound.
pub fn roll_damage<R>(base: f32, crit_chance: f64, crit_multiplier: f32, rng: &mut R) -> DamageRoll
where
    R: Rng + ?Sized,
{
    let critical = rng.gen::<f64>() < crit_chance;
    let amount = if critical {
        base * crit_multiplier
    } else {
        base
    };
    DamageRoll { amount, critical }
}

pub(crate) fn resolve_projectile_hit(
    world: &mut World,
    projectile_id: ProjectileId,
    enemy_id: EnemyId,
    out_events: &mut Vec<Event>,
) {
    let World {
        store,
        progression,
        combat_rng,
        config,
        kill_count,
        ..
    } = world;

    let Some(enemy) = store.enemies.get_mut(&enemy_id) else {
        trace!(enemy = enemy_id.get(), "hit on dead enemy skipped");
        return;
    };
    let Some(projectile) = store.projectiles.get_mut(&projectile_id) else {
        trace!(projectile = projectile_id.get(), "hit from consumed projectile skipped");
        return;
    };

    if let ProjectileVariant::AreaPulse(pulse) = &projectile.variant {
        if pulse.hit_set.contains(&enemy_id) {
            return;
        }
    }

    let base = if projectile.damage > 0.0 {
        projectile.damage
    } else {
        progression.stats().damage
    };
    let roll = roll_damage(base, config.crit_chance, config.crit_multiplier, combat_rng);

    let consumed = match &mut projectile.variant {
        ProjectileVariant::AreaPulse(pulse) => {
            let _ = pulse.hit_set.insert(enemy_id);
            false
        }
        ProjectileVariant::Beam { penetration } => {
            *penetration = penetration.saturating_sub(1);
            *penetration == 0
        }
        ProjectileVariant::Bullet | ProjectileVariant::Burst => true,
    };

    enemy.hp -= roll.amount;
    let remaining_hp = enemy.hp;
    let position = enemy.position;
    let kind = enemy.kind;

    trace!(
        enemy = enemy_id.get(),
        projectile = projectile_id.get(),
        damage = roll.amount,
        critical = roll.critical,
        remaining_hp,
        "enemy hit"
    );
    out_events.push(Event::EnemyHit {
        enemy: enemy_id,
        projectile: projectile_id,
        damage: roll.amount,
        critical: roll.critical,
        remaining_hp,
    });

    if consumed {
        let _ = store.projectiles.remove(&projectile_id);
        out_events.push(Event::ProjectileDestroyed {
            projectile: projectile_id,
        });
    }

    if remaining_hp <= 0.0 {
        let _ = store.enemies.remove(&enemy_id);
        *kill_count = kill_count.saturating_add(1);
        let pickup = store.insert_pickup(position, config.xp_per_pickup);
        out_events.push(Event::EnemyKilled {
            enemy: enemy_id,
            kind,
            position,
        });
        out_events.push(Event::PickupSpawned { pickup, position });
    }
}

pub(crate) fn resolve_player_contact(
    world: &mut World,
    enemy_id: EnemyId,
    out_events: &mut Vec<Event>,
) {
    if world.store.enemies.remove(&enemy_id).is_none() {
        return;
    }
    out_events.push(Event::EnemyDespawned { enemy: enemy_id });

    let damage = world.config.contact_damage;
    let health = world.progression.take_damage(damage);
    out_events.push(Event::PlayerHurt { damage, health });

    if health <= 0.0 {
        world.enter_game_over(out_events);
    }
}
