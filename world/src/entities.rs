//! Entity store holding every live enemy, projectile, and pickup.

use std::{
    collections::{BTreeMap, BTreeSet},
    time::Duration,
};

use arena_survivor_core::{
    EnemyColor, EnemyId, EnemyKind, EnemySnapshot, PickupId, PickupSnapshot, ProjectileId,
    ProjectileKind, ProjectileSnapshot, ShotKind, ShotSpec, Vec2,
};

const BULLET_RADIUS: f32 = 5.0;
const BURST_RADIUS: f32 = 4.0;
const BEAM_RADIUS: f32 = 8.0;
pub(crate) const PULSE_INITIAL_RADIUS: f32 = 10.0;
pub(crate) const PICKUP_RADIUS: f32 = 8.0;

#[derive(Clone, Debug)]
pub(crate) struct Enemy {
    pub(crate) id: EnemyId,
    pub(crate) kind: EnemyKind,
    pub(crate) position: Vec2,
    pub(crate) velocity: Vec2,
    pub(crate) facing: f32,
    pub(crate) hp: f32,
    pub(crate) max_hp: f32,
    pub(crate) speed: f32,
    pub(crate) radius: f32,
    pub(crate) color: EnemyColor,
}

impl Enemy {
    pub(crate) fn snapshot(&self) -> EnemySnapshot {
        EnemySnapshot {
            id: self.id,
            kind: self.kind,
            position: self.position,
            velocity: self.velocity,
            facing: self.facing,
            hp: self.hp,
            max_hp: self.max_hp,
            speed: self.speed,
            radius: self.radius,
            color: self.color,
        }
    }
}

/// Variant-specific projectile state; only the fields a variant needs exist.
#[derive(Clone, Debug)]
pub(crate) enum ProjectileVariant {
    Bullet,
    Burst,
    Beam { penetration: u32 },
    AreaPulse(AreaPulse),
}

#[derive(Clone, Debug)]
pub(crate) struct AreaPulse {
    /// Enemies already damaged by this pulse; only ever grows.
    pub(crate) hit_set: BTreeSet<EnemyId>,
    pub(crate) lifetime: Duration,
    pub(crate) final_radius: f32,
}

#[derive(Clone, Debug)]
pub(crate) struct Projectile {
    pub(crate) id: ProjectileId,
    pub(crate) position: Vec2,
    pub(crate) velocity: Vec2,
    pub(crate) damage: f32,
    pub(crate) ttl: Duration,
    pub(crate) variant: ProjectileVariant,
}

impl Projectile {
    fn from_shot(id: ProjectileId, shot: &ShotSpec) -> Self {
        let variant = match shot.kind {
            ShotKind::Bullet => ProjectileVariant::Bullet,
            ShotKind::Burst => ProjectileVariant::Burst,
            ShotKind::Beam { penetration } => ProjectileVariant::Beam { penetration },
            ShotKind::AreaPulse { final_radius } => ProjectileVariant::AreaPulse(AreaPulse {
                hit_set: BTreeSet::new(),
                lifetime: shot.lifetime,
                final_radius,
            }),
        };

        Self {
            id,
            position: shot.origin,
            velocity: shot.velocity,
            damage: shot.damage,
            ttl: shot.lifetime,
            variant,
        }
    }

    pub(crate) fn kind(&self) -> ProjectileKind {
        match self.variant {
            ProjectileVariant::Bullet => ProjectileKind::Bullet,
            ProjectileVariant::Burst => ProjectileKind::Burst,
            ProjectileVariant::Beam { .. } => ProjectileKind::Beam,
            ProjectileVariant::AreaPulse(_) => ProjectileKind::AreaPulse,
        }
    }

    /// Collision radius; area pulses expand linearly over their lifetime.
    pub(crate) fn radius(&self) -> f32 {
        match &self.variant {
            ProjectileVariant::Bullet => BULLET_RADIUS,
            ProjectileVariant::Burst => BURST_RADIUS,
            ProjectileVariant::Beam { .. } => BEAM_RADIUS,
            ProjectileVariant::AreaPulse(pulse) => {
                if pulse.lifetime.is_zero() {
                    return pulse.final_radius;
                }
                let age = pulse.lifetime.saturating_sub(self.ttl);
                let progress = (age.as_secs_f32() / pulse.lifetime.as_secs_f32()).clamp(0.0, 1.0);
                PULSE_INITIAL_RADIUS + (pulse.final_radius - PULSE_INITIAL_RADIUS) * progress
            }
        }
    }

    pub(crate) fn snapshot(&self) -> ProjectileSnapshot {
        ProjectileSnapshot {
            id: self.id,
            kind: self.kind(),
            position: self.position,
            velocity: self.velocity,
            damage: self.damage,
            radius: self.radius(),
            ttl: self.ttl,
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Pickup {
    pub(crate) id: PickupId,
    pub(crate) position: Vec2,
    pub(crate) xp_value: u32,
}

impl Pickup {
    pub(crate) fn snapshot(&self) -> PickupSnapshot {
        PickupSnapshot {
            id: self.id,
            position: self.position,
            radius: PICKUP_RADIUS,
            xp_value: self.xp_value,
        }
    }
}

/// Registry of live entities with monotonically allocated identifiers.
///
/// Removal from the store is the only representation of death, so a record
/// that is gone can never be killed, hit, or collected twice.
#[derive(Debug)]
pub(crate) struct EntityStore {
    pub(crate) enemies: BTreeMap<EnemyId, Enemy>,
    pub(crate) projectiles: BTreeMap<ProjectileId, Projectile>,
    pub(crate) pickups: BTreeMap<PickupId, Pickup>,
    next_enemy_id: EnemyId,
    next_projectile_id: ProjectileId,
    next_pickup_id: PickupId,
}

impl EntityStore {
    pub(crate) fn new() -> Self {
        Self {
            enemies: BTreeMap::new(),
            projectiles: BTreeMap::new(),
            pickups: BTreeMap::new(),
            next_enemy_id: EnemyId::new(0),
            next_projectile_id: ProjectileId::new(0),
            next_pickup_id: PickupId::new(0),
        }
    }

    pub(crate) fn insert_enemy(&mut self, kind: EnemyKind, position: Vec2, hp: f32) -> EnemyId {
        let id = self.next_enemy_id;
        self.next_enemy_id = EnemyId::new(id.get().saturating_add(1));
        let _ = self.enemies.insert(
            id,
            Enemy {
                id,
                kind,
                position,
                velocity: Vec2::ZERO,
                facing: 0.0,
                hp,
                max_hp: hp,
                speed: kind.speed(),
                radius: kind.radius(),
                color: kind.color(),
            },
        );
        id
    }

    pub(crate) fn insert_projectile(&mut self, shot: &ShotSpec) -> ProjectileId {
        let id = self.next_projectile_id;
        self.next_projectile_id = ProjectileId::new(id.get().saturating_add(1));
        let _ = self
            .projectiles
            .insert(id, Projectile::from_shot(id, shot));
        id
    }

    pub(crate) fn insert_pickup(&mut self, position: Vec2, xp_value: u32) -> PickupId {
        let id = self.next_pickup_id;
        self.next_pickup_id = PickupId::new(id.get().saturating_add(1));
        let _ = self.pickups.insert(
            id,
            Pickup {
                id,
                position,
                xp_value,
            },
        );
        id
    }

    /// Ages every projectile by `dt` and removes the ones whose lifetime ran out.
    pub(crate) fn expire_projectiles(&mut self, dt: Duration, expired: &mut Vec<ProjectileId>) {
        for projectile in self.projectiles.values_mut() {
            projectile.ttl = projectile.ttl.saturating_sub(dt);
            if projectile.ttl.is_zero() {
                expired.push(projectile.id);
            }
        }

        for id in expired.iter() {
            let _ = self.projectiles.remove(id);
        }
    }
}
