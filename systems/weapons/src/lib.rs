#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Autofire weapon system that assembles one volley per autofire firing.
//!
//! A volley is built in a fixed order: area pulse, radial burst, primary
//! bullets, then the piercing beam. Nothing fires while the arena holds no
//! enemies.

use std::{f32::consts::TAU, time::Duration};

use arena_survivor_core::{
    Command, EnemySnapshot, EnemyView, Event, PlayerStats, ShotKind, ShotSpec, TimerId, Vec2,
};

const BULLET_SPEED: f32 = 600.0;
const BULLET_LIFETIME: Duration = Duration::from_secs(2);
const SINGLE_SHOT_OFFSETS: [f32; 1] = [0.0];
const DOUBLE_SHOT_OFFSETS: [f32; 2] = [-0.1, 0.1];

const BURST_SPEED: f32 = 400.0;
const BURST_LIFETIME: Duration = Duration::from_secs(1);
const BURST_BASE_COUNT: u32 = 4;
const BURST_COUNT_PER_LEVEL: u32 = 2;
const BURST_DAMAGE_FACTOR: f32 = 0.8;

const BEAM_SPEED: f32 = 800.0;
const BEAM_LIFETIME: Duration = Duration::from_secs(1);
const BEAM_BASE_PENETRATION: u32 = 2;
const BEAM_DAMAGE_FACTOR: f32 = 1.5;

const PULSE_LIFETIME: Duration = Duration::from_millis(500);
const PULSE_BASE_RADIUS: f32 = 10.0;
const PULSE_BASE_SCALE: f32 = 10.0;
const PULSE_SCALE_PER_LEVEL: f32 = 2.0;
const PULSE_DAMAGE_FACTOR: f32 = 0.5;

/// Pure system that fires a volley for every autofire firing.
#[derive(Debug, Default)]
pub struct Weapons;

impl Weapons {
    /// Consumes world events and emits one volley command per autofire firing.
    pub fn handle(
        &mut self,
        events: &[Event],
        origin: Option<Vec2>,
        enemies: &EnemyView,
        stats: &PlayerStats,
        out: &mut Vec<Command>,
    ) {
        let Some(origin) = origin else {
            return;
        };

        for event in events {
            if !matches!(
                event,
                Event::TimerFired {
                    timer: TimerId::Autofire
                }
            ) {
                continue;
            }

            let shots = volley(origin, stats, enemies);
            if !shots.is_empty() {
                out.push(Command::FireVolley { shots });
            }
        }
    }
}

/// Assembles every shot fired from `origin` during one autofire tick.
#[must_use]
pub fn volley(origin: Vec2, stats: &PlayerStats, enemies: &EnemyView) -> Vec<ShotSpec> {
    let Some(target) = nearest_enemy(origin, enemies) else {
        return Vec::new();
    };

    let mut shots = Vec::new();

    if stats.circular_level > 0 {
        shots.push(ShotSpec {
            kind: ShotKind::AreaPulse {
                final_radius: pulse_radius(stats.circular_level),
            },
            origin,
            velocity: Vec2::ZERO,
            damage: stats.damage * PULSE_DAMAGE_FACTOR,
            lifetime: PULSE_LIFETIME,
        });
    }

    if stats.burst_level > 0 {
        let count = burst_count(stats.burst_level);
        for index in 0..count {
            let angle = TAU * index as f32 / count as f32;
            shots.push(ShotSpec {
                kind: ShotKind::Burst,
                origin,
                velocity: heading(angle) * BURST_SPEED,
                damage: stats.damage * BURST_DAMAGE_FACTOR,
                lifetime: BURST_LIFETIME,
            });
        }
    }

    let aim = angle_to(origin, target.position);
    let offsets: &[f32] = if stats.weapon_level == 0 {
        &SINGLE_SHOT_OFFSETS
    } else {
        &DOUBLE_SHOT_OFFSETS
    };
    for offset in offsets {
        shots.push(ShotSpec {
            kind: ShotKind::Bullet,
            origin,
            velocity: heading(aim + offset) * BULLET_SPEED,
            damage: stats.damage,
            lifetime: BULLET_LIFETIME,
        });
    }

    if stats.beam_level > 0 {
        shots.push(ShotSpec {
            kind: ShotKind::Beam {
                penetration: BEAM_BASE_PENETRATION.saturating_add(stats.beam_level),
            },
            origin,
            velocity: heading(aim) * BEAM_SPEED,
            damage: stats.damage * BEAM_DAMAGE_FACTOR,
            lifetime: BEAM_LIFETIME,
        });
    }

    shots
}

/// Finds the enemy closest to `origin`; the earliest spawned enemy wins ties.
#[must_use]
pub fn nearest_enemy(origin: Vec2, enemies: &EnemyView) -> Option<&EnemySnapshot> {
    let mut best: Option<(&EnemySnapshot, f32)> = None;
    for enemy in enemies.iter() {
        let distance_sq = origin.distance_squared(enemy.position);
        match best {
            Some((_, best_distance)) if distance_sq >= best_distance => {}
            _ => best = Some((enemy, distance_sq)),
        }
    }
    best.map(|(enemy, _)| enemy)
}

/// Number of radial projectiles fired by a burst of the given level.
#[must_use]
pub fn burst_count(level: u32) -> u32 {
    BURST_BASE_COUNT.saturating_add(BURST_COUNT_PER_LEVEL.saturating_mul(level))
}

/// Radius an area pulse of the given level reaches when it expires.
#[must_use]
pub fn pulse_radius(level: u32) -> f32 {
    PULSE_BASE_RADIUS * (PULSE_BASE_SCALE + PULSE_SCALE_PER_LEVEL * level as f32)
}

fn angle_to(from: Vec2, to: Vec2) -> f32 {
    let offset = to - from;
    offset.y.atan2(offset.x)
}

fn heading(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

#[cfg(test)]
mod tests {
    use arena_survivor_core::{
        EnemyId, EnemyKind,
        ProjectileKind::{AreaPulse, Beam, Bullet, Burst},
    };

    use super::*;

    fn enemy(id: u32, position: Vec2) -> EnemySnapshot {
        let kind = EnemyKind::Normal;
        EnemySnapshot {
            id: EnemyId::new(id),
            kind,
            position,
            velocity: Vec2::ZERO,
            facing: 0.0,
            hp: 10.0,
            max_hp: 10.0,
            speed: kind.speed(),
            radius: kind.radius(),
            color: kind.color(),
        }
    }

    #[test]
    fn nearest_enemy_prefers_first_on_ties() {
        let view = EnemyView::from_snapshots(vec![
            enemy(2, Vec2::new(-100.0, 0.0)),
            enemy(1, Vec2::new(100.0, 0.0)),
            enemy(3, Vec2::new(0.0, 300.0)),
        ]);
        let nearest = nearest_enemy(Vec2::ZERO, &view).map(|enemy| enemy.id);
        assert_eq!(nearest, Some(EnemyId::new(1)));
    }

    #[test]
    fn burst_and_pulse_scale_with_level() {
        assert_eq!(burst_count(1), 6);
        assert_eq!(burst_count(3), 10);
        assert_eq!(pulse_radius(1), 120.0);
    }

    #[test]
    fn no_enemies_means_no_shots_at_all() {
        let stats = PlayerStats {
            circular_level: 2,
            burst_level: 2,
            beam_level: 2,
            weapon_level: 1,
            ..PlayerStats::default()
        };
        assert!(volley(Vec2::ZERO, &stats, &EnemyView::default()).is_empty());
    }

    #[test]
    fn volley_order_and_payloads_follow_weapon_levels() {
        let stats = PlayerStats {
            circular_level: 1,
            burst_level: 1,
            beam_level: 1,
            weapon_level: 1,
            ..PlayerStats::default()
        };
        let view = EnemyView::from_snapshots(vec![enemy(0, Vec2::new(500.0, 0.0))]);
        let shots = volley(Vec2::ZERO, &stats, &view);

        let kinds: Vec<_> = shots.iter().map(|shot| shot.kind.kind()).collect();
        assert_eq!(
            kinds,
            vec![AreaPulse, Burst, Burst, Burst, Burst, Burst, Burst, Bullet, Bullet, Beam]
        );

        assert_eq!(shots[0].damage, 10.0);
        assert_eq!(shots[0].velocity, Vec2::ZERO);
        assert_eq!(shots[1].damage, 16.0);
        assert_eq!(shots[7].damage, 20.0);
        assert_eq!(shots[9].damage, 30.0);
        assert_eq!(shots[9].kind, ShotKind::Beam { penetration: 3 });
        assert!((shots[9].velocity - Vec2::new(800.0, 0.0)).length() < 1e-3);
        assert!(shots[7].velocity.y < 0.0 && shots[8].velocity.y > 0.0);
    }

    #[test]
    fn single_bullet_aims_straight_at_target() {
        let view = EnemyView::from_snapshots(vec![enemy(0, Vec2::new(0.0, 250.0))]);
        let shots = volley(Vec2::ZERO, &PlayerStats::default(), &view);
        assert_eq!(shots.len(), 1);
        assert!((shots[0].velocity - Vec2::new(0.0, 600.0)).length() < 1e-3);
        assert_eq!(shots[0].lifetime, Duration::from_secs(2));
    }

    #[test]
    fn fires_once_per_autofire_firing() {
        let view = EnemyView::from_snapshots(vec![enemy(0, Vec2::new(0.0, 250.0))]);
        let autofire = Event::TimerFired {
            timer: TimerId::Autofire,
        };
        let mut commands = Vec::new();
        Weapons.handle(
            &[
                autofire.clone(),
                Event::TimerFired {
                    timer: TimerId::Spawn,
                },
                autofire,
            ],
            Some(Vec2::ZERO),
            &view,
            &PlayerStats::default(),
            &mut commands,
        );
        assert_eq!(commands.len(), 2);
    }
}
