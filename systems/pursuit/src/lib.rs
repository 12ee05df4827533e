#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure pursuit steering that points every enemy straight at the player.

use arena_survivor_core::{Command, EnemySnapshot, EnemyView, Event, Vec2};

/// Pure system that reacts to elapsed time by steering enemies.
#[derive(Debug, Default)]
pub struct Pursuit;

impl Pursuit {
    /// Emits one steering command per live enemy whenever time advanced.
    ///
    /// Enemies keep their previous velocity when no player exists.
    pub fn handle(
        &mut self,
        events: &[Event],
        enemies: &EnemyView,
        player: Option<Vec2>,
        out: &mut Vec<Command>,
    ) {
        if !events
            .iter()
            .any(|event| matches!(event, Event::TimeAdvanced { .. }))
        {
            return;
        }

        let Some(target) = player else {
            return;
        };

        for enemy in enemies.iter() {
            let (velocity, facing) = steer(enemy, target);
            out.push(Command::SteerEnemy {
                enemy: enemy.id,
                velocity,
                facing,
            });
        }
    }
}

/// Velocity and facing that move `enemy` directly towards `target` at its own speed.
///
/// An enemy already standing on the target stops but keeps its facing.
#[must_use]
pub fn steer(enemy: &EnemySnapshot, target: Vec2) -> (Vec2, f32) {
    let offset = target - enemy.position;
    if offset.length_squared() <= f32::EPSILON {
        return (Vec2::ZERO, enemy.facing);
    }
    (offset.normalize() * enemy.speed, offset.y.atan2(offset.x))
}

#[cfg(test)]
mod tests {
    use std::{f32::consts::FRAC_PI_2, time::Duration};

    use arena_survivor_core::{EnemyId, EnemyKind};

    use super::*;

    fn enemy(id: u32, kind: EnemyKind, position: Vec2) -> EnemySnapshot {
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

    fn tick() -> Event {
        Event::TimeAdvanced {
            dt: Duration::from_millis(16),
        }
    }

    #[test]
    fn enemies_head_for_the_player_at_their_own_speed() {
        let view = EnemyView::from_snapshots(vec![
            enemy(1, EnemyKind::Tank, Vec2::new(100.0, 500.0)),
            enemy(0, EnemyKind::Normal, Vec2::new(500.0, 100.0)),
        ]);
        let mut commands = Vec::new();
        Pursuit.handle(&[tick()], &view, Some(Vec2::new(500.0, 500.0)), &mut commands);

        assert_eq!(
            commands,
            vec![
                Command::SteerEnemy {
                    enemy: EnemyId::new(0),
                    velocity: Vec2::new(0.0, 180.0),
                    facing: FRAC_PI_2,
                },
                Command::SteerEnemy {
                    enemy: EnemyId::new(1),
                    velocity: Vec2::new(80.0, 0.0),
                    facing: 0.0,
                },
            ]
        );
    }

    #[test]
    fn diagonal_pursuit_keeps_speed() {
        let snapshot = enemy(0, EnemyKind::Charger, Vec2::ZERO);
        let (velocity, _) = steer(&snapshot, Vec2::new(300.0, 300.0));
        assert!((velocity.length() - 300.0).abs() < 1e-3);
    }

    #[test]
    fn idle_without_elapsed_time_or_player() {
        let view = EnemyView::from_snapshots(vec![enemy(0, EnemyKind::Normal, Vec2::ZERO)]);
        let mut commands = Vec::new();
        Pursuit.handle(&[Event::Paused], &view, Some(Vec2::ONE), &mut commands);
        Pursuit.handle(&[tick()], &view, None, &mut commands);
        assert!(commands.is_empty());
    }
}
