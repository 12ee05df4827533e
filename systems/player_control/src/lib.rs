#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Player controller translating movement intent into player velocity.
//!
//! Movement is direct: any non-idle intent moves the player at full
//! `move_speed` along `atan2` of the raw intent, so diagonals are exactly as
//! fast as straight lines. The visual heading eases towards the travel
//! direction by a fixed angular step per tick.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use arena_survivor_core::{Command, Event, MovementIntent, PlayerSnapshot, PlayerStats, Vec2};

/// Angular step the heading may rotate per tick, in radians.
pub const HEADING_STEP: f32 = 0.15;

/// Pure system that drives the player from the per-tick movement intent.
#[derive(Debug, Default)]
pub struct PlayerControl;

impl PlayerControl {
    /// Emits one drive command whenever time advanced and a player exists.
    pub fn handle(
        &mut self,
        events: &[Event],
        intent: MovementIntent,
        player: Option<&PlayerSnapshot>,
        stats: &PlayerStats,
        out: &mut Vec<Command>,
    ) {
        if !events
            .iter()
            .any(|event| matches!(event, Event::TimeAdvanced { .. }))
        {
            return;
        }
        let Some(player) = player else {
            return;
        };

        if intent.is_idle() {
            out.push(Command::DrivePlayer {
                velocity: Vec2::ZERO,
                heading: player.heading,
            });
            return;
        }

        let raw = intent.vector();
        let angle = raw.y.atan2(raw.x);
        let velocity = Vec2::new(angle.cos(), angle.sin()) * stats.move_speed;
        // Sprite art faces up, so the heading is a quarter turn ahead of travel.
        let heading = rotate_towards(player.heading, angle + FRAC_PI_2, HEADING_STEP);
        out.push(Command::DrivePlayer { velocity, heading });
    }
}

/// Rotates `current` towards `target` along the shorter arc by at most `step`.
///
/// The result is wrapped into `(-PI, PI]`.
#[must_use]
pub fn rotate_towards(current: f32, target: f32, step: f32) -> f32 {
    let delta = wrap_angle(target - current);
    if delta.abs() <= step {
        return wrap_angle(target);
    }
    wrap_angle(current + step.copysign(delta))
}

fn wrap_angle(angle: f32) -> f32 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI {
        wrapped + TAU
    } else {
        wrapped
    }
}
