#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Difficulty scheduling that derives enemy strength and spawn cadence from
//! elapsed session time.

use std::time::Duration;

use arena_survivor_core::{Command, EnemyKind, Event, TimerId};
use rand::Rng;

const EARLY_GAME_HP: f32 = 10.0;
const SCALING_START_SECONDS: u32 = 60;
const SECONDS_PER_MINUTE: u32 = 60;
const MINUTE_HP_BONUS: f32 = 25.0;
const LEVEL_HP_BONUS: f32 = 6.0;
const SCALED_HP_BASE: f32 = 30.0;

const CHARGER_UNLOCK_SECONDS: u32 = 120;
const CHARGER_CHANCE: f64 = 0.3;
const TANK_UNLOCK_SECONDS: u32 = 300;
const TANK_CHANCE: f64 = 0.2;

const INITIAL_SPAWN_INTERVAL_MS: u64 = 2_000;
const SPAWN_INTERVAL_STEP_MS: u64 = 200;
const MIN_SPAWN_INTERVAL_MS: u64 = 500;

/// Base hit points of an enemy spawned at `elapsed_seconds` while the player
/// is at `level`, before the kind multiplier is applied.
#[must_use]
pub fn base_hp(elapsed_seconds: u32, level: u32) -> f32 {
    if elapsed_seconds < SCALING_START_SECONDS {
        return EARLY_GAME_HP;
    }

    let minutes_past_start = (elapsed_seconds - SCALING_START_SECONDS) / SECONDS_PER_MINUTE;
    SCALED_HP_BASE + level as f32 * LEVEL_HP_BONUS + minutes_past_start as f32 * MINUTE_HP_BONUS
}

/// Probabilities of the independent kind rolls available at a point in time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KindOdds {
    /// Chance of the charger roll succeeding.
    pub charger: f64,
    /// Chance of the tank roll succeeding; a tank overrides a charger.
    pub tank: f64,
}

/// Kind roll distribution in effect at `elapsed_seconds`.
#[must_use]
pub fn kind_odds(elapsed_seconds: u32) -> KindOdds {
    KindOdds {
        charger: if elapsed_seconds >= CHARGER_UNLOCK_SECONDS {
            CHARGER_CHANCE
        } else {
            0.0
        },
        tank: if elapsed_seconds >= TANK_UNLOCK_SECONDS {
            TANK_CHANCE
        } else {
            0.0
        },
    }
}

/// Rolls the kind of the next enemy.
///
/// The charger roll happens first and the tank roll second, so a successful
/// tank roll wins when both succeed. Locked rolls draw nothing from `rng`.
pub fn roll_kind<R>(elapsed_seconds: u32, rng: &mut R) -> EnemyKind
where
    R: Rng + ?Sized,
{
    let odds = kind_odds(elapsed_seconds);
    let mut kind = EnemyKind::Normal;
    if odds.charger > 0.0 && rng.gen::<f64>() < odds.charger {
        kind = EnemyKind::Charger;
    }
    if odds.tank > 0.0 && rng.gen::<f64>() < odds.tank {
        kind = EnemyKind::Tank;
    }
    kind
}

/// Spawn interval after `elapsed_seconds`, stepping down once per full minute.
#[must_use]
pub fn spawn_interval(elapsed_seconds: u32) -> Duration {
    let minutes = u64::from(elapsed_seconds / SECONDS_PER_MINUTE);
    let millis = INITIAL_SPAWN_INTERVAL_MS
        .saturating_sub(minutes.saturating_mul(SPAWN_INTERVAL_STEP_MS))
        .max(MIN_SPAWN_INTERVAL_MS);
    Duration::from_millis(millis)
}

/// Pure system that shortens the spawn cadence at minute boundaries.
#[derive(Debug)]
pub struct Difficulty {
    current_interval: Duration,
}

impl Difficulty {
    /// Creates the scheduler assuming the spawn entry runs at `initial_interval`.
    #[must_use]
    pub fn new(initial_interval: Duration) -> Self {
        Self {
            current_interval: initial_interval,
        }
    }

    /// Spawn interval the scheduler last requested.
    #[must_use]
    pub fn current_interval(&self) -> Duration {
        self.current_interval
    }

    /// Consumes world events and emits spawn timer restarts.
    pub fn handle(&mut self, events: &[Event], out: &mut Vec<Command>) {
        for event in events {
            let Event::GameSecondElapsed { elapsed_seconds } = event else {
                continue;
            };
            if *elapsed_seconds % SECONDS_PER_MINUTE != 0 {
                continue;
            }

            // Restarted every minute, even at the floor, which resets the spawn phase.
            let interval = spawn_interval(*elapsed_seconds);
            self.current_interval = interval;
            out.push(Command::RestartTimer {
                timer: TimerId::Spawn,
                period: interval,
            });
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::new(Duration::from_millis(INITIAL_SPAWN_INTERVAL_MS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn early_enemies_have_flat_hit_points() {
        for t in [0, 1, 30, 59] {
            assert_eq!(base_hp(t, 7), 10.0);
        }
    }

    #[test]
    fn hit_points_scale_with_level_and_minutes() {
        assert_eq!(base_hp(60, 1), 36.0);
        assert_eq!(base_hp(119, 3), 48.0);
        assert_eq!(base_hp(120, 1), 61.0);
        assert_eq!(base_hp(305, 4), 30.0 + 24.0 + 4.0 * 25.0);
    }

    #[test]
    fn interval_steps_down_per_minute_and_floors() {
        for n in 0..12_u32 {
            let expected = 2_000_u64.saturating_sub(200 * u64::from(n)).max(500);
            assert_eq!(
                spawn_interval(n * 60),
                Duration::from_millis(expected),
                "minute {n}"
            );
            assert_eq!(spawn_interval(n * 60 + 59), Duration::from_millis(expected));
        }
    }

    #[test]
    fn only_normal_enemies_before_two_minutes() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..1_000 {
            assert_eq!(roll_kind(119, &mut rng), EnemyKind::Normal);
        }
    }

    #[test]
    fn tanks_appear_only_after_five_minutes() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let kinds: Vec<_> = (0..2_000).map(|_| roll_kind(299, &mut rng)).collect();
        assert!(kinds.contains(&EnemyKind::Charger));
        assert!(!kinds.contains(&EnemyKind::Tank));

        let kinds: Vec<_> = (0..2_000).map(|_| roll_kind(300, &mut rng)).collect();
        assert!(kinds.contains(&EnemyKind::Tank));
    }

    #[test]
    fn kind_odds_unlock_in_order() {
        assert_eq!(
            kind_odds(0),
            KindOdds {
                charger: 0.0,
                tank: 0.0
            }
        );
        assert_eq!(kind_odds(120).charger, 0.3);
        assert_eq!(kind_odds(300).tank, 0.2);
    }

    #[test]
    fn restarts_spawn_timer_on_minute_boundaries_only() {
        let mut difficulty = Difficulty::default();
        let mut commands = Vec::new();

        difficulty.handle(&[Event::GameSecondElapsed { elapsed_seconds: 59 }], &mut commands);
        assert!(commands.is_empty());

        difficulty.handle(&[Event::GameSecondElapsed { elapsed_seconds: 60 }], &mut commands);
        assert_eq!(
            commands,
            vec![Command::RestartTimer {
                timer: TimerId::Spawn,
                period: Duration::from_millis(1_800),
            }]
        );
        assert_eq!(difficulty.current_interval(), Duration::from_millis(1_800));
    }

    #[test]
    fn floored_interval_is_restarted_every_minute() {
        let mut difficulty = Difficulty::new(Duration::from_millis(500));
        let mut commands = Vec::new();
        difficulty.handle(
            &[
                Event::GameSecondElapsed { elapsed_seconds: 540 },
                Event::GameSecondElapsed { elapsed_seconds: 541 },
                Event::GameSecondElapsed { elapsed_seconds: 600 },
            ],
            &mut commands,
        );
        let restart = Command::RestartTimer {
            timer: TimerId::Spawn,
            period: Duration::from_millis(500),
        };
        assert_eq!(commands, vec![restart.clone(), restart]);
        assert_eq!(difficulty.current_interval(), Duration::from_millis(500));
    }
}
