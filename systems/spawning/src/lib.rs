#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic spawning system responsible for emitting enemy spawn commands.

use std::f32::consts::TAU;

use arena_survivor_core::{ArenaBounds, Command, Event, TimerId, Vec2};
use arena_survivor_system_difficulty::{base_hp, roll_kind};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Closest distance from the player a spawn may appear at.
pub const DEFAULT_MIN_DISTANCE: f32 = 700.0;
/// Farthest distance from the player a spawn may appear at.
pub const DEFAULT_MAX_DISTANCE: f32 = 900.0;
const DEFAULT_MARGIN: f32 = 50.0;

/// Configuration parameters required to construct the spawning system.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    min_distance: f32,
    max_distance: f32,
    margin: f32,
    rng_seed: u64,
}

impl Config {
    /// Creates a configuration placing spawns between `min_distance` and
    /// `max_distance` from the player, kept `margin` units inside the arena.
    ///
    /// Reversed distances are swapped.
    #[must_use]
    pub fn new(min_distance: f32, max_distance: f32, margin: f32, rng_seed: u64) -> Self {
        Self {
            min_distance: min_distance.min(max_distance),
            max_distance: max_distance.max(min_distance),
            margin,
            rng_seed,
        }
    }

    /// Creates the default ring configuration with the provided seed.
    #[must_use]
    pub fn with_seed(rng_seed: u64) -> Self {
        Self::new(DEFAULT_MIN_DISTANCE, DEFAULT_MAX_DISTANCE, DEFAULT_MARGIN, rng_seed)
    }

    /// Distance range of the spawn ring.
    #[must_use]
    pub fn distance_range(&self) -> (f32, f32) {
        (self.min_distance, self.max_distance)
    }

    /// Margin kept between spawns and the arena edge.
    #[must_use]
    pub fn margin(&self) -> f32 {
        self.margin
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::with_seed(0)
    }
}

/// Session facts that decide where and how strong the next enemy is.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnContext {
    /// Current player position; spawning is skipped without a player.
    pub player: Option<Vec2>,
    /// Playable area spawns are clamped into.
    pub arena: ArenaBounds,
    /// Whole in-game seconds elapsed.
    pub elapsed_seconds: u32,
    /// Current player level.
    pub level: u32,
}

/// Pure system that deterministically emits spawn commands on spawn timer firings.
#[derive(Debug)]
pub struct Spawning {
    config: Config,
    rng: ChaCha8Rng,
}

impl Spawning {
    /// Creates a new spawning system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
            config,
        }
    }

    /// Consumes world events and emits one spawn per spawn timer firing.
    pub fn handle(&mut self, events: &[Event], context: &SpawnContext, out: &mut Vec<Command>) {
        let firings = events
            .iter()
            .filter(|event| {
                matches!(
                    event,
                    Event::TimerFired {
                        timer: TimerId::Spawn
                    }
                )
            })
            .count();
        self.force_spawn(firings, context, out);
    }

    /// Emits `count` spawn commands immediately, regardless of timers.
    pub fn force_spawn(&mut self, count: usize, context: &SpawnContext, out: &mut Vec<Command>) {
        let Some(player) = context.player else {
            return;
        };

        for _ in 0..count {
            let kind = roll_kind(context.elapsed_seconds, &mut self.rng);
            let hp = base_hp(context.elapsed_seconds, context.level) * kind.hp_multiplier();
            let position = self.pick_position(player, context.arena);
            out.push(Command::SpawnEnemy { kind, position, hp });
        }
    }

    fn pick_position(&mut self, player: Vec2, arena: ArenaBounds) -> Vec2 {
        let angle = self.rng.gen_range(0.0..TAU);
        let distance = self
            .rng
            .gen_range(self.config.min_distance..=self.config.max_distance);
        let offset = Vec2::new(angle.cos(), angle.sin()) * distance;
        arena.clamp(player + offset, self.config.margin)
    }
}
