#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Session orchestration wiring the world and the pure systems together.
//!
//! A [`Session`] advances the simulation one fixed step at a time. Every step
//! applies the tick, then lets each system react in a fixed order and feeds
//! its commands straight back into the world, so later systems observe the
//! effects of earlier ones within the same step.

pub mod config;

use arena_survivor_core::{
    ArenaBounds, AudioCue, Command, EnemyView, Event, HudSnapshot, MovementIntent, PickupView,
    PlayerSnapshot, ProjectileView, SessionPhase, SessionSummary, UpgradeOffer,
};
use arena_survivor_system_collision::Collision;
use arena_survivor_system_difficulty::{spawn_interval, Difficulty};
use arena_survivor_system_player_control::PlayerControl;
use arena_survivor_system_pursuit::Pursuit;
use arena_survivor_system_spawning::{
    Config as SpawningConfig, SpawnContext, Spawning, DEFAULT_MAX_DISTANCE, DEFAULT_MIN_DISTANCE,
};
use arena_survivor_system_upgrade_offers::UpgradeOffers;
use arena_survivor_system_weapons::Weapons;
use arena_survivor_world::{self as world, query, World, WorldConfig};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

pub use config::{ConfigError, SessionConfig};

/// Discrete input events forwarded by the input collaborator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Control {
    /// Freezes the session.
    Pause,
    /// Leaves the paused phase.
    Resume,
    /// Applies the upgrade with the given catalog id and resumes.
    ChooseUpgrade(String),
}

/// Continuous input sampled once per step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionInput {
    /// Normalised movement intent.
    pub movement: MovementIntent,
}

/// Read-only view of everything the presentation collaborators draw.
#[derive(Clone, Debug)]
pub struct FrameSnapshot {
    /// HUD values.
    pub hud: HudSnapshot,
    /// Player body, absent once the session is over.
    pub player: Option<PlayerSnapshot>,
    /// Live enemies in spawn order.
    pub enemies: EnemyView,
    /// Live projectiles in firing order.
    pub projectiles: ProjectileView,
    /// Pickups lying in the arena.
    pub pickups: PickupView,
    /// Upgrade options awaiting a choice.
    pub pending_offers: Vec<UpgradeOffer>,
}

#[derive(Clone, Copy, Debug)]
struct SeedStreams {
    combat: u64,
    spawning: u64,
    offers: u64,
}

impl SeedStreams {
    fn derive(root: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(root);
        Self {
            combat: rng.gen(),
            spawning: rng.gen(),
            offers: rng.gen(),
        }
    }
}

/// A running simulation session.
#[derive(Debug)]
pub struct Session {
    config: SessionConfig,
    world: World,
    difficulty: Difficulty,
    spawning: Spawning,
    pursuit: Pursuit,
    player_control: PlayerControl,
    weapons: Weapons,
    collision: Collision,
    upgrade_offers: UpgradeOffers,
}

impl Session {
    /// Validates the configuration and starts a session with its initial enemies.
    pub fn new(config: SessionConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let seeds = SeedStreams::derive(config.seed);
        let initial_interval = spawn_interval(0);
        let world = World::with_config(WorldConfig {
            arena: ArenaBounds::new(config.world_size, config.world_size),
            contact_damage: config.contact_damage,
            crit_chance: config.crit_chance,
            crit_multiplier: config.crit_multiplier,
            xp_per_pickup: config.xp_per_pickup,
            initial_spawn_interval: initial_interval,
            rng_seed: seeds.combat,
            ..WorldConfig::default()
        });
        let spawning = Spawning::new(SpawningConfig::new(
            DEFAULT_MIN_DISTANCE,
            DEFAULT_MAX_DISTANCE,
            config.spawn_margin,
            seeds.spawning,
        ));

        let mut session = Self {
            world,
            difficulty: Difficulty::new(initial_interval),
            spawning,
            pursuit: Pursuit,
            player_control: PlayerControl,
            weapons: Weapons,
            collision: Collision,
            upgrade_offers: UpgradeOffers::new(seeds.offers),
            config,
        };

        let context = session.spawn_context();
        let mut commands = Vec::new();
        let count = usize::try_from(session.config.initial_enemies).unwrap_or(usize::MAX);
        session.spawning.force_spawn(count, &context, &mut commands);
        let mut events = Vec::new();
        dispatch(&mut session.world, &mut commands, &mut events);

        debug!(
            seed = session.config.seed,
            initial_enemies = query::enemy_view(&session.world).len(),
            "session started"
        );
        Ok(session)
    }

    /// Advances the session by one configured tick and returns every event it produced.
    ///
    /// Steps taken outside the running phase produce nothing.
    pub fn step(&mut self, input: &SessionInput) -> Vec<Event> {
        let mut events = Vec::new();
        if query::phase(&self.world) != SessionPhase::Running {
            return events;
        }

        let mut commands = vec![Command::Tick {
            dt: self.config.tick(),
        }];
        dispatch(&mut self.world, &mut commands, &mut events);

        self.difficulty.handle(&events, &mut commands);
        dispatch(&mut self.world, &mut commands, &mut events);

        let context = self.spawn_context();
        self.spawning.handle(&events, &context, &mut commands);
        dispatch(&mut self.world, &mut commands, &mut events);

        self.pursuit.handle(
            &events,
            &query::enemy_view(&self.world),
            query::player_position(&self.world),
            &mut commands,
        );
        dispatch(&mut self.world, &mut commands, &mut events);

        self.player_control.handle(
            &events,
            input.movement,
            query::player(&self.world).as_ref(),
            &query::player_stats(&self.world),
            &mut commands,
        );
        dispatch(&mut self.world, &mut commands, &mut events);

        self.weapons.handle(
            &events,
            query::player_position(&self.world),
            &query::enemy_view(&self.world),
            &query::player_stats(&self.world),
            &mut commands,
        );
        dispatch(&mut self.world, &mut commands, &mut events);

        self.collision.handle(
            query::player(&self.world).as_ref(),
            &query::enemy_view(&self.world),
            &query::projectile_view(&self.world),
            &query::pickup_view(&self.world),
            &mut commands,
        );
        dispatch(&mut self.world, &mut commands, &mut events);

        self.upgrade_offers.handle(&events, &mut commands);
        dispatch(&mut self.world, &mut commands, &mut events);

        events
    }

    /// Forwards a discrete input event and returns the resulting events.
    pub fn command(&mut self, control: Control) -> Vec<Event> {
        let command = match control {
            Control::Pause => Command::Pause,
            Control::Resume => Command::Resume,
            Control::ChooseUpgrade(upgrade) => Command::ResumeWithUpgrade { upgrade },
        };
        let mut events = Vec::new();
        world::apply(&mut self.world, command, &mut events);
        events
    }

    /// Captures the read-only frame snapshot for presentation collaborators.
    #[must_use]
    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot {
            hud: query::hud(&self.world),
            player: query::player(&self.world),
            enemies: query::enemy_view(&self.world),
            projectiles: query::projectile_view(&self.world),
            pickups: query::pickup_view(&self.world),
            pending_offers: query::pending_offers(&self.world).to_vec(),
        }
    }

    /// Final statistics, available once the session is over.
    #[must_use]
    pub fn summary(&self) -> Option<SessionSummary> {
        query::summary(&self.world)
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        query::phase(&self.world)
    }

    /// Read access to the authoritative world for detailed queries.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Configuration the session was started with.
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    fn spawn_context(&self) -> SpawnContext {
        SpawnContext {
            player: query::player_position(&self.world),
            arena: query::arena(&self.world),
            elapsed_seconds: query::elapsed_seconds(&self.world),
            level: query::player_progress(&self.world).level,
        }
    }
}

/// Audio cues triggered by a batch of events, in event order.
#[must_use]
pub fn audio_cues(events: &[Event]) -> Vec<AudioCue> {
    events.iter().filter_map(Event::audio_cue).collect()
}

fn dispatch(world: &mut World, commands: &mut Vec<Command>, events: &mut Vec<Event>) {
    for command in commands.drain(..) {
        world::apply(world, command, events);
    }
}
