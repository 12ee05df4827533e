#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Arena Survivor.
//!
//! The world owns the session clock, the periodic schedule, the entity store,
//! the player's progression, and combat resolution. It is mutated exclusively
//! through [`apply`] and observed through the [`query`] module, so external
//! readers only ever see it between commands.

pub mod combat;
mod entities;
pub mod progression;
mod schedule;

use std::time::Duration;

use arena_survivor_core::{
    ArenaBounds, Command, Event, PickupId, PlayerProgress, PlayerStats, SessionPhase,
    SessionSummary, ShotSpec, TimerId, Upgrade, Vec2, DEFAULT_PICKUP_XP,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::{
    entities::EntityStore,
    progression::{Progression, UpgradeEffect},
    schedule::Scheduler,
};

const CLOCK_PERIOD: Duration = Duration::from_secs(1);
const DEFAULT_ARENA_SIZE: f32 = 2_500.0;
const DEFAULT_CONTACT_DAMAGE: f32 = 10.0;
const DEFAULT_CRIT_CHANCE: f64 = 0.15;
const DEFAULT_CRIT_MULTIPLIER: f32 = 2.0;
const DEFAULT_SPAWN_INTERVAL: Duration = Duration::from_millis(2_000);
const DEFAULT_COMBAT_SEED: u64 = 0x6a09_e667_f3bc_c908;
const PLAYER_RADIUS: f32 = 20.0;

/// Tunable parameters of the authoritative world.
#[derive(Clone, Debug, PartialEq)]
pub struct WorldConfig {
    /// Playable area; the player starts at its centre.
    pub arena: ArenaBounds,
    /// Health lost per enemy contact.
    pub contact_damage: f32,
    /// Probability that a hit is critical.
    pub crit_chance: f64,
    /// Damage factor applied to critical hits.
    pub crit_multiplier: f32,
    /// Experience granted by each pickup.
    pub xp_per_pickup: u32,
    /// Period of the spawn entry installed at session start.
    pub initial_spawn_interval: Duration,
    /// Seed of the critical-hit random stream.
    pub rng_seed: u64,
    /// Player stats at session start.
    pub stats: PlayerStats,
    /// Player progress at session start.
    pub progress: PlayerProgress,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            arena: ArenaBounds::new(DEFAULT_ARENA_SIZE, DEFAULT_ARENA_SIZE),
            contact_damage: DEFAULT_CONTACT_DAMAGE,
            crit_chance: DEFAULT_CRIT_CHANCE,
            crit_multiplier: DEFAULT_CRIT_MULTIPLIER,
            xp_per_pickup: DEFAULT_PICKUP_XP,
            initial_spawn_interval: DEFAULT_SPAWN_INTERVAL,
            rng_seed: DEFAULT_COMBAT_SEED,
            stats: PlayerStats::default(),
            progress: PlayerProgress::default(),
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Player {
    position: Vec2,
    velocity: Vec2,
    heading: f32,
    radius: f32,
}

/// Represents the authoritative Arena Survivor world state.
#[derive(Debug)]
pub struct World {
    config: WorldConfig,
    phase: SessionPhase,
    clock: Duration,
    elapsed_seconds: u32,
    scheduler: Scheduler,
    store: EntityStore,
    player: Option<Player>,
    progression: Progression,
    kill_count: u32,
    combat_rng: ChaCha8Rng,
    summary: Option<SessionSummary>,
}

impl World {
    /// Creates a new world using the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(WorldConfig::default())
    }

    /// Creates a new world ready for simulation with the provided configuration.
    #[must_use]
    pub fn with_config(config: WorldConfig) -> Self {
        let progression = Progression::new(config.stats, config.progress);
        let mut scheduler = Scheduler::default();
        for (timer, period) in [
            (TimerId::Clock, CLOCK_PERIOD),
            (TimerId::Spawn, config.initial_spawn_interval),
            (TimerId::Autofire, config.stats.fire_period()),
        ] {
            if !scheduler.restart(timer, period, Duration::ZERO) {
                debug!(?timer, "timer left unscheduled, zero period");
            }
        }

        Self {
            phase: SessionPhase::Running,
            clock: Duration::ZERO,
            elapsed_seconds: 0,
            scheduler,
            store: EntityStore::new(),
            player: Some(Player {
                position: config.arena.center(),
                velocity: Vec2::ZERO,
                heading: 0.0,
                radius: PLAYER_RADIUS,
            }),
            progression,
            kill_count: 0,
            combat_rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
            summary: None,
            config,
        }
    }

    fn advance(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        self.clock = self.clock.saturating_add(dt);
        out_events.push(Event::TimeAdvanced { dt });

        self.integrate(dt);

        let mut expired = Vec::new();
        self.store.expire_projectiles(dt, &mut expired);
        for projectile in expired {
            out_events.push(Event::ProjectileExpired { projectile });
        }

        let mut fired = Vec::new();
        self.scheduler.advance(self.clock, &mut fired);
        for timer in fired {
            out_events.push(Event::TimerFired { timer });
            if timer == TimerId::Clock {
                self.elapsed_seconds = self.elapsed_seconds.saturating_add(1);
                out_events.push(Event::GameSecondElapsed {
                    elapsed_seconds: self.elapsed_seconds,
                });
            }
        }
    }

    fn integrate(&mut self, dt: Duration) {
        let seconds = dt.as_secs_f32();
        let arena = self.config.arena;

        if let Some(player) = self.player.as_mut() {
            player.position = arena.clamp(player.position + player.velocity * seconds, player.radius);
        }

        for enemy in self.store.enemies.values_mut() {
            enemy.position = arena.clamp(enemy.position + enemy.velocity * seconds, enemy.radius);
        }

        for projectile in self.store.projectiles.values_mut() {
            projectile.position += projectile.velocity * seconds;
        }
    }

    fn fire_volley(&mut self, shots: &[ShotSpec], out_events: &mut Vec<Event>) {
        if shots.is_empty() {
            return;
        }

        for shot in shots {
            let projectile = self.store.insert_projectile(shot);
            out_events.push(Event::ProjectileSpawned {
                projectile,
                kind: shot.kind.kind(),
            });
        }
        out_events.push(Event::ShotFired {
            projectiles: u32::try_from(shots.len()).unwrap_or(u32::MAX),
        });
    }

    fn collect_pickup(&mut self, pickup_id: PickupId, out_events: &mut Vec<Event>) {
        let Some(pickup) = self.store.pickups.remove(&pickup_id) else {
            return;
        };
        out_events.push(Event::PickupCollected {
            pickup: pickup_id,
            xp: pickup.xp_value,
        });

        if let Some(level_up) = self.progression.collect(pickup.xp_value) {
            self.phase = SessionPhase::LevelingUp;
            debug!(
                level = level_up.level,
                required_xp = level_up.required_xp,
                "player leveled up"
            );
            out_events.push(Event::LeveledUp {
                level: level_up.level,
                required_xp: level_up.required_xp,
            });
        }
    }

    fn resume_with_upgrade(&mut self, id: String, out_events: &mut Vec<Event>) {
        let upgrade = Upgrade::from_id(&id);
        let effect = self.progression.choose(upgrade);

        match upgrade {
            Some(upgrade) => {
                debug!(upgrade = upgrade.id(), "upgrade applied");
                out_events.push(Event::UpgradeApplied { upgrade });
            }
            None => {
                debug!(upgrade = %id, "unknown upgrade ignored");
                out_events.push(Event::UpgradeIgnored { upgrade: id });
            }
        }

        if let Some(UpgradeEffect::RestartAutofire(period)) = effect {
            self.restart_timer(TimerId::Autofire, period, out_events);
        }

        self.phase = SessionPhase::Running;
        out_events.push(Event::Resumed);
    }

    fn restart_timer(&mut self, timer: TimerId, period: Duration, out_events: &mut Vec<Event>) {
        if self.scheduler.restart(timer, period, self.clock) {
            debug!(?timer, period_ms = period.as_millis() as u64, "timer restarted");
            out_events.push(Event::TimerRestarted { timer, period });
        }
    }

    fn enter_game_over(&mut self, out_events: &mut Vec<Event>) {
        let summary = SessionSummary {
            elapsed_seconds: self.elapsed_seconds,
            level: self.progression.progress().level,
            kill_count: self.kill_count,
        };
        self.phase = SessionPhase::GameOver;
        self.player = None;
        self.summary = Some(summary);
        info!(
            elapsed_seconds = summary.elapsed_seconds,
            level = summary.level,
            kill_count = summary.kill_count,
            "game over"
        );
        out_events.push(Event::GameOver { summary });
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// Once the session is over every command is ignored. While paused or waiting
/// for an upgrade choice only phase transitions, timer restarts, and offer
/// publication are accepted.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    let phase = world.phase;
    if phase == SessionPhase::GameOver {
        return;
    }
    let running = phase == SessionPhase::Running;

    match command {
        Command::Tick { dt } => {
            if running {
                world.advance(dt, out_events);
            }
        }
        Command::Pause => {
            if running {
                world.phase = SessionPhase::Paused;
                out_events.push(Event::Paused);
            }
        }
        Command::Resume => {
            if phase == SessionPhase::Paused {
                world.phase = SessionPhase::Running;
                out_events.push(Event::Resumed);
            }
        }
        Command::ResumeWithUpgrade { upgrade } => {
            if phase == SessionPhase::LevelingUp {
                world.resume_with_upgrade(upgrade, out_events);
            }
        }
        Command::RestartTimer { timer, period } => {
            world.restart_timer(timer, period, out_events);
        }
        Command::SpawnEnemy { kind, position, hp } => {
            if running {
                let position = world.config.arena.clamp(position, kind.radius());
                let enemy = world.store.insert_enemy(kind, position, hp);
                out_events.push(Event::EnemySpawned {
                    enemy,
                    kind,
                    position,
                    hp,
                });
            }
        }
        Command::SteerEnemy {
            enemy,
            velocity,
            facing,
        } => {
            if running {
                if let Some(record) = world.store.enemies.get_mut(&enemy) {
                    record.velocity = velocity;
                    record.facing = facing;
                }
            }
        }
        Command::DrivePlayer { velocity, heading } => {
            if running {
                if let Some(player) = world.player.as_mut() {
                    player.velocity = velocity;
                    player.heading = heading;
                }
            }
        }
        Command::FireVolley { shots } => {
            if running {
                world.fire_volley(&shots, out_events);
            }
        }
        Command::ResolveProjectileHit { projectile, enemy } => {
            if running {
                combat::resolve_projectile_hit(world, projectile, enemy, out_events);
            }
        }
        Command::ResolvePlayerContact { enemy } => {
            if running {
                combat::resolve_player_contact(world, enemy, out_events);
            }
        }
        Command::CollectPickup { pickup } => {
            if running {
                world.collect_pickup(pickup, out_events);
            }
        }
        Command::OfferUpgrades { offers } => {
            if phase == SessionPhase::LevelingUp {
                world.progression.set_offers(offers.clone());
                out_events.push(Event::UpgradeChoiceRequested { offers });
            }
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use arena_survivor_core::{
        ArenaBounds, EnemyView, HudSnapshot, PickupView, PlayerProgress, PlayerSnapshot,
        PlayerStats, ProjectileView, SessionPhase, SessionSummary, TimerId, UpgradeOffer, Vec2,
    };

    use super::World;
    use crate::progression::ProgressionState;

    /// Current lifecycle phase of the session.
    #[must_use]
    pub fn phase(world: &World) -> SessionPhase {
        world.phase
    }

    /// Simulated time elapsed while running.
    #[must_use]
    pub fn clock(world: &World) -> Duration {
        world.clock
    }

    /// Whole in-game seconds counted by the clock entry.
    #[must_use]
    pub fn elapsed_seconds(world: &World) -> u32 {
        world.elapsed_seconds
    }

    /// Playable area of the arena.
    #[must_use]
    pub fn arena(world: &World) -> ArenaBounds {
        world.config.arena
    }

    /// Snapshot of the player body, absent once the session is over.
    #[must_use]
    pub fn player(world: &World) -> Option<PlayerSnapshot> {
        world.player.map(|player| PlayerSnapshot {
            position: player.position,
            velocity: player.velocity,
            heading: player.heading,
            radius: player.radius,
        })
    }

    /// Position of the player, absent once the session is over.
    #[must_use]
    pub fn player_position(world: &World) -> Option<Vec2> {
        world.player.map(|player| player.position)
    }

    /// Current player stats.
    #[must_use]
    pub fn player_stats(world: &World) -> PlayerStats {
        *world.progression.stats()
    }

    /// Current player health and experience.
    #[must_use]
    pub fn player_progress(world: &World) -> PlayerProgress {
        *world.progression.progress()
    }

    /// Current state of the progression state machine.
    #[must_use]
    pub fn progression_state(world: &World) -> ProgressionState {
        world.progression.state()
    }

    /// Upgrade options awaiting a choice.
    #[must_use]
    pub fn pending_offers(world: &World) -> &[UpgradeOffer] {
        world.progression.offers()
    }

    /// Enemies killed by weapons so far.
    #[must_use]
    pub fn kill_count(world: &World) -> u32 {
        world.kill_count
    }

    /// Final statistics, present once the session is over.
    #[must_use]
    pub fn summary(world: &World) -> Option<SessionSummary> {
        world.summary
    }

    /// Period of a schedule entry.
    #[must_use]
    pub fn timer_period(world: &World, timer: TimerId) -> Option<Duration> {
        world.scheduler.period(timer)
    }

    /// Session-clock instant at which a schedule entry next fires.
    #[must_use]
    pub fn timer_next_due(world: &World, timer: TimerId) -> Option<Duration> {
        world.scheduler.next_due(timer)
    }

    /// Captures a read-only view of the live enemies.
    #[must_use]
    pub fn enemy_view(world: &World) -> EnemyView {
        EnemyView::from_snapshots(
            world
                .store
                .enemies
                .values()
                .map(|enemy| enemy.snapshot())
                .collect(),
        )
    }

    /// Captures a read-only view of the live projectiles.
    #[must_use]
    pub fn projectile_view(world: &World) -> ProjectileView {
        ProjectileView::from_snapshots(
            world
                .store
                .projectiles
                .values()
                .map(|projectile| projectile.snapshot())
                .collect(),
        )
    }

    /// Captures a read-only view of the pickups lying in the arena.
    #[must_use]
    pub fn pickup_view(world: &World) -> PickupView {
        PickupView::from_snapshots(
            world
                .store
                .pickups
                .values()
                .map(|pickup| pickup.snapshot())
                .collect(),
        )
    }

    /// Values displayed by the HUD collaborator.
    #[must_use]
    pub fn hud(world: &World) -> HudSnapshot {
        let progress = world.progression.progress();
        HudSnapshot {
            phase: world.phase,
            health: progress.health,
            max_health: progress.max_health,
            xp: progress.xp,
            required_xp: progress.required_xp,
            level: progress.level,
            elapsed_seconds: world.elapsed_seconds,
            kill_count: world.kill_count,
        }
    }
}
