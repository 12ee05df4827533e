#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Arena Survivor simulation.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters and systems submit
//! [`Command`] values describing desired mutations, the world executes those
//! commands via its `apply` entry point, and then broadcasts [`Event`] values
//! that systems and presentation collaborators react to. Systems consume event
//! streams, query immutable views, and respond exclusively with new command
//! batches.

use std::time::Duration;

pub use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Experience granted by a single pickup unless a session overrides it.
pub const DEFAULT_PICKUP_XP: u32 = 20;

/// Lifecycle phase of a simulation session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Ticks advance the clock, timers, and every entity.
    Running,
    /// Explicitly paused by the player; clock and timers are frozen.
    Paused,
    /// Waiting for an upgrade choice; clock and timers are frozen.
    LevelingUp,
    /// Terminal state reached when player health drops to zero.
    GameOver,
}

/// Named periodic schedule entries owned by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TimerId {
    /// One in-game second ticker that drives `elapsed_seconds`.
    Clock,
    /// Enemy spawn cadence.
    Spawn,
    /// Weapon autofire cadence.
    Autofire,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Freezes the clock and all timers.
    Pause,
    /// Leaves the paused phase without applying an upgrade.
    Resume,
    /// Applies the chosen upgrade and returns to the running phase.
    ResumeWithUpgrade {
        /// Catalog identifier of the chosen upgrade, e.g. `"attack_speed"`.
        upgrade: String,
    },
    /// Cancels a periodic schedule entry and installs it again with a new period.
    RestartTimer {
        /// Entry being restarted.
        timer: TimerId,
        /// Period of the replacement entry.
        period: Duration,
    },
    /// Creates a new enemy.
    SpawnEnemy {
        /// Archetype of the enemy.
        kind: EnemyKind,
        /// Position the enemy appears at, already clamped into the arena.
        position: Vec2,
        /// Initial (and maximum) hit points.
        hp: f32,
    },
    /// Replaces an enemy's velocity and facing.
    SteerEnemy {
        /// Enemy being steered.
        enemy: EnemyId,
        /// New velocity in world units per second.
        velocity: Vec2,
        /// Facing angle in radians.
        facing: f32,
    },
    /// Replaces the player's velocity and visual heading.
    DrivePlayer {
        /// New velocity in world units per second.
        velocity: Vec2,
        /// Visual heading in radians.
        heading: f32,
    },
    /// Spawns every projectile produced by one autofire tick.
    FireVolley {
        /// Projectiles to create, in firing order.
        shots: Vec<ShotSpec>,
    },
    /// Resolves an overlap between a projectile and an enemy.
    ResolveProjectileHit {
        /// Projectile involved in the overlap.
        projectile: ProjectileId,
        /// Enemy involved in the overlap.
        enemy: EnemyId,
    },
    /// Resolves an overlap between the player and an enemy.
    ResolvePlayerContact {
        /// Enemy touching the player.
        enemy: EnemyId,
    },
    /// Collects a pickup touching the player.
    CollectPickup {
        /// Pickup being collected.
        pickup: PickupId,
    },
    /// Publishes the upgrade options drawn for a pending level-up.
    OfferUpgrades {
        /// Options presented to the upgrade-selection collaborator.
        offers: Vec<UpgradeOffer>,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// A periodic schedule entry fell due.
    TimerFired {
        /// Entry that fired.
        timer: TimerId,
    },
    /// One in-game second elapsed.
    GameSecondElapsed {
        /// Whole seconds elapsed since the session started.
        elapsed_seconds: u32,
    },
    /// A schedule entry was cancelled and reinstalled.
    TimerRestarted {
        /// Entry that was restarted.
        timer: TimerId,
        /// Period of the new entry.
        period: Duration,
    },
    /// Confirms that an enemy entered the arena.
    EnemySpawned {
        /// Identifier assigned to the enemy.
        enemy: EnemyId,
        /// Archetype of the enemy.
        kind: EnemyKind,
        /// Spawn position.
        position: Vec2,
        /// Initial hit points.
        hp: f32,
    },
    /// At least one projectile left the player during an autofire tick.
    ShotFired {
        /// Number of projectiles created by the volley.
        projectiles: u32,
    },
    /// Confirms that a projectile was created.
    ProjectileSpawned {
        /// Identifier assigned to the projectile.
        projectile: ProjectileId,
        /// Variant of the projectile.
        kind: ProjectileKind,
    },
    /// A projectile reached the end of its lifetime.
    ProjectileExpired {
        /// Projectile that expired.
        projectile: ProjectileId,
    },
    /// A projectile was consumed by a hit.
    ProjectileDestroyed {
        /// Projectile that was consumed.
        projectile: ProjectileId,
    },
    /// A projectile damaged an enemy.
    EnemyHit {
        /// Enemy that took damage.
        enemy: EnemyId,
        /// Projectile that dealt the damage.
        projectile: ProjectileId,
        /// Damage dealt after the critical roll.
        damage: f32,
        /// Whether the hit was critical.
        critical: bool,
        /// Hit points left after the hit; may be negative.
        remaining_hp: f32,
    },
    /// An enemy's hit points dropped to zero or below.
    EnemyKilled {
        /// Enemy that died.
        enemy: EnemyId,
        /// Archetype of the enemy.
        kind: EnemyKind,
        /// Last position of the enemy.
        position: Vec2,
    },
    /// An enemy was removed without being killed (player contact).
    EnemyDespawned {
        /// Enemy that was removed.
        enemy: EnemyId,
    },
    /// An experience pickup appeared.
    PickupSpawned {
        /// Identifier assigned to the pickup.
        pickup: PickupId,
        /// Position of the pickup.
        position: Vec2,
    },
    /// The player collected an experience pickup.
    PickupCollected {
        /// Pickup that was collected.
        pickup: PickupId,
        /// Experience granted.
        xp: u32,
    },
    /// The player took contact damage.
    PlayerHurt {
        /// Damage subtracted from health.
        damage: f32,
        /// Health after the hit; may be negative.
        health: f32,
    },
    /// The player gained a level and now awaits an upgrade choice.
    LeveledUp {
        /// New player level.
        level: u32,
        /// Experience required for the following level.
        required_xp: u32,
    },
    /// Upgrade options are ready for the selection collaborator.
    UpgradeChoiceRequested {
        /// Options drawn for the pending level-up.
        offers: Vec<UpgradeOffer>,
    },
    /// A catalog upgrade was applied.
    UpgradeApplied {
        /// Upgrade that was applied.
        upgrade: Upgrade,
    },
    /// An unrecognised upgrade id was submitted and ignored.
    UpgradeIgnored {
        /// Identifier that did not match the catalog.
        upgrade: String,
    },
    /// The session entered the paused phase.
    Paused,
    /// The session returned to the running phase.
    Resumed,
    /// The session ended.
    GameOver {
        /// Final session statistics.
        summary: SessionSummary,
    },
}

impl Event {
    /// Maps the event onto the audio cue it should trigger, if any.
    #[must_use]
    pub fn audio_cue(&self) -> Option<AudioCue> {
        match self {
            Self::ShotFired { .. } => Some(AudioCue::ShotFired),
            Self::EnemyHit { .. } => Some(AudioCue::Hit),
            Self::EnemyKilled { .. } => Some(AudioCue::EnemyExploded),
            Self::PlayerHurt { .. } => Some(AudioCue::PlayerHurt),
            Self::LeveledUp { .. } => Some(AudioCue::LeveledUp),
            Self::PickupCollected { .. } => Some(AudioCue::PickupCollected),
            _ => None,
        }
    }
}

/// Fire-and-forget sound cues consumed by the audio collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AudioCue {
    /// An autofire tick produced at least one projectile.
    ShotFired,
    /// A projectile damaged an enemy.
    Hit,
    /// An enemy died.
    EnemyExploded,
    /// The player took contact damage.
    PlayerHurt,
    /// The player gained a level.
    LeveledUp,
    /// The player collected an experience pickup.
    PickupCollected,
}

/// Opaque cosmetic colour carried by enemies for presentation layers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnemyColor {
    red: u8,
    green: u8,
    blue: u8,
}

impl EnemyColor {
    /// Creates a new colour from byte RGB components.
    #[must_use]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Red component of the colour.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Green component of the colour.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Blue component of the colour.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }
}

/// Enemy archetypes rolled by the difficulty scheduler.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Baseline enemy.
    Normal,
    /// Fast, fragile enemy available after two minutes.
    Charger,
    /// Slow, durable enemy available after five minutes.
    Tank,
}

impl EnemyKind {
    /// Pursuit speed in world units per second.
    #[must_use]
    pub const fn speed(self) -> f32 {
        match self {
            Self::Normal => 180.0,
            Self::Charger => 300.0,
            Self::Tank => 80.0,
        }
    }

    /// Collision radius in world units.
    #[must_use]
    pub const fn radius(self) -> f32 {
        match self {
            Self::Normal => 15.0,
            Self::Charger => 12.0,
            Self::Tank => 25.0,
        }
    }

    /// Factor applied to the base hit points of the spawn.
    #[must_use]
    pub const fn hp_multiplier(self) -> f32 {
        match self {
            Self::Normal => 1.0,
            Self::Charger => 0.6,
            Self::Tank => 2.5,
        }
    }

    /// Cosmetic base colour forwarded to presentation layers.
    #[must_use]
    pub const fn color(self) -> EnemyColor {
        match self {
            Self::Normal => EnemyColor::from_rgb(0xff, 0x00, 0x00),
            Self::Charger => EnemyColor::from_rgb(0xff, 0xaa, 0x00),
            Self::Tank => EnemyColor::from_rgb(0x88, 0x00, 0x88),
        }
    }
}

/// Projectile variants fired by the weapon system.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectileKind {
    /// Primary weapon shot, consumed on first hit.
    Bullet,
    /// Radial burst shot, consumed on first hit.
    Burst,
    /// Piercing shot that survives a limited number of hits.
    Beam,
    /// Stationary expanding damage volume.
    AreaPulse,
}

/// Variant-specific payload of a projectile about to be fired.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ShotKind {
    /// Primary weapon shot.
    Bullet,
    /// Radial burst shot.
    Burst,
    /// Piercing shot with the given number of hits it survives.
    Beam {
        /// Remaining enemy hits before the beam is consumed.
        penetration: u32,
    },
    /// Expanding pulse that reaches `final_radius` at the end of its lifetime.
    AreaPulse {
        /// Radius reached when the pulse expires.
        final_radius: f32,
    },
}

impl ShotKind {
    /// Projectile tag matching the shot payload.
    #[must_use]
    pub const fn kind(&self) -> ProjectileKind {
        match self {
            Self::Bullet => ProjectileKind::Bullet,
            Self::Burst => ProjectileKind::Burst,
            Self::Beam { .. } => ProjectileKind::Beam,
            Self::AreaPulse { .. } => ProjectileKind::AreaPulse,
        }
    }
}

/// Complete description of a projectile the world should create.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShotSpec {
    /// Variant and its payload.
    pub kind: ShotKind,
    /// Spawn position.
    pub origin: Vec2,
    /// Velocity in world units per second.
    pub velocity: Vec2,
    /// Damage dealt per hit before critical rolls.
    pub damage: f32,
    /// Time until the projectile expires.
    pub lifetime: Duration,
}

/// Unique identifier assigned to an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a projectile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProjectileId(u32);

impl ProjectileId {
    /// Creates a new projectile identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to an experience pickup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PickupId(u32);

impl PickupId {
    /// Creates a new pickup identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Square playable area anchored at the origin.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArenaBounds {
    width: f32,
    height: f32,
}

impl ArenaBounds {
    /// Creates bounds spanning `0..=width` horizontally and `0..=height` vertically.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Total width in world units.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.width
    }

    /// Total height in world units.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.height
    }

    /// Centre point of the arena.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    /// Clamps the point so it lies at least `margin` units inside every edge.
    ///
    /// A margin larger than half the arena collapses onto the centre line
    /// instead of producing an inverted range.
    #[must_use]
    pub fn clamp(&self, point: Vec2, margin: f32) -> Vec2 {
        let margin_x = margin.clamp(0.0, self.width * 0.5);
        let margin_y = margin.clamp(0.0, self.height * 0.5);
        Vec2::new(
            point.x.clamp(margin_x, self.width - margin_x),
            point.y.clamp(margin_y, self.height - margin_y),
        )
    }

    /// Reports whether the point lies inside the arena, edges included.
    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        (0.0..=self.width).contains(&point.x) && (0.0..=self.height).contains(&point.y)
    }
}

/// Direction requested along a single input axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AxisIntent {
    /// Towards decreasing coordinates (left or up).
    Negative,
    /// No movement along the axis.
    #[default]
    Neutral,
    /// Towards increasing coordinates (right or down).
    Positive,
}

impl AxisIntent {
    /// Numeric value of the axis in `{-1, 0, 1}`.
    #[must_use]
    pub const fn value(self) -> f32 {
        match self {
            Self::Negative => -1.0,
            Self::Neutral => 0.0,
            Self::Positive => 1.0,
        }
    }

    /// Resolves two mutually exclusive key flags, the negative key winning ties.
    #[must_use]
    pub const fn from_keys(negative: bool, positive: bool) -> Self {
        if negative {
            Self::Negative
        } else if positive {
            Self::Positive
        } else {
            Self::Neutral
        }
    }
}

/// Normalised movement intent supplied by the input collaborator every tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct MovementIntent {
    /// Left/right axis.
    pub horizontal: AxisIntent,
    /// Up/down axis (up is negative, screen coordinates).
    pub vertical: AxisIntent,
}

impl MovementIntent {
    /// Intent that keeps the player still.
    pub const IDLE: Self = Self {
        horizontal: AxisIntent::Neutral,
        vertical: AxisIntent::Neutral,
    };

    /// Builds an intent from directional key flags.
    #[must_use]
    pub const fn from_keys(up: bool, down: bool, left: bool, right: bool) -> Self {
        Self {
            horizontal: AxisIntent::from_keys(left, right),
            vertical: AxisIntent::from_keys(up, down),
        }
    }

    /// Raw intent vector with each component in `{-1, 0, 1}`.
    #[must_use]
    pub fn vector(&self) -> Vec2 {
        Vec2::new(self.horizontal.value(), self.vertical.value())
    }

    /// Reports whether neither axis requests movement.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.horizontal == AxisIntent::Neutral && self.vertical == AxisIntent::Neutral
    }
}

/// Player attributes adjusted exclusively through upgrades.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    /// Movement speed in world units per second.
    pub move_speed: f32,
    /// Autofire period in milliseconds.
    pub fire_rate_ms: f64,
    /// Base damage of the primary weapon.
    pub damage: f32,
    /// Primary weapon level; level one and above fires a double shot.
    pub weapon_level: u32,
    /// Area pulse weapon level.
    pub circular_level: u32,
    /// Radial burst weapon level.
    pub burst_level: u32,
    /// Piercing beam weapon level.
    pub beam_level: u32,
}

impl PlayerStats {
    /// Autofire period rounded to whole microseconds.
    #[must_use]
    pub fn fire_period(&self) -> Duration {
        let micros = (self.fire_rate_ms.max(0.0) * 1_000.0).round();
        Duration::from_micros(micros as u64)
    }
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self {
            move_speed: 300.0,
            fire_rate_ms: 800.0,
            damage: 20.0,
            weapon_level: 0,
            circular_level: 0,
            burst_level: 0,
            beam_level: 0,
        }
    }
}

/// Health and experience progression of the player.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerProgress {
    /// Current health; may drop below zero on the killing blow.
    pub health: f32,
    /// Health ceiling for healing upgrades.
    pub max_health: f32,
    /// Experience accumulated towards the next level.
    pub xp: u32,
    /// Experience needed for the next level.
    pub required_xp: u32,
    /// Current level, starting at one.
    pub level: u32,
}

impl Default for PlayerProgress {
    fn default() -> Self {
        Self {
            health: 100.0,
            max_health: 100.0,
            xp: 0,
            required_xp: 100,
            level: 1,
        }
    }
}

/// Fixed catalog of upgrades offered at level-up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Upgrade {
    /// `+10` damage.
    Damage,
    /// Autofire period shrinks by 20%, never below 100 ms.
    AttackSpeed,
    /// `+200` movement speed.
    MoveSpeed,
    /// Heals 50 health up to the maximum.
    Health,
    /// Primary weapon fires a double shot.
    NewWeapon,
    /// Area pulse weapon level.
    Circular,
    /// Radial burst weapon level.
    Burst,
    /// Piercing beam weapon level.
    Beam,
}

impl Upgrade {
    /// Every upgrade in catalog order.
    pub const ALL: [Self; 8] = [
        Self::Damage,
        Self::AttackSpeed,
        Self::MoveSpeed,
        Self::Health,
        Self::NewWeapon,
        Self::Circular,
        Self::Burst,
        Self::Beam,
    ];

    /// Stable textual identifier used by the selection collaborator.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Damage => "damage",
            Self::AttackSpeed => "attack_speed",
            Self::MoveSpeed => "move_speed",
            Self::Health => "health",
            Self::NewWeapon => "new_weapon",
            Self::Circular => "circular",
            Self::Burst => "burst",
            Self::Beam => "beam",
        }
    }

    /// Card title shown by the selection collaborator.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Damage => "ATK DAMAGE",
            Self::AttackSpeed => "FIRE RATE",
            Self::MoveSpeed => "AGILITY",
            Self::Health => "VITALITY",
            Self::NewWeapon => "DOUBLE SHOT",
            Self::Circular => "VOID AURA",
            Self::Burst => "NOVA BURST",
            Self::Beam => "ION BEAM",
        }
    }

    /// Looks up the upgrade with the provided identifier.
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|upgrade| upgrade.id() == id)
    }
}

/// Rarity tag attached to an upgrade offer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rarity {
    /// Rolls of 70 and below.
    Common,
    /// Rolls from 71 through 95.
    Rare,
    /// Rolls above 95.
    Epic,
}

impl Rarity {
    /// Classifies a uniform roll in `1..=100`.
    #[must_use]
    pub const fn from_roll(roll: u8) -> Self {
        if roll > 95 {
            Self::Epic
        } else if roll > 70 {
            Self::Rare
        } else {
            Self::Common
        }
    }
}

/// Single option presented to the upgrade-selection collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UpgradeOffer {
    /// Upgrade granted when chosen.
    pub upgrade: Upgrade,
    /// Cosmetic rarity tag.
    pub rarity: Rarity,
}

/// Session statistics reported when the game ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Whole in-game seconds survived.
    pub elapsed_seconds: u32,
    /// Final player level.
    pub level: u32,
    /// Enemies killed by weapons.
    pub kill_count: u32,
}

/// Immutable representation of a single enemy used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemySnapshot {
    /// Unique identifier assigned to the enemy.
    pub id: EnemyId,
    /// Archetype of the enemy.
    pub kind: EnemyKind,
    /// Current position.
    pub position: Vec2,
    /// Current velocity.
    pub velocity: Vec2,
    /// Facing angle in radians.
    pub facing: f32,
    /// Remaining hit points.
    pub hp: f32,
    /// Hit points at spawn.
    pub max_hp: f32,
    /// Pursuit speed.
    pub speed: f32,
    /// Collision radius.
    pub radius: f32,
    /// Cosmetic colour.
    pub color: EnemyColor,
}

/// Read-only snapshot describing all live enemies.
#[derive(Clone, Debug, Default)]
pub struct EnemyView {
    snapshots: Vec<EnemySnapshot>,
}

impl EnemyView {
    /// Creates a new enemy view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<EnemySnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured enemy snapshots in spawn order.
    pub fn iter(&self) -> impl Iterator<Item = &EnemySnapshot> {
        self.snapshots.iter()
    }

    /// Number of live enemies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether no enemy is alive.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<EnemySnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a single projectile used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectileSnapshot {
    /// Unique identifier assigned to the projectile.
    pub id: ProjectileId,
    /// Variant of the projectile.
    pub kind: ProjectileKind,
    /// Current position.
    pub position: Vec2,
    /// Current velocity.
    pub velocity: Vec2,
    /// Damage dealt per hit before critical rolls.
    pub damage: f32,
    /// Current collision radius.
    pub radius: f32,
    /// Remaining lifetime.
    pub ttl: Duration,
}

/// Read-only snapshot describing all live projectiles.
#[derive(Clone, Debug, Default)]
pub struct ProjectileView {
    snapshots: Vec<ProjectileSnapshot>,
}

impl ProjectileView {
    /// Creates a new projectile view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<ProjectileSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured projectile snapshots in firing order.
    pub fn iter(&self) -> impl Iterator<Item = &ProjectileSnapshot> {
        self.snapshots.iter()
    }

    /// Number of live projectiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether no projectile is alive.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

/// Immutable representation of a single pickup used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PickupSnapshot {
    /// Unique identifier assigned to the pickup.
    pub id: PickupId,
    /// Position of the pickup.
    pub position: Vec2,
    /// Collision radius.
    pub radius: f32,
    /// Experience granted on collection.
    pub xp_value: u32,
}

/// Read-only snapshot describing all pickups lying in the arena.
#[derive(Clone, Debug, Default)]
pub struct PickupView {
    snapshots: Vec<PickupSnapshot>,
}

impl PickupView {
    /// Creates a new pickup view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<PickupSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured pickup snapshots in spawn order.
    pub fn iter(&self) -> impl Iterator<Item = &PickupSnapshot> {
        self.snapshots.iter()
    }

    /// Number of pickups lying in the arena.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the arena holds no pickups.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

/// Immutable representation of the player body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerSnapshot {
    /// Current position.
    pub position: Vec2,
    /// Current velocity.
    pub velocity: Vec2,
    /// Visual heading in radians.
    pub heading: f32,
    /// Collision radius.
    pub radius: f32,
}

/// Values the HUD collaborator displays, refreshed once per tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HudSnapshot {
    /// Current lifecycle phase.
    pub phase: SessionPhase,
    /// Current health.
    pub health: f32,
    /// Health ceiling.
    pub max_health: f32,
    /// Experience towards the next level.
    pub xp: u32,
    /// Experience needed for the next level.
    pub required_xp: u32,
    /// Current level.
    pub level: u32,
    /// Whole in-game seconds elapsed.
    pub elapsed_seconds: u32,
    /// Enemies killed by weapons.
    pub kill_count: u32,
}
