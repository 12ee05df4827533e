//! Experience accumulation, level-ups, and the upgrade table.

use std::time::Duration;

use arena_survivor_core::{PlayerProgress, PlayerStats, Upgrade, UpgradeOffer};

const FIRE_RATE_FLOOR_MS: f64 = 100.0;
const FIRE_RATE_FACTOR: f64 = 0.8;

/// Where the progression state machine currently stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProgressionState {
    /// No experience gathered towards the next level yet.
    Idle,
    /// Some experience gathered, threshold not reached.
    Accumulating,
    /// Threshold reached; stat changes wait for an upgrade choice.
    LevelingUp,
}

/// Side effect the world must perform after an upgrade was applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpgradeEffect {
    /// Only stats or progress changed.
    StatsChanged,
    /// The autofire entry must be restarted with the contained period.
    RestartAutofire(Duration),
}

type Transition = fn(&mut PlayerStats, &mut PlayerProgress);

const UPGRADE_TABLE: [(Upgrade, Transition); 8] = [
    (Upgrade::Damage, raise_damage),
    (Upgrade::AttackSpeed, quicken_fire_rate),
    (Upgrade::MoveSpeed, raise_move_speed),
    (Upgrade::Health, heal),
    (Upgrade::NewWeapon, raise_weapon_level),
    (Upgrade::Circular, raise_circular_level),
    (Upgrade::Burst, raise_burst_level),
    (Upgrade::Beam, raise_beam_level),
];

fn raise_damage(stats: &mut PlayerStats, _: &mut PlayerProgress) {
    stats.damage += 10.0;
}

fn quicken_fire_rate(stats: &mut PlayerStats, _: &mut PlayerProgress) {
    stats.fire_rate_ms = (stats.fire_rate_ms * FIRE_RATE_FACTOR).max(FIRE_RATE_FLOOR_MS);
}

fn raise_move_speed(stats: &mut PlayerStats, _: &mut PlayerProgress) {
    stats.move_speed += 200.0;
}

fn heal(_: &mut PlayerStats, progress: &mut PlayerProgress) {
    progress.health = (progress.health + 50.0).min(progress.max_health);
}

fn raise_weapon_level(stats: &mut PlayerStats, _: &mut PlayerProgress) {
    stats.weapon_level = stats.weapon_level.saturating_add(1);
}

fn raise_circular_level(stats: &mut PlayerStats, _: &mut PlayerProgress) {
    stats.circular_level = stats.circular_level.saturating_add(1);
}

fn raise_burst_level(stats: &mut PlayerStats, _: &mut PlayerProgress) {
    stats.burst_level = stats.burst_level.saturating_add(1);
}

fn raise_beam_level(stats: &mut PlayerStats, _: &mut PlayerProgress) {
    stats.beam_level = stats.beam_level.saturating_add(1);
}

/// Applies a catalog upgrade to the player's stats and progress.
pub fn apply_upgrade(
    upgrade: Upgrade,
    stats: &mut PlayerStats,
    progress: &mut PlayerProgress,
) -> UpgradeEffect {
    if let Some((_, transition)) = UPGRADE_TABLE.iter().find(|(entry, _)| *entry == upgrade) {
        transition(stats, progress);
    }

    if upgrade == Upgrade::AttackSpeed {
        UpgradeEffect::RestartAutofire(stats.fire_period())
    } else {
        UpgradeEffect::StatsChanged
    }
}

/// Experience threshold that follows `required_xp`, i.e. `floor(required_xp * 1.5)`.
#[must_use]
pub fn next_required_xp(required_xp: u32) -> u32 {
    required_xp.saturating_add(required_xp / 2)
}

/// Level reached by a single pickup collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct LevelUp {
    pub(crate) level: u32,
    pub(crate) required_xp: u32,
}

#[derive(Debug)]
pub(crate) struct Progression {
    stats: PlayerStats,
    progress: PlayerProgress,
    state: ProgressionState,
    offers: Vec<UpgradeOffer>,
}

impl Progression {
    pub(crate) fn new(stats: PlayerStats, progress: PlayerProgress) -> Self {
        let state = if progress.xp == 0 {
            ProgressionState::Idle
        } else {
            ProgressionState::Accumulating
        };
        Self {
            stats,
            progress,
            state,
            offers: Vec::new(),
        }
    }

    pub(crate) fn stats(&self) -> &PlayerStats {
        &self.stats
    }

    pub(crate) fn progress(&self) -> &PlayerProgress {
        &self.progress
    }

    pub(crate) fn state(&self) -> ProgressionState {
        self.state
    }

    pub(crate) fn offers(&self) -> &[UpgradeOffer] {
        &self.offers
    }

    /// Adds experience and levels up at most once, even if the gain would
    /// cross several thresholds.
    pub(crate) fn collect(&mut self, xp: u32) -> Option<LevelUp> {
        self.progress.xp = self.progress.xp.saturating_add(xp);
        if self.progress.xp < self.progress.required_xp {
            self.state = ProgressionState::Accumulating;
            return None;
        }

        self.progress.level = self.progress.level.saturating_add(1);
        self.progress.xp = 0;
        self.progress.required_xp = next_required_xp(self.progress.required_xp);
        self.state = ProgressionState::LevelingUp;
        Some(LevelUp {
            level: self.progress.level,
            required_xp: self.progress.required_xp,
        })
    }

    /// Subtracts health without clamping and returns the new value.
    pub(crate) fn take_damage(&mut self, amount: f32) -> f32 {
        self.progress.health -= amount;
        self.progress.health
    }

    pub(crate) fn set_offers(&mut self, offers: Vec<UpgradeOffer>) {
        self.offers = offers;
    }

    /// Leaves the level-up state, applying the upgrade if one was recognised.
    pub(crate) fn choose(&mut self, upgrade: Option<Upgrade>) -> Option<UpgradeEffect> {
        let effect =
            upgrade.map(|upgrade| apply_upgrade(upgrade, &mut self.stats, &mut self.progress));
        self.offers.clear();
        self.state = if self.progress.xp == 0 {
            ProgressionState::Idle
        } else {
            ProgressionState::Accumulating
        };
        effect
    }
}
