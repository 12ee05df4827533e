//! Session configuration loaded from TOML.

use std::{fs, path::Path, time::Duration};

use serde::Deserialize;
use thiserror::Error;

/// Errors raised while loading or validating a [`SessionConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config '{path}'")]
    Read {
        /// Path that was being read.
        path: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The configuration text is not valid TOML for this schema.
    #[error("failed to parse config")]
    Parse(#[from] toml::de::Error),
    /// The tick length is zero.
    #[error("tick_ms must be positive")]
    ZeroTick,
    /// The spawn margins on opposite edges leave no room to place spawns.
    #[error("world_size {world_size} leaves no room inside spawn_margin {spawn_margin}")]
    WorldTooSmall {
        /// Configured arena edge length.
        world_size: f32,
        /// Configured spawn margin.
        spawn_margin: f32,
    },
    /// The critical hit chance is not a probability.
    #[error("crit_chance {0} is outside [0, 1]")]
    CritChanceOutOfRange(f64),
    /// A numeric field is negative or not finite.
    #[error("{field} must be a finite, non-negative number")]
    InvalidNumber {
        /// Offending field name.
        field: &'static str,
    },
}

/// Tunable parameters of a simulation session.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    /// Root seed every random stream of the session derives from.
    pub seed: u64,
    /// Simulated milliseconds per step.
    pub tick_ms: u64,
    /// Edge length of the square arena.
    pub world_size: f32,
    /// Distance spawns keep from the arena edge.
    pub spawn_margin: f32,
    /// Health lost per enemy contact.
    pub contact_damage: f32,
    /// Probability of a critical hit.
    pub crit_chance: f64,
    /// Damage factor of a critical hit.
    pub crit_multiplier: f32,
    /// Experience granted per pickup.
    pub xp_per_pickup: u32,
    /// Enemies spawned when the session starts.
    pub initial_enemies: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: 0x5eed_a7e4_a000_0001,
            tick_ms: 16,
            world_size: 2_500.0,
            spawn_margin: 50.0,
            contact_damage: 10.0,
            crit_chance: 0.15,
            crit_multiplier: 2.0,
            xp_per_pickup: 20,
            initial_enemies: 5,
        }
    }
}

impl SessionConfig {
    /// Parses and validates a configuration from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses, and validates the configuration file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Checks every field for values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_ms == 0 {
            return Err(ConfigError::ZeroTick);
        }

        for (field, value) in [
            ("world_size", self.world_size),
            ("spawn_margin", self.spawn_margin),
            ("contact_damage", self.contact_damage),
            ("crit_multiplier", self.crit_multiplier),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidNumber { field });
            }
        }

        if !(0.0..=1.0).contains(&self.crit_chance) {
            return Err(ConfigError::CritChanceOutOfRange(self.crit_chance));
        }

        if self.world_size <= 2.0 * self.spawn_margin {
            return Err(ConfigError::WorldTooSmall {
                world_size: self.world_size,
                spawn_margin: self.spawn_margin,
            });
        }

        Ok(())
    }

    /// Simulated time advanced by one step.
    #[must_use]
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}
