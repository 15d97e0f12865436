//! # Simulation Configuration
//!
//! All balance and capacity values in one struct, loaded from TOML once at
//! startup and passed by value at construction. There is no reload
//! broadcast: hosts that hot-reload balance files build a new `SimConfig`
//! and call `SimCore::reconfigure` explicitly.

use serde::{Deserialize, Serialize};

use crate::combat::DamageMode;
use crate::error::{SimError, SimResult};

/// Configuration for one simulation core.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Damage execution mode at startup.
    pub damage_mode: DamageMode,
    /// Probability of a critical hit, 0.0 to 1.0.
    pub crit_chance: f32,
    /// Damage multiplier applied on a critical hit.
    pub crit_multiplier: f32,
    /// Seed for the crit roll sequence. Fixed seed, fixed outcome.
    pub rng_seed: u64,
    /// Queued-mode ring capacity (rounded up to a power of two).
    pub damage_queue_capacity: usize,
    /// Damage-event records pre-allocated in the pool.
    pub damage_pool_size: usize,
    /// Concurrent enemy slots. This is the spawn budget, never exceeded.
    pub max_enemies: usize,
    /// Bosses expected live at once (roster pre-reservation only).
    pub max_bosses: usize,
    /// Hp fraction at which a boss enrages, 0.0 to 1.0.
    pub boss_enrage_fraction: f32,
    /// Bounded capacity of the outbound notification channel.
    pub event_capacity: usize,
    /// Simulation ticks per second.
    pub tick_rate: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            damage_mode: DamageMode::Queued,
            crit_chance: 0.1,
            crit_multiplier: 2.0,
            rng_seed: 0xA5_F411,
            damage_queue_capacity: 512,
            damage_pool_size: 512,
            max_enemies: 600,
            max_bosses: 8,
            boss_enrage_fraction: 0.5,
            event_capacity: 2048,
            tick_rate: 30,
        }
    }
}

impl SimConfig {
    /// Parses a config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::ConfigParse`] on malformed TOML and any
    /// validation error from [`Self::validate`].
    pub fn from_toml_str(text: &str) -> SimResult<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| SimError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a config file.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::ConfigRead`] if the file cannot be read, plus
    /// everything [`Self::from_toml_str`] can return.
    pub fn load(path: &std::path::Path) -> SimResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| SimError::ConfigRead(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// Validates field ranges.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfig`] naming the first offending field.
    pub fn validate(&self) -> SimResult<()> {
        if !(0.0..=1.0).contains(&self.crit_chance) {
            return Err(SimError::InvalidConfig {
                field: "crit_chance",
                reason: format!("{} is outside 0.0..=1.0", self.crit_chance),
            });
        }
        if self.crit_multiplier < 1.0 {
            return Err(SimError::InvalidConfig {
                field: "crit_multiplier",
                reason: format!("{} must be at least 1.0", self.crit_multiplier),
            });
        }
        if !(0.0..=1.0).contains(&self.boss_enrage_fraction) {
            return Err(SimError::InvalidConfig {
                field: "boss_enrage_fraction",
                reason: format!("{} is outside 0.0..=1.0", self.boss_enrage_fraction),
            });
        }
        if self.damage_queue_capacity == 0 {
            return Err(SimError::InvalidConfig {
                field: "damage_queue_capacity",
                reason: "must be non-zero".into(),
            });
        }
        if self.max_enemies == 0 {
            return Err(SimError::InvalidConfig {
                field: "max_enemies",
                reason: "must be non-zero".into(),
            });
        }
        if self.tick_rate == 0 {
            return Err(SimError::InvalidConfig {
                field: "tick_rate",
                reason: "must be non-zero".into(),
            });
        }
        Ok(())
    }
}
