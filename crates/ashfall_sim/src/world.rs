//! # Simulation World
//!
//! The mutable state a simulation core owns: the entity tracker plus the
//! two swap-remove active sets built on top of it. Grouped so the damage
//! service can resolve hits and clean up memberships through one borrow.

use crate::boss::BossRoster;
use crate::config::SimConfig;
use crate::enemy::EnemyPool;
use crate::entity::{EntityId, EntityTracker};

/// All entity state owned by one simulation core.
pub struct SimWorld {
    /// Canonical entity registry.
    pub tracker: EntityTracker,
    /// Heavyweight active set, batch-updated per tick.
    pub bosses: BossRoster,
    /// Fixed-capacity spawn slots for regular enemies.
    pub enemies: EnemyPool,
}

impl SimWorld {
    /// Builds a world with all capacities pre-reserved from config.
    #[must_use]
    pub fn new(config: &SimConfig) -> Self {
        Self {
            tracker: EntityTracker::with_capacity(config.max_enemies + config.max_bosses + 8),
            bosses: BossRoster::new(config.max_bosses, config.boss_enrage_fraction),
            enemies: EnemyPool::new(config.max_enemies),
        }
    }

    /// Membership cleanup for a dying entity.
    ///
    /// Runs synchronously inside the lethal damage resolution, before the
    /// damage call returns: the boss roster and enemy slot pool must never
    /// carry a dead entity into the next batch update. Non-members no-op.
    pub fn handle_death(&mut self, id: EntityId) {
        self.bosses.unregister(id);
        self.enemies.release_slot(id);
    }

    /// Removes every dead record. Returns how many were purged.
    pub fn sweep(&mut self) -> usize {
        self.tracker.sweep()
    }

    /// Full teardown: tracker, roster and slots all reset.
    pub fn reset(&mut self) {
        self.tracker.reset();
        self.bosses.clear();
        self.enemies.reset();
    }
}
