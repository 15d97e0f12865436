//! # Enemy Slot Pool
//!
//! Fixed-capacity spawn slots for regular horde units.
//!
//! The slot count is the concurrent-enemy budget: spawning past it fails
//! (the wave director backs off), it never allocates more. A slot freed by
//! death or despawn goes back to the free set, not to the allocator. The
//! active set is a swap-remove registry so per-tick iteration and removal
//! stay O(1) with no holes.

use serde::{Deserialize, Serialize};

use ashfall_core::{SwapRegistry, Vec2};

use crate::entity::{EntityId, EntityKind, EntityRecord, EntityTracker};

/// Closed set of regular enemy kinds with baked-in base parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyKind {
    /// Slow melee shambler, the horde filler.
    Husk,
    /// Fast flanker with low health.
    Stalker,
    /// Ranged unit, keeps distance.
    Spitter,
}

impl EnemyKind {
    /// Base maximum health.
    #[must_use]
    pub const fn max_hp(self) -> f32 {
        match self {
            Self::Husk => 100.0,
            Self::Stalker => 55.0,
            Self::Spitter => 70.0,
        }
    }

    /// Contact damage dealt to the player, surfaced to combat collaborators.
    #[must_use]
    pub const fn contact_damage(self) -> f32 {
        match self {
            Self::Husk => 8.0,
            Self::Stalker => 5.0,
            Self::Spitter => 3.0,
        }
    }

    /// Opaque reward payload surfaced on kill.
    #[must_use]
    pub const fn reward(self) -> u32 {
        match self {
            Self::Husk => 3,
            Self::Stalker => 5,
            Self::Spitter => 6,
        }
    }

    /// Display tag for logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Husk => "husk",
            Self::Stalker => "stalker",
            Self::Spitter => "spitter",
        }
    }
}

/// A preallocated spawn slot.
///
/// The index is stable for the enemy's lifetime; hosts may use it to key
/// parallel render-side arrays.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpawnSlot(u16);

impl SpawnSlot {
    /// Slot index within the pool, `0..capacity`.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Fixed-capacity slot pool for regular enemies.
pub struct EnemyPool {
    /// Active enemies and the slot each occupies.
    active: SwapRegistry<EntityId, SpawnSlot>,
    /// Slots ready for reuse.
    free: Vec<SpawnSlot>,
    capacity: usize,
}

impl EnemyPool {
    /// Creates a pool with `capacity` slots, all memory allocated up front.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero or exceeds `u16::MAX`.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "Capacity must be greater than zero");
        assert!(capacity <= usize::from(u16::MAX), "Capacity cannot exceed u16::MAX");

        #[allow(clippy::cast_possible_truncation)]
        let free: Vec<SpawnSlot> = (0..capacity as u16).rev().map(SpawnSlot).collect();

        Self {
            active: SwapRegistry::with_capacity(capacity),
            free,
            capacity,
        }
    }

    /// The fixed slot budget.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Enemies currently occupying slots.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.active.len()
    }

    /// Slots ready for reuse.
    #[must_use]
    pub fn free_count(&self) -> usize {
        self.free.len()
    }

    /// Spawns an enemy into a free slot and registers it with the tracker.
    ///
    /// Returns `None` when the budget is exhausted or the id is already
    /// tracked - both are expected backoffs, not errors.
    pub fn spawn(
        &mut self,
        tracker: &mut EntityTracker,
        id: EntityId,
        kind: EnemyKind,
        position: Vec2,
    ) -> Option<SpawnSlot> {
        let Some(slot) = self.free.pop() else {
            tracing::debug!(kind = kind.as_str(), "enemy spawn budget exhausted");
            return None;
        };

        let record = EntityRecord::new(id, EntityKind::Enemy, position, kind.max_hp(), kind.reward());
        if !tracker.register(record) {
            self.free.push(slot);
            return None;
        }

        self.active.insert(id, slot);
        Some(slot)
    }

    /// Returns an enemy's slot to the free set.
    ///
    /// Called on death or explicit despawn. Unknown ids are a tolerated
    /// no-op (two collaborators may race to remove the same enemy).
    pub fn release_slot(&mut self, id: EntityId) -> bool {
        match self.active.remove(id) {
            Some(slot) => {
                self.free.push(slot);
                true
            }
            None => false,
        }
    }

    /// The slot an active enemy occupies.
    #[must_use]
    pub fn slot_of(&self, id: EntityId) -> Option<SpawnSlot> {
        self.active.get(id).copied()
    }

    /// Recycles every slot (scene teardown). Tracker records are cleared
    /// separately by the teardown collaborator.
    pub fn reset(&mut self) {
        for &(_, slot) in self.active.entries() {
            self.free.push(slot);
        }
        self.active.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_consumes_budget() {
        let mut tracker = EntityTracker::new();
        let mut pool = EnemyPool::new(2);

        assert!(pool
            .spawn(&mut tracker, EntityId::new(1), EnemyKind::Husk, Vec2::ZERO)
            .is_some());
        assert!(pool
            .spawn(&mut tracker, EntityId::new(2), EnemyKind::Stalker, Vec2::ZERO)
            .is_some());
        assert!(pool
            .spawn(&mut tracker, EntityId::new(3), EnemyKind::Husk, Vec2::ZERO)
            .is_none());

        assert_eq!(pool.live_count(), 2);
        assert_eq!(pool.free_count(), 0);
        assert_eq!(tracker.len(), 2);
    }

    #[test]
    fn test_release_returns_slot_not_memory() {
        let mut tracker = EntityTracker::new();
        let mut pool = EnemyPool::new(2);

        let slot = pool
            .spawn(&mut tracker, EntityId::new(1), EnemyKind::Husk, Vec2::ZERO)
            .expect("budget available");
        assert!(pool.release_slot(EntityId::new(1)));
        assert!(!pool.release_slot(EntityId::new(1)), "double release is a no-op");

        // The same slot comes back for the next spawn.
        tracker.unregister(EntityId::new(1));
        let reused = pool
            .spawn(&mut tracker, EntityId::new(2), EnemyKind::Spitter, Vec2::ZERO)
            .expect("slot recycled");
        assert_eq!(reused, slot);
        assert_eq!(pool.capacity(), 2);
    }

    #[test]
    fn test_duplicate_id_refunds_slot() {
        let mut tracker = EntityTracker::new();
        let mut pool = EnemyPool::new(4);

        assert!(pool
            .spawn(&mut tracker, EntityId::new(1), EnemyKind::Husk, Vec2::ZERO)
            .is_some());
        assert!(pool
            .spawn(&mut tracker, EntityId::new(1), EnemyKind::Husk, Vec2::ZERO)
            .is_none());

        assert_eq!(pool.live_count(), 1);
        assert_eq!(pool.free_count(), 3, "failed spawn must refund its slot");
    }

    #[test]
    fn test_reset_recycles_all_slots() {
        let mut tracker = EntityTracker::new();
        let mut pool = EnemyPool::new(4);
        for i in 0..3 {
            pool.spawn(&mut tracker, EntityId::new(i), EnemyKind::Husk, Vec2::ZERO);
        }

        pool.reset();

        assert_eq!(pool.live_count(), 0);
        assert_eq!(pool.free_count(), 4);
    }
}
