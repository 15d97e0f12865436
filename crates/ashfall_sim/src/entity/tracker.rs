//! # Entity Tracker
//!
//! The single source of truth for what entities currently exist.
//!
//! Kind-indexed views are maintained incrementally on every registration,
//! death and removal - answering "all entities of kind K" never scans the
//! full entity table. Dead entities leave their kind view in the same call
//! that flips `alive`; their records survive until the end-of-tick sweep so
//! same-tick observers still see the final clamped hp.

use std::collections::{HashMap, HashSet};

use ashfall_core::Vec2;

use super::{EntityId, EntityKind, EntityRecord};

/// Registry of all live entities with O(1) lookup and kind views.
#[derive(Default)]
pub struct EntityTracker {
    /// Canonical records, keyed by id.
    entities: HashMap<EntityId, EntityRecord>,
    /// Ids of live entities, one set per kind.
    kind_views: [HashSet<EntityId>; EntityKind::COUNT],
}

impl EntityTracker {
    /// Creates an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a tracker with room for `capacity` entities pre-reserved.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entities: HashMap::with_capacity(capacity),
            kind_views: std::array::from_fn(|_| HashSet::new()),
        }
    }

    /// Number of tracked records, dead-but-unswept included.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns true if nothing is tracked.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Registers a new entity.
    ///
    /// A duplicate id is a logged no-op returning `false` - the existing
    /// record is left untouched.
    pub fn register(&mut self, record: EntityRecord) -> bool {
        if self.entities.contains_key(&record.id) {
            tracing::warn!(id = %record.id, kind = record.kind.as_str(), "duplicate entity registration ignored");
            return false;
        }

        self.kind_views[record.kind.index()].insert(record.id);
        self.entities.insert(record.id, record);
        true
    }

    /// Removes an entity entirely.
    ///
    /// Tolerated no-op when the id is unknown: two collaborators may race
    /// to remove the same dying entity.
    pub fn unregister(&mut self, id: EntityId) -> Option<EntityRecord> {
        let record = self.entities.remove(&id)?;
        self.kind_views[record.kind.index()].remove(&id);
        Some(record)
    }

    /// Looks up an entity.
    #[inline]
    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&EntityRecord> {
        self.entities.get(&id)
    }

    /// Looks up an entity mutably.
    #[inline]
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut EntityRecord> {
        self.entities.get_mut(&id)
    }

    /// Moves an entity. Unknown ids are a logged no-op.
    pub fn update_position(&mut self, id: EntityId, position: Vec2) -> bool {
        match self.entities.get_mut(&id) {
            Some(record) => {
                record.position = position;
                true
            }
            None => {
                tracing::debug!(id = %id, "position update for unknown entity ignored");
                false
            }
        }
    }

    /// Ids of all live entities of `kind`.
    ///
    /// O(1) to obtain; iterating is O(k) in the view size. Consumed by the
    /// radar/minimap collaborator on its own cadence.
    #[inline]
    #[must_use]
    pub fn ids_of_kind(&self, kind: EntityKind) -> &HashSet<EntityId> {
        &self.kind_views[kind.index()]
    }

    /// Flips an entity dead and purges it from its kind view.
    ///
    /// Returns `false` for unknown or already-dead ids; `alive` flips false
    /// at most once. The record stays queryable until [`Self::sweep`].
    pub fn mark_dead(&mut self, id: EntityId) -> bool {
        let Some(record) = self.entities.get_mut(&id) else {
            return false;
        };
        if !record.alive {
            return false;
        }

        record.alive = false;
        self.kind_views[record.kind.index()].remove(&id);
        true
    }

    /// Removes every dead record. Returns how many were purged.
    ///
    /// Called once per tick, after the damage drain.
    pub fn sweep(&mut self) -> usize {
        let before = self.entities.len();
        self.entities.retain(|_, record| record.alive);
        before - self.entities.len()
    }

    /// Bulk-removes all entities of `kind` (scene teardown).
    pub fn clear_kind(&mut self, kind: EntityKind) -> usize {
        let before = self.entities.len();
        self.entities.retain(|_, record| record.kind != kind);
        self.kind_views[kind.index()].clear();
        before - self.entities.len()
    }

    /// Resets the tracker to empty (scene teardown).
    pub fn reset(&mut self) {
        self.entities.clear();
        for view in &mut self.kind_views {
            view.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enemy(id: u64) -> EntityRecord {
        EntityRecord::new(EntityId::new(id), EntityKind::Enemy, Vec2::ZERO, 100.0, 1)
    }

    fn boss(id: u64) -> EntityRecord {
        EntityRecord::new(EntityId::new(id), EntityKind::Boss, Vec2::ZERO, 1000.0, 50)
    }

    #[test]
    fn test_register_and_lookup() {
        let mut tracker = EntityTracker::new();
        assert!(tracker.register(enemy(1)));

        let record = tracker.get(EntityId::new(1)).expect("registered entity");
        assert_eq!(record.kind, EntityKind::Enemy);
        assert!(tracker.ids_of_kind(EntityKind::Enemy).contains(&EntityId::new(1)));
    }

    #[test]
    fn test_duplicate_registration_is_noop() {
        let mut tracker = EntityTracker::new();
        assert!(tracker.register(enemy(1)));

        let mut imposter = enemy(1);
        imposter.max_hp = 9999.0;
        assert!(!tracker.register(imposter));

        let record = tracker.get(EntityId::new(1)).expect("original survives");
        assert!((record.max_hp - 100.0).abs() < f32::EPSILON);
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn test_unregister_unknown_is_tolerated() {
        let mut tracker = EntityTracker::new();
        assert!(tracker.unregister(EntityId::new(404)).is_none());
    }

    #[test]
    fn test_kind_views_are_disjoint_and_complete() {
        let mut tracker = EntityTracker::new();
        tracker.register(enemy(1));
        tracker.register(enemy(2));
        tracker.register(boss(3));

        assert_eq!(tracker.ids_of_kind(EntityKind::Enemy).len(), 2);
        assert_eq!(tracker.ids_of_kind(EntityKind::Boss).len(), 1);
        assert!(tracker.ids_of_kind(EntityKind::Player).is_empty());
    }

    #[test]
    fn test_mark_dead_purges_view_but_keeps_record() {
        let mut tracker = EntityTracker::new();
        tracker.register(enemy(1));

        assert!(tracker.mark_dead(EntityId::new(1)));
        // Flips at most once.
        assert!(!tracker.mark_dead(EntityId::new(1)));

        assert!(!tracker.ids_of_kind(EntityKind::Enemy).contains(&EntityId::new(1)));
        let record = tracker.get(EntityId::new(1)).expect("record survives until sweep");
        assert!(!record.alive);

        assert_eq!(tracker.sweep(), 1);
        assert!(tracker.get(EntityId::new(1)).is_none());
    }

    #[test]
    fn test_clear_kind_leaves_other_kinds() {
        let mut tracker = EntityTracker::new();
        tracker.register(enemy(1));
        tracker.register(enemy(2));
        tracker.register(boss(3));

        assert_eq!(tracker.clear_kind(EntityKind::Enemy), 2);
        assert_eq!(tracker.len(), 1);
        assert!(tracker.get(EntityId::new(3)).is_some());
    }
}
