//! # Boss Roster
//!
//! Active set of heavyweight entities, batch-processed once per tick.
//!
//! Backed by a swap-remove registry so the per-tick walk touches only live
//! bosses and death removal is O(1). Movement and attack execution belong
//! to host collaborators; the roster owns phase timing and the one-way
//! enrage transition.

use crossbeam_channel::Sender;
use serde::{Deserialize, Serialize};

use ashfall_core::SwapRegistry;

use crate::entity::{EntityId, EntityTracker};
use crate::events::CombatEvent;

/// Closed set of boss kinds with baked-in base parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BossKind {
    /// Slow juggernaut, long special windup.
    Cinderlord,
    /// Fast skirmisher, short special windup.
    Ossuarch,
    /// Area denial caster.
    Vilemother,
}

impl BossKind {
    /// Base maximum health.
    #[must_use]
    pub const fn max_hp(self) -> f32 {
        match self {
            Self::Cinderlord => 4000.0,
            Self::Ossuarch => 2200.0,
            Self::Vilemother => 3000.0,
        }
    }

    /// Seconds between special-attack windups.
    #[must_use]
    pub const fn special_interval(self) -> f32 {
        match self {
            Self::Cinderlord => 9.0,
            Self::Ossuarch => 4.5,
            Self::Vilemother => 7.0,
        }
    }

    /// Opaque reward payload surfaced on kill.
    #[must_use]
    pub const fn reward(self) -> u32 {
        match self {
            Self::Cinderlord => 500,
            Self::Ossuarch => 350,
            Self::Vilemother => 420,
        }
    }

    /// Display tag for logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cinderlord => "cinderlord",
            Self::Ossuarch => "ossuarch",
            Self::Vilemother => "vilemother",
        }
    }
}

/// Per-boss simulation state.
#[derive(Clone, Copy, Debug)]
pub struct BossState {
    /// Which boss this is.
    pub kind: BossKind,
    /// Seconds until the next special-attack windup completes.
    pub phase_timer: f32,
    /// One-way enrage flag, set when hp crosses the configured fraction.
    pub enraged: bool,
}

impl BossState {
    /// Fresh state with the phase timer wound to the kind's interval.
    #[must_use]
    pub const fn new(kind: BossKind) -> Self {
        Self {
            kind,
            phase_timer: kind.special_interval(),
            enraged: false,
        }
    }
}

/// Dense active set of bosses, batch-updated once per tick.
pub struct BossRoster {
    registry: SwapRegistry<EntityId, BossState>,
    /// Hp fraction at which a boss enrages.
    enrage_fraction: f32,
}

impl BossRoster {
    /// Creates a roster with room for `capacity` bosses pre-reserved.
    #[must_use]
    pub fn new(capacity: usize, enrage_fraction: f32) -> Self {
        Self {
            registry: SwapRegistry::with_capacity(capacity),
            enrage_fraction,
        }
    }

    /// Registers a boss. Duplicate registration is an idempotent no-op.
    pub fn register(&mut self, id: EntityId, kind: BossKind) -> bool {
        let inserted = self.registry.insert(id, BossState::new(kind));
        if !inserted {
            tracing::warn!(id = %id, kind = kind.as_str(), "duplicate boss registration ignored");
        }
        inserted
    }

    /// Unregisters a boss (death or teardown). Missing ids are a no-op.
    pub fn unregister(&mut self, id: EntityId) -> Option<BossState> {
        self.registry.remove(id)
    }

    /// Number of live bosses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    /// Returns true if no bosses are active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Returns true if `id` is an active boss.
    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.registry.contains(id)
    }

    /// The dense `(id, state)` view for host-side HUD queries.
    #[must_use]
    pub fn states(&self) -> &[(EntityId, BossState)] {
        self.registry.entries()
    }

    /// Updates the enrage threshold (explicit reconfigure, no broadcast).
    pub fn set_enrage_fraction(&mut self, fraction: f32) {
        self.enrage_fraction = fraction;
    }

    /// Per-tick batch update: phase timers and enrage transitions.
    ///
    /// Walks the dense array once. Emits `BossSpecialReady` when a windup
    /// completes and `BossEnraged` the first time hp crosses the threshold.
    pub fn update(&mut self, dt: f32, tracker: &EntityTracker, events: &Sender<CombatEvent>) {
        for (id, state) in self.registry.iter_mut() {
            state.phase_timer -= dt;
            if state.phase_timer <= 0.0 {
                state.phase_timer += state.kind.special_interval();
                let _ = events.try_send(CombatEvent::BossSpecialReady {
                    boss: id,
                    kind: state.kind,
                });
            }

            if !state.enraged {
                if let Some(record) = tracker.get(id) {
                    if record.hp_fraction() <= self.enrage_fraction {
                        state.enraged = true;
                        let _ = events.try_send(CombatEvent::BossEnraged {
                            boss: id,
                            kind: state.kind,
                        });
                    }
                }
            }
        }
    }

    /// Removes every boss (scene teardown).
    pub fn clear(&mut self) {
        self.registry.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{EntityKind, EntityRecord};
    use crate::events::EventChannel;
    use ashfall_core::Vec2;

    fn tracked_boss(tracker: &mut EntityTracker, id: u64, kind: BossKind) -> EntityId {
        let entity = EntityId::new(id);
        tracker.register(EntityRecord::new(
            entity,
            EntityKind::Boss,
            Vec2::ZERO,
            kind.max_hp(),
            kind.reward(),
        ));
        entity
    }

    #[test]
    fn test_register_is_idempotent() {
        let mut roster = BossRoster::new(4, 0.5);
        let id = EntityId::new(1);

        assert!(roster.register(id, BossKind::Cinderlord));
        assert!(!roster.register(id, BossKind::Ossuarch));
        assert_eq!(roster.len(), 1);
        assert_eq!(roster.states()[0].1.kind, BossKind::Cinderlord);
    }

    #[test]
    fn test_unregister_middle_keeps_rest_resolvable() {
        let mut roster = BossRoster::new(8, 0.5);
        let ids: Vec<EntityId> = (0..5).map(EntityId::new).collect();
        for &id in &ids {
            roster.register(id, BossKind::Ossuarch);
        }

        assert!(roster.unregister(ids[2]).is_some());

        assert_eq!(roster.len(), 4);
        assert!(!roster.contains(ids[2]));
        for &id in [ids[0], ids[1], ids[3], ids[4]].iter() {
            assert!(roster.contains(id));
        }
    }

    #[test]
    fn test_special_windup_fires_and_rewinds() {
        let mut tracker = EntityTracker::new();
        let channel = EventChannel::new(16);
        let mut roster = BossRoster::new(4, 0.5);

        let id = tracked_boss(&mut tracker, 1, BossKind::Ossuarch);
        roster.register(id, BossKind::Ossuarch);

        // One full interval of ticks fires exactly one windup.
        let dt = 0.5;
        for _ in 0..9 {
            roster.update(dt, &tracker, &channel.sender());
        }

        assert!(matches!(
            channel.try_recv(),
            Ok(CombatEvent::BossSpecialReady { .. })
        ));
        assert!(channel.try_recv().is_err());
    }

    #[test]
    fn test_enrage_fires_once() {
        let mut tracker = EntityTracker::new();
        let channel = EventChannel::new(16);
        let mut roster = BossRoster::new(4, 0.5);

        let id = tracked_boss(&mut tracker, 1, BossKind::Cinderlord);
        roster.register(id, BossKind::Cinderlord);

        if let Some(record) = tracker.get_mut(id) {
            record.hp = record.max_hp * 0.4;
        }

        roster.update(0.1, &tracker, &channel.sender());
        roster.update(0.1, &tracker, &channel.sender());

        assert!(matches!(channel.try_recv(), Ok(CombatEvent::BossEnraged { .. })));
        assert!(channel.try_recv().is_err(), "enrage is one-way, fires once");
    }
}
