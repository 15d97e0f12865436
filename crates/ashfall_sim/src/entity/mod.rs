//! # Entity Model
//!
//! Entities are identified by a stable opaque id for their whole lifetime
//! and carry a closed kind tag, validated at registration. Kind-specific
//! parameters live in the [`crate::enemy`] and [`crate::boss`] tables, not
//! in per-entity dictionaries.

mod tracker;

pub use tracker::EntityTracker;

use ashfall_core::Vec2;

/// Stable opaque identifier for a tracked entity.
///
/// Id allocation belongs to the spawning collaborator; the core only
/// requires uniqueness for the entity's lifetime.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct EntityId(u64);

impl EntityId {
    /// Creates an id from a raw value.
    #[inline]
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw id value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Closed set of entity kinds.
///
/// Immutable after registration. Kind-indexed views in the tracker are
/// keyed by this tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// The player character.
    Player,
    /// A regular horde unit.
    Enemy,
    /// A heavyweight unit, batch-updated by the boss roster.
    Boss,
    /// A collectible left on the field.
    Pickup,
}

impl EntityKind {
    /// Number of kinds, sizing the kind-view table.
    pub const COUNT: usize = 4;

    /// Stable index of this kind into kind-view tables.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Display tag for logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Player => "player",
            Self::Enemy => "enemy",
            Self::Boss => "boss",
            Self::Pickup => "pickup",
        }
    }
}

/// One live simulation actor.
#[derive(Clone, Debug)]
pub struct EntityRecord {
    /// Stable id, unique for this actor's lifetime.
    pub id: EntityId,
    /// Kind tag, immutable after registration.
    pub kind: EntityKind,
    /// Position on the simulation plane, moved every tick by external logic.
    pub position: Vec2,
    /// Current health. Clamped at zero, never negative.
    pub hp: f32,
    /// Maximum health.
    pub max_hp: f32,
    /// Opaque reward payload surfaced in the kill notification.
    pub reward: u32,
    /// Set false exactly once, on lethal damage or explicit removal.
    pub alive: bool,
}

impl EntityRecord {
    /// Creates a live record at full health.
    #[must_use]
    pub const fn new(id: EntityId, kind: EntityKind, position: Vec2, max_hp: f32, reward: u32) -> Self {
        Self {
            id,
            kind,
            position,
            hp: max_hp,
            max_hp,
            reward,
            alive: true,
        }
    }

    /// Current health as a fraction of maximum.
    #[must_use]
    pub fn hp_fraction(&self) -> f32 {
        if self.max_hp > 0.0 {
            self.hp / self.max_hp
        } else {
            0.0
        }
    }
}
