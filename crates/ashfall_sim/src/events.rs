//! # Combat Notifications
//!
//! Fire-and-forget events for host collaborators: visual feedback, HUD,
//! kill rewards, radar. The core holds only a sender and uses `try_send` -
//! a saturated host loses notifications, it never stalls the tick.
//!
//! The channel (and every receiver) is owned by the host application;
//! nothing in the core keeps subscription state.

use ashfall_core::Vec2;

use crate::boss::BossKind;
use crate::combat::DamageTag;
use crate::entity::{EntityId, EntityKind};

/// Events emitted by the simulation core.
#[derive(Clone, Debug)]
pub enum CombatEvent {
    /// Damage landed on an entity.
    DamageApplied {
        /// Who was hit.
        target: EntityId,
        /// Who hit them, `None` for environmental damage.
        source: Option<EntityId>,
        /// Damage after crit resolution.
        final_damage: f32,
        /// Whether the hit critted.
        is_crit: bool,
        /// Tags carried by the hit.
        tags: Vec<DamageTag>,
    },

    /// An entity died.
    EntityKilled {
        /// Who died.
        entity: EntityId,
        /// Their kind tag.
        kind: EntityKind,
        /// Where they died (drop/VFX spawn point).
        position: Vec2,
        /// Opaque reward payload for XP/loot collaborators.
        reward: u32,
    },

    /// A boss crossed its enrage threshold.
    BossEnraged {
        /// The boss entity.
        boss: EntityId,
        /// Its kind.
        kind: BossKind,
    },

    /// A boss finished a special-attack windup.
    BossSpecialReady {
        /// The boss entity.
        boss: EntityId,
        /// Its kind.
        kind: BossKind,
    },
}

/// Bounded channel for routing [`CombatEvent`]s to the host.
///
/// Thin wrapper over crossbeam so hosts can hand clones of the sender to
/// the core and keep the receiver on whatever cadence suits them.
pub struct EventChannel<T> {
    sender: crossbeam_channel::Sender<T>,
    receiver: crossbeam_channel::Receiver<T>,
}

impl<T> EventChannel<T> {
    /// Creates a bounded channel.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = crossbeam_channel::bounded(capacity);
        Self { sender, receiver }
    }

    /// Sends without blocking; a full channel drops the event.
    pub fn try_send(&self, event: T) -> Result<(), crossbeam_channel::TrySendError<T>> {
        self.sender.try_send(event)
    }

    /// Receives without blocking.
    pub fn try_recv(&self) -> Result<T, crossbeam_channel::TryRecvError> {
        self.receiver.try_recv()
    }

    /// A sender clone to hand to the core.
    #[must_use]
    pub fn sender(&self) -> crossbeam_channel::Sender<T> {
        self.sender.clone()
    }

    /// A receiver clone for a host consumer.
    #[must_use]
    pub fn receiver(&self) -> crossbeam_channel::Receiver<T> {
        self.receiver.clone()
    }
}

impl<T> Default for EventChannel<T> {
    fn default() -> Self {
        Self::new(2048)
    }
}
