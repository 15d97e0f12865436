//! # Pooled Damage-Event Record
//!
//! One record per queued hit, owned by the damage pool for its whole life.
//! Callers never retain a reference past the call that released it.

use crate::entity::EntityId;

use super::DamageTag;

/// A queued damage application, pool-owned.
///
/// `reset` must leave the record indistinguishable from
/// `DamageEvent::default()` while keeping the tag buffer's capacity -
/// truncate, never reallocate. A stale tag bleeding into the next hit is a
/// correctness bug.
#[derive(Debug, Default)]
pub struct DamageEvent {
    /// Entity the damage is aimed at.
    pub target: EntityId,
    /// Attacking entity, `None` for environmental damage.
    pub source: Option<EntityId>,
    /// Raw damage before crit resolution.
    pub base_damage: f32,
    /// Tags riding along with this hit.
    pub tags: Vec<DamageTag>,
    /// Damage actually applied, filled in during resolution.
    pub final_damage: f32,
    /// Whether the hit critted, filled in during resolution.
    pub is_crit: bool,
}

impl DamageEvent {
    /// Restores factory-default field values.
    ///
    /// The tag buffer is cleared in place; its capacity is retained so the
    /// record can be reused without reallocating.
    pub fn reset(&mut self) {
        self.target = EntityId::default();
        self.source = None;
        self.base_damage = 0.0;
        self.tags.clear();
        self.final_damage = 0.0;
        self.is_crit = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_clears_all_fields() {
        let mut event = DamageEvent {
            target: EntityId::new(9),
            source: Some(EntityId::new(1)),
            base_damage: 42.0,
            tags: vec![DamageTag::Fire, DamageTag::Area],
            final_damage: 84.0,
            is_crit: true,
        };
        let tag_capacity = event.tags.capacity();

        event.reset();

        assert_eq!(event.target, EntityId::default());
        assert_eq!(event.source, None);
        assert_eq!(event.base_damage, 0.0);
        assert!(event.tags.is_empty());
        assert_eq!(event.tags.capacity(), tag_capacity);
        assert_eq!(event.final_damage, 0.0);
        assert!(!event.is_crit);
    }
}
