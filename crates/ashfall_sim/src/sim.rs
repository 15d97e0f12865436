//! # Simulation Core
//!
//! Owns the world and the damage service and runs the per-tick sequence:
//! drain the damage backlog, batch-update the boss roster, sweep the dead.
//!
//! Hosts construct the core with a validated [`SimConfig`] and a sender
//! for the notification channel they own, then call the mutating API from
//! the tick-owning thread only.

use crossbeam_channel::Sender;

use ashfall_core::Vec2;

use crate::boss::BossKind;
use crate::combat::{DamageMode, DamageService, DamageStats, DamageTag};
use crate::config::SimConfig;
use crate::enemy::{EnemyKind, SpawnSlot};
use crate::entity::{EntityId, EntityKind, EntityRecord};
use crate::error::SimResult;
use crate::events::CombatEvent;
use crate::world::SimWorld;

/// What one tick did, for diagnostics and tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct TickSummary {
    /// Queued hits resolved this tick.
    pub drained: usize,
    /// Dead records purged this tick.
    pub swept: usize,
}

/// One simulation core: world state, damage pipeline, tick sequencing.
pub struct SimCore {
    config: SimConfig,
    world: SimWorld,
    damage: DamageService,
    events: Sender<CombatEvent>,
    ticks: u64,
}

impl SimCore {
    /// Builds a core from `config`, emitting notifications on `events`.
    ///
    /// All capacities are allocated here.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SimError::InvalidConfig`] if the config fails
    /// validation.
    pub fn new(config: SimConfig, events: Sender<CombatEvent>) -> SimResult<Self> {
        config.validate()?;

        Ok(Self {
            world: SimWorld::new(&config),
            damage: DamageService::new(&config, events.clone()),
            events,
            config,
            ticks: 0,
        })
    }

    /// Runs one fixed-timestep tick.
    pub fn tick(&mut self, dt: f32) -> TickSummary {
        let drained = if self.damage.mode() == DamageMode::Queued {
            self.damage.drain(&mut self.world)
        } else {
            0
        };

        self.world.bosses.update(dt, &self.world.tracker, &self.events);

        let swept = self.world.sweep();
        self.ticks += 1;

        TickSummary { drained, swept }
    }

    // =========================================================================
    // Entity lifecycle (spawn/movement collaborators)
    // =========================================================================

    /// Registers the player character.
    pub fn register_player(&mut self, id: EntityId, position: Vec2, max_hp: f32) -> bool {
        self.world
            .tracker
            .register(EntityRecord::new(id, EntityKind::Player, position, max_hp, 0))
    }

    /// Registers an arbitrary record (pickups, scripted actors).
    pub fn register_entity(&mut self, record: EntityRecord) -> bool {
        self.world.tracker.register(record)
    }

    /// Spawns a regular enemy into a free slot.
    pub fn spawn_enemy(
        &mut self,
        id: EntityId,
        kind: EnemyKind,
        position: Vec2,
    ) -> Option<SpawnSlot> {
        self.world.enemies.spawn(&mut self.world.tracker, id, kind, position)
    }

    /// Spawns a boss and enrolls it in the roster.
    pub fn spawn_boss(&mut self, id: EntityId, kind: BossKind, position: Vec2) -> bool {
        let record =
            EntityRecord::new(id, EntityKind::Boss, position, kind.max_hp(), kind.reward());
        if !self.world.tracker.register(record) {
            return false;
        }
        self.world.bosses.register(id, kind)
    }

    /// Explicitly removes an entity, cleaning up roster/slot membership.
    pub fn unregister_entity(&mut self, id: EntityId) -> bool {
        self.world.handle_death(id);
        self.world.tracker.unregister(id).is_some()
    }

    /// Moves an entity (called by external movement logic every tick).
    pub fn update_position(&mut self, id: EntityId, position: Vec2) -> bool {
        self.world.tracker.update_position(id, position)
    }

    // =========================================================================
    // Damage (combat/ability collaborators)
    // =========================================================================

    /// Applies damage to `target`. The single damage entry point.
    pub fn apply_damage(
        &mut self,
        target: EntityId,
        amount: f32,
        source: Option<EntityId>,
        tags: &[DamageTag],
    ) {
        self.damage.apply(&mut self.world, target, amount, source, tags);
    }

    /// Current damage execution mode.
    #[must_use]
    pub const fn damage_mode(&self) -> DamageMode {
        self.damage.mode()
    }

    /// Switches damage execution mode (drains pending work first).
    pub fn set_damage_mode(&mut self, mode: DamageMode) {
        self.damage.set_mode(&mut self.world, mode);
    }

    // =========================================================================
    // Queries (radar/HUD collaborators, on their own cadence)
    // =========================================================================

    /// Read-only world access.
    #[must_use]
    pub const fn world(&self) -> &SimWorld {
        &self.world
    }

    /// Looks up an entity.
    #[must_use]
    pub fn entity(&self, id: EntityId) -> Option<&EntityRecord> {
        self.world.tracker.get(id)
    }

    /// Ids of all live entities of `kind` (radar snapshot query).
    #[must_use]
    pub fn ids_of_kind(&self, kind: EntityKind) -> &std::collections::HashSet<EntityId> {
        self.world.tracker.ids_of_kind(kind)
    }

    /// Damage pipeline counters.
    #[must_use]
    pub const fn damage_stats(&self) -> &DamageStats {
        self.damage.stats()
    }

    /// Ticks run so far.
    #[must_use]
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &SimConfig {
        &self.config
    }

    // =========================================================================
    // Teardown / reconfiguration (scene collaborators)
    // =========================================================================

    /// Applies new balance values from a validated config.
    ///
    /// Capacities are fixed at construction and are not resized here.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SimError::InvalidConfig`] if `config` fails
    /// validation; the running config is left untouched.
    pub fn reconfigure(&mut self, config: &SimConfig) -> SimResult<()> {
        config.validate()?;
        self.damage.reconfigure(config);
        self.world.bosses.set_enrage_fraction(config.boss_enrage_fraction);
        self.config.crit_chance = config.crit_chance;
        self.config.crit_multiplier = config.crit_multiplier;
        self.config.boss_enrage_fraction = config.boss_enrage_fraction;
        Ok(())
    }

    /// Bulk-removes all entities of `kind`, recycling roster/slot state.
    pub fn clear_kind(&mut self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Enemy => self.world.enemies.reset(),
            EntityKind::Boss => self.world.bosses.clear(),
            EntityKind::Player | EntityKind::Pickup => {}
        }
        self.world.tracker.clear_kind(kind)
    }

    /// Full teardown: queued damage discarded (records back to the pool),
    /// every registry emptied.
    pub fn reset(&mut self) {
        self.damage.discard_queued();
        self.world.reset();
    }
}
