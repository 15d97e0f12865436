//! # Damage Service
//!
//! The single entry point for all damage in the simulation.
//!
//! Two execution modes, both permanent public contracts:
//! - **Immediate**: resolve synchronously against the tracker.
//! - **Queued**: park the hit in a pooled record on a fixed-capacity ring;
//!   a once-per-tick drain resolves the backlog in FIFO order.
//!
//! Given the same call sequence and the same crit-roll sequence, both modes
//! end in identical entity state. A full ring sheds the newest hit (the
//! record goes straight back to its pool) - under extreme load excess
//! damage is discarded rather than growing memory or blocking the caller.

use ashfall_core::{ObjectPool, RingBuffer};
use crossbeam_channel::Sender;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::config::SimConfig;
use crate::entity::EntityId;
use crate::events::CombatEvent;
use crate::world::SimWorld;

use super::{DamageEvent, DamageTag};

/// Damage execution mode, selectable at runtime.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageMode {
    /// Resolve each call synchronously.
    Immediate,
    /// Batch calls on the ring and resolve once per tick.
    #[default]
    Queued,
}

/// Running counters, for diagnostics and the stress harness.
#[derive(Clone, Copy, Debug, Default)]
pub struct DamageStats {
    /// Hits resolved against a live target.
    pub applied: u64,
    /// Hits discarded because the ring was full.
    pub shed: u64,
    /// Calls ignored because the target was unknown or already dead.
    pub stale: u64,
    /// Resolved hits that critted.
    pub crits: u64,
    /// Resolved hits that killed their target.
    pub kills: u64,
}

/// Outcome of one resolved hit.
struct Applied {
    final_damage: f32,
    is_crit: bool,
}

/// The only code path allowed to mutate hp.
pub struct DamageService {
    mode: DamageMode,
    /// Queued-mode backlog of pooled records.
    queue: RingBuffer<DamageEvent>,
    /// Record pool; every acquire is matched by exactly one release.
    pool: ObjectPool<DamageEvent>,
    /// Deterministic crit rolls. Fixed seed, fixed outcome.
    rng: ChaCha8Rng,
    crit_chance: f32,
    crit_multiplier: f32,
    /// Outbound notifications, fire-and-forget.
    events: Sender<CombatEvent>,
    stats: DamageStats,
}

impl DamageService {
    /// Builds a service from a validated config.
    ///
    /// The ring and pool are allocated here; the per-damage path performs
    /// no further allocation.
    #[must_use]
    pub fn new(config: &SimConfig, events: Sender<CombatEvent>) -> Self {
        Self {
            mode: config.damage_mode,
            queue: RingBuffer::new(config.damage_queue_capacity),
            pool: ObjectPool::new(config.damage_pool_size, DamageEvent::default, DamageEvent::reset),
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
            crit_chance: config.crit_chance,
            crit_multiplier: config.crit_multiplier,
            events,
            stats: DamageStats::default(),
        }
    }

    /// Current execution mode.
    #[must_use]
    pub const fn mode(&self) -> DamageMode {
        self.mode
    }

    /// Switches execution mode.
    ///
    /// Leaving queued mode drains the backlog first so no hit is lost or
    /// reordered across the switch.
    pub fn set_mode(&mut self, world: &mut SimWorld, mode: DamageMode) {
        if self.mode == DamageMode::Queued && mode == DamageMode::Immediate {
            self.drain(world);
        }
        self.mode = mode;
    }

    /// Applies new balance values without touching queue, pool or RNG state.
    pub fn reconfigure(&mut self, config: &SimConfig) {
        self.crit_chance = config.crit_chance;
        self.crit_multiplier = config.crit_multiplier;
    }

    /// Applies `base_damage` to `target`.
    ///
    /// Unknown or already-dead targets are an expected race and a logged
    /// no-op, never an error. In queued mode the hit lands at the next
    /// drain; a full ring sheds it.
    pub fn apply(
        &mut self,
        world: &mut SimWorld,
        target: EntityId,
        base_damage: f32,
        source: Option<EntityId>,
        tags: &[DamageTag],
    ) {
        // Lookup step, shared by both modes. Dead targets must not consume
        // a crit roll or a pooled record.
        match world.tracker.get(target) {
            Some(record) if record.alive => {}
            _ => {
                self.stats.stale += 1;
                tracing::debug!(target = %target, "damage to unknown or dead target ignored");
                return;
            }
        }

        match self.mode {
            DamageMode::Immediate => {
                self.resolve(world, target, base_damage, source, tags);
            }
            DamageMode::Queued => {
                let mut record = self.pool.acquire();
                record.target = target;
                record.source = source;
                record.base_damage = base_damage;
                record.tags.extend_from_slice(tags);

                if let Err(rejected) = self.queue.try_push(record) {
                    // Shedding policy: the newest hit is dropped and its
                    // record goes straight back to the pool.
                    self.pool.release(rejected);
                    self.stats.shed += 1;
                    tracing::debug!(target = %target, "damage queue full, hit shed");
                }
            }
        }
    }

    /// Resolves every queued hit in FIFO order. Returns the number drained.
    ///
    /// Called once per tick in queued mode. Each record is released back to
    /// the pool after resolution; the per-event lookup re-checks `alive`,
    /// so a kill earlier in the batch suppresses later hits on the same
    /// entity instead of resurrecting it.
    pub fn drain(&mut self, world: &mut SimWorld) -> usize {
        let mut drained = 0;

        while let Some(mut record) = self.queue.try_pop() {
            let outcome = self.resolve(
                world,
                record.target,
                record.base_damage,
                record.source,
                &record.tags,
            );
            if let Some(applied) = outcome {
                record.final_damage = applied.final_damage;
                record.is_crit = applied.is_crit;
            }
            self.pool.release(record);
            drained += 1;
        }

        drained
    }

    /// Discards the queued backlog without resolving it (scene teardown).
    ///
    /// Every record still returns to the pool - discarded work must not
    /// leak pooled objects.
    pub fn discard_queued(&mut self) -> usize {
        let mut discarded = 0;
        while let Some(record) = self.queue.try_pop() {
            self.pool.release(record);
            discarded += 1;
        }
        discarded
    }

    /// Queued hits waiting for the next drain.
    #[must_use]
    pub fn queued_len(&self) -> usize {
        self.queue.len()
    }

    /// Free records in the pool, for diagnostics and tests.
    #[must_use]
    pub fn pool_available(&self) -> usize {
        self.pool.available_count()
    }

    /// Running counters.
    #[must_use]
    pub const fn stats(&self) -> &DamageStats {
        &self.stats
    }

    /// Resolves one hit against the world. Returns `None` for stale targets.
    fn resolve(
        &mut self,
        world: &mut SimWorld,
        target: EntityId,
        base_damage: f32,
        source: Option<EntityId>,
        tags: &[DamageTag],
    ) -> Option<Applied> {
        let record = match world.tracker.get_mut(target) {
            Some(record) if record.alive => record,
            _ => {
                // Normal in queued mode: an earlier hit in this drain
                // already killed the target.
                self.stats.stale += 1;
                tracing::debug!(target = %target, "queued damage target gone, skipping");
                return None;
            }
        };

        let is_crit = self.rng.gen::<f32>() < self.crit_chance;
        let final_damage = if is_crit {
            base_damage * self.crit_multiplier
        } else {
            base_damage
        };

        record.hp = (record.hp - final_damage).max(0.0);
        let killed = record.hp <= 0.0;
        let kind = record.kind;
        let position = record.position;
        let reward = record.reward;

        self.stats.applied += 1;
        if is_crit {
            self.stats.crits += 1;
        }

        let _ = self.events.try_send(CombatEvent::DamageApplied {
            target,
            source,
            final_damage,
            is_crit,
            tags: tags.to_vec(),
        });

        if killed {
            self.stats.kills += 1;
            world.tracker.mark_dead(target);
            // Synchronous membership cleanup: roster and slot pool must not
            // see a dead entity on the next batch update.
            world.handle_death(target);
            let _ = self.events.try_send(CombatEvent::EntityKilled {
                entity: target,
                kind,
                position,
                reward,
            });
        }

        Some(Applied {
            final_damage,
            is_crit,
        })
    }
}
