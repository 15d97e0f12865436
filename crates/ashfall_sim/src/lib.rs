//! # ASHFALL Simulation Core
//!
//! The per-tick entity update and damage-application pipeline:
//! - Hundreds of simultaneously live entities, no per-frame heap allocation
//! - One entry point for all damage, immediate or queued-and-batched
//! - Fixed-capacity event queue with deliberate load shedding
//!
//! ## Boundaries
//!
//! This crate decides no game rules: damage amounts, crit parameters and
//! reward values arrive as opaque numeric inputs from config and callers.
//! Rendering, input, audio, persistence and scene management live in host
//! collaborators wired up through [`events::EventChannel`].
//!
//! ## Threading
//!
//! Single logical thread of simulation ticks. All calls are synchronous and
//! complete within the calling tick; multi-threaded hosts must funnel every
//! mutating call through the tick-owning thread.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

pub mod boss;
pub mod combat;
pub mod config;
pub mod enemy;
pub mod entity;
pub mod error;
pub mod events;
pub mod sim;
pub mod world;

pub use boss::{BossKind, BossRoster, BossState};
pub use combat::{DamageMode, DamageService, DamageStats, DamageTag};
pub use config::SimConfig;
pub use enemy::{EnemyKind, EnemyPool, SpawnSlot};
pub use entity::{EntityId, EntityKind, EntityRecord, EntityTracker};
pub use error::{SimError, SimResult};
pub use events::{CombatEvent, EventChannel};
pub use sim::{SimCore, TickSummary};
pub use world::SimWorld;
