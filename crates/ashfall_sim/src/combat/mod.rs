//! # Combat Pipeline
//!
//! All damage flows through [`DamageService`] - no other code path may
//! mutate hp. The service runs in immediate or queued mode; both produce
//! identical entity state for identical inputs and crit rolls.

mod damage;
mod event;

pub use damage::{DamageMode, DamageService, DamageStats};
pub use event::DamageEvent;

use serde::{Deserialize, Serialize};

/// Closed set of damage tags.
///
/// Tags are opaque to the core: they ride along on each hit and are
/// surfaced unchanged in the damage notification for host collaborators
/// (resistances, HUD icons, kill-feed text).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageTag {
    /// Close-range weapon hit.
    Melee,
    /// Projectile hit.
    Projectile,
    /// Area-of-effect hit.
    Area,
    /// Burning damage.
    Fire,
    /// Chilling damage.
    Frost,
    /// Damage over time.
    Poison,
}
