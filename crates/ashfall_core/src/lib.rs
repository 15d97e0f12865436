//! # ASHFALL Core
//!
//! Allocation-free primitives for the simulation tick:
//! - Hundreds of live entities at a fixed 30 Hz cadence
//! - Zero heap allocation in the per-tick hot path
//! - Bounded structures that shed load instead of growing
//!
//! ## Architecture Rules
//!
//! 1. **Allocate at setup, never per tick** - backing storage is created once
//! 2. **Fixed capacity is a contract** - full structures reject new work
//! 3. **Single-threaded by design** - callers serialize access through the
//!    tick owner; nothing in this crate takes a lock
//!
//! ## Example
//!
//! ```rust,ignore
//! use ashfall_core::RingBuffer;
//!
//! let mut queue: RingBuffer<u32> = RingBuffer::new(256);
//! // All memory allocated here, none during gameplay
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

pub mod collections;
pub mod math;
pub mod memory;
pub mod time;

pub use collections::{RingBuffer, SwapRegistry};
pub use math::Vec2;
pub use memory::ObjectPool;
pub use time::{TickLoop, TickStats};
