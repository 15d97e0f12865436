//! Fixed-timestep scheduling for the simulation tick.

mod tick;

pub use tick::{TickLoop, TickStats, SIM_TICK_RATE};
