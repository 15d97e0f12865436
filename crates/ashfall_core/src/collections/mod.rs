//! Fixed-capacity and dense-set collections used by the simulation tick.

mod ring_buffer;
mod swap_registry;

pub use ring_buffer::RingBuffer;
pub use swap_registry::SwapRegistry;
