//! Reusable-record memory management for the damage pipeline.

mod object_pool;

pub use object_pool::ObjectPool;
