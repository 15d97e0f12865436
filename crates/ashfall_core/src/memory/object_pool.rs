//! # Object Pool
//!
//! Amortizes allocation for homogeneous records that are acquired and
//! released at high frequency (damage events, notifications).
//!
//! The pool is pre-populated at setup. When it runs dry it grows through the
//! factory callback rather than blocking or failing; growth is rare once the
//! simulation reaches steady state and is counted for diagnostics.

/// A pool of reusable records with factory/reset callbacks.
///
/// Every `acquire` must be matched by exactly one `release`. On release the
/// reset callback restores the record to factory-default state; a released
/// record carrying residual data (stale tags, old targets) is a correctness
/// bug, not an optimization concern.
///
/// # Thread Safety
///
/// Not thread-safe. One pool per simulation core.
///
/// # Example
///
/// ```rust,ignore
/// let mut pool = ObjectPool::new(64, Vec::<u8>::new, |v| v.clear());
///
/// let mut buf = pool.acquire();
/// buf.push(1);
/// pool.release(buf); // cleared, capacity retained
/// ```
pub struct ObjectPool<T> {
    /// Records ready for reuse.
    free: Vec<T>,
    /// Creates a record in factory-default state.
    factory: Box<dyn FnMut() -> T>,
    /// Restores a record to factory-default state.
    reset: Box<dyn Fn(&mut T)>,
    /// Total records ever created, including on-demand growth.
    created: usize,
}

impl<T> ObjectPool<T> {
    /// Creates a pool pre-populated with `initial_size` records.
    pub fn new<F, R>(initial_size: usize, mut factory: F, reset: R) -> Self
    where
        F: FnMut() -> T + 'static,
        R: Fn(&mut T) + 'static,
    {
        let free: Vec<T> = (0..initial_size).map(|_| factory()).collect();

        Self {
            free,
            factory: Box::new(factory),
            reset: Box::new(reset),
            created: initial_size,
        }
    }

    /// Takes a record from the pool, creating one if none are free.
    #[inline]
    pub fn acquire(&mut self) -> T {
        match self.free.pop() {
            Some(record) => record,
            None => {
                self.created += 1;
                (self.factory)()
            }
        }
    }

    /// Resets `record` to factory-default state and returns it to the pool.
    #[inline]
    pub fn release(&mut self, mut record: T) {
        (self.reset)(&mut record);
        self.free.push(record);
    }

    /// Number of records currently available, for diagnostics and tests.
    #[inline]
    #[must_use]
    pub fn available_count(&self) -> usize {
        self.free.len()
    }

    /// Total records created over the pool's lifetime.
    ///
    /// A value above the initial size means the pool grew on demand; a
    /// steadily climbing value means the initial size is too small.
    #[inline]
    #[must_use]
    pub const fn created_total(&self) -> usize {
        self.created
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Record {
        value: u32,
        tags: Vec<u8>,
    }

    impl Record {
        fn fresh() -> Self {
            Self {
                value: 0,
                tags: Vec::new(),
            }
        }
    }

    fn test_pool() -> ObjectPool<Record> {
        ObjectPool::new(2, Record::fresh, |r| {
            r.value = 0;
            r.tags.clear();
        })
    }

    #[test]
    fn test_prepopulated() {
        let pool = test_pool();
        assert_eq!(pool.available_count(), 2);
        assert_eq!(pool.created_total(), 2);
    }

    #[test]
    fn test_release_resets_to_factory_state() {
        let mut pool = test_pool();

        let mut record = pool.acquire();
        record.value = 42;
        record.tags.extend([1, 2, 3]);
        pool.release(record);

        // The next acquire must be indistinguishable from a fresh record.
        let next = pool.acquire();
        assert_eq!(next, Record::fresh());
    }

    #[test]
    fn test_reset_truncates_without_reallocating() {
        let mut pool = test_pool();

        let mut record = pool.acquire();
        record.tags.extend([1, 2, 3, 4]);
        let capacity = record.tags.capacity();
        pool.release(record);

        let next = pool.acquire();
        assert!(next.tags.is_empty());
        assert_eq!(next.tags.capacity(), capacity);
    }

    #[test]
    fn test_grows_when_exhausted() {
        let mut pool = test_pool();

        let a = pool.acquire();
        let b = pool.acquire();
        assert_eq!(pool.available_count(), 0);

        let c = pool.acquire();
        assert_eq!(pool.created_total(), 3);

        pool.release(a);
        pool.release(b);
        pool.release(c);
        assert_eq!(pool.available_count(), 3);
    }
}
