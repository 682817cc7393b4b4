use std::sync::atomic::{AtomicU32, Ordering};

/// Monotonic identifier source.
///
/// Every call to [`IdAllocator::next`] returns a value strictly greater than
/// all values handed out before it, starting at 1. Values are never reused.
/// Allocation is an atomic increment-and-fetch, so an allocator can be shared
/// between threads without a lock.
#[derive(Debug, Default)]
pub struct IdAllocator {
    last: AtomicU32,
}

impl IdAllocator {
    pub const fn new() -> Self {
        Self {
            last: AtomicU32::new(0),
        }
    }

    /// Allocate the next identifier.
    #[inline]
    pub fn next(&self) -> u32 {
        self.last.fetch_add(1, Ordering::AcqRel) + 1
    }

    /// Allocate the next identifier, never returning a value `<= floor`.
    ///
    /// Used when part of the identifier space may already be taken by state
    /// the allocator did not hand out itself (e.g. parts already in a store).
    pub fn next_above(&self, floor: u32) -> u32 {
        let prev = match self
            .last
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |cur| {
                Some(cur.max(floor) + 1)
            }) {
            Ok(prev) | Err(prev) => prev,
        };
        prev.max(floor) + 1
    }

    /// The most recently allocated identifier, or 0 if none.
    #[inline]
    pub fn last(&self) -> u32 {
        self.last.load(Ordering::Acquire)
    }
}
