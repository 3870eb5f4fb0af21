use std::sync::atomic::{AtomicU64, Ordering};

// Keeps the counter on its own cache line, away from the lock table.
#[repr(align(64))]
struct CachePadded<T>(T);

/// Counts lock acquisitions that had to wait for another holder.
///
/// Only ever incremented during a run, so readings are monotonic.
pub struct ContentionTracker {
    conflicts: CachePadded<AtomicU64>,
}

impl ContentionTracker {
    pub const fn new() -> Self {
        Self {
            conflicts: CachePadded(AtomicU64::new(0)),
        }
    }

    pub fn record(&self) {
        // Nothing is published through this counter, so Relaxed is enough.
        self.conflicts.0.fetch_add(1, Ordering::Relaxed);
    }

    pub fn count(&self) -> u64 {
        self.conflicts.0.load(Ordering::Relaxed)
    }
}

impl Default for ContentionTracker {
    fn default() -> Self {
        Self::new()
    }
}
