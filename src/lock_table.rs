use crate::contention::ContentionTracker;
use crate::rwlock::{RwLock, WriteGuard};
use crate::touch::{MAX_TOUCH, TouchSet};

pub type CellGuard<'a> = WriteGuard<'a, ()>;

/// One lock per array cell.
pub struct LockTable {
    cells: Box<[RwLock<()>]>,
}

impl LockTable {
    pub fn new(len: usize) -> Self {
        Self {
            cells: (0..len).map(|_| RwLock::new(())).collect(),
        }
    }

    /// Non-blocking; `None` if the cell is already held.
    pub fn try_acquire_exclusive(&self, idx: usize) -> Option<CellGuard<'_>> {
        self.cells[idx].try_write()
    }

    pub fn acquire_exclusive(&self, idx: usize) -> CellGuard<'_> {
        self.cells[idx].write()
    }

    pub fn is_held(&self, idx: usize) -> bool {
        self.cells[idx].is_locked()
    }

    /// Locks every cell of `set` in ascending order, blocking as needed.
    ///
    /// With a tracker, each cell is tried first and a failed try is recorded
    /// before falling back to the blocking path.
    pub fn acquire_ordered(
        &self,
        set: &TouchSet,
        tracker: Option<&ContentionTracker>,
    ) -> HeldLocks<'_> {
        let mut held = HeldLocks::default();

        for &idx in set.as_slice() {
            let guard = match tracker {
                None => self.acquire_exclusive(idx),
                Some(tracker) => match self.try_acquire_exclusive(idx) {
                    Some(guard) => guard,
                    None => {
                        tracker.record();
                        self.acquire_exclusive(idx)
                    }
                },
            };
            held.push(guard);
        }
        held
    }
}

/// Guards for one touch set. Dropping it releases the cells in reverse
/// acquisition order.
#[derive(Default)]
pub struct HeldLocks<'a> {
    guards: [Option<CellGuard<'a>>; MAX_TOUCH],
    len: usize,
}

impl<'a> HeldLocks<'a> {
    fn push(&mut self, guard: CellGuard<'a>) {
        self.guards[self.len] = Some(guard);
        self.len += 1;
    }
}

impl Drop for HeldLocks<'_> {
    fn drop(&mut self) {
        for slot in self.guards[..self.len].iter_mut().rev() {
            drop(slot.take());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::touch::UpdatePlan;

    #[test]
    fn try_acquire_is_exclusive() {
        let table = LockTable::new(4);
        let g = table.try_acquire_exclusive(2).expect("free");
        assert!(table.try_acquire_exclusive(2).is_none());
        assert!(table.try_acquire_exclusive(1).is_some());
        drop(g);
        assert!(!table.is_held(2));
    }

    #[test]
    fn ordered_acquire_holds_whole_set_until_drop() {
        let table = LockTable::new(10);
        let set = UpdatePlan::new(8, 3, 10).touch_set();

        let held = table.acquire_ordered(&set, None);
        for idx in 0..10 {
            assert_eq!(table.is_held(idx), set.contains(idx));
        }
        drop(held);
        assert!((0..10).all(|idx| !table.is_held(idx)));
    }

    #[test]
    fn overlapping_set_locks_each_cell_once() {
        // Dest inside sources: a second lock on the same cell would hang.
        let table = LockTable::new(10);
        let set = UpdatePlan::new(4, 6, 10).touch_set();
        let held = table.acquire_ordered(&set, None);
        assert!([4, 5, 6].iter().all(|&idx| table.is_held(idx)));
        drop(held);
        assert!(!table.is_held(5));
    }

    #[test]
    fn uncontended_acquire_records_nothing() {
        let table = LockTable::new(10);
        let tracker = ContentionTracker::new();
        for i in 0..10 {
            let set = UpdatePlan::new(i, (i + 5) % 10, 10).touch_set();
            drop(table.acquire_ordered(&set, Some(&tracker)));
        }
        assert_eq!(tracker.count(), 0);
    }

    #[test]
    fn contended_acquire_records_and_waits() {
        let table = LockTable::new(10);
        let tracker = ContentionTracker::new();
        let blocker = table.acquire_exclusive(3);

        std::thread::scope(|s| {
            let h = s.spawn(|| {
                let set = UpdatePlan::new(0, 3, 10).touch_set();
                let _held = table.acquire_ordered(&set, Some(&tracker));
                (0..10).all(|idx| table.is_held(idx) == (idx < 4))
            });
            while tracker.count() == 0 {
                std::thread::yield_now();
            }
            drop(blocker);
            assert!(h.join().unwrap());
        });

        assert_eq!(tracker.count(), 1);
    }

    #[test]
    fn opposite_order_requests_do_not_deadlock() {
        // Two threads hammer sets that overlap on {2, 7}; each would take
        // them in the opposite order if the sets were not sorted.
        let table = LockTable::new(10);
        std::thread::scope(|s| {
            s.spawn(|| {
                for _ in 0..10_000 {
                    let set = TouchSet::from_indices([7, 8, 9, 2]);
                    drop(table.acquire_ordered(&set, None));
                }
            });
            s.spawn(|| {
                for _ in 0..10_000 {
                    let set = TouchSet::from_indices([2, 3, 4, 7]);
                    drop(table.acquire_ordered(&set, None));
                }
            });
        });
    }
}
