use std::sync::atomic::{AtomicI64, Ordering};

/// The shared integer array every worker mutates.
///
/// Cells are word-sized atomics so a load never observes a torn value.
/// Under the locking strategies they are accessed with `Relaxed` ordering
/// and the cell locks provide the happens-before edges.
pub struct SharedArray {
    cells: Box<[AtomicI64]>,
}

impl SharedArray {
    /// Creates an array of `len` cells with `S[k] = k`.
    pub fn new(len: usize) -> Self {
        Self {
            cells: (0..len).map(|k| AtomicI64::new(k as i64)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn load(&self, idx: usize, order: Ordering) -> i64 {
        self.cells[idx].load(order)
    }

    pub fn store(&self, idx: usize, value: i64, order: Ordering) {
        self.cells[idx].store(value, order);
    }

    /// Copies out every cell. Only meaningful once all workers have joined.
    pub fn snapshot(&self) -> Vec<i64> {
        self.cells.iter().map(|c| c.load(Ordering::Acquire)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_as_identity() {
        let s = SharedArray::new(5);
        assert_eq!(s.len(), 5);
        assert_eq!(s.snapshot(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn store_then_load() {
        let s = SharedArray::new(3);
        s.store(1, -42, Ordering::Release);
        assert_eq!(s.load(1, Ordering::Acquire), -42);
        assert!(!s.is_empty());
        assert!(SharedArray::new(0).is_empty());
    }
}
