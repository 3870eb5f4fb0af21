//! Index arithmetic for one update and the canonical lock acquisition order.
//!
//! Every locking strategy acquires the cells of a [`TouchSet`] front to
//! back. Because a touch set is always ascending and duplicate-free, two
//! operations that share cells take the shared ones in the same relative
//! order, which rules out a circular wait. Deduplication also matters on
//! its own: taking the same cell lock twice from one thread would block
//! forever.

/// Upper bound on the number of cells one update touches.
pub const MAX_TOUCH: usize = 4;

/// The cells read and written by `S[j] = S[i] + S[i+1] + S[i+2]` (mod N).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdatePlan {
    pub sources: [usize; 3],
    pub dest: usize,
}

impl UpdatePlan {
    pub fn new(i: usize, j: usize, len: usize) -> Self {
        assert!(i < len && j < len, "index out of range: ({i}, {j}) for len {len}");
        Self {
            sources: [i, (i + 1) % len, (i + 2) % len],
            dest: j,
        }
    }

    /// True when the destination is also one of the sources.
    pub fn dest_overlaps_sources(&self) -> bool {
        self.sources.contains(&self.dest)
    }

    pub fn touch_set(&self) -> TouchSet {
        let [a, b, c] = self.sources;
        TouchSet::from_indices([a, b, c, self.dest])
    }
}

/// Ascending, duplicate-free list of at most [`MAX_TOUCH`] indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TouchSet {
    indices: [usize; MAX_TOUCH],
    len: usize,
}

impl TouchSet {
    pub fn from_indices(mut raw: [usize; MAX_TOUCH]) -> Self {
        raw.sort_unstable();

        let mut indices = [0; MAX_TOUCH];
        let mut len = 0;
        for idx in raw {
            if len == 0 || indices[len - 1] != idx {
                indices[len] = idx;
                len += 1;
            }
        }
        Self { indices, len }
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.indices[..self.len]
    }

    pub fn contains(&self, idx: usize) -> bool {
        self.as_slice().binary_search(&idx).is_ok()
    }
}
