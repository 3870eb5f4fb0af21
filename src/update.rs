//! The read-sum-write update under each consistency mode.

use std::sync::atomic::Ordering::{Acquire, Relaxed, Release};

use crate::array::SharedArray;
use crate::contention::ContentionTracker;
use crate::lock_table::LockTable;
use crate::strategy::{ConsistencyMode, OverlapPolicy};
use crate::touch::UpdatePlan;

/// Everything the workers share for the length of a run.
pub struct SharedState {
    pub array: SharedArray,
    pub locks: LockTable,
    pub contention: ContentionTracker,
}

impl SharedState {
    pub fn new(len: usize) -> Self {
        Self {
            array: SharedArray::new(len),
            locks: LockTable::new(len),
            contention: ContentionTracker::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    Applied,
    Skipped,
}

/// Performs `S[j] = S[i] + S[i+1] + S[i+2]` (indices mod N).
///
/// `i` and `j` must be below `state.array.len()`.
pub fn update(
    state: &SharedState,
    mode: ConsistencyMode,
    overlap: OverlapPolicy,
    i: usize,
    j: usize,
) -> UpdateOutcome {
    let plan = UpdatePlan::new(i, j, state.array.len());
    if overlap == OverlapPolicy::Skip && plan.dest_overlaps_sources() {
        return UpdateOutcome::Skipped;
    }

    match mode {
        ConsistencyMode::OrderedLocking => locked_update(state, &plan, None),
        ConsistencyMode::TryLockWithContentionCount => {
            locked_update(state, &plan, Some(&state.contention))
        }
        ConsistencyMode::LockFree => lock_free_update(&state.array, &plan),
    }
    UpdateOutcome::Applied
}

fn locked_update(state: &SharedState, plan: &UpdatePlan, tracker: Option<&ContentionTracker>) {
    let touched = plan.touch_set();
    let _held = state.locks.acquire_ordered(&touched, tracker);

    // Every cell read or written here is locked, so Relaxed is enough.
    let sum = sum_sources(&state.array, plan, Relaxed);
    state.array.store(plan.dest, sum, Relaxed);
}

fn lock_free_update(array: &SharedArray, plan: &UpdatePlan) {
    let sum = sum_sources(array, plan, Acquire);
    array.store(plan.dest, sum, Release);
}

fn sum_sources(
    array: &SharedArray,
    plan: &UpdatePlan,
    order: std::sync::atomic::Ordering,
) -> i64 {
    // Values compound across a run; wrap instead of overflowing.
    plan.sources
        .iter()
        .fold(0i64, |acc, &idx| acc.wrapping_add(array.load(idx, order)))
}
