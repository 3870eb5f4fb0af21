//! Fixed-size fan-out of worker threads over one shared array.

use std::fmt;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::config::BenchConfig;
use crate::error::{BenchError, Result};
use crate::sampler::{IndexSampler, entropy_seed};
use crate::strategy::ConsistencyMode;
use crate::update::{SharedState, UpdateOutcome, update};

/// A group of named threads that is always joined as a whole.
///
/// Threads not joined through [`TaskGroup::join`] are joined on drop, so
/// none of them can outlive the group.
pub struct TaskGroup<T> {
    name: &'static str,
    handles: Vec<JoinHandle<T>>,
}

impl<T: Send + 'static> TaskGroup<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            handles: Vec::new(),
        }
    }

    pub fn spawn<F>(&mut self, task: F) -> Result<()>
    where
        F: FnOnce() -> T + Send + 'static,
    {
        let worker = self.handles.len();
        let handle = thread::Builder::new()
            .name(format!("{}-{worker}", self.name))
            .spawn(task)
            .map_err(|source| BenchError::Spawn { worker, source })?;
        self.handles.push(handle);
        Ok(())
    }

    /// Waits for every task and returns their results in spawn order.
    ///
    /// All tasks are joined even if an earlier one panicked; the first
    /// panic is then reported.
    pub fn join(mut self) -> Result<Vec<T>> {
        let mut results = Vec::with_capacity(self.handles.len());
        let mut failed = None;

        for (worker, handle) in self.handles.drain(..).enumerate() {
            match handle.join() {
                Ok(value) => results.push(value),
                Err(_) => {
                    failed.get_or_insert(worker);
                }
            }
        }

        match failed {
            Some(worker) => Err(BenchError::WorkerPanicked { worker }),
            None => Ok(results),
        }
    }
}

impl<T> Drop for TaskGroup<T> {
    fn drop(&mut self) {
        for handle in self.handles.drain(..) {
            let _ = handle.join();
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerStats {
    pub applied: u64,
    pub skipped: u64,
}

/// Result of a completed run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub mode: ConsistencyMode,
    pub workers: usize,
    pub ops_per_worker: usize,
    pub seed: u64,
    pub applied: u64,
    pub skipped: u64,
    pub elapsed: Duration,
    pub contention: u64,
    pub probe: usize,
    pub snapshot: Vec<i64>,
}

impl RunReport {
    pub fn probe_value(&self) -> i64 {
        self.snapshot[self.probe]
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "S[{}] = {}", self.probe, self.probe_value())?;
        write!(f, "Execution time: {} ms", self.elapsed.as_millis())?;
        if self.mode.counts_contention() {
            write!(f, "\nLock conflicts: {}", self.contention)?;
        }
        Ok(())
    }
}

/// Runs the configured number of workers against one shared state.
///
/// A pool runs exactly once: `run` consumes it, so every run starts from a
/// freshly initialized array and a zero contention count.
pub struct WorkerPool {
    config: BenchConfig,
    state: Arc<SharedState>,
}

impl WorkerPool {
    pub fn new(config: BenchConfig) -> Result<Self> {
        config.validate()?;
        let state = Arc::new(SharedState::new(config.len));
        Ok(Self { config, state })
    }

    /// Spawns every worker, waits for all of them, then reports.
    pub fn run(self) -> Result<RunReport> {
        let BenchConfig {
            len,
            workers,
            ops_per_worker,
            mode,
            overlap,
            ..
        } = self.config;
        let probe = self.config.probe_index();
        let seed = self.config.seed.unwrap_or_else(entropy_seed);

        info!(len, workers, ops_per_worker, %mode, ?overlap, seed, "starting run");

        let start = Instant::now();
        let mut group = TaskGroup::new("cellbench-worker");
        for worker in 0..workers {
            let state = Arc::clone(&self.state);
            group.spawn(move || {
                let mut sampler = IndexSampler::for_worker(len, seed, worker);
                let mut stats = WorkerStats::default();
                for _ in 0..ops_per_worker {
                    let (i, j) = sampler.sample_pair();
                    match update(&state, mode, overlap, i, j) {
                        UpdateOutcome::Applied => stats.applied += 1,
                        UpdateOutcome::Skipped => stats.skipped += 1,
                    }
                }
                debug!(worker, applied = stats.applied, skipped = stats.skipped, "worker finished");
                stats
            })?;
        }
        let stats = group.join()?;
        let elapsed = start.elapsed();

        let report = RunReport {
            mode,
            workers,
            ops_per_worker,
            seed,
            applied: stats.iter().map(|s| s.applied).sum(),
            skipped: stats.iter().map(|s| s.skipped).sum(),
            elapsed,
            contention: self.state.contention.count(),
            probe,
            snapshot: self.state.array.snapshot(),
        };
        info!(
            elapsed_ms = elapsed.as_millis() as u64,
            applied = report.applied,
            skipped = report.skipped,
            contention = report.contention,
            "run finished"
        );
        Ok(report)
    }
}
