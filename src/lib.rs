//! Concurrent read-sum-write updates over a shared integer array.
//!
//! Workers repeatedly pick `(i, j)` and set
//! `S[j] = S[i] + S[i+1] + S[i+2]` (indices mod N) under one of three
//! [`ConsistencyMode`]s: per-cell locks taken in ascending index order,
//! the same with contention counting, or plain atomic loads and stores.

pub mod array;
pub mod config;
pub mod contention;
pub mod error;
pub mod lock_table;
pub mod logging;
pub mod pool;
pub mod rwlock;
pub mod sampler;
pub mod strategy;
pub mod touch;
pub mod update;

pub use config::BenchConfig;
pub use error::{BenchError, ConfigError};
pub use pool::{RunReport, TaskGroup, WorkerPool};
pub use strategy::{ConsistencyMode, OverlapPolicy};
pub use update::{SharedState, UpdateOutcome, update};
