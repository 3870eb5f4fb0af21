use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// How concurrent updates are kept safe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConsistencyMode {
    /// Blocking per-cell locks taken in ascending index order.
    #[default]
    OrderedLocking,
    /// Same as `OrderedLocking`, but every lock is tried first and failed
    /// tries are counted as contention.
    TryLockWithContentionCount,
    /// Atomic loads and stores only.
    ///
    /// The three source reads are not a consistent snapshot and concurrent
    /// writes to the destination can be lost (last writer wins). Each single
    /// load and store is still atomic.
    LockFree,
}

impl ConsistencyMode {
    pub const ALL: [ConsistencyMode; 3] = [
        ConsistencyMode::OrderedLocking,
        ConsistencyMode::TryLockWithContentionCount,
        ConsistencyMode::LockFree,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ConsistencyMode::OrderedLocking => "ordered",
            ConsistencyMode::TryLockWithContentionCount => "trylock",
            ConsistencyMode::LockFree => "lockfree",
        }
    }

    pub fn counts_contention(self) -> bool {
        matches!(self, ConsistencyMode::TryLockWithContentionCount)
    }
}

impl fmt::Display for ConsistencyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConsistencyMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ordered" => Ok(ConsistencyMode::OrderedLocking),
            "trylock" => Ok(ConsistencyMode::TryLockWithContentionCount),
            "lockfree" => Ok(ConsistencyMode::LockFree),
            other => Err(ConfigError::UnknownMode(other.to_owned())),
        }
    }
}

/// What to do when the destination cell is also one of the sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlapPolicy {
    /// Update anyway; the touch set collapses the shared cell.
    #[default]
    Proceed,
    /// Leave the array untouched and count the operation as skipped.
    Skip,
}
