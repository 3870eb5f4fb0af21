use thiserror::Error;

/// Rejected benchmark configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("array length must be at least 1")]
    EmptyArray,

    #[error("worker count must be at least 1")]
    NoWorkers,

    #[error("probe index {probe} is out of range for an array of {len} cells")]
    ProbeOutOfRange { probe: usize, len: usize },

    #[error("unknown mode '{0}' (expected ordered, trylock or lockfree)")]
    UnknownMode(String),

    #[error("unknown flag '{0}'")]
    UnknownFlag(String),

    #[error("flag '{0}' needs a value")]
    MissingValue(String),

    #[error("invalid value '{value}' for flag '{flag}'")]
    InvalidValue { flag: String, value: String },

    /// `--help` was requested; not a failure.
    #[error("help requested")]
    Help,
}

/// Failure of a whole benchmark run.
#[derive(Error, Debug)]
pub enum BenchError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to spawn worker {worker}")]
    Spawn {
        worker: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("worker {worker} panicked")]
    WorkerPanicked { worker: usize },
}

pub type Result<T, E = BenchError> = std::result::Result<T, E>;
