use crate::error::ConfigError;
use crate::strategy::{ConsistencyMode, OverlapPolicy};

pub const DEFAULT_PROBE: usize = 100;

pub const USAGE: &str = "\
usage: cellbench [options]

  --len N         array length (default 100000)
  --workers N     worker threads (default 4)
  --ops N         operations per worker (default 10000)
  --mode MODE     ordered | trylock | lockfree (default ordered)
  --skip-overlap  skip updates whose destination is also a source
  --seed N        fixed run seed (default: from OS entropy)
  --probe N       cell printed in the report (default 100, or the last
                  cell when the array is shorter)
  --verbose       per-worker debug logging
  --help          print this message";

/// Run parameters. Fixed for the lifetime of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchConfig {
    pub len: usize,
    pub workers: usize,
    pub ops_per_worker: usize,
    pub mode: ConsistencyMode,
    pub overlap: OverlapPolicy,
    /// `None` draws a fresh seed per run.
    pub seed: Option<u64>,
    /// `None` reports [`DEFAULT_PROBE`], clamped to the array.
    pub probe: Option<usize>,
    pub verbose: bool,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            len: 100_000,
            workers: 4,
            ops_per_worker: 10_000,
            mode: ConsistencyMode::OrderedLocking,
            overlap: OverlapPolicy::Proceed,
            seed: None,
            probe: None,
            verbose: false,
        }
    }
}

impl BenchConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.len == 0 {
            return Err(ConfigError::EmptyArray);
        }
        if self.workers == 0 {
            return Err(ConfigError::NoWorkers);
        }
        if let Some(probe) = self.probe.filter(|&probe| probe >= self.len) {
            return Err(ConfigError::ProbeOutOfRange {
                probe,
                len: self.len,
            });
        }
        Ok(())
    }

    /// The cell shown in the report.
    pub fn probe_index(&self) -> usize {
        self.probe
            .unwrap_or(DEFAULT_PROBE.min(self.len.saturating_sub(1)))
    }

    /// Parses command-line flags (without the program name) on top of the
    /// defaults, then validates the result.
    pub fn from_args<I, S>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut config = Self::default();
        let mut args = args.into_iter().map(Into::into);

        while let Some(flag) = args.next() {
            match flag.as_str() {
                "--len" => config.len = parse_value(&flag, args.next())?,
                "--workers" => config.workers = parse_value(&flag, args.next())?,
                "--ops" => config.ops_per_worker = parse_value(&flag, args.next())?,
                "--mode" => config.mode = required(&flag, args.next())?.parse()?,
                "--skip-overlap" => config.overlap = OverlapPolicy::Skip,
                "--seed" => config.seed = Some(parse_value(&flag, args.next())?),
                "--probe" => config.probe = Some(parse_value(&flag, args.next())?),
                "--verbose" | "-v" => config.verbose = true,
                "--help" | "-h" => return Err(ConfigError::Help),
                _ => return Err(ConfigError::UnknownFlag(flag)),
            }
        }

        config.validate()?;
        Ok(config)
    }
}

fn required(flag: &str, value: Option<String>) -> Result<String, ConfigError> {
    value.ok_or_else(|| ConfigError::MissingValue(flag.to_owned()))
}

fn parse_value<T: std::str::FromStr>(flag: &str, value: Option<String>) -> Result<T, ConfigError> {
    let value = required(flag, value)?;
    value.parse().map_err(|_| ConfigError::InvalidValue {
        flag: flag.to_owned(),
        value,
    })
}
