use std::process::ExitCode;

use cellbench::config::USAGE;
use cellbench::logging::init_logging;
use cellbench::{BenchConfig, ConfigError, WorkerPool};

fn main() -> ExitCode {
    let config = match BenchConfig::from_args(std::env::args().skip(1)) {
        Ok(config) => config,
        Err(ConfigError::Help) => {
            println!("{USAGE}");
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("error: {e}\n\n{USAGE}");
            return ExitCode::from(2);
        }
    };

    init_logging(config.verbose);

    let report = WorkerPool::new(config).and_then(|pool| pool.run());
    match report {
        Ok(report) => {
            println!("{report}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "run failed");
            ExitCode::FAILURE
        }
    }
}
