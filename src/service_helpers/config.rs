use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use clap::Args;
use shelfctl::logging::{self, LogOptions};
use shelfctl::{DefaultServiceController, Operation, ProcessOutcome};
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;

/// Arguments shared by every helper binary.
#[derive(Args, Debug)]
pub struct CommonArgs {
    /// Path to the Topshelf-style service executable, relative to the current directory or absolute.
    #[arg(long, short = 'e', value_name = "PATH")]
    pub executable: PathBuf,

    /// Instance name used to tell apart several copies of the same service.
    #[arg(long, short = 'i')]
    pub instance: Option<String>,

    /// Milliseconds to wait for the executable to exit.
    #[arg(long, value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// Write JSON logs to this directory instead of stderr.
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Log at debug level.
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl CommonArgs {
    /// Falls back to stderr to report a log directory that cannot be used.
    pub fn init_logging(&self) -> Result<Option<WorkerGuard>, ExitCode> {
        let options = LogOptions {
            directory: self.log_dir.clone(),
            verbose: self.verbose,
        };
        match logging::init(&options) {
            Ok(guard) => Ok(guard),
            Err(e) => {
                let stderr_only = LogOptions {
                    directory: None,
                    ..options
                };
                if logging::init(&stderr_only).is_ok() {
                    error!(
                        action = "service_helper",
                        "Unable to open log directory {} - {}",
                        self.log_dir.as_deref().unwrap_or(Path::new("")).display(),
                        e
                    );
                }
                Err(ExitCode::FAILURE)
            }
        }
    }

    pub fn timeout_or(&self, default: Duration) -> Duration {
        self.timeout_ms.map(Duration::from_millis).unwrap_or(default)
    }
}

/// Builds the default controller, runs `operation` through it and maps the result to an exit code.
pub fn run<F>(operation: Operation, op: F) -> ExitCode
where
    F: FnOnce(&DefaultServiceController) -> shelfctl::Result<ProcessOutcome>,
{
    let controller = match DefaultServiceController::with_defaults() {
        Ok(controller) => controller,
        Err(e) => {
            error!(action = "service_helper", "Unable to prepare service {} - {}", operation, e);
            return ExitCode::FAILURE;
        }
    };

    match op(&controller) {
        Ok(ProcessOutcome::CompletedWithinTimeout { exit_code }) => {
            info!(action = "service_helper", exit_code = ?exit_code, "Service {} finished", operation);
            ExitCode::SUCCESS
        }
        Ok(ProcessOutcome::TimedOut) => {
            warn!(action = "service_helper", "Service {} still running after timeout, no longer waiting", operation);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(action = "service_helper", "Service {} failed - {}", operation, e);
            ExitCode::FAILURE
        }
    }
}
