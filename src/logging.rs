use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

pub const LOG_FILE_NAME: &str = "shelfctl.log";

#[derive(Debug, Clone, Default)]
pub struct LogOptions {
    /// Write JSON lines to `<directory>/shelfctl.log` instead of stderr.
    pub directory: Option<PathBuf>,
    /// Lower the default level from `info` to `debug`.
    pub verbose: bool,
}

/// Installs the global subscriber. `RUST_LOG` takes precedence over `verbose`.
///
/// Hold on to the returned guard until exit or buffered file output is lost.
/// Fails without installing anything when the log directory cannot be created.
pub fn init(options: &LogOptions) -> Result<Option<WorkerGuard>, InitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(options.verbose)));

    match &options.directory {
        Some(directory) => {
            let file_appender = file_appender(directory)?;
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_current_span(true)
                .with_span_list(true)
                .flatten_event(true)
                .with_writer(non_blocking)
                .init();
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::fmt()
                .compact()
                .with_env_filter(filter)
                .with_ansi(io::stderr().is_terminal())
                .with_writer(io::stderr)
                .init();
            Ok(None)
        }
    }
}

fn file_appender(directory: &Path) -> Result<RollingFileAppender, InitError> {
    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(LOG_FILE_NAME)
        .build(directory)
}

fn default_directive(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "info" }
}
