//! Lifecycle control for Windows services hosted by Topshelf-style executables.
//!
//! The crate never talks to the Service Control Manager. It renders the
//! executable's own command-line vocabulary (`install`, `uninstall`, `start`,
//! `stop` plus flags), runs it once and waits a bounded time for it to exit.

pub mod arguments;
pub mod error;
pub mod logging;
pub mod path;
pub mod process;
pub mod service_control;
pub mod settings;

#[cfg(test)]
mod test_support;

pub use error::{Result, ServiceControlError};
pub use process::ProcessOutcome;
pub use service_control::{DefaultServiceController, ServiceController};
pub use settings::{DEFAULT_TIMEOUT, Operation, OperationOptions, ServiceSettings};
