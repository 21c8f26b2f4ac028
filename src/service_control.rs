//! Lifecycle entry points for a Topshelf-hosted Windows service.
//!
//! Every operation validates the executable path, resolves it against the
//! working directory, renders the command line and hands it to the
//! [`execute`] supervisor. Exit codes are not inspected and a timeout is not
//! an error: the call returns [`ProcessOutcome::TimedOut`] and the child is
//! left running.

use std::io;
use std::path::Path;
use std::time::Duration;

use tracing::{debug, info, info_span};
use uuid::Uuid;

use crate::arguments;
use crate::error::{Result, ServiceControlError};
use crate::path::{PathResolver, WorkingDirectoryResolver};
use crate::process::{ProcessLauncher, ProcessOutcome, TokioLauncher, execute};
use crate::settings::{Operation, OperationOptions, ServiceSettings};

pub type DefaultServiceController = ServiceController<TokioLauncher, WorkingDirectoryResolver>;

pub struct ServiceController<L, R> {
    launcher: L,
    resolver: R,
}

impl DefaultServiceController {
    /// Controller that spawns real processes and resolves paths against the current directory.
    pub fn with_defaults() -> io::Result<Self> {
        Ok(Self::new(
            TokioLauncher::new()?,
            WorkingDirectoryResolver::current_dir()?,
        ))
    }
}

impl<L: ProcessLauncher, R: PathResolver> ServiceController<L, R> {
    pub fn new(launcher: L, resolver: R) -> Self {
        Self { launcher, resolver }
    }

    /// Runs `<executable> install <flags>`. Without settings the defaults are
    /// used, which renders `install --manual` and waits 60 seconds.
    pub fn install_service(
        &self,
        executable: &Path,
        settings: Option<&ServiceSettings>,
    ) -> Result<ProcessOutcome> {
        validate_executable(executable)?;
        let default_settings = ServiceSettings::default();
        let settings = settings.unwrap_or(&default_settings);

        let rendered = arguments::install_arguments(settings);
        let redacted = arguments::install_arguments_redacted(settings);
        self.run(
            Operation::Install,
            executable,
            arguments::command_arguments(Operation::Install, Some(rendered.as_str())),
            arguments::command_arguments(Operation::Install, Some(redacted.as_str())),
            settings.timeout,
        )
    }

    pub fn uninstall_service(
        &self,
        executable: &Path,
        options: &OperationOptions,
    ) -> Result<ProcessOutcome> {
        self.run_verb(Operation::Uninstall, executable, options)
    }

    pub fn start_service(
        &self,
        executable: &Path,
        options: &OperationOptions,
    ) -> Result<ProcessOutcome> {
        self.run_verb(Operation::Start, executable, options)
    }

    pub fn stop_service(
        &self,
        executable: &Path,
        options: &OperationOptions,
    ) -> Result<ProcessOutcome> {
        self.run_verb(Operation::Stop, executable, options)
    }

    fn run_verb(
        &self,
        operation: Operation,
        executable: &Path,
        options: &OperationOptions,
    ) -> Result<ProcessOutcome> {
        validate_executable(executable)?;
        let command = arguments::verb_arguments(operation, options.instance_name.as_deref());
        self.run(operation, executable, command.clone(), command, options.timeout)
    }

    fn run(
        &self,
        operation: Operation,
        executable: &Path,
        command: String,
        logged_command: String,
        timeout: Duration,
    ) -> Result<ProcessOutcome> {
        let span = info_span!(
            "service_operation",
            operation = %operation,
            operation_id = %Uuid::new_v4()
        );
        let _entered = span.enter();

        let executable = self.resolver.resolve(executable);
        info!(
            action = "service_launch",
            executable = %executable.display(),
            arguments = %logged_command,
            timeout_ms = timeout.as_millis() as u64
        );

        let outcome = execute(|| self.launcher.launch(&executable, &command), timeout)?;
        let exit_code = match outcome {
            ProcessOutcome::CompletedWithinTimeout { exit_code } => exit_code,
            ProcessOutcome::TimedOut => None,
        };
        debug!(
            action = "service_operation",
            exit_code = ?exit_code,
            "Service {} successfully",
            past_tense(operation)
        );
        Ok(outcome)
    }
}

fn validate_executable(executable: &Path) -> Result<()> {
    if executable.as_os_str().to_string_lossy().trim().is_empty() {
        return Err(ServiceControlError::InvalidArgument {
            name: "executable path",
        });
    }
    Ok(())
}

fn past_tense(operation: Operation) -> &'static str {
    match operation {
        Operation::Install => "installed",
        Operation::Uninstall => "uninstalled",
        Operation::Start => "started",
        Operation::Stop => "stopped",
    }
}
