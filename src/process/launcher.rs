use std::io;
use std::path::Path;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Runtime;
use tracing::debug;

/// Result of waiting on a child for a bounded time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    Exited { code: Option<i32> },
    TimedOut,
}

#[cfg_attr(test, mockall::automock)]
pub trait ProcessHandle {
    fn id(&self) -> Option<u32>;

    /// Waits up to `timeout` for the child to exit. The child is left running on timeout.
    fn wait_for_exit(&mut self, timeout: Duration) -> io::Result<WaitOutcome>;
}

#[cfg_attr(test, mockall::automock)]
pub trait ProcessLauncher {
    /// Starts `executable` with `arguments` and returns a handle to the running child.
    fn launch(&self, executable: &Path, arguments: &str) -> io::Result<Box<dyn ProcessHandle>>;
}

/// Launches children through `tokio::process` on a private current-thread runtime.
pub struct TokioLauncher {
    runtime: Arc<Runtime>,
}

impl TokioLauncher {
    pub fn new() -> io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        Ok(Self {
            runtime: Arc::new(runtime),
        })
    }
}

impl ProcessLauncher for TokioLauncher {
    fn launch(&self, executable: &Path, arguments: &str) -> io::Result<Box<dyn ProcessHandle>> {
        let mut command = std::process::Command::new(executable);
        apply_arguments(&mut command, arguments);
        command.stdin(Stdio::null());

        let mut command = tokio::process::Command::from(command);
        // A timed out child must outlive its handle.
        command.kill_on_drop(false);

        let _runtime = self.runtime.enter();
        let child = command.spawn()?;
        debug!(action = "process_spawn", pid = ?child.id(), executable = %executable.display());

        Ok(Box::new(TokioProcess {
            child,
            runtime: Arc::clone(&self.runtime),
        }))
    }
}

struct TokioProcess {
    child: tokio::process::Child,
    runtime: Arc<Runtime>,
}

impl ProcessHandle for TokioProcess {
    fn id(&self) -> Option<u32> {
        self.child.id()
    }

    fn wait_for_exit(&mut self, timeout: Duration) -> io::Result<WaitOutcome> {
        let child = &mut self.child;
        self.runtime.block_on(async {
            match tokio::time::timeout(timeout, child.wait()).await {
                Ok(status) => status.map(|status| WaitOutcome::Exited {
                    code: status.code(),
                }),
                Err(_elapsed) => Ok(WaitOutcome::TimedOut),
            }
        })
    }
}

// Windows executables parse their own command line, so the string goes through untouched.
#[cfg(windows)]
fn apply_arguments(command: &mut std::process::Command, arguments: &str) {
    use std::os::windows::process::CommandExt;

    if !arguments.is_empty() {
        command.raw_arg(arguments);
    }
}

#[cfg(not(windows))]
fn apply_arguments(command: &mut std::process::Command, arguments: &str) {
    command.args(split_arguments(arguments));
}

/// Splits on whitespace, grouping double-quoted runs and dropping the quotes.
#[cfg_attr(windows, allow(dead_code))]
pub(crate) fn split_arguments(arguments: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quoted = false;

    for c in arguments.chars() {
        match c {
            '"' => {
                quoted = !quoted;
                in_token = true;
            }
            c if c.is_whitespace() && !quoted => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            c => {
                current.push(c);
                in_token = true;
            }
        }
    }
    if in_token {
        tokens.push(current);
    }
    tokens
}
