use std::io;
use std::time::Duration;

use tracing::warn;

use super::launcher::{ProcessHandle, WaitOutcome};

/// How a supervised child finished. Neither variant is a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessOutcome {
    /// The child exited before the deadline. The code is informational only.
    CompletedWithinTimeout { exit_code: Option<i32> },
    /// The deadline passed first. The child was not killed and may still be running.
    TimedOut,
}

/// Launches one child and blocks until it exits or `timeout` elapses.
///
/// Nothing is logged on a normal exit. A timeout is logged as a single
/// warning and returned as [`ProcessOutcome::TimedOut`].
/// Errors from `launch` or from waiting are returned unchanged.
pub fn execute<F>(launch: F, timeout: Duration) -> io::Result<ProcessOutcome>
where
    F: FnOnce() -> io::Result<Box<dyn ProcessHandle>>,
{
    let mut process = launch()?;

    match process.wait_for_exit(timeout)? {
        WaitOutcome::Exited { code } => {
            Ok(ProcessOutcome::CompletedWithinTimeout { exit_code: code })
        }
        WaitOutcome::TimedOut => {
            warn!(action = "process_timeout", pid = ?process.id(), "Process timed out!");
            Ok(ProcessOutcome::TimedOut)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::launcher::MockProcessHandle;
    use crate::test_support::{capture_logs, warnings};

    fn handle_with(outcome: io::Result<WaitOutcome>, timeout: Duration) -> Box<dyn ProcessHandle> {
        let mut handle = MockProcessHandle::new();
        handle.expect_id().return_const(Some(4242u32));
        handle
            .expect_wait_for_exit()
            .withf(move |waited| *waited == timeout)
            .times(1)
            .return_once(move |_| outcome);
        Box::new(handle)
    }

    #[test]
    fn exit_within_timeout_logs_nothing() {
        let timeout = Duration::from_millis(500);
        let (outcome, events) = capture_logs(|| {
            execute(
                || Ok(handle_with(Ok(WaitOutcome::Exited { code: Some(0) }), timeout)),
                timeout,
            )
        });

        assert_eq!(
            outcome.expect("execute"),
            ProcessOutcome::CompletedWithinTimeout { exit_code: Some(0) }
        );
        assert!(events.is_empty(), "logged on normal exit: {events:?}");
    }

    #[test]
    fn non_zero_exit_is_not_inspected() {
        let timeout = Duration::from_millis(500);
        let outcome = execute(
            || Ok(handle_with(Ok(WaitOutcome::Exited { code: Some(1) }), timeout)),
            timeout,
        );
        assert_eq!(
            outcome.expect("execute"),
            ProcessOutcome::CompletedWithinTimeout { exit_code: Some(1) }
        );
    }

    #[test]
    fn timeout_warns_once_and_returns_normally() {
        let timeout = Duration::from_millis(5);
        let (outcome, events) = capture_logs(|| {
            execute(|| Ok(handle_with(Ok(WaitOutcome::TimedOut), timeout)), timeout)
        });

        assert_eq!(outcome.expect("execute"), ProcessOutcome::TimedOut);
        assert_eq!(warnings(&events), vec!["Process timed out!"]);
    }

    #[test]
    fn launch_failure_propagates_unchanged() {
        let err = execute(
            || Err(io::Error::new(io::ErrorKind::PermissionDenied, "access denied")),
            Duration::from_secs(1),
        )
        .expect_err("should fail");

        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
        assert_eq!(err.to_string(), "access denied");
    }

    #[test]
    fn wait_failure_propagates_unchanged() {
        let timeout = Duration::from_secs(1);
        let err = execute(
            || {
                Ok(handle_with(
                    Err(io::Error::new(io::ErrorKind::Interrupted, "wait interrupted")),
                    timeout,
                ))
            },
            timeout,
        )
        .expect_err("should fail");

        assert_eq!(err.kind(), io::ErrorKind::Interrupted);
    }
}
