pub mod launcher;
pub mod supervisor;

pub use launcher::{ProcessHandle, ProcessLauncher, TokioLauncher, WaitOutcome};
pub use supervisor::{ProcessOutcome, execute};
