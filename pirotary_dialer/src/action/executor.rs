//! External-process boundary.
//!
//! Speech, playback, weather and reboot are all separate programs. The
//! dialer hands an argument vector to an [`ActionExecutor`] and waits for it
//! to finish; only the weather report needs the program's stdout.

use parking_lot::Mutex;
use std::process::{Command, Stdio};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Errors raised before a program could run.
#[derive(Debug, Clone, Error)]
pub enum ExecutorError {
    /// Empty argument vector.
    #[error("empty command line")]
    EmptyCommand,

    /// The program could not be started.
    #[error("failed to start {program}: {reason}")]
    SpawnFailed {
        /// Program name.
        program: String,
        /// OS error.
        reason: String,
    },
}

/// Exit status of a finished program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionStatus(pub Option<i32>);

impl ActionStatus {
    /// Exit code 0.
    pub const SUCCESS: ActionStatus = ActionStatus(Some(0));

    /// Whether the program exited with code 0.
    #[inline]
    pub fn success(&self) -> bool {
        self.0 == Some(0)
    }
}

/// Status and stdout of a finished program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedOutput {
    /// Exit status.
    pub status: ActionStatus,
    /// Raw stdout.
    pub stdout: Vec<u8>,
}

/// Runs external programs to completion.
pub trait ActionExecutor: Send {
    /// Run `argv` and wait; output is discarded.
    fn execute(&mut self, argv: &[String]) -> Result<ActionStatus, ExecutorError>;

    /// Run `argv` and wait; stdout is returned.
    fn capture(&mut self, argv: &[String]) -> Result<CapturedOutput, ExecutorError>;
}

fn split(argv: &[String]) -> Result<(&String, &[String]), ExecutorError> {
    argv.split_first().ok_or(ExecutorError::EmptyCommand)
}

/// Executor backed by `std::process::Command`.
#[derive(Debug, Default)]
pub struct SystemExecutor;

impl SystemExecutor {
    /// Create a new system executor.
    pub fn new() -> Self {
        Self
    }
}

impl ActionExecutor for SystemExecutor {
    fn execute(&mut self, argv: &[String]) -> Result<ActionStatus, ExecutorError> {
        let (program, args) = split(argv)?;
        debug!("exec {:?}", argv);
        let status = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| ExecutorError::SpawnFailed {
                program: program.clone(),
                reason: e.to_string(),
            })?;
        Ok(ActionStatus(status.code()))
    }

    fn capture(&mut self, argv: &[String]) -> Result<CapturedOutput, ExecutorError> {
        let (program, args) = split(argv)?;
        debug!("exec (captured) {:?}", argv);
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .map_err(|e| ExecutorError::SpawnFailed {
                program: program.clone(),
                reason: e.to_string(),
            })?;
        Ok(CapturedOutput {
            status: ActionStatus(output.status.code()),
            stdout: output.stdout,
        })
    }
}

/// Executor that logs instead of running anything.
///
/// Every command line is kept in a shared journal; `capture` answers with a
/// canned stdout. Used by `--dry-run` and by tests.
#[derive(Debug, Clone, Default)]
pub struct DryRunExecutor {
    journal: Arc<Mutex<Vec<Vec<String>>>>,
    canned_stdout: Vec<u8>,
}

impl DryRunExecutor {
    /// Create a dry-run executor with an empty journal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every `capture` with `stdout`.
    pub fn with_stdout(mut self, stdout: impl Into<Vec<u8>>) -> Self {
        self.canned_stdout = stdout.into();
        self
    }

    /// Shared journal of every command line received.
    pub fn journal(&self) -> Arc<Mutex<Vec<Vec<String>>>> {
        Arc::clone(&self.journal)
    }

    fn record(&self, argv: &[String]) -> Result<(), ExecutorError> {
        split(argv)?;
        info!("dry-run: {}", argv.join(" "));
        self.journal.lock().push(argv.to_vec());
        Ok(())
    }
}

impl ActionExecutor for DryRunExecutor {
    fn execute(&mut self, argv: &[String]) -> Result<ActionStatus, ExecutorError> {
        self.record(argv)?;
        Ok(ActionStatus::SUCCESS)
    }

    fn capture(&mut self, argv: &[String]) -> Result<CapturedOutput, ExecutorError> {
        self.record(argv)?;
        Ok(CapturedOutput {
            status: ActionStatus::SUCCESS,
            stdout: self.canned_stdout.clone(),
        })
    }
}
