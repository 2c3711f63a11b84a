//! Command execution error types.

use thiserror::Error;

/// Result type for command execution.
pub type ExecResult<T> = Result<T, ExecError>;

/// Errors raised while running the configured command.
///
/// Every variant is logged and swallowed at the executor boundary; none of
/// them reach the host's event dispatcher.
#[derive(Debug, Error)]
pub enum ExecError {
    /// The event envelope could not be encoded as JSON. Fatal to the
    /// invocation: no process is spawned.
    #[error("failed to serialize event data: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The command exceeded its wall-clock budget and was killed.
    #[error("command timed out after {secs} seconds")]
    Timeout { secs: u64 },

    /// The command ran to completion but exited non-zero. A `None` code
    /// means the child was terminated by a signal.
    #[error("command failed with exit code {code:?}")]
    NonZeroExit {
        code: Option<i32>,
        stdout: String,
        stderr: String,
    },

    /// The command could not be launched or waited on at all.
    #[error("failed to run command: {0}")]
    Spawn(#[from] std::io::Error),
}
