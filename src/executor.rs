//! Command execution.
//!
//! Builds the `{type, data}` event envelope, constructs the child process
//! environment, and hands the configured command string to the system shell
//! with a hard wall-clock timeout. Every failure path is logged and swallowed
//! here so that one misbehaving command never disturbs event delivery.

use std::io::Read;
use std::process::{Command, Stdio};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use chrono::Local;
use serde_json::json;
use tracing::{debug, error, info};

use crate::config::PluginConfig;
use crate::error::{ExecError, ExecResult};
use crate::event::Event;
use crate::payload::normalize;

/// Variable carrying the raw event type string.
pub const ENV_EVENT_TYPE: &str = "MP_EVENT_TYPE";
/// Variable carrying the JSON event envelope.
pub const ENV_EVENT_DATA: &str = "MP_EVENT_DATA";
/// Variable carrying the ISO-8601 invocation timestamp.
pub const ENV_EVENT_TIME: &str = "MP_EVENT_TIME";

/// How often the runner polls a live child for exit.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Captured output of a command that ran to completion.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Exit code; `None` when the child was terminated by a signal.
    pub exit_code: Option<i32>,
    /// Captured standard output, UTF-8 lossy.
    pub stdout: String,
    /// Captured standard error, UTF-8 lossy.
    pub stderr: String,
}

impl CommandOutput {
    /// Whether the command signaled success.
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Runs one shell command with extra environment variables and a timeout.
///
/// The production implementation is [`ShellRunner`]; tests substitute a
/// recording runner to observe spawns without touching the system.
pub trait CommandRunner: Send + Sync {
    /// Run `command` with `env` added to the inherited environment.
    ///
    /// Completion with any exit code is `Ok`; timeout and launch failures
    /// are the error cases.
    fn run(
        &self,
        command: &str,
        env: &[(String, String)],
        timeout: Duration,
    ) -> ExecResult<CommandOutput>;
}

/// Production runner: hands the command string to the system shell.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellRunner;

/// Get the shell and argument for the current platform.
fn shell() -> (&'static str, &'static str) {
    if cfg!(target_os = "windows") {
        ("cmd", "/C")
    } else {
        ("sh", "-c")
    }
}

impl CommandRunner for ShellRunner {
    fn run(
        &self,
        command: &str,
        env: &[(String, String)],
        timeout: Duration,
    ) -> ExecResult<CommandOutput> {
        let (shell, shell_arg) = shell();

        let mut cmd = Command::new(shell);
        cmd.arg(shell_arg).arg(command);
        for (key, value) in env {
            cmd.env(key, value);
        }
        cmd.stdin(Stdio::null()).stdout(Stdio::piped()).stderr(Stdio::piped());

        let started = Instant::now();
        let mut child = cmd.spawn()?;

        // Drain the pipes on their own threads so a chatty child cannot
        // block on a full pipe buffer while we poll for exit.
        let stdout_handle = spawn_reader(child.stdout.take());
        let stderr_handle = spawn_reader(child.stderr.take());

        loop {
            match child.try_wait()? {
                Some(status) => {
                    let stdout = stdout_handle.join().unwrap_or_default();
                    let stderr = stderr_handle.join().unwrap_or_default();
                    return Ok(CommandOutput { exit_code: status.code(), stdout, stderr });
                }
                None => {
                    if started.elapsed() >= timeout {
                        let _ = child.kill();
                        let _ = child.wait();
                        return Err(ExecError::Timeout { secs: timeout.as_secs() });
                    }
                    thread::sleep(POLL_INTERVAL);
                }
            }
        }
    }
}

fn spawn_reader<R>(pipe: Option<R>) -> thread::JoinHandle<String>
where
    R: Read + Send + 'static,
{
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buf);
        }
        String::from_utf8_lossy(&buf).into_owned()
    })
}

/// Build and encode the `{type, data}` envelope for one event.
///
/// The normalizer only emits JSON-safe values, so encoding a `Value`
/// envelope is total; the error arm exists to uphold the contract that an
/// encoding failure spawns nothing.
pub fn encode_envelope(event: &Event) -> ExecResult<String> {
    let envelope = json!({
        "type": event.event_type.as_str(),
        "data": normalize(&event.data),
    });
    Ok(serde_json::to_string_pretty(&envelope)?)
}

/// Executes the configured command for one event.
pub struct CommandExecutor {
    runner: Arc<dyn CommandRunner>,
}

impl CommandExecutor {
    /// Create an executor backed by the system shell.
    pub fn new() -> Self {
        Self::with_runner(Arc::new(ShellRunner))
    }

    /// Create an executor backed by a custom runner.
    pub fn with_runner(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }

    /// Run the configured command for `event`. Fire and forget: every
    /// outcome is reported through the log stream and nothing propagates
    /// to the caller.
    pub fn execute(&self, config: &PluginConfig, event: &Event) {
        if config.command.is_empty() {
            return;
        }

        let event_json = match encode_envelope(event) {
            Ok(text) => text,
            Err(e) => {
                error!("failed to serialize event data: {e}");
                return;
            }
        };

        let env = [
            (ENV_EVENT_TYPE.to_string(), event.event_type.to_string()),
            (ENV_EVENT_DATA.to_string(), event_json.clone()),
            (ENV_EVENT_TIME.to_string(), Local::now().to_rfc3339()),
        ];

        if config.log_events {
            info!(event_type = %event.event_type, "handling event");
            debug!("event data:\n{event_json}");
        }

        match self.run_checked(&config.command, &env, Duration::from_secs(config.timeout)) {
            Ok(stdout) => {
                if config.log_events && !stdout.is_empty() {
                    info!("command output:\n{stdout}");
                }
            }
            Err(ExecError::NonZeroExit { code, stdout, stderr }) => {
                error!(
                    exit_code = ?code,
                    "command failed\nSTDOUT: {stdout}\nSTDERR: {stderr}"
                );
            }
            Err(ExecError::Timeout { secs }) => {
                error!("command timed out (>{secs}s)");
            }
            Err(e) => {
                error!("command execution failed: {e}");
            }
        }
    }

    /// Run the command and fold a non-zero exit into the error taxonomy.
    fn run_checked(
        &self,
        command: &str,
        env: &[(String, String)],
        timeout: Duration,
    ) -> ExecResult<String> {
        let output = self.runner.run(command, env, timeout)?;
        if output.success() {
            Ok(output.stdout)
        } else {
            Err(ExecError::NonZeroExit {
                code: output.exit_code,
                stdout: output.stdout,
                stderr: output.stderr,
            })
        }
    }
}

impl Default for CommandExecutor {
    fn default() -> Self {
        Self::new()
    }
}
