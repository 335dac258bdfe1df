//! External process execution with captured output.
//!
//! Both the docker engine client and git branch enrichment go through a
//! [`ProcessRunner`], so tests can substitute a fake and production code gets
//! one place that enforces the per-process deadline.

use std::fmt;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use voltrack_shared::errors::{VoltrackError, VoltrackResult};

/// A program and its argument vector.
///
/// Arguments are passed to the OS verbatim, no shell is involved, so paths
/// containing spaces or quotes need no escaping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    program: String,
    args: Vec<String>,
}

impl CommandLine {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn get_args(&self) -> &[String] {
        &self.args
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " \"{}\"", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// Runs a command to completion and returns its standard output.
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Run `cmd`, returning stdout untouched on a zero exit status.
    ///
    /// # Errors
    ///
    /// - [`VoltrackError::Execution`] if the process cannot be spawned, exits
    ///   non-zero, or writes non-UTF-8 output
    /// - [`VoltrackError::Timeout`] if the implementation enforces a deadline
    ///   and it passes
    async fn run_capture(&self, cmd: &CommandLine) -> VoltrackResult<String>;
}

/// [`ProcessRunner`] that spawns real host processes via tokio.
///
/// The child is killed if it outlives `timeout`.
#[derive(Debug, Clone)]
pub struct HostProcessRunner {
    timeout: Duration,
}

impl HostProcessRunner {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl ProcessRunner for HostProcessRunner {
    async fn run_capture(&self, cmd: &CommandLine) -> VoltrackResult<String> {
        let mut command = tokio::process::Command::new(cmd.program());
        command
            .args(cmd.get_args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        tracing::trace!(command = %cmd, "Spawning process");

        // Dropping the output future on timeout drops the child, and
        // kill_on_drop reaps it.
        let output = match tokio::time::timeout(self.timeout, command.output()).await {
            Ok(result) => result.map_err(|e| {
                VoltrackError::Execution(format!("Failed to spawn '{}': {}", cmd, e))
            })?,
            Err(_) => {
                return Err(VoltrackError::Timeout(format!(
                    "'{}' did not finish within {}ms",
                    cmd,
                    self.timeout.as_millis()
                )));
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(VoltrackError::Execution(format!(
                "'{}' exited with {}: {}",
                cmd,
                output.status,
                stderr.trim()
            )));
        }

        String::from_utf8(output.stdout).map_err(|e| {
            VoltrackError::Execution(format!("'{}' produced non-UTF-8 output: {}", cmd, e))
        })
    }
}
