//! Invocation of the `adb` binary.

use std::fmt;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::process::Command;
use tokio::time::{sleep, timeout};

/// Arguments for one `adb` invocation, without the program name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdbCommand {
    args: Vec<String>,
}

impl AdbCommand {
    /// `adb shell <args...>`
    pub fn shell<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_prefix("shell", args)
    }

    /// `adb exec-out <args...>`, for binary-safe stdout.
    pub fn exec_out<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_prefix("exec-out", args)
    }

    fn with_prefix<I, S>(prefix: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args = std::iter::once(prefix.to_string())
            .chain(args.into_iter().map(Into::into))
            .collect();
        Self { args }
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl fmt::Display for AdbCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "adb {}", self.args.join(" "))
    }
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("`{command}` exited with {}: {stderr}", exit_code_label(*.code))]
    Failed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },
    #[error("`{command}` timed out after {}ms", .timeout.as_millis())]
    TimedOut { command: String, timeout: Duration },
}

fn exit_code_label(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "a signal".to_string(),
    }
}

/// Runs device-bridge commands and returns their stdout.
///
/// A non-zero exit, a spawn failure or a timeout is an error; partial output
/// is never returned.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, command: &AdbCommand) -> Result<Vec<u8>, CommandError>;

    async fn run_text(&self, command: &AdbCommand) -> Result<String, CommandError> {
        let stdout = self.run(command).await?;
        Ok(String::from_utf8_lossy(&stdout).into_owned())
    }
}

/// [`CommandRunner`] backed by a local `adb` executable.
#[derive(Debug, Clone)]
pub struct AdbRunner {
    adb_path: PathBuf,
    timeout: Duration,
    settle_delay: Duration,
}

impl AdbRunner {
    pub fn new(adb_path: impl Into<PathBuf>, timeout: Duration, settle_delay: Duration) -> Self {
        Self {
            adb_path: adb_path.into(),
            timeout,
            settle_delay,
        }
    }
}

#[async_trait]
impl CommandRunner for AdbRunner {
    async fn run(&self, command: &AdbCommand) -> Result<Vec<u8>, CommandError> {
        let label = command.to_string();
        tracing::debug!(command = %label, "running device command");

        sleep(self.settle_delay).await;

        let mut cmd = Command::new(&self.adb_path);
        cmd.args(command.args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output = timeout(self.timeout, cmd.output())
            .await
            .map_err(|_| CommandError::TimedOut {
                command: label.clone(),
                timeout: self.timeout,
            })?
            .map_err(|source| CommandError::Spawn {
                command: label.clone(),
                source,
            })?;

        sleep(self.settle_delay).await;

        if !output.status.success() {
            let err = CommandError::Failed {
                command: label,
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            };
            tracing::warn!(error = %err, "device command failed");
            return Err(err);
        }

        Ok(output.stdout)
    }
}
