use std::process::ExitCode;

/// Exit status for CLI commands.
///
/// - `Success` (0): Command completed successfully
/// - `Failure` (1): Command ran but could not produce its result (unparsable dump, existing config)
/// - `Error` (2): Command failed due to internal error (config error, device unreachable, etc.)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// Command did what was asked.
    Success,
    /// Command ran, but its input or target state did not allow a result.
    Failure,
    /// Command could not run (bad config, unreadable file, adb unavailable).
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
