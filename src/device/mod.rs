//! Device-side actions performed through `adb`.
//!
//! [`Device`] owns the fixed command vocabulary (tap, text, keys, swipes,
//! screenshots, hierarchy dumps) and the local file bookkeeping around it.
//! The process boundary is the [`CommandRunner`] trait so the actions can be
//! exercised without a device.

pub mod command;
pub mod input;

use std::fs;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

pub use command::{AdbCommand, AdbRunner, CommandError, CommandRunner};
pub use input::{KeyEvent, ScrollDirection, Swipe};

use crate::config::Config;

#[derive(Debug, Error)]
pub enum DeviceError {
    #[error(transparent)]
    Command(#[from] CommandError),
    #[error("{0}")]
    InvalidArgument(String),
    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Device-side paths and pacing.
#[derive(Debug, Clone)]
pub struct DeviceSettings {
    /// Where `uiautomator dump` writes on the device.
    pub dump_path: String,
    /// Pause after launching an app so its first screen can render.
    pub launch_wait: Duration,
    /// Local directory that holds per-test folders.
    pub test_root: PathBuf,
}

impl From<&Config> for DeviceSettings {
    fn from(config: &Config) -> Self {
        Self {
            dump_path: config.dump_path.clone(),
            launch_wait: Duration::from_millis(config.launch_wait_ms),
            test_root: PathBuf::from(&config.test_root),
        }
    }
}

/// A captured screenshot and where it was saved.
#[derive(Debug, Clone)]
pub struct Screenshot {
    pub path: PathBuf,
    pub png: Vec<u8>,
}

#[derive(Clone)]
pub struct Device {
    runner: Arc<dyn CommandRunner>,
    settings: DeviceSettings,
}

impl Device {
    pub fn new(runner: Arc<dyn CommandRunner>, settings: DeviceSettings) -> Self {
        Self { runner, settings }
    }

    /// Create `<test_root>/<test_name>` if it does not exist.
    pub fn create_test_folder(&self, test_name: &str) -> Result<PathBuf, DeviceError> {
        let path = self.test_dir(test_name)?;
        ensure_directory(&path)?;
        Ok(path)
    }

    /// Installed package lines (`package:<name>`) that contain `pattern`.
    pub async fn list_packages(&self, pattern: &str) -> Result<Vec<String>, DeviceError> {
        let listing = self
            .runner
            .run_text(&AdbCommand::shell(["pm", "list", "packages"]))
            .await?;

        Ok(listing
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && line.contains(pattern))
            .map(String::from)
            .collect())
    }

    /// Launch the package's default activity and wait for it to settle.
    pub async fn open_app(&self, package: &str) -> Result<(), DeviceError> {
        validate_package(package)?;
        self.runner
            .run(&AdbCommand::shell(["monkey", "-p", package, "1"]))
            .await?;
        tokio::time::sleep(self.settings.launch_wait).await;
        Ok(())
    }

    /// Save a PNG screenshot as `<test_root>/<test_name>/<step_name>_step.png`.
    pub async fn capture_screenshot(
        &self,
        test_name: &str,
        step_name: &str,
    ) -> Result<Screenshot, DeviceError> {
        validate_relative(step_name, "step name")?;
        let dir = self.create_test_folder(test_name)?;
        let path = dir.join(format!("{}_step.png", step_name));

        let png = self
            .runner
            .run(&AdbCommand::exec_out(["screencap", "-p"]))
            .await?;

        if let Some(parent) = path.parent() {
            ensure_directory(parent)?;
        }
        fs::write(&path, &png).map_err(|source| DeviceError::Io {
            path: path.clone(),
            source,
        })?;

        Ok(Screenshot { path, png })
    }

    /// Dump the current window hierarchy and read it back as text.
    pub async fn dump_hierarchy(&self) -> Result<String, DeviceError> {
        let dump_path = self.settings.dump_path.as_str();
        self.runner
            .run(&AdbCommand::shell(["uiautomator", "dump", dump_path]))
            .await?;
        let xml = self
            .runner
            .run_text(&AdbCommand::shell(["cat", dump_path]))
            .await?;
        Ok(xml)
    }

    pub async fn key_event(&self, key: KeyEvent) -> Result<(), DeviceError> {
        let code = key.keycode().to_string();
        self.runner
            .run(&AdbCommand::shell(["input", "keyevent", code.as_str()]))
            .await?;
        Ok(())
    }

    pub async fn tap(&self, x: f64, y: f64) -> Result<(), DeviceError> {
        if !x.is_finite() || !y.is_finite() || x < 0.0 || y < 0.0 {
            return Err(DeviceError::InvalidArgument(format!(
                "Invalid coordinates: ({}, {})",
                x, y
            )));
        }
        self.runner
            .run(&AdbCommand::shell([
                "input".to_string(),
                "tap".to_string(),
                x.to_string(),
                y.to_string(),
            ]))
            .await?;
        Ok(())
    }

    /// Type `text` into the focused field, then press ENTER.
    pub async fn input_text(&self, text: &str) -> Result<(), DeviceError> {
        self.runner
            .run(&AdbCommand::shell([
                "input".to_string(),
                "text".to_string(),
                input::quote_text(text),
            ]))
            .await?;
        self.key_event(KeyEvent::Enter).await
    }

    pub async fn scroll(&self, direction: ScrollDirection) -> Result<(), DeviceError> {
        let mut args = vec!["input".to_string(), "swipe".to_string()];
        args.extend(direction.swipe().args());
        self.runner.run(&AdbCommand::shell(args)).await?;
        Ok(())
    }

    fn test_dir(&self, test_name: &str) -> Result<PathBuf, DeviceError> {
        validate_relative(test_name, "test name")?;
        Ok(self.settings.test_root.join(test_name))
    }
}

pub fn ensure_directory(path: &Path) -> Result<(), DeviceError> {
    fs::create_dir_all(path).map_err(|source| DeviceError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Names must stay inside the test root.
fn validate_relative(name: &str, what: &str) -> Result<(), DeviceError> {
    let path = Path::new(name);
    let contained = !name.trim().is_empty()
        && path
            .components()
            .all(|component| matches!(component, Component::Normal(_)));

    if contained {
        Ok(())
    } else {
        Err(DeviceError::InvalidArgument(format!(
            "Invalid {}: {:?}",
            what, name
        )))
    }
}

/// Package names go through the device shell unquoted.
fn validate_package(package: &str) -> Result<(), DeviceError> {
    let valid = !package.is_empty()
        && package
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '_');

    if valid {
        Ok(())
    } else {
        Err(DeviceError::InvalidArgument(format!(
            "Invalid package name: {:?}",
            package
        )))
    }
}
