use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Ok, Result, bail};
use serde::{Deserialize, Serialize};

use crate::hierarchy::ConfirmationKeywords;
use crate::hierarchy::bundle::DEFAULT_CONFIRMATION_KEYWORDS;

pub const CONFIG_FILE_NAME: &str = ".droidscoperc.json";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_adb_path")]
    pub adb_path: String,
    #[serde(default = "default_command_timeout_ms")]
    pub command_timeout_ms: u64,
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,
    #[serde(default = "default_launch_wait_ms")]
    pub launch_wait_ms: u64,
    #[serde(default = "default_test_root")]
    pub test_root: String,
    #[serde(default = "default_dump_path")]
    pub dump_path: String,
    #[serde(default = "default_confirmation_keywords")]
    pub confirmation_keywords: Vec<String>,
    #[serde(default = "default_include_raw_xml")]
    pub include_raw_xml: bool,
}

fn default_adb_path() -> String {
    "adb".to_string()
}

fn default_command_timeout_ms() -> u64 {
    30_000
}

fn default_settle_delay_ms() -> u64 {
    200
}

fn default_launch_wait_ms() -> u64 {
    5_000
}

fn default_test_root() -> String {
    "./".to_string()
}

fn default_dump_path() -> String {
    "/sdcard/window_dump.xml".to_string()
}

fn default_confirmation_keywords() -> Vec<String> {
    DEFAULT_CONFIRMATION_KEYWORDS
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_include_raw_xml() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            adb_path: default_adb_path(),
            command_timeout_ms: default_command_timeout_ms(),
            settle_delay_ms: default_settle_delay_ms(),
            launch_wait_ms: default_launch_wait_ms(),
            test_root: default_test_root(),
            dump_path: default_dump_path(),
            confirmation_keywords: default_confirmation_keywords(),
            include_raw_xml: default_include_raw_xml(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.adb_path.trim().is_empty() {
            bail!("Invalid 'adbPath': must not be empty");
        }
        if self.command_timeout_ms == 0 {
            bail!("Invalid 'commandTimeoutMs': must be greater than 0");
        }
        if self.dump_path.trim().is_empty() {
            bail!("Invalid 'dumpPath': must not be empty");
        }
        // An empty keyword would match every content description
        if let Some(i) = self.confirmation_keywords.iter().position(|k| k.is_empty()) {
            bail!("Invalid 'confirmationKeywords': entry {} is empty", i);
        }

        Ok(())
    }

    pub fn command_timeout(&self) -> Duration {
        Duration::from_millis(self.command_timeout_ms)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn confirmation_keywords(&self) -> ConfirmationKeywords {
        ConfirmationKeywords::new(self.confirmation_keywords.iter().cloned())
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            tracing::debug!(path = %path.display(), "loaded config");
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
