pub mod dump;
pub mod init;
pub mod serve;

use std::env;

use anyhow::{Context, Result};

use super::args::CommonArgs;
use crate::config::{ConfigLoadResult, load_config};

/// Load the config for the working directory and apply command-line overrides.
pub fn load_effective_config(common: &CommonArgs) -> Result<ConfigLoadResult> {
    let cwd = env::current_dir().context("Failed to determine the working directory")?;
    let mut loaded = load_config(&cwd)?;

    if let Some(adb_path) = &common.adb_path {
        loaded.config.adb_path = adb_path.clone();
    }
    if let Some(timeout_ms) = common.timeout_ms {
        loaded.config.command_timeout_ms = timeout_ms;
    }
    loaded.config.validate()?;

    Ok(loaded)
}
