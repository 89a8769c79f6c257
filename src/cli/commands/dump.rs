use std::{fs, sync::Arc};

use anyhow::{Context, Result};
use colored::Colorize;

use super::super::args::DumpCommand;
use super::super::exit_status::ExitStatus;
use super::super::report::FAILURE_MARK;
use super::load_effective_config;
use crate::config::Config;
use crate::device::{AdbRunner, Device, DeviceSettings};
use crate::hierarchy::capture_and_classify;
use crate::hierarchy::report::{RAW_XML_HEADER, RAW_XML_ON_ERROR_HEADER};

pub fn dump(cmd: DumpCommand) -> Result<ExitStatus> {
    let loaded = load_effective_config(&cmd.common)?;
    let config = loaded.config;

    let xml = match &cmd.input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read dump file: {}", path.display()))?,
        None => capture_from_device(&config)?,
    };

    let capture = match capture_and_classify(&xml, &config.confirmation_keywords()) {
        Ok(capture) => capture,
        Err(err) => {
            eprintln!("{} {}", FAILURE_MARK.red(), err);
            print!("{}{}", RAW_XML_ON_ERROR_HEADER, err.into_raw_markup());
            return Ok(ExitStatus::Failure);
        }
    };

    if cmd.json {
        let json = serde_json::to_string_pretty(&capture.bundle)
            .context("Failed to serialize UI elements")?;
        println!("{}", json);
    } else {
        // The report already ends with a newline
        print!("{}", capture.report);
        if cmd.raw {
            println!("{}{}", RAW_XML_HEADER, xml);
        }
    }

    Ok(ExitStatus::Success)
}

fn capture_from_device(config: &Config) -> Result<String> {
    let runner = AdbRunner::new(
        &config.adb_path,
        config.command_timeout(),
        config.settle_delay(),
    );
    let device = Device::new(Arc::new(runner), DeviceSettings::from(config));

    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(device.dump_hierarchy())
        .context("Failed to capture UI dump from device")
}
