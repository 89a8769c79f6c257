use anyhow::Result;

use super::super::args::ServeCommand;
use super::super::exit_status::ExitStatus;
use super::load_effective_config;
use crate::mcp::run_server;

pub fn serve(cmd: ServeCommand) -> Result<ExitStatus> {
    let loaded = load_effective_config(&cmd.common)?;
    run_server(loaded.config, loaded.from_file)?;
    Ok(ExitStatus::Success)
}
