use anyhow::Result;

mod args;
mod commands;
mod exit_status;
mod report;

pub use args::{Arguments, Command, CommonArgs, DumpCommand, ServeCommand};
pub use exit_status::ExitStatus;

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    let Some(args) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success);
    };

    match args.command {
        Some(Command::Serve(cmd)) => commands::serve::serve(cmd),
        Some(Command::Dump(cmd)) => commands::dump::dump(cmd),
        Some(Command::Init) => commands::init::init(),
        None => Ok(ExitStatus::Success),
    }
}
