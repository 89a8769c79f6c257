use std::process::ExitCode;

use clap::Parser;
use droidscope::cli::{Arguments, ExitStatus};
use droidscope::telemetry::init_tracing;

fn main() -> ExitCode {
    let args = Arguments::parse();
    let _telemetry = init_tracing(if args.verbose() { "debug" } else { "info" });

    match droidscope::cli::run_cli(args) {
        Ok(status) => status.into(),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitStatus::Error.into()
        }
    }
}
