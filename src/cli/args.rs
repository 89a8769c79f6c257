//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `serve`: Start the MCP server on stdio
//! - `dump`: Capture or read a UI dump and print the element report
//! - `init`: Initialize a droidscope configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Serve(cmd)) => cmd.common.verbose,
            Some(Command::Dump(cmd)) => cmd.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by device-facing commands.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Path to the adb executable (overrides config file)
    #[arg(long, env = "DROIDSCOPE_ADB")]
    pub adb_path: Option<String>,

    /// Timeout for each adb invocation in milliseconds (overrides config file)
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct ServeCommand {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct DumpCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Read a saved uiautomator dump instead of capturing from the device
    #[arg(long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Print the categorized elements as JSON instead of the text report
    #[arg(long, conflicts_with = "raw")]
    pub json: bool,

    /// Append the raw XML after the report
    #[arg(long)]
    pub raw: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start MCP server for AI coding agents
    Serve(ServeCommand),
    /// Print the interactive elements of the current screen
    Dump(DumpCommand),
    /// Initialize a new .droidscoperc.json configuration file
    Init,
}
