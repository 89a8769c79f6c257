//! Droidscope - Android device automation for AI agents
//!
//! Droidscope drives a device through `adb` and turns uiautomator hierarchy
//! dumps into a categorized, human-readable list of on-screen elements with
//! tap coordinates. It is served to agents as an MCP tool server and is also
//! usable from the command line.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `device`: `adb` command execution and device operations
//! - `hierarchy`: UI dump parsing, classification and reporting
//! - `mcp`: Model Context Protocol server implementation
//! - `telemetry`: Logging setup

pub mod cli;
pub mod config;
pub mod device;
pub mod hierarchy;
pub mod mcp;
pub mod telemetry;
