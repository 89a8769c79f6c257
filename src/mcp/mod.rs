//! Model Context Protocol (MCP) server.
//!
//! Exposes the device driver and the UI capture pipeline as MCP tools over
//! stdio. Tool calls run one at a time.
//!
//! ## Module Structure
//!
//! - `helpers`: Error mapping and UI capture rendering shared by tools
//! - `server`: Tool router and server entry point
//! - `types`: Tool parameter and response types

mod helpers;
mod server;
pub mod types;

pub use server::{DroidscopeMcpServer, run_server};
