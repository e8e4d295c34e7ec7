//! CLI module for the vehicle catalog
//!
//! Provides command-line interface for:
//! - serve: Start the HTTP server
//! - query: One-shot listing query
//! - show: One-shot record lookup
//! - manufacturers: Manufacturer list

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{load_config, manufacturers, query_page, run, run_command, serve, show};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{write_json, write_json_to};
