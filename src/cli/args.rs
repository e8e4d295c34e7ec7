//! CLI argument definitions using clap
//!
//! Commands:
//! - vehicle-catalog serve [--config <path>] [--port <n>]
//! - vehicle-catalog query [--config <path>] [QUERY]
//! - vehicle-catalog show [--config <path>] <ID>
//! - vehicle-catalog manufacturers [--config <path>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Vehicle catalog with filtering, sorting and pagination
#[derive(Parser, Debug)]
#[command(name = "vehicle-catalog")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        /// Path to configuration file (defaults apply if it does not exist)
        #[arg(long, default_value = "./catalog.json")]
        config: PathBuf,

        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Evaluate one listing query and print the page as JSON
    Query {
        /// Path to configuration file
        #[arg(long, default_value = "./catalog.json")]
        config: PathBuf,

        /// Query string, e.g. "manufacturer=Honda&sort=price-asc&page=2"
        #[arg(default_value = "")]
        query: String,
    },

    /// Print one vehicle as JSON
    Show {
        /// Path to configuration file
        #[arg(long, default_value = "./catalog.json")]
        config: PathBuf,

        /// Vehicle identifier
        id: String,
    },

    /// List the distinct manufacturers
    Manufacturers {
        /// Path to configuration file
        #[arg(long, default_value = "./catalog.json")]
        config: PathBuf,
    },
}

impl Command {
    /// Configuration file this command reads
    pub fn config_path(&self) -> &PathBuf {
        match self {
            Command::Serve { config, .. }
            | Command::Query { config, .. }
            | Command::Show { config, .. }
            | Command::Manufacturers { config } => config,
        }
    }
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
