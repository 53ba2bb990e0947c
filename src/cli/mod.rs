//! CLI argument parsing for conncheck.
//!
//! The tool itself is driven from an interactive menu; the process arguments
//! only select configuration and logging.

use clap::Parser;
use std::path::PathBuf;

/// conncheck: menu-driven network connectivity checker.
///
/// Pings meeting platforms and cloud services, runs speed tests, traces
/// routes, and probes TCP ports using the system's own diagnostic tools.
#[derive(Parser, Debug)]
#[command(name = "conncheck")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// YAML configuration file (ping count, port timeout, service lists).
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Append one NDJSON event per menu action to this file.
    #[arg(long, value_name = "PATH")]
    pub event_log: Option<PathBuf>,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
