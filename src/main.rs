//! conncheck: menu-driven network connectivity checker.
//!
//! This is the main entry point for the `conncheck` CLI. It parses arguments,
//! loads configuration, runs the interactive menu, and maps fatal errors to
//! exit codes.

mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod events;
pub mod exec;
pub mod exit_codes;
pub mod menu;
pub mod platform;
pub mod services;
pub mod target;

#[cfg(test)]
mod test_support;

use cli::Cli;
use commands::Session;
use config::Config;
use error::Result;
use events::EventLog;
use exec::SystemRunner;
use platform::PlatformKind;
use std::io;
use std::process::ExitCode;

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    let runner = SystemRunner;
    let session = Session::new(PlatformKind::detect(), config, &runner)
        .with_event_log(cli.event_log.map(EventLog::new));

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();
    menu::run_menu(&session, &mut input, &mut out)
}

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    match run(cli) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::from(err.exit_code() as u8)
        }
    }
}
