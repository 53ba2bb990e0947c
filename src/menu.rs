//! Interactive numbered menu.
//!
//! The loop reads a selection, prompts for any host/port the action needs,
//! and hands the resulting [`Action`] to [`commands::dispatch`]. Errors from a
//! single action are printed and the menu is shown again; only console I/O
//! failures end the loop early.

use crate::commands::{self, Action, Session};
use crate::error::Result;
use crate::target;
use std::io::{BufRead, Write};

/// Entries of the main menu, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    Install,
    MeetingPlatforms,
    CloudServices,
    SpeedTest,
    Ping,
    Nping,
    Traceroute,
    PortTest,
    Exit,
}

impl MenuOption {
    pub const ALL: [MenuOption; 9] = [
        MenuOption::Install,
        MenuOption::MeetingPlatforms,
        MenuOption::CloudServices,
        MenuOption::SpeedTest,
        MenuOption::Ping,
        MenuOption::Nping,
        MenuOption::Traceroute,
        MenuOption::PortTest,
        MenuOption::Exit,
    ];

    /// Parse a selection such as `"7"`; surrounding whitespace is ignored.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuOption::Install),
            "2" => Some(MenuOption::MeetingPlatforms),
            "3" => Some(MenuOption::CloudServices),
            "4" => Some(MenuOption::SpeedTest),
            "5" => Some(MenuOption::Ping),
            "6" => Some(MenuOption::Nping),
            "7" => Some(MenuOption::Traceroute),
            "8" => Some(MenuOption::PortTest),
            "9" => Some(MenuOption::Exit),
            _ => None,
        }
    }

    pub fn number(self) -> u8 {
        match self {
            MenuOption::Install => 1,
            MenuOption::MeetingPlatforms => 2,
            MenuOption::CloudServices => 3,
            MenuOption::SpeedTest => 4,
            MenuOption::Ping => 5,
            MenuOption::Nping => 6,
            MenuOption::Traceroute => 7,
            MenuOption::PortTest => 8,
            MenuOption::Exit => 9,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuOption::Install => "Auto-Install Required Modules",
            MenuOption::MeetingPlatforms => "Check Meeting Platform Connectivity",
            MenuOption::CloudServices => "Check Cloud Service Connectivity",
            MenuOption::SpeedTest => "Perform Speed Test",
            MenuOption::Ping => "Manual IP Test (Ping)",
            MenuOption::Nping => "Manual IP Test (Nping)",
            MenuOption::Traceroute => "Traceroute/Tracepath",
            MenuOption::PortTest => "Manual Port Test",
            MenuOption::Exit => "Exit",
        }
    }
}

const PROMPT: &str = "Select an option (1-9): ";
const INVALID_CHOICE: &str = "Invalid choice. Please try again.";

pub fn print_menu(out: &mut dyn Write) -> Result<()> {
    writeln!(out, "\n=== Connectivity CLI Tool ===")?;
    for option in MenuOption::ALL {
        writeln!(out, "{}. {}", option.number(), option.label())?;
    }
    writeln!(out)?;
    Ok(())
}

/// Print `prompt` and read one line. Returns `None` at end of input.
///
/// Bytes that are not valid UTF-8 are replaced rather than rejected, so they
/// reach the normal "invalid choice" / "invalid host" paths.
fn read_line(input: &mut dyn BufRead, out: &mut dyn Write, prompt: &str) -> Result<Option<String>> {
    write!(out, "{}", prompt)?;
    out.flush()?;

    let mut line = Vec::new();
    if input.read_until(b'\n', &mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(String::from_utf8_lossy(&line).trim().to_string()))
}

/// Prompt for a host, returning `None` at end of input.
fn read_host(input: &mut dyn BufRead, out: &mut dyn Write, prompt: &str) -> Result<Option<String>> {
    match read_line(input, out, prompt)? {
        Some(line) => target::parse_host(&line).map(Some),
        None => Ok(None),
    }
}

/// Collect whatever the option needs from the user.
///
/// `Ok(None)` means input ended before the action was fully specified.
fn build_action(
    option: MenuOption,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> Result<Option<Action>> {
    let action = match option {
        MenuOption::Install => Action::Install,
        MenuOption::MeetingPlatforms => Action::CheckMeetingPlatforms,
        MenuOption::CloudServices => Action::CheckCloudServices,
        MenuOption::SpeedTest => Action::SpeedTest,
        MenuOption::Ping => match read_host(input, out, "Enter IP or hostname to ping: ")? {
            Some(host) => Action::Ping { host },
            None => return Ok(None),
        },
        MenuOption::Nping => {
            match read_host(input, out, "Enter IP or hostname for nping test: ")? {
                Some(host) => Action::Nping { host },
                None => return Ok(None),
            }
        }
        MenuOption::Traceroute => {
            match read_host(input, out, "Enter host or IP for traceroute/tracepath: ")? {
                Some(host) => Action::Traceroute { host },
                None => return Ok(None),
            }
        }
        MenuOption::PortTest => {
            let Some(host) = read_host(input, out, "Enter host/IP: ")? else {
                return Ok(None);
            };
            let Some(port) = read_line(input, out, "Enter port number: ")? else {
                return Ok(None);
            };
            Action::PortProbe {
                host,
                port: target::parse_port(&port)?,
            }
        }
        MenuOption::Exit => return Ok(None),
    };
    Ok(Some(action))
}

/// Run the menu until the user exits or input ends.
pub fn run_menu(session: &Session, input: &mut dyn BufRead, out: &mut dyn Write) -> Result<()> {
    loop {
        print_menu(out)?;

        let Some(choice) = read_line(input, out, PROMPT)? else {
            writeln!(out)?;
            return Ok(());
        };

        let Some(option) = MenuOption::parse(&choice) else {
            writeln!(out, "{}\n", INVALID_CHOICE)?;
            continue;
        };

        if option == MenuOption::Exit {
            writeln!(out, "Exiting...")?;
            return Ok(());
        }

        let result = match build_action(option, input, out) {
            Ok(Some(action)) => commands::dispatch(session, out, action),
            // Input ended in the middle of a prompt.
            Ok(None) => {
                writeln!(out)?;
                return Ok(());
            }
            Err(e) => Err(e),
        };

        match result {
            Ok(()) => {}
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => writeln!(out, "❌ {}\n", e)?,
        }
    }
}
