//! Best-effort installation of the external tools conncheck drives.
//!
//! Nothing here fails the session: a tool that cannot be installed becomes a
//! warning in the [`InstallReport`] and the routine moves on. Only console
//! I/O errors are propagated.

use super::Session;
use super::speedtest::{self, SPEEDTEST};
use crate::error::{ConncheckError, Result};
use crate::exec::Invocation;
use crate::platform::{PackageManager, PlatformKind};
use std::io::Write;

const CHOCOLATEY_URL: &str = "https://chocolatey.org/install";

/// A system package and the executable that proves it is installed.
#[derive(Debug, Clone, Copy)]
struct SystemTool {
    package: &'static str,
    probe: &'static str,
}

const LINUX_TOOLS: &[SystemTool] = &[
    SystemTool {
        package: "nmap",
        probe: "nping",
    },
    SystemTool {
        package: "iputils-tracepath",
        probe: "tracepath",
    },
    SystemTool {
        package: "traceroute",
        probe: "traceroute",
    },
];

const WINDOWS_TOOLS: &[SystemTool] = &[SystemTool {
    package: "nmap",
    probe: "nping",
}];

fn system_tools(platform: PlatformKind) -> &'static [SystemTool] {
    match platform {
        PlatformKind::Linux => LINUX_TOOLS,
        PlatformKind::Windows => WINDOWS_TOOLS,
        PlatformKind::Other => &[],
    }
}

/// What the install routine did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallReport {
    pub already_present: Vec<String>,
    pub installed: Vec<String>,
    pub warnings: Vec<String>,
}

impl InstallReport {
    fn warn(&mut self, out: &mut dyn Write, message: String) -> Result<()> {
        writeln!(out, "⚠️ {}", message)?;
        self.warnings.push(message);
        Ok(())
    }
}

/// Install every missing tool for the current platform.
pub fn install_dependencies(session: &Session, out: &mut dyn Write) -> Result<InstallReport> {
    writeln!(out, "\n=== Installing Required Modules ===")?;

    let mut report = InstallReport::default();

    install_speedtest(session, out, &mut report)?;

    match session.platform.package_manager() {
        Some(manager) => {
            writeln!(
                out,
                "\nInstalling system tools on {} (via {})...",
                session.platform,
                manager.program()
            )?;
            install_system_tools(session, out, manager, &mut report)?;
        }
        None => {
            report.warn(
                out,
                ConncheckError::UnsupportedPlatform("Automatic installation".to_string())
                    .to_string(),
            )?;
            writeln!(out, "Please install manually:")?;
            writeln!(out, "   - speedtest-cli")?;
            writeln!(out, "   - nmap")?;
            writeln!(out, "   - tracepath/traceroute")?;
        }
    }

    if session.platform == PlatformKind::Windows {
        writeln!(out, "✅ Note: tracert is built-in on Windows.")?;
    }

    writeln!(
        out,
        "\n✅ Installation complete ({} installed, {} already present, {} warning(s)).\n",
        report.installed.len(),
        report.already_present.len(),
        report.warnings.len()
    )?;

    Ok(report)
}

fn install_speedtest(
    session: &Session,
    out: &mut dyn Write,
    report: &mut InstallReport,
) -> Result<()> {
    if speedtest::locate(session).is_some() {
        writeln!(out, "✅ {} is already installed.", SPEEDTEST)?;
        report.already_present.push(SPEEDTEST.to_string());
        return Ok(());
    }

    let python = session.platform.python();
    if !session.runner.is_available(python) {
        return report.warn(
            out,
            format!(
                "{} not found; cannot install {}. Install Python 3 and re-run.",
                python, SPEEDTEST
            ),
        );
    }

    writeln!(out, "Installing {} Python module...", SPEEDTEST)?;
    let invocation = Invocation::new(python).args(["-m", "pip", "install", "--user", SPEEDTEST]);
    run_install(session, out, &invocation, SPEEDTEST, report)
}

fn install_system_tools(
    session: &Session,
    out: &mut dyn Write,
    manager: PackageManager,
    report: &mut InstallReport,
) -> Result<()> {
    if !session.runner.is_available(manager.program()) {
        let message = match manager {
            PackageManager::Chocolatey => format!(
                "Chocolatey not found. Please install from {} and re-run.",
                CHOCOLATEY_URL
            ),
            PackageManager::Apt => {
                "apt not found. Install nmap, tracepath and traceroute with your package manager."
                    .to_string()
            }
        };
        return report.warn(out, message);
    }

    let use_sudo = manager.needs_sudo() && session.runner.is_available("sudo");

    for tool in system_tools(session.platform) {
        if session.runner.is_available(tool.probe) {
            writeln!(out, "✅ {} already installed.", tool.package)?;
            report.already_present.push(tool.package.to_string());
            continue;
        }

        writeln!(out, "Installing {}...", tool.package)?;
        let invocation = if use_sudo {
            Invocation::new("sudo")
                .arg(manager.program())
                .args(manager.install_args(tool.package))
        } else {
            Invocation::new(manager.program()).args(manager.install_args(tool.package))
        };
        run_install(session, out, &invocation, tool.package, report)?;
    }

    Ok(())
}

fn run_install(
    session: &Session,
    out: &mut dyn Write,
    invocation: &Invocation,
    name: &str,
    report: &mut InstallReport,
) -> Result<()> {
    writeln!(out, "Running: {}", invocation)?;
    out.flush()?;

    match session.runner.run(invocation) {
        Ok(result) if result.is_success() => {
            writeln!(out, "✅ {} installed successfully.", name)?;
            report.installed.push(name.to_string());
            Ok(())
        }
        Ok(result) => report.warn(
            out,
            format!(
                "Failed to install {} ({}). Please install manually.",
                name,
                result.status_text()
            ),
        ),
        Err(e) if e.is_fatal() => Err(e),
        Err(e) => report.warn(out, format!("Failed to install {}: {}", name, e)),
    }
}
