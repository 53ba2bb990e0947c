//! Ping a single host, or every host in a service directory.

use super::Session;
use crate::error::Result;
use crate::exec::{ExecResult, Invocation};
use crate::platform::PlatformKind;
use crate::services::ServiceDirectory;
use std::io::Write;

/// Build the ping invocation for `host` on `platform`.
pub fn ping_invocation(platform: PlatformKind, count: u32, host: &str) -> Invocation {
    Invocation::new("ping")
        .arg(platform.ping_count_flag())
        .arg(count.to_string())
        .arg(host)
}

/// Ping `host` with output streamed to the console.
///
/// A nonzero exit status is reported but returned as `Ok`; only a failure to
/// start `ping` at all is an error.
pub fn ping(session: &Session, out: &mut dyn Write, host: &str) -> Result<ExecResult> {
    let invocation = ping_invocation(session.platform, session.config.ping_count, host);
    writeln!(out, "Running: {}", invocation)?;
    out.flush()?;

    let result = session.runner.run(&invocation)?;
    if !result.is_success() {
        writeln!(
            out,
            "⚠️ ping to {} did not succeed ({})",
            host,
            result.status_text()
        )?;
    }
    Ok(result)
}

/// Outcome of pinging a whole directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectivitySummary {
    pub reachable: Vec<String>,
    pub unreachable: Vec<String>,
}

/// Ping every entry of `directory` in order.
///
/// A failing entry never stops the remaining ones.
pub fn check_connectivity(
    session: &Session,
    out: &mut dyn Write,
    directory: &ServiceDirectory,
) -> Result<ConnectivitySummary> {
    writeln!(out, "\n=== {} ===", directory.title())?;

    let mut summary = ConnectivitySummary::default();
    for entry in directory.entries() {
        writeln!(out, "\nPinging {} ({})...", entry.name, entry.host)?;

        match ping(session, out, &entry.host) {
            Ok(result) if result.is_success() => summary.reachable.push(entry.name.clone()),
            Ok(_) => summary.unreachable.push(entry.name.clone()),
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                writeln!(out, "❌ {}", e)?;
                summary.unreachable.push(entry.name.clone());
            }
        }
    }

    writeln!(
        out,
        "\nSummary: {}/{} reachable",
        summary.reachable.len(),
        directory.entries().len()
    )?;
    if !summary.unreachable.is_empty() {
        writeln!(out, "Unreachable: {}", summary.unreachable.join(", "))?;
    }

    Ok(summary)
}
