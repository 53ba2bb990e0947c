//! Path tracing with tracert, or tracepath falling back to traceroute.

use super::Session;
use crate::error::{ConncheckError, Result};
use crate::exec::{ExecResult, Invocation};
use crate::platform::TraceStrategy;
use std::io::Write;

/// Printed after every trace attempt, whatever its outcome.
pub const TRACE_NOTE: &str = "\nNote:\n\
• 'no reply' means intermediate routers may block traceroute ICMP/UDP packets.\n\
• This is common with ISPs, cloud providers (AWS, Google), or firewalls.\n\
• If early hops respond, your local connectivity is working.\n";

/// Trace the route to `host`.
pub fn traceroute(session: &Session, out: &mut dyn Write, host: &str) -> Result<ExecResult> {
    writeln!(out, "\nRunning traceroute/tracepath for {}...\n", host)?;

    let result = run_trace(session, out, host);

    writeln!(out, "{}", TRACE_NOTE)?;
    result
}

fn run_trace(session: &Session, out: &mut dyn Write, host: &str) -> Result<ExecResult> {
    match session.platform.trace_strategy() {
        TraceStrategy::Builtin(program) => run_one(session, out, program, host),
        TraceStrategy::Fallback { primary, secondary } => {
            let runner = session.runner;
            if runner.is_available(primary) {
                // A primary that cannot even start counts as a failed run.
                let attempt = run_one(session, out, primary, host);
                let failed = match &attempt {
                    Ok(result) => !result.is_success(),
                    Err(e) => !e.is_fatal(),
                };
                if !failed || !runner.is_available(secondary) {
                    return attempt;
                }
                if let Err(e) = &attempt {
                    writeln!(out, "❌ {}", e)?;
                }
                writeln!(out, "⚠️ {} failed. Trying {}...", primary, secondary)?;
                run_one(session, out, secondary, host)
            } else if runner.is_available(secondary) {
                run_one(session, out, secondary, host)
            } else {
                Err(ConncheckError::missing_tool(
                    format!("{}/{}", primary, secondary),
                    "Use Option 1 to install them.",
                ))
            }
        }
    }
}

fn run_one(
    session: &Session,
    out: &mut dyn Write,
    program: &str,
    host: &str,
) -> Result<ExecResult> {
    let invocation = Invocation::new(program).arg(host);
    writeln!(out, "Running: {}", invocation)?;
    out.flush()?;
    session.runner.run(&invocation)
}
