//! Advanced ping through nmap's `nping`.

use super::Session;
use crate::error::{ConncheckError, Result};
use crate::exec::{ExecResult, Invocation};
use std::io::Write;

const NPING: &str = "nping";

pub fn nping(session: &Session, out: &mut dyn Write, host: &str) -> Result<ExecResult> {
    if !session.runner.is_available(NPING) {
        return Err(ConncheckError::missing_tool(
            NPING,
            "Run Option 1 to install nmap/nping.",
        ));
    }

    let invocation = Invocation::new(NPING).arg(host);
    writeln!(out, "Running: {}", invocation)?;
    out.flush()?;

    let result = session.runner.run(&invocation)?;
    if !result.is_success() {
        writeln!(out, "⚠️ nping finished with {}", result.status_text())?;
    }
    Ok(result)
}
