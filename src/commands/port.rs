//! TCP port reachability test.

use super::Session;
use crate::error::Result;
use std::io::Write;
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

/// Result of a TCP connect attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortProbeOutcome {
    Open,
    /// The transport error text, passed through verbatim. Never empty.
    Unreachable { reason: String },
}

impl PortProbeOutcome {
    fn unreachable(reason: impl ToString) -> Self {
        let reason = reason.to_string();
        PortProbeOutcome::Unreachable {
            reason: if reason.is_empty() {
                "unknown error".to_string()
            } else {
                reason
            },
        }
    }
}

/// Try to open a TCP connection to `host:port`.
///
/// Every resolved address is tried with the same per-attempt `timeout`; the
/// first successful connect wins, otherwise the last error is reported.
pub fn probe_port(host: &str, port: u16, timeout: Duration) -> PortProbeOutcome {
    let addrs = match (host, port).to_socket_addrs() {
        Ok(addrs) => addrs,
        Err(e) => return PortProbeOutcome::unreachable(e),
    };

    let mut last_error = None;
    for addr in addrs {
        match TcpStream::connect_timeout(&addr, timeout) {
            Ok(_) => return PortProbeOutcome::Open,
            Err(e) => last_error = Some(e),
        }
    }

    match last_error {
        Some(e) => PortProbeOutcome::unreachable(e),
        None => PortProbeOutcome::unreachable(format!("no addresses found for '{}'", host)),
    }
}

/// Probe `host:port` and print the verdict.
pub fn port_test(
    session: &Session,
    out: &mut dyn Write,
    host: &str,
    port: u16,
) -> Result<PortProbeOutcome> {
    let outcome = probe_port(host, port, session.config.port_timeout());

    match &outcome {
        PortProbeOutcome::Open => writeln!(out, "✅ Port {} on {} is open.", port, host)?,
        PortProbeOutcome::Unreachable { reason } => writeln!(
            out,
            "❌ Port {} on {} is not reachable.\nError: {}",
            port, host, reason
        )?,
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::platform::PlatformKind;
    use crate::test_support::{FakeRunner, output_of};
    use serial_test::serial;
    use std::net::TcpListener;

    const TIMEOUT: Duration = Duration::from_secs(3);

    /// A local port with nothing listening on it.
    fn closed_port() -> u16 {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    }

    #[test]
    #[serial]
    fn open_listener_is_reported_open() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();

        assert_eq!(probe_port("127.0.0.1", port, TIMEOUT), PortProbeOutcome::Open);
    }

    #[test]
    #[serial]
    fn closed_port_is_unreachable_with_reason() {
        let port = closed_port();

        match probe_port("127.0.0.1", port, TIMEOUT) {
            PortProbeOutcome::Unreachable { reason } => assert!(!reason.is_empty()),
            PortProbeOutcome::Open => panic!("port {} unexpectedly open", port),
        }
    }

    #[test]
    #[serial]
    fn bracketed_ipv6_listener_is_reported_open() {
        // Hosts without IPv6 loopback cannot run this check.
        let Ok(listener) = TcpListener::bind("[::1]:0") else {
            return;
        };
        let port = listener.local_addr().unwrap().port();

        let host = crate::target::parse_host("[::1]").unwrap();
        assert_eq!(probe_port(&host, port, TIMEOUT), PortProbeOutcome::Open);
    }

    #[test]
    fn unresolvable_host_is_unreachable() {
        let outcome = probe_port("no-such-host.invalid", 80, TIMEOUT);
        match outcome {
            PortProbeOutcome::Unreachable { reason } => assert!(!reason.is_empty()),
            PortProbeOutcome::Open => panic!("unresolvable host reported open"),
        }
    }

    #[test]
    #[serial]
    fn port_test_prints_verdict() {
        let runner = FakeRunner::new();
        let session = Session::new(PlatformKind::Linux, Config::default(), &runner);
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let mut out = Vec::new();

        let outcome = port_test(&session, &mut out, "127.0.0.1", port).unwrap();

        assert_eq!(outcome, PortProbeOutcome::Open);
        assert_eq!(
            output_of(out),
            format!("✅ Port {} on 127.0.0.1 is open.\n", port)
        );
    }

    #[test]
    #[serial]
    fn port_test_prints_failure_reason() {
        let runner = FakeRunner::new();
        let session = Session::new(PlatformKind::Linux, Config::default(), &runner);
        let port = closed_port();
        let mut out = Vec::new();

        port_test(&session, &mut out, "127.0.0.1", port).unwrap();

        let text = output_of(out);
        assert!(text.contains(&format!("❌ Port {} on 127.0.0.1 is not reachable.", port)));
        assert!(text.contains("Error: "));
    }
}
