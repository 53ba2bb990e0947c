//! Bandwidth measurement through `speedtest-cli`.
//!
//! The tool is run with `--json` and its bit rates (bits per second) are
//! converted to megabits per second for display. `pip install --user` often
//! puts the `speedtest-cli` script outside PATH, so when the script is not
//! found the installed module is run as `<python> -m speedtest` instead.

use super::Session;
use crate::error::{ConncheckError, Result};
use crate::exec::Invocation;
use serde::Deserialize;
use std::io::Write;

pub const SPEEDTEST: &str = "speedtest-cli";

/// Python module installed by the `speedtest-cli` package.
const SPEEDTEST_MODULE: &str = "speedtest";

const BITS_PER_MEGABIT: f64 = 1_000_000.0;

/// The subset of `speedtest-cli --json` output we use.
#[derive(Debug, Clone, Deserialize)]
pub struct SpeedTestOutput {
    /// Download rate in bits per second.
    pub download: f64,
    /// Upload rate in bits per second.
    pub upload: f64,
    /// Latency to the selected server in milliseconds.
    #[serde(default)]
    pub ping: Option<f64>,
    #[serde(default)]
    pub server: Option<SpeedTestServer>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpeedTestServer {
    #[serde(default)]
    pub sponsor: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

impl SpeedTestServer {
    fn describe(&self) -> Option<String> {
        let parts: Vec<&str> = [&self.sponsor, &self.name, &self.country]
            .into_iter()
            .filter_map(|p| p.as_deref())
            .filter(|p| !p.is_empty())
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }
}

/// Speed test results in display units.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeedReport {
    pub download_mbps: f64,
    pub upload_mbps: f64,
    pub ping_ms: Option<f64>,
    pub server: Option<String>,
}

impl From<SpeedTestOutput> for SpeedReport {
    fn from(raw: SpeedTestOutput) -> Self {
        Self {
            download_mbps: bits_to_mbps(raw.download),
            upload_mbps: bits_to_mbps(raw.upload),
            ping_ms: raw.ping,
            server: raw.server.as_ref().and_then(SpeedTestServer::describe),
        }
    }
}

pub fn bits_to_mbps(bits_per_second: f64) -> f64 {
    bits_per_second / BITS_PER_MEGABIT
}

/// Two-decimal rendering used for every displayed rate.
pub fn format_mbps(mbps: f64) -> String {
    format!("{:.2}", mbps)
}

/// Parse the JSON printed by `speedtest-cli --json`.
pub fn parse_output(json: &str) -> Result<SpeedReport> {
    let raw: SpeedTestOutput = serde_json::from_str(json).map_err(|e| {
        ConncheckError::ProcessFailed(format!("could not parse speedtest-cli output: {}", e))
    })?;
    Ok(raw.into())
}

/// `<python> -c "import speedtest"`, which exits 0 when the module is installed.
pub fn import_check(python: &str) -> Invocation {
    Invocation::new(python)
        .arg("-c")
        .arg(format!("import {}", SPEEDTEST_MODULE))
}

/// How to launch speedtest-cli, or `None` if it is not installed.
///
/// Prefers the script on PATH, then the module under the platform's Python.
pub fn locate(session: &Session) -> Option<Invocation> {
    if session.runner.is_available(SPEEDTEST) {
        return Some(Invocation::new(SPEEDTEST));
    }

    let python = session.platform.python();
    if !session.runner.is_available(python) {
        return None;
    }

    let importable = session
        .runner
        .capture(&import_check(python))
        .is_ok_and(|output| output.result.is_success());
    importable.then(|| Invocation::new(python).args(["-m", SPEEDTEST_MODULE]))
}

/// Run a speed test and print download/upload rates.
pub fn speed_test(session: &Session, out: &mut dyn Write) -> Result<SpeedReport> {
    let Some(invocation) = locate(session) else {
        return Err(ConncheckError::missing_tool(
            SPEEDTEST,
            "Use Option 1 to install it.",
        ));
    };

    writeln!(out, "\nRunning speed test...")?;
    out.flush()?;

    let invocation = invocation.args(["--json", "--secure"]);
    let output = session.runner.capture(&invocation)?;

    if !output.result.is_success() {
        let detail = if output.stderr.is_empty() {
            output.stdout.as_str()
        } else {
            output.stderr.as_str()
        };
        return Err(ConncheckError::ProcessFailed(format!(
            "speed test failed ({}): {}",
            output.result.status_text(),
            detail
        )));
    }

    let report = parse_output(&output.stdout)?;

    if let Some(server) = &report.server {
        writeln!(out, "Server: {}", server)?;
    }
    if let Some(ping) = report.ping_ms {
        writeln!(out, "Latency: {:.2} ms", ping)?;
    }
    writeln!(out, "Download Speed: {} Mbps", format_mbps(report.download_mbps))?;
    writeln!(out, "Upload Speed: {} Mbps\n", format_mbps(report.upload_mbps))?;

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::platform::PlatformKind;
    use crate::test_support::{FakeRunner, output_of};

    const SAMPLE: &str = r#"{
        "download": 93456789.12,
        "upload": 1000000,
        "ping": 12.345,
        "server": {"sponsor": "Example ISP", "name": "Berlin", "country": "Germany"},
        "timestamp": "2024-01-01T00:00:00Z",
        "bytes_sent": 1, "bytes_received": 2
    }"#;

    #[test]
    fn one_megabit_formats_as_one() {
        assert_eq!(format_mbps(bits_to_mbps(1_000_000.0)), "1.00");
    }

    #[test]
    fn rates_are_rounded_to_two_decimals() {
        assert_eq!(format_mbps(bits_to_mbps(93_456_789.12)), "93.46");
        assert_eq!(format_mbps(bits_to_mbps(0.0)), "0.00");
    }

    #[test]
    fn parses_speedtest_json() {
        let report = parse_output(SAMPLE).unwrap();
        assert_eq!(report.upload_mbps, 1.0);
        assert_eq!(report.ping_ms, Some(12.345));
        assert_eq!(report.server.as_deref(), Some("Example ISP, Berlin, Germany"));
    }

    #[test]
    fn rejects_garbage_output() {
        let err = parse_output("Cannot retrieve speedtest configuration").unwrap_err();
        assert!(err.to_string().contains("could not parse speedtest-cli output"));
    }

    #[test]
    fn missing_tool_suggests_install() {
        let runner = FakeRunner::new();
        let session = Session::new(PlatformKind::Linux, Config::default(), &runner);

        let err = speed_test(&session, &mut Vec::new()).unwrap_err();

        assert!(matches!(err, ConncheckError::MissingTool { .. }));
        assert!(err.to_string().contains("Use Option 1 to install it."));
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn prints_download_and_upload() {
        let runner = FakeRunner::new()
            .with_tool(SPEEDTEST)
            .with_stdout(SPEEDTEST, SAMPLE);
        let session = Session::new(PlatformKind::Linux, Config::default(), &runner);
        let mut out = Vec::new();

        speed_test(&session, &mut out).unwrap();

        let text = output_of(out);
        assert!(text.contains("Download Speed: 93.46 Mbps"));
        assert!(text.contains("Upload Speed: 1.00 Mbps"));
        assert_eq!(runner.calls()[0].args, vec!["--json", "--secure"]);
    }

    #[test]
    fn runs_module_when_script_is_off_path() {
        let runner = FakeRunner::new()
            .with_tool("python3")
            .with_stdout("python3", SAMPLE);
        let session = Session::new(PlatformKind::Linux, Config::default(), &runner);
        let mut out = Vec::new();

        let report = speed_test(&session, &mut out).unwrap();

        assert_eq!(report.upload_mbps, 1.0);
        assert_eq!(
            runner.calls(),
            vec![
                import_check("python3"),
                Invocation::new("python3").args(["-m", "speedtest", "--json", "--secure"]),
            ]
        );
        assert!(output_of(out).contains("Download Speed: 93.46 Mbps"));
    }

    #[test]
    fn windows_module_runs_under_python() {
        let runner = FakeRunner::new()
            .with_tool("python")
            .with_stdout("python", SAMPLE);
        let session = Session::new(PlatformKind::Windows, Config::default(), &runner);

        speed_test(&session, &mut Vec::new()).unwrap();

        assert_eq!(runner.calls()[1].program, "python");
        assert_eq!(
            runner.calls()[1].args,
            vec!["-m", "speedtest", "--json", "--secure"]
        );
    }

    #[test]
    fn unimportable_module_is_missing_tool() {
        let runner = FakeRunner::new()
            .with_tool("python3")
            .with_command_exit_code(&import_check("python3"), 1);
        let session = Session::new(PlatformKind::Linux, Config::default(), &runner);

        let err = speed_test(&session, &mut Vec::new()).unwrap_err();

        assert!(matches!(err, ConncheckError::MissingTool { .. }));
        assert_eq!(runner.calls(), vec![import_check("python3")]);
    }

    #[test]
    fn import_check_command_line() {
        assert_eq!(
            import_check("python3").command_line(),
            "python3 -c 'import speedtest'"
        );
    }

    #[test]
    fn nonzero_exit_is_process_failure() {
        let runner = FakeRunner::new()
            .with_tool(SPEEDTEST)
            .with_exit_code(SPEEDTEST, 1)
            .with_stdout(SPEEDTEST, "ERROR: Unable to connect to servers");
        let session = Session::new(PlatformKind::Linux, Config::default(), &runner);

        let err = speed_test(&session, &mut Vec::new()).unwrap_err();

        assert!(err.to_string().contains("Unable to connect to servers"));
    }
}
