//! Command implementations for conncheck.
//!
//! The menu turns a selection (plus any prompted host/port) into an
//! [`Action`]; [`dispatch`] routes it to its implementation and records an
//! event for it when an event log is configured.

pub mod install;
pub mod nping;
pub mod ping;
pub mod port;
pub mod speedtest;
pub mod traceroute;

use crate::config::Config;
use crate::error::Result;
use crate::events::{Event, EventAction, EventLog};
use crate::exec::{ExecResult, Runner};
use crate::platform::PlatformKind;
use serde_json::json;
use std::io::Write;

/// Everything an operation needs, fixed for the whole session.
pub struct Session<'a> {
    pub platform: PlatformKind,
    pub config: Config,
    pub runner: &'a dyn Runner,
    pub events: Option<EventLog>,
}

impl<'a> Session<'a> {
    pub fn new(platform: PlatformKind, config: Config, runner: &'a dyn Runner) -> Self {
        let events = config.event_log.clone().map(EventLog::new);
        Self {
            platform,
            config,
            runner,
            events,
        }
    }

    pub fn with_event_log(mut self, events: Option<EventLog>) -> Self {
        if events.is_some() {
            self.events = events;
        }
        self
    }

    fn record(&self, event: Event) {
        if let Some(log) = &self.events {
            log.record(&event);
        }
    }
}

/// A fully specified menu action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Install,
    CheckMeetingPlatforms,
    CheckCloudServices,
    SpeedTest,
    Ping { host: String },
    Nping { host: String },
    Traceroute { host: String },
    PortProbe { host: String, port: u16 },
}

/// Run an action to completion.
pub fn dispatch(session: &Session, out: &mut dyn Write, action: Action) -> Result<()> {
    match action {
        Action::Install => {
            let report = install::install_dependencies(session, out)?;
            session.record(Event::new(EventAction::Install).with_details(json!({
                "already_present": report.already_present,
                "installed": report.installed,
                "warnings": report.warnings,
            })));
            Ok(())
        }
        Action::CheckMeetingPlatforms => {
            let directory = session.config.meeting_directory();
            check_directory(session, out, &directory)
        }
        Action::CheckCloudServices => {
            let directory = session.config.cloud_directory();
            check_directory(session, out, &directory)
        }
        Action::SpeedTest => {
            let result = speedtest::speed_test(session, out);
            let details = match &result {
                Ok(report) => json!({
                    "download_mbps": report.download_mbps,
                    "upload_mbps": report.upload_mbps,
                    "ping_ms": report.ping_ms,
                }),
                Err(e) => json!({ "error": e.to_string() }),
            };
            session.record(Event::new(EventAction::SpeedTest).with_details(details));
            result.map(|_| ())
        }
        Action::Ping { host } => {
            let result = ping::ping(session, out, &host);
            record_exec(session, EventAction::Ping, &host, &result);
            result.map(|_| ())
        }
        Action::Nping { host } => {
            let result = nping::nping(session, out, &host);
            record_exec(session, EventAction::Nping, &host, &result);
            result.map(|_| ())
        }
        Action::Traceroute { host } => {
            let result = traceroute::traceroute(session, out, &host);
            record_exec(session, EventAction::Traceroute, &host, &result);
            result.map(|_| ())
        }
        Action::PortProbe { host, port } => {
            let outcome = port::port_test(session, out, &host, port)?;
            session.record(
                Event::new(EventAction::PortProbe)
                    .with_target(format!("{}:{}", host, port))
                    .with_details(match &outcome {
                        port::PortProbeOutcome::Open => json!({ "open": true }),
                        port::PortProbeOutcome::Unreachable { reason } => {
                            json!({ "open": false, "reason": reason })
                        }
                    }),
            );
            Ok(())
        }
    }
}

fn check_directory(
    session: &Session,
    out: &mut dyn Write,
    directory: &crate::services::ServiceDirectory,
) -> Result<()> {
    let summary = ping::check_connectivity(session, out, directory)?;
    session.record(
        Event::new(EventAction::Connectivity).with_details(json!({
            "directory": directory.title(),
            "reachable": summary.reachable,
            "unreachable": summary.unreachable,
        })),
    );
    Ok(())
}

fn record_exec(session: &Session, action: EventAction, host: &str, result: &Result<ExecResult>) {
    let details = match result {
        Ok(exec) => json!({ "program": exec.program, "exit_code": exec.exit_code }),
        Err(e) => json!({ "error": e.to_string() }),
    };
    session.record(Event::new(action).with_target(host).with_details(details));
}
