//! Session event log for conncheck.
//!
//! When enabled (`--event-log` or `event_log` in the config), every menu
//! action appends one JSON object per line to the log file:
//! - `ts`: RFC3339 timestamp
//! - `action`: the action performed (ping, traceroute, port_probe, ...)
//! - `actor`: the owner string (e.g., `user@HOST`)
//! - `target`: optional host the action was aimed at
//! - `details`: freeform object with action-specific results
//!
//! Logging is best-effort: [`EventLog::record`] turns a failed write into a
//! warning on stderr.

use crate::error::{ConncheckError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

/// Actions that can be logged as events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventAction {
    /// Dependency installation
    Install,
    /// Directory-wide connectivity check
    Connectivity,
    /// Bandwidth speed test
    SpeedTest,
    /// Single-host ping
    Ping,
    /// nping probe
    Nping,
    /// traceroute/tracepath run
    Traceroute,
    /// TCP port probe
    PortProbe,
}

impl std::fmt::Display for EventAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventAction::Install => write!(f, "install"),
            EventAction::Connectivity => write!(f, "connectivity"),
            EventAction::SpeedTest => write!(f, "speed_test"),
            EventAction::Ping => write!(f, "ping"),
            EventAction::Nping => write!(f, "nping"),
            EventAction::Traceroute => write!(f, "traceroute"),
            EventAction::PortProbe => write!(f, "port_probe"),
        }
    }
}

/// A single event record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub ts: DateTime<Utc>,

    pub action: EventAction,

    /// Who ran the action (e.g., `user@HOST`).
    pub actor: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,

    pub details: Value,
}

impl Event {
    /// Create a new event stamped with the current time and actor.
    pub fn new(action: EventAction) -> Self {
        Self {
            ts: Utc::now(),
            action,
            actor: get_actor_string(),
            target: None,
            details: Value::Object(serde_json::Map::new()),
        }
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = details;
        self
    }

    /// Serialize the event to a single-line JSON string.
    pub fn to_ndjson_line(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| {
            ConncheckError::EventLog(format!("failed to serialize event to JSON: {}", e))
        })
    }
}

fn get_actor_string() -> String {
    let user = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string());

    let host = hostname::get()
        .map(|h| h.to_string_lossy().to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    format!("{}@{}", user, host)
}

/// Append-only NDJSON event file.
#[derive(Debug, Clone)]
pub struct EventLog {
    path: PathBuf,
}

impl EventLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Append an event as one JSON line, creating the file and its parent
    /// directory if needed.
    pub fn append(&self, event: &Event) -> Result<()> {
        let json_line = event.to_ndjson_line()?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent).map_err(|e| {
                ConncheckError::EventLog(format!(
                    "failed to create event log directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| {
                ConncheckError::EventLog(format!(
                    "failed to open event log '{}': {}",
                    self.path.display(),
                    e
                ))
            })?;

        writeln!(file, "{}", json_line).map_err(|e| {
            ConncheckError::EventLog(format!(
                "failed to write event to '{}': {}",
                self.path.display(),
                e
            ))
        })?;

        Ok(())
    }

    /// Append an event, printing a warning instead of failing.
    pub fn record(&self, event: &Event) {
        if let Err(e) = self.append(event) {
            eprintln!("Warning: failed to log {} event: {}", event.action, e);
        }
    }
}

/// Read all events from an NDJSON file.
#[cfg(test)]
pub fn read_events(path: &std::path::Path) -> Result<Vec<Event>> {
    let content = fs::read_to_string(path).map_err(|e| {
        ConncheckError::EventLog(format!(
            "failed to read event log '{}': {}",
            path.display(),
            e
        ))
    })?;

    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            serde_json::from_str(line).map_err(|e| {
                ConncheckError::EventLog(format!("failed to parse event line: {}", e))
            })
        })
        .collect()
}
