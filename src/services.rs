//! Service directories pinged by the connectivity checks.

use serde::{Deserialize, Serialize};

/// A named host to ping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceEntry {
    pub name: String,
    pub host: String,
}

impl ServiceEntry {
    pub fn new(name: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            host: host.into(),
        }
    }
}

const MEETING_PLATFORMS: &[(&str, &str)] = &[
    ("Webex", "webex.com"),
    ("Zoom", "zoom.us"),
    ("Microsoft Teams", "teams.microsoft.com"),
    ("Google Meet", "meet.google.com"),
];

const CLOUD_SERVICES: &[(&str, &str)] = &[
    ("Azure", "azure.microsoft.com"),
    ("AWS", "aws.amazon.com"),
    ("Google Cloud", "cloud.google.com"),
    ("Cloudflare", "cloudflare.com"),
    ("Akamai", "akamai.com"),
];

fn entries(table: &[(&str, &str)]) -> Vec<ServiceEntry> {
    table
        .iter()
        .map(|(name, host)| ServiceEntry::new(*name, *host))
        .collect()
}

pub fn default_meeting_platforms() -> Vec<ServiceEntry> {
    entries(MEETING_PLATFORMS)
}

pub fn default_cloud_services() -> Vec<ServiceEntry> {
    entries(CLOUD_SERVICES)
}

/// An immutable, ordered list of services, built once at startup.
#[derive(Debug, Clone)]
pub struct ServiceDirectory {
    title: String,
    entries: Vec<ServiceEntry>,
}

impl ServiceDirectory {
    pub fn new(title: impl Into<String>, entries: Vec<ServiceEntry>) -> Self {
        Self {
            title: title.into(),
            entries,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn entries(&self) -> &[ServiceEntry] {
        &self.entries
    }
}
