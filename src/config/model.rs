//! Config struct definition and default implementation.

use super::types::*;
use crate::services::{ServiceEntry, default_cloud_services, default_meeting_platforms};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for a conncheck session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // =========================================================================
    // Probe settings
    // =========================================================================
    /// Number of echo requests sent by each ping.
    #[serde(default = "default_ping_count")]
    pub ping_count: u32,

    /// Seconds to wait for a TCP connection in the port test.
    #[serde(default = "default_port_timeout_secs")]
    pub port_timeout_secs: u64,

    // =========================================================================
    // Service directories
    // =========================================================================
    /// Hosts checked by "Check Meeting Platform Connectivity".
    #[serde(default = "default_meeting_platforms")]
    pub meeting_platforms: Vec<ServiceEntry>,

    /// Hosts checked by "Check Cloud Service Connectivity".
    #[serde(default = "default_cloud_services")]
    pub cloud_services: Vec<ServiceEntry>,

    // =========================================================================
    // Logging
    // =========================================================================
    /// NDJSON file that receives one event per menu action (disabled if unset).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_log: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ping_count: default_ping_count(),
            port_timeout_secs: default_port_timeout_secs(),
            meeting_platforms: default_meeting_platforms(),
            cloud_services: default_cloud_services(),
            event_log: None,
        }
    }
}
