//! Config loading, validation, and accessors.

use super::model::Config;
use crate::error::{ConncheckError, Result};
use crate::services::{ServiceDirectory, ServiceEntry};
use crate::target;
use std::path::Path;
use std::time::Duration;

impl Config {
    /// Load config from a YAML file.
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded and validated config
    /// * `Err(ConncheckError::ConfigError)` - Read, parse, or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            ConncheckError::ConfigError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse config from a YAML string.
    ///
    /// Unknown fields in the YAML are silently ignored.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty document deserializes as null; treat it as all defaults.
        if yaml.trim().is_empty() {
            return Ok(Config::default());
        }

        let mut config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| ConncheckError::ConfigError(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        config.normalize_hosts();
        Ok(config)
    }

    /// Validate config values.
    ///
    /// Validation rules:
    /// - `ping_count` and `port_timeout_secs` must be positive
    /// - each service directory must contain at least one entry
    /// - every entry needs a non-empty name and a valid host
    pub fn validate(&self) -> Result<()> {
        if self.ping_count == 0 {
            return Err(ConncheckError::ConfigError(
                "config validation failed: ping_count must be greater than 0".to_string(),
            ));
        }

        if self.port_timeout_secs == 0 {
            return Err(ConncheckError::ConfigError(
                "config validation failed: port_timeout_secs must be greater than 0".to_string(),
            ));
        }

        validate_entries("meeting_platforms", &self.meeting_platforms)?;
        validate_entries("cloud_services", &self.cloud_services)?;

        Ok(())
    }

    /// Rewrite every service host into the form `target::parse_host` returns.
    /// Only called after `validate`, so every host parses.
    fn normalize_hosts(&mut self) {
        for entry in self
            .meeting_platforms
            .iter_mut()
            .chain(self.cloud_services.iter_mut())
        {
            if let Ok(host) = target::parse_host(&entry.host) {
                entry.host = host;
            }
        }
    }

    pub fn port_timeout(&self) -> Duration {
        Duration::from_secs(self.port_timeout_secs)
    }

    pub fn meeting_directory(&self) -> ServiceDirectory {
        ServiceDirectory::new("Meeting Platforms", self.meeting_platforms.clone())
    }

    pub fn cloud_directory(&self) -> ServiceDirectory {
        ServiceDirectory::new("Cloud Services", self.cloud_services.clone())
    }
}

fn validate_entries(field: &str, entries: &[ServiceEntry]) -> Result<()> {
    if entries.is_empty() {
        return Err(ConncheckError::ConfigError(format!(
            "config validation failed: {} must contain at least one entry",
            field
        )));
    }

    for entry in entries {
        if entry.name.trim().is_empty() {
            return Err(ConncheckError::ConfigError(format!(
                "config validation failed: {} entry for host '{}' has an empty name",
                field, entry.host
            )));
        }
        target::parse_host(&entry.host).map_err(|e| {
            ConncheckError::ConfigError(format!(
                "config validation failed: {} entry '{}': {}",
                field, entry.name, e
            ))
        })?;
    }

    Ok(())
}
