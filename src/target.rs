//! Validation of hosts and ports typed at the menu prompts.

use crate::error::{ConncheckError, Result};
use regex::Regex;
use std::sync::LazyLock;

/// Hostnames, IPv4 literals, and IPv6 literals (optionally bracketed or
/// carrying a `%zone`).
static HOST_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\[[0-9A-Fa-f:.]+(%[A-Za-z0-9_.-]+)?\]|[0-9A-Fa-f:.]*:[0-9A-Fa-f:.]*(%[A-Za-z0-9_.-]+)?|[A-Za-z0-9_]([A-Za-z0-9_.-]*[A-Za-z0-9_.])?)$")
        .expect("host pattern is valid")
});

/// Longest host accepted (DNS name limit).
const MAX_HOST_LEN: usize = 253;

/// Validate and trim a host entered by the user.
///
/// The returned host is passed to external tools as a single argument.
/// Hosts starting with `-` are rejected so they cannot be read as options.
/// Brackets around an IPv6 literal (`[::1]`) are stripped, since neither the
/// resolver nor ping/traceroute accept them.
pub fn parse_host(input: &str) -> Result<String> {
    let host = input.trim();

    if host.is_empty() {
        return Err(ConncheckError::InvalidInput(
            "no host entered. Enter a hostname or IP address.".to_string(),
        ));
    }

    if host.starts_with('-') {
        return Err(ConncheckError::InvalidInput(format!(
            "invalid host '{}': hosts must not start with '-'",
            host
        )));
    }

    if host.len() > MAX_HOST_LEN || !HOST_PATTERN.is_match(host) {
        return Err(ConncheckError::InvalidInput(format!(
            "invalid host '{}': expected a hostname or IP address",
            host
        )));
    }

    let host = host
        .strip_prefix('[')
        .and_then(|h| h.strip_suffix(']'))
        .unwrap_or(host);

    Ok(host.to_string())
}

/// Parse a TCP port number (1-65535).
pub fn parse_port(input: &str) -> Result<u16> {
    let trimmed = input.trim();
    match trimmed.parse::<u16>() {
        Ok(0) | Err(_) => Err(ConncheckError::InvalidInput(format!(
            "invalid port '{}': expected a number between 1 and 65535",
            trimmed
        ))),
        Ok(port) => Ok(port),
    }
}
