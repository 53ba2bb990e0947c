//! Default values for the Config struct.

pub(crate) fn default_ping_count() -> u32 {
    4
}

pub(crate) fn default_port_timeout_secs() -> u64 {
    3
}
