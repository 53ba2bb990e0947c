//! Exit code constants for the conncheck CLI.
//!
//! - 0: Success (including a normal menu exit)
//! - 1: User error (bad configuration or arguments)
//! - 2: Console I/O failure

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: unreadable or invalid configuration.
pub const USER_ERROR: i32 = 1;

/// The console could not be read from or written to.
pub const IO_FAILURE: i32 = 2;
