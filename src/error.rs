//! Error types for conncheck.
//!
//! Every variant carries a user-actionable message. Errors raised by a single
//! menu action are printed and the menu resumes; only configuration and
//! console failures end the process.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for conncheck operations.
#[derive(Error, Debug)]
pub enum ConncheckError {
    /// A required external tool is not on the search path.
    #[error("{tool} not found. {hint}")]
    MissingTool { tool: String, hint: String },

    /// An external process could not be started or produced unusable output.
    #[error("{0}")]
    ProcessFailed(String),

    /// The feature is not available on the running platform.
    #[error("{0} is not supported on this platform")]
    UnsupportedPlatform(String),

    /// A host or port typed at a prompt was rejected.
    #[error("{0}")]
    InvalidInput(String),

    /// Configuration could not be read, parsed, or validated.
    #[error("{0}")]
    ConfigError(String),

    /// The event log could not be serialized or written.
    #[error("{0}")]
    EventLog(String),

    /// Reading from or writing to the console failed.
    #[error("console I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

impl ConncheckError {
    /// Shorthand for a missing-tool error.
    pub fn missing_tool(tool: impl Into<String>, hint: impl Into<String>) -> Self {
        ConncheckError::MissingTool {
            tool: tool.into(),
            hint: hint.into(),
        }
    }

    /// Returns the process exit code used when this error ends the session.
    pub fn exit_code(&self) -> i32 {
        match self {
            ConncheckError::Io(_) => exit_codes::IO_FAILURE,
            ConncheckError::MissingTool { .. }
            | ConncheckError::ProcessFailed(_)
            | ConncheckError::UnsupportedPlatform(_)
            | ConncheckError::InvalidInput(_)
            | ConncheckError::ConfigError(_)
            | ConncheckError::EventLog(_) => exit_codes::USER_ERROR,
        }
    }

    /// Whether this error must end the session instead of returning to the menu.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ConncheckError::Io(_))
    }
}

/// Result type alias for conncheck operations.
pub type Result<T> = std::result::Result<T, ConncheckError>;
