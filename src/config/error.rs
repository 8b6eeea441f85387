//! Startup configuration errors.

use std::path::PathBuf;
use thiserror::Error;

use crate::observability::logging::LoggingError;

/// Exit status for help and version output.
pub const EXIT_SUCCESS: i32 = 0;

/// Exit status for every startup failure.
pub const EXIT_STARTUP_FAILURE: i32 = 1;

/// Every condition that stops the gateway before it serves traffic.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// clap rejected the argument vector (unknown flag, bad integer, ...).
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("fee_override_chance is set, but fee_override_address is not set")]
    FeeAddressMissing,

    #[error("no canonical node specified, exiting")]
    NoCanonicalNode,

    #[error("no unauthenticated node specified, exiting")]
    NoUnauthenticatedNode,

    #[error("no jwt secret specified, exiting")]
    NoJwtSecret,

    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),

    #[error("fee_override_chance must be between 0 and 1, got {0}")]
    FeeChanceOutOfRange(f64),

    #[error("Unable to open file {} for the JWT secret.", path.display())]
    SecretUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JWT secret file {} is not valid text.", path.display())]
    SecretNotText { path: PathBuf },

    #[error(transparent)]
    Logging(#[from] LoggingError),
}

impl ConfigError {
    /// Process exit status for this failure.
    pub fn exit_code(&self) -> i32 {
        EXIT_STARTUP_FAILURE
    }
}
