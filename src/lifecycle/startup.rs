//! Startup orchestration.
//!
//! # Responsibilities
//! - Tokenize the argument vector
//! - Validate options into a `Configuration`
//! - Hand back either a configuration, text to print, or a fatal error
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Never exits the process itself; `main` owns the exit code
//! - Runs once, synchronously, before any listener is bound

use std::ffi::OsString;

use crate::config::cli::{Invocation, RawOptions};
use crate::config::error::ConfigError;
use crate::config::schema::Configuration;
use crate::config::validation::validate;
use crate::observability::logging::LogSink;

/// Outcome of a successful startup pass.
#[derive(Debug)]
pub enum Startup {
    /// Configuration is valid; the gateway may start serving.
    Ready(Configuration),
    /// Help or version text was requested.
    Print(String),
}

/// Run the startup sequence against `args` (program name first).
pub fn startup<I, T>(args: I, sink: &dyn LogSink) -> Result<Startup, ConfigError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match RawOptions::from_args(args) {
        Ok(Invocation::Display(text)) => Ok(Startup::Print(text)),
        Ok(Invocation::Run(raw)) => validate(raw, sink).map(Startup::Ready),
        Err(err) => {
            sink.critical(&err.to_string());
            Err(err)
        }
    }
}
