//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber exactly once per process
//! - Parse and apply the operator's log verbosity
//! - Provide an injectable sink so startup diagnostics can be asserted on
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - Verbosity lives in a reloadable `LevelFilter`, replaced wholesale
//! - Level is never read from the environment; only `--log-level` sets it
//! - `CRITICAL` has no tracing equivalent: it is emitted as ERROR with a
//!   `severity = "critical"` field, and the sink gates plain errors itself

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Mutex;

use thiserror::Error;
use tracing_subscriber::{
    filter::LevelFilter, fmt as fmt_layer, layer::SubscriberExt, reload,
    util::SubscriberInitExt, Registry,
};

/// Log verbosity, ordered from most to least verbose.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    Critical,
}

impl LogLevel {
    /// Every level, in ascending severity.
    pub const ALL: [LogLevel; 6] = [
        LogLevel::Trace,
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
        LogLevel::Critical,
    ];

    /// The token accepted on the command line.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "TRACE",
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
            Self::Critical => "CRITICAL",
        }
    }

    /// Filter installed in the subscriber for this verbosity.
    pub const fn as_level_filter(self) -> LevelFilter {
        match self {
            Self::Trace => LevelFilter::TRACE,
            Self::Debug => LevelFilter::DEBUG,
            Self::Info => LevelFilter::INFO,
            Self::Warn => LevelFilter::WARN,
            Self::Error | Self::Critical => LevelFilter::ERROR,
        }
    }

    fn from_index(index: u8) -> Self {
        Self::ALL
            .get(usize::from(index))
            .copied()
            .unwrap_or_default()
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a level token is not one of the six recognized names.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid log level: {0}")]
pub struct ParseLogLevelError(pub String);

impl FromStr for LogLevel {
    type Err = ParseLogLevelError;

    /// Exact, case-sensitive match.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| ParseLogLevelError(s.to_string()))
    }
}

/// Errors from the logging subsystem.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// A global subscriber is already installed.
    #[error("logging already initialized: {0}")]
    AlreadyInitialized(String),

    /// The subscriber backing the level filter is gone.
    #[error("failed to apply log level {level}: {reason}")]
    Reload { level: LogLevel, reason: String },
}

/// Destination for startup diagnostics.
///
/// Validation talks to this trait rather than to the global subscriber, so
/// tests can swap in a [`MemorySink`] and assert on what was emitted.
pub trait LogSink {
    /// Emit `message` at `severity`, subject to the current level.
    fn emit(&self, severity: LogLevel, message: &str);

    /// Replace the verbosity. Takes effect for every later emission.
    fn set_level(&self, level: LogLevel) -> Result<(), LoggingError>;

    /// Current verbosity.
    fn level(&self) -> LogLevel;

    fn critical(&self, message: &str) {
        self.emit(LogLevel::Critical, message);
    }

    fn error(&self, message: &str) {
        self.emit(LogLevel::Error, message);
    }

    fn warn(&self, message: &str) {
        self.emit(LogLevel::Warn, message);
    }

    fn info(&self, message: &str) {
        self.emit(LogLevel::Info, message);
    }
}

/// Sink backed by the process-wide tracing subscriber.
pub struct TracingSink {
    handle: reload::Handle<LevelFilter, Registry>,
    level: AtomicU8,
}

impl fmt::Debug for TracingSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TracingSink")
            .field("level", &self.level())
            .finish_non_exhaustive()
    }
}

impl LogSink for TracingSink {
    fn emit(&self, severity: LogLevel, message: &str) {
        if severity < self.level() {
            return;
        }
        match severity {
            LogLevel::Trace => tracing::trace!("{message}"),
            LogLevel::Debug => tracing::debug!("{message}"),
            LogLevel::Info => tracing::info!("{message}"),
            LogLevel::Warn => tracing::warn!("{message}"),
            LogLevel::Error => tracing::error!("{message}"),
            LogLevel::Critical => tracing::error!(severity = "critical", "{message}"),
        }
    }

    fn set_level(&self, level: LogLevel) -> Result<(), LoggingError> {
        self.handle
            .reload(level.as_level_filter())
            .map_err(|e| LoggingError::Reload {
                level,
                reason: e.to_string(),
            })?;
        self.level.store(level as u8, Ordering::SeqCst);
        Ok(())
    }

    fn level(&self) -> LogLevel {
        LogLevel::from_index(self.level.load(Ordering::SeqCst))
    }
}

/// Install the global subscriber at the default verbosity (INFO).
///
/// This is the only place the process-wide subscriber is set. Calling it a
/// second time returns [`LoggingError::AlreadyInitialized`].
pub fn init_logging() -> Result<TracingSink, LoggingError> {
    let default_level = LogLevel::default();
    let (filter, handle) = reload::Layer::new(default_level.as_level_filter());

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer::layer().with_target(false))
        .try_init()
        .map_err(|e| LoggingError::AlreadyInitialized(e.to_string()))?;

    Ok(TracingSink {
        handle,
        level: AtomicU8::new(default_level as u8),
    })
}

/// A single captured emission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub severity: LogLevel,
    pub message: String,
}

/// In-memory sink. Keeps every emission at or above the current level.
#[derive(Debug)]
pub struct MemorySink {
    records: Mutex<Vec<LogRecord>>,
    level: AtomicU8,
}

impl MemorySink {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            level: AtomicU8::new(LogLevel::default() as u8),
        }
    }

    /// Snapshot of the captured records.
    pub fn records(&self) -> Vec<LogRecord> {
        match self.records.lock() {
            Ok(records) => records.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// True if a record at `severity` contains `needle`.
    pub fn contains(&self, severity: LogLevel, needle: &str) -> bool {
        self.records()
            .iter()
            .any(|r| r.severity == severity && r.message.contains(needle))
    }
}

impl Default for MemorySink {
    fn default() -> Self {
        Self::new()
    }
}

impl LogSink for MemorySink {
    fn emit(&self, severity: LogLevel, message: &str) {
        if severity < self.level() {
            return;
        }
        let record = LogRecord {
            severity,
            message: message.to_string(),
        };
        match self.records.lock() {
            Ok(mut records) => records.push(record),
            Err(poisoned) => poisoned.into_inner().push(record),
        }
    }

    fn set_level(&self, level: LogLevel) -> Result<(), LoggingError> {
        self.level.store(level as u8, Ordering::SeqCst);
        Ok(())
    }

    fn level(&self) -> LogLevel {
        LogLevel::from_index(self.level.load(Ordering::SeqCst))
    }
}
