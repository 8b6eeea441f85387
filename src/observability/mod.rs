//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! startup diagnostics
//!     → LogSink (TracingSink in the binary, MemorySink in tests)
//!     → tracing subscriber (reloadable level filter)
//!     → stdout
//! ```
//!
//! # Design Decisions
//! - One subscriber per process, installed by `init_logging`
//! - Verbosity is set once during startup validation

pub mod logging;

pub use logging::{init_logging, LogLevel, LogSink, MemorySink, TracingSink};
