//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     argv → cli.rs (tokenize) → validation.rs (rules, log level, secret)
//!     → Configuration handed to the router and listener
//! ```
//!
//! # Design Decisions
//! - Ordered startup: logging first, then configuration, then listeners
//! - A failed startup never constructs a server component

pub mod startup;

pub use startup::{startup, Startup};
