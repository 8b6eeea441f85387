//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! argv
//!     → cli.rs (tokenize into RawOptions)
//!     → validation.rs (ordered presence rules, log level)
//!     → secret.rs (read the jwt secret file)
//!     → Configuration (validated, immutable)
//!     → shared read-only with the router, fee rewriter and listener
//! ```
//!
//! # Design Decisions
//! - Config is immutable once built; there is no reload path
//! - Only the jwt secret path may touch the filesystem
//! - No environment variables are consulted

pub mod cli;
pub mod error;
pub mod schema;
pub mod secret;
pub mod validation;

pub use cli::{Invocation, RawOptions};
pub use error::ConfigError;
pub use schema::{Configuration, FeeOverride, NodeEndpoint, NodeTransport};
pub use secret::JwtSecret;
pub use validation::validate;
