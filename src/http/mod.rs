//! HTTP protocol support shared with the gateway's listener and router.
//!
//! # Data Flow
//! ```text
//! upstream node response
//!     → status.rs (classify status code)
//!     → router decides how to answer the consensus client
//! ```

pub mod status;

pub use status::{lookup, StatusCategory, StatusCodeEntry, StatusError};
