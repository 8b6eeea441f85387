//! openexecution startup core.
//!
//! Turns the process invocation into a validated [`Configuration`] for the
//! JSON-RPC gateway, and provides the status code table the gateway uses to
//! classify node responses.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::schema::Configuration;
pub use lifecycle::{startup, Startup};
