//! openexecution
//!
//! JSON-RPC gateway sitting between consensus clients and execution nodes.
//!
//! # Architecture Overview
//!
//! ```text
//!   argv ──▶ config::cli ──▶ config::validation ──▶ Configuration ──▶ router / listener
//!                                  │    │
//!                                  │    └──▶ config::secret (jwt file)
//!                                  └──▶ observability::logging (verbosity)
//! ```
//!
//! Startup runs once. Help and version exit 0; any startup failure exits 1
//! before a server component is constructed.

use std::process::ExitCode;

use openexecution::config::error::EXIT_STARTUP_FAILURE;
use openexecution::http::status;
use openexecution::observability::init_logging;
use openexecution::{startup, Startup};

fn main() -> ExitCode {
    let sink = match init_logging() {
        Ok(sink) => sink,
        Err(e) => {
            eprintln!("{e}");
            return exit_code(EXIT_STARTUP_FAILURE);
        }
    };

    match startup(std::env::args_os(), &sink) {
        Ok(Startup::Print(text)) => {
            print!("{text}");
            ExitCode::SUCCESS
        }
        Ok(Startup::Ready(config)) => {
            tracing::info!(
                version = env!("CARGO_PKG_VERSION"),
                bind_address = %config.bind_address(),
                canonical_node = %config.canonical_node(),
                unauth_node = %config.unauth_node(),
                log_level = %config.log_level(),
                fee_override = config.fee_override().is_some(),
                status_codes = status::entries().len(),
                "Configuration loaded"
            );
            ExitCode::SUCCESS
        }
        Err(err) => exit_code(err.exit_code()),
    }
}

fn exit_code(code: i32) -> ExitCode {
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}
