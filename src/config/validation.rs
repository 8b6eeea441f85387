//! Configuration validation.
//!
//! # Responsibilities
//! - Enforce presence rules between options (node pairs, fee override pair)
//! - Apply the requested log verbosity
//! - Resolve the secret file into the loaded secret
//!
//! # Design Decisions
//! - Fail fast: the first violated rule is reported, in a fixed order
//! - Every failure is emitted through the sink before it is returned
//! - Runs exactly once, before any server component exists

use std::str::FromStr;

use crate::config::cli::RawOptions;
use crate::config::error::ConfigError;
use crate::config::schema::{
    Configuration, FeeOverride, NodeEndpoint, DEFAULT_LISTEN_ADDR, DEFAULT_PORT,
};
use crate::config::secret::load_jwt_secret;
use crate::observability::logging::{LogLevel, LogSink};

/// Turn a raw option set into a [`Configuration`].
///
/// Rules are checked in this order: fee override pairing, canonical node,
/// unauthenticated node, jwt secret path, port (warning only), log level,
/// fee override values. The secret file is read last, after the verbosity
/// has been applied.
pub fn validate(raw: RawOptions, sink: &dyn LogSink) -> Result<Configuration, ConfigError> {
    if raw.fee_override_chance.is_some() && raw.fee_override_address.is_none() {
        return Err(fail(sink, LogLevel::Critical, ConfigError::FeeAddressMissing));
    }

    let canonical_node = NodeEndpoint::new(raw.node, raw.ws_node)
        .ok_or_else(|| fail(sink, LogLevel::Critical, ConfigError::NoCanonicalNode))?;

    let unauth_node = NodeEndpoint::new(raw.unauth_node, raw.ws_unauth_node)
        .ok_or_else(|| fail(sink, LogLevel::Critical, ConfigError::NoUnauthenticatedNode))?;

    let jwt_path = raw
        .jwt_secret
        .ok_or_else(|| fail(sink, LogLevel::Critical, ConfigError::NoJwtSecret))?;

    let port = match raw.port {
        Some(port) => port,
        None => {
            sink.warn(&format!("no port specified, using default port {DEFAULT_PORT}"));
            DEFAULT_PORT
        }
    };

    let log_level = match raw.log_level.as_deref() {
        Some(token) => LogLevel::from_str(token)
            .map_err(|e| fail(sink, LogLevel::Error, ConfigError::InvalidLogLevel(e.0)))?,
        None => LogLevel::default(),
    };
    sink.set_level(log_level)?;

    let fee_override =
        resolve_fee_override(raw.fee_override_chance, raw.fee_override_address, sink)?;

    let secret = load_jwt_secret(&jwt_path, sink)?;

    let listen_addr = raw
        .listen_addr
        .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string());

    Ok(Configuration::new(
        canonical_node,
        unauth_node,
        listen_addr,
        port,
        secret,
        fee_override,
        log_level,
    ))
}

fn resolve_fee_override(
    chance: Option<f64>,
    address: Option<String>,
    sink: &dyn LogSink,
) -> Result<Option<FeeOverride>, ConfigError> {
    let (chance, address) = match (chance, address) {
        (Some(chance), Some(address)) => (chance, address),
        (None, Some(address)) => {
            sink.warn(&format!(
                "fee_override_address {address} is set without fee_override_chance, ignoring"
            ));
            return Ok(None);
        }
        _ => return Ok(None),
    };

    if !(0.0..=1.0).contains(&chance) {
        return Err(fail(
            sink,
            LogLevel::Critical,
            ConfigError::FeeChanceOutOfRange(chance),
        ));
    }

    let fee = FeeOverride { chance, address };
    sink.info(&format!("Fee override chance set to {chance}."));
    sink.info(&format!("Fee override address: {}", fee.address));
    if fee.recipient().is_none() {
        sink.warn(&format!(
            "fee_override_address {} is not a 20-byte hex address",
            fee.address
        ));
    }

    Ok(Some(fee))
}

fn fail(sink: &dyn LogSink, severity: LogLevel, err: ConfigError) -> ConfigError {
    sink.emit(severity, &err.to_string());
    err
}
