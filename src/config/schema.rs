//! Configuration schema definitions.
//!
//! This module defines the validated configuration handed to the rest of the
//! gateway. Values here are only ever built by `config::validation`, so a
//! `Configuration` in hand already satisfies every cross-option rule.

use alloy::primitives::Address;
use std::fmt;
use std::str::FromStr;

use crate::config::secret::JwtSecret;
use crate::observability::logging::LogLevel;

/// Port used when `--port` is not given.
pub const DEFAULT_PORT: u16 = 8000;

/// Address used when `--listen-addr` is not given.
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0";

/// Root configuration for the gateway.
#[derive(Debug, Clone)]
pub struct Configuration {
    canonical_node: NodeEndpoint,
    unauth_node: NodeEndpoint,
    listen_addr: String,
    port: u16,
    secret: JwtSecret,
    fee_override: Option<FeeOverride>,
    log_level: LogLevel,
}

impl Configuration {
    pub(crate) fn new(
        canonical_node: NodeEndpoint,
        unauth_node: NodeEndpoint,
        listen_addr: String,
        port: u16,
        secret: JwtSecret,
        fee_override: Option<FeeOverride>,
        log_level: LogLevel,
    ) -> Self {
        Self {
            canonical_node,
            unauth_node,
            listen_addr,
            port,
            secret,
            fee_override,
            log_level,
        }
    }

    /// The authenticated execution node treated as source of truth.
    pub fn canonical_node(&self) -> &NodeEndpoint {
        &self.canonical_node
    }

    /// The fallback node reachable without the shared secret.
    pub fn unauth_node(&self) -> &NodeEndpoint {
        &self.unauth_node
    }

    pub fn listen_addr(&self) -> &str {
        &self.listen_addr
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// `listen_addr:port`, ready for a socket bind.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.listen_addr, self.port)
    }

    pub fn secret(&self) -> &JwtSecret {
        &self.secret
    }

    pub fn fee_override(&self) -> Option<&FeeOverride> {
        self.fee_override.as_ref()
    }

    pub fn log_level(&self) -> LogLevel {
        self.log_level
    }
}

/// An execution node reachable over HTTP, WebSocket, or both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeEndpoint {
    http: Option<String>,
    ws: Option<String>,
}

/// Which transport the router should use for a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeTransport {
    Http,
    WebSocket,
}

/// A WebSocket target split into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WsTarget {
    pub host: String,
    pub port: Option<String>,
}

impl NodeEndpoint {
    /// Returns `None` when neither form is supplied.
    pub fn new(http: Option<String>, ws: Option<String>) -> Option<Self> {
        if http.is_none() && ws.is_none() {
            return None;
        }
        Some(Self { http, ws })
    }

    pub fn http(&self) -> Option<&str> {
        self.http.as_deref()
    }

    pub fn ws(&self) -> Option<&str> {
        self.ws.as_deref()
    }

    /// Parsed HTTP endpoint, if one was given.
    pub fn http_url(&self) -> Option<Result<url::Url, url::ParseError>> {
        self.http.as_deref().map(url::Url::parse)
    }

    /// Split the WebSocket form at its first `:` into host and port.
    pub fn ws_target(&self) -> Option<WsTarget> {
        let ws = self.ws.as_deref()?;
        let target = match ws.split_once(':') {
            Some((host, port)) => WsTarget {
                host: host.to_string(),
                port: Some(port.to_string()),
            },
            None => WsTarget {
                host: ws.to_string(),
                port: None,
            },
        };
        Some(target)
    }

    /// WebSocket wins when both forms are present.
    pub fn transport(&self) -> NodeTransport {
        if self.ws.is_some() {
            NodeTransport::WebSocket
        } else {
            NodeTransport::Http
        }
    }
}

impl fmt::Display for NodeEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.http, &self.ws) {
            (Some(http), Some(ws)) => write!(f, "{http} (ws: {ws})"),
            (Some(http), None) => f.write_str(http),
            (None, Some(ws)) => write!(f, "ws: {ws}"),
            (None, None) => f.write_str("<none>"),
        }
    }
}

/// Operator-controlled fee recipient substitution knobs.
#[derive(Debug, Clone, PartialEq)]
pub struct FeeOverride {
    /// Probability in [0, 1] that a client's fee recipient is replaced.
    pub chance: f64,
    /// Recipient used when the override fires, as the operator typed it.
    pub address: String,
}

impl FeeOverride {
    /// The recipient as an EVM address, if it parses as one.
    pub fn recipient(&self) -> Option<Address> {
        Address::from_str(&self.address).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_requires_a_form() {
        assert!(NodeEndpoint::new(None, None).is_none());
        assert!(NodeEndpoint::new(Some("http://localhost:8551".into()), None).is_some());
        assert!(NodeEndpoint::new(None, Some("localhost:8546".into())).is_some());
    }

    #[test]
    fn test_transport_preference() {
        let http = NodeEndpoint::new(Some("http://localhost:8551".into()), None).unwrap();
        assert_eq!(http.transport(), NodeTransport::Http);

        let both = NodeEndpoint::new(
            Some("http://localhost:8551".into()),
            Some("localhost:8546".into()),
        )
        .unwrap();
        assert_eq!(both.transport(), NodeTransport::WebSocket);
    }

    #[test]
    fn test_ws_target_split() {
        let node = NodeEndpoint::new(None, Some("10.0.0.2:8546".into())).unwrap();
        assert_eq!(
            node.ws_target(),
            Some(WsTarget {
                host: "10.0.0.2".into(),
                port: Some("8546".into()),
            })
        );

        let bare = NodeEndpoint::new(None, Some("geth".into())).unwrap();
        assert_eq!(bare.ws_target().unwrap().port, None);

        let http_only = NodeEndpoint::new(Some("http://geth:8551".into()), None).unwrap();
        assert_eq!(http_only.ws_target(), None);
    }

    #[test]
    fn test_http_url() {
        let node = NodeEndpoint::new(Some("http://127.0.0.1:8551".into()), None).unwrap();
        let url = node.http_url().unwrap().unwrap();
        assert_eq!(url.port(), Some(8551));

        let bad = NodeEndpoint::new(Some("not a url".into()), None).unwrap();
        assert!(bad.http_url().unwrap().is_err());
    }

    #[test]
    fn test_fee_recipient() {
        let fee = FeeOverride {
            chance: 0.5,
            address: "0x000000000000000000000000000000000000dead".into(),
        };
        assert_eq!(
            fee.recipient(),
            Some(alloy::primitives::address!("000000000000000000000000000000000000dEaD"))
        );

        let odd = FeeOverride {
            chance: 0.5,
            address: "my-wallet".into(),
        };
        assert_eq!(odd.recipient(), None);
    }

    #[test]
    fn test_endpoint_display() {
        let node = NodeEndpoint::new(None, Some("geth:8546".into())).unwrap();
        assert_eq!(node.to_string(), "ws: geth:8546");
    }
}
