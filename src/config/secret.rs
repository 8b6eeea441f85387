//! JWT secret loading from disk.
//!
//! # Responsibilities
//! - Read the shared secret named by `--jwt-secret`
//! - Strip the `0x` prefix before handing the token to the rest of the gateway
//!
//! # Design Decisions
//! - Only the first whitespace-delimited token of the file is used, and only
//!   that token has to be valid UTF-8
//! - A token without the `0x` prefix is reported at critical severity but
//!   still loaded, and its first two characters are still dropped. Nodes
//!   authenticate against the exact bytes produced here, so this stays as is
//!   until the prefix handling is settled.

use std::fmt;
use std::fs;
use std::path::Path;

use crate::config::error::ConfigError;
use crate::observability::logging::LogSink;

const HEX_PREFIX: &str = "0x";

/// The shared secret, without its `0x` prefix.
#[derive(Clone, PartialEq, Eq)]
pub struct JwtSecret(String);

impl JwtSecret {
    /// Raw token for signing bearer tokens.
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for JwtSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("JwtSecret(***)")
    }
}

/// Load the secret file at `path`.
///
/// # Errors
/// Returns [`ConfigError::SecretUnreadable`] if the file cannot be read and
/// [`ConfigError::SecretNotText`] if its token is not UTF-8; either failure is
/// also emitted at error severity.
pub fn load_jwt_secret(path: &Path, sink: &dyn LogSink) -> Result<JwtSecret, ConfigError> {
    let content = fs::read(path).map_err(|source| {
        report(
            sink,
            ConfigError::SecretUnreadable {
                path: path.to_path_buf(),
                source,
            },
        )
    })?;

    let token = content
        .split(u8::is_ascii_whitespace)
        .find(|token| !token.is_empty())
        .unwrap_or_default();
    let token = std::str::from_utf8(token).map_err(|_| {
        report(
            sink,
            ConfigError::SecretNotText {
                path: path.to_path_buf(),
            },
        )
    })?;

    Ok(extract_secret(token, sink))
}

fn report(sink: &dyn LogSink, err: ConfigError) -> ConfigError {
    sink.error(&err.to_string());
    err
}

/// Drop the two-character prefix from `token`, whether or not it is `0x`.
pub fn extract_secret(token: &str, sink: &dyn LogSink) -> JwtSecret {
    if !token.starts_with(HEX_PREFIX) {
        sink.critical("JWT token is not properly formatted");
    }
    JwtSecret(token.chars().skip(HEX_PREFIX.len()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observability::logging::{LogLevel, MemorySink};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn secret_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_prefixed_token() {
        let sink = MemorySink::new();
        let file = secret_file("0xABCDEF\n");

        let secret = load_jwt_secret(file.path(), &sink).unwrap();
        assert_eq!(secret.expose(), "ABCDEF");
        assert!(sink.records().is_empty());
    }

    #[test]
    fn test_unprefixed_token_is_still_truncated() {
        let sink = MemorySink::new();
        let file = secret_file("ABCDEF");

        let secret = load_jwt_secret(file.path(), &sink).unwrap();
        assert_eq!(secret.expose(), "CDEF");
        assert!(sink.contains(LogLevel::Critical, "not properly formatted"));
    }

    #[test]
    fn test_only_first_token_is_read() {
        let sink = MemorySink::new();
        let file = secret_file("  \n\t0xdeadbeef trailing garbage\n");

        let secret = load_jwt_secret(file.path(), &sink).unwrap();
        assert_eq!(secret.expose(), "deadbeef");
    }

    #[test]
    fn test_empty_file_yields_empty_secret() {
        let sink = MemorySink::new();
        let file = secret_file("");

        let secret = load_jwt_secret(file.path(), &sink).unwrap();
        assert!(secret.is_empty());
        assert!(sink.contains(LogLevel::Critical, "not properly formatted"));
    }

    #[test]
    fn test_non_utf8_token_is_not_an_open_failure() {
        let sink = MemorySink::new();
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"0xabcd\xff\n").unwrap();

        let err = load_jwt_secret(file.path(), &sink).unwrap_err();
        assert!(matches!(err, ConfigError::SecretNotText { .. }));
        assert_eq!(err.exit_code(), 1);
        assert!(sink.contains(LogLevel::Error, "is not valid text"));
        assert!(!sink.contains(LogLevel::Error, "Unable to open file"));
    }

    #[test]
    fn test_binary_after_first_token_is_ignored() {
        let sink = MemorySink::new();
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"0xabcd \xff\xfe").unwrap();

        let secret = load_jwt_secret(file.path(), &sink).unwrap();
        assert_eq!(secret.expose(), "abcd");
    }

    #[test]
    fn test_short_token() {
        let sink = MemorySink::new();
        assert_eq!(extract_secret("0x", &sink).expose(), "");
        assert_eq!(extract_secret("A", &sink).expose(), "");
    }

    #[test]
    fn test_missing_file() {
        let sink = MemorySink::new();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.hex");

        let err = load_jwt_secret(&path, &sink).unwrap_err();
        assert!(matches!(err, ConfigError::SecretUnreadable { .. }));
        assert_eq!(err.exit_code(), 1);
        assert!(sink.contains(LogLevel::Error, "for the JWT secret"));
    }

    #[test]
    fn test_debug_is_redacted() {
        let sink = MemorySink::new();
        let secret = extract_secret("0xsupersecret", &sink);
        assert_eq!(format!("{secret:?}"), "JwtSecret(***)");
    }
}
