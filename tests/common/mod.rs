//! Shared utilities for startup integration tests.

#![allow(dead_code)]

use std::io::Write;
use tempfile::NamedTempFile;

pub const CANONICAL_NODE: &str = "http://127.0.0.1:8551";
pub const UNAUTH_NODE: &str = "https://mainnet.example.org";
pub const FEE_ADDRESS: &str = "0x000000000000000000000000000000000000dEaD";

/// Write a jwt secret file with the given contents.
pub fn secret_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

/// Argument vector that passes every rule, followed by `extra`.
pub fn valid_args(secret: &NamedTempFile, extra: &[&str]) -> Vec<String> {
    let mut args: Vec<String> = vec![
        "openexecution".into(),
        "--node".into(),
        CANONICAL_NODE.into(),
        "--unauth-node".into(),
        UNAUTH_NODE.into(),
        "--jwt-secret".into(),
        secret.path().display().to_string(),
    ];
    args.extend(extra.iter().map(|s| s.to_string()));
    args
}

/// Argument vector with the named option (and its value) removed.
pub fn without(args: Vec<String>, option: &str) -> Vec<String> {
    let mut out = Vec::with_capacity(args.len());
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        if arg == option {
            iter.next();
            continue;
        }
        out.push(arg);
    }
    out
}
