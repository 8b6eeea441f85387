//! Command-line option grammar.
//!
//! Every option is optional at the clap level. Presence rules are enforced
//! afterwards by `config::validation` so that failures come out in a fixed
//! order with the gateway's own diagnostics.
//!
//! Help and version are answered before clap type-checks anything, so a
//! malformed value anywhere in argv cannot turn them into a failure.

use clap::{error::ErrorKind, ArgAction, CommandFactory, Parser};
use std::ffi::OsString;
use std::path::PathBuf;

use crate::config::error::ConfigError;

/// Raw option set, straight from the argument vector.
#[derive(Parser, Debug, Clone, Default, PartialEq)]
#[command(name = "openexecution")]
#[command(version = concat!("version ", env!("CARGO_PKG_VERSION")), disable_version_flag = true)]
#[command(about = "JSON-RPC gateway between consensus clients and execution nodes", long_about = None)]
pub struct RawOptions {
    /// print version
    #[arg(short = 'v', long, action = ArgAction::Version)]
    pub version: Option<bool>,

    /// verbosity of the program. Possible values: TRACE DEBUG INFO WARN ERROR CRITICAL
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,

    /// address to listen on for json-rpc
    #[arg(long = "listen-addr", value_name = "ADDR")]
    pub listen_addr: Option<String>,

    /// filepath for the jwt secret
    #[arg(long = "jwt-secret", value_name = "PATH")]
    pub jwt_secret: Option<PathBuf>,

    /// chance in decimal form that a client's fee recipient gets replaced with your own
    #[arg(long = "fee_override_chance", value_name = "CHANCE")]
    pub fee_override_chance: Option<f64>,

    /// address to replace the fee recipient with
    #[arg(long = "fee_override_address", value_name = "ADDRESS")]
    pub fee_override_address: Option<String>,

    /// unauthenticated node url (could be something like infura)
    #[arg(long = "unauth-node", value_name = "URL")]
    pub unauth_node: Option<String>,

    /// unauthenticated node ws address (host:port)
    #[arg(long = "ws-unauth-node", value_name = "HOST:PORT")]
    pub ws_unauth_node: Option<String>,

    /// the ws route for the canonical node (host:port)
    #[arg(long = "ws-node", value_name = "HOST:PORT")]
    pub ws_node: Option<String>,

    /// the url of the "canonical" node
    #[arg(short = 'n', long, value_name = "URL")]
    pub node: Option<String>,
}

/// What the process was asked to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Invocation {
    /// Validate these options and start.
    Run(RawOptions),
    /// Print this text (help or version) and exit successfully.
    Display(String),
}

impl RawOptions {
    /// Tokenize `args` (including the program name).
    ///
    /// Help and version requests short-circuit everything else and come back
    /// as [`Invocation::Display`], wherever they appear in `args`.
    pub fn from_args<I, T>(args: I) -> Result<Invocation, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let args: Vec<OsString> = args.into_iter().map(Into::into).collect();

        if let Some(text) = display_request(&args) {
            return Ok(Invocation::Display(text));
        }

        match Self::try_parse_from(args) {
            Ok(raw) => Ok(Invocation::Run(raw)),
            Err(e) => match e.kind() {
                ErrorKind::DisplayHelp => Ok(Invocation::Display(e.render().to_string())),
                ErrorKind::DisplayVersion => Ok(Invocation::Display(version_banner())),
                _ => Err(ConfigError::InvalidArguments(
                    e.render().to_string().trim().to_string(),
                )),
            },
        }
    }
}

/// The version/build banner printed for `--version`.
pub fn version_banner() -> String {
    format!(
        "{}\nCompiled with rustc for {}-{}\n",
        RawOptions::command().render_version().trim_end(),
        std::env::consts::ARCH,
        std::env::consts::OS,
    )
}

/// First help or version flag in `args`, rendered. Scanning stops at `--`.
fn display_request(args: &[OsString]) -> Option<String> {
    args.iter()
        .skip(1)
        .take_while(|arg| arg.as_os_str() != "--")
        .find_map(|arg| match arg.to_str()? {
            "-h" | "--help" => Some(RawOptions::command().render_help().to_string()),
            "-v" | "--version" => Some(version_banner()),
            _ => None,
        })
}
