//! Command-line interface handling for the Waypoint position server.
//!
//! This module provides command-line argument parsing using the `clap`
//! crate for robust argument handling.

use clap::{Arg, Command};
use std::path::PathBuf;

/// Command line arguments parsed from user input.
///
/// The only positional argument is the listen port; the remaining options
/// override configuration file settings.
#[derive(Debug, Clone)]
pub struct CliArgs {
    /// Optional listen port (positional; default 4000)
    pub port: Option<u16>,
    /// Optional path to a TOML configuration file
    pub config_path: Option<PathBuf>,
    /// Optional override for log level
    pub log_level: Option<String>,
    /// Whether to force JSON log output
    pub json_logs: bool,
}

impl CliArgs {
    /// Parses command line arguments using clap.
    ///
    /// An invalid port (non-numeric, or outside the 16-bit range) is a
    /// fatal startup error: clap reports it and exits nonzero before any
    /// socket is touched.
    pub fn parse() -> Self {
        let matches = Command::new("Waypoint Position Server")
            .version("0.1.0")
            .about("Session-oriented TCP server tracking player positions")
            .arg(
                Arg::new("port")
                    .value_name("PORT")
                    .help("Listen port (default 4000)")
                    .value_parser(clap::value_parser!(u16))
                    .index(1),
            )
            .arg(
                Arg::new("config")
                    .short('c')
                    .long("config")
                    .value_name("FILE")
                    .help("Configuration file path (TOML; read, never written)"),
            )
            .arg(
                Arg::new("log-level")
                    .short('l')
                    .long("log-level")
                    .value_name("LEVEL")
                    .help("Log level (trace, debug, info, warn, error)"),
            )
            .arg(
                Arg::new("json-logs")
                    .long("json-logs")
                    .help("Output logs in JSON format")
                    .action(clap::ArgAction::SetTrue),
            )
            .get_matches();

        Self {
            port: matches.get_one::<u16>("port").copied(),
            config_path: matches.get_one::<String>("config").map(PathBuf::from),
            log_level: matches.get_one::<String>("log-level").cloned(),
            json_logs: matches.get_flag("json-logs"),
        }
    }
}
