//! # Waypoint Position Server - Main Entry Point
//!
//! Session-oriented TCP server that tracks connected players over a
//! line-oriented text protocol. This entry point handles CLI parsing,
//! configuration resolution, and application lifecycle management.
//!
//! ## Quick Start
//!
//! ```bash
//! # Run on the default port (4000)
//! waypoint
//!
//! # Run on a specific port
//! waypoint 5000
//!
//! # Load settings from a TOML file, override the log level
//! waypoint --config waypoint.toml --log-level debug
//!
//! # JSON logging for production
//! waypoint --json-logs
//! ```
//!
//! ## Configuration
//!
//! Default operation touches no files. A TOML configuration file is read
//! only when `--config` names one; the positional port argument always
//! wins over the file.
//!
//! ## Signal Handling
//!
//! The process terminates cleanly on:
//! - SIGINT (Ctrl+C)
//! - SIGTERM (Unix systems)

use tracing::error;

mod app;
mod cli;
mod config;
mod logging;
mod signals;

use app::Application;
use cli::CliArgs;

/// Main entry point for the Waypoint position server.
///
/// Handles the complete application lifecycle:
/// 1. Command-line argument parsing
/// 2. Configuration resolution (optional file + CLI overrides)
/// 3. Logging system initialization
/// 4. Application creation and execution
///
/// # Exit Codes
///
/// * **0**: Successful execution and shutdown
/// * nonzero: Error during startup, configuration, or runtime
///
/// Note: This function is called from an async context (main with
/// #[tokio::main]), so it should NOT have #[tokio::main] itself.
pub async fn init() -> Result<(), Box<dyn std::error::Error>> {
    // Parse CLI arguments first
    let args = CliArgs::parse();

    // Resolve configuration: optional file, then CLI overrides on top
    let mut config = match &args.config_path {
        Some(path) => match AppConfig::load_from_file(path).await {
            Ok(config) => config,
            Err(e) => {
                eprintln!("❌ Failed to load configuration: {e}");
                std::process::exit(1);
            }
        },
        None => AppConfig::default(),
    };

    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(level) = &args.log_level {
        config.logging.level = level.clone();
    }
    if args.json_logs {
        config.logging.json_format = true;
    }

    if let Err(e) = config.validate() {
        eprintln!("❌ Configuration validation failed: {e}");
        std::process::exit(1);
    }

    // Setup logging before anything else that logs
    if let Err(e) = logging::setup_logging(&config.logging) {
        eprintln!("❌ Failed to setup logging: {e}");
        std::process::exit(1);
    }

    // Create and run application
    if let Err(e) = Application::new(config).run().await {
        error!("❌ Application error: {e:?}");
        std::process::exit(1);
    }

    Ok(())
}

// Re-export main types for potential library usage
pub use config::{AppConfig, LoggingSettings, ServerSettings};
