//! Main application logic and lifecycle management.
//!
//! This module contains the core `Application` struct that orchestrates
//! server startup, the wait for a termination signal, and shutdown.

use crate::{config::AppConfig, logging::display_banner, signals::wait_for_shutdown_signal};
use game_server::GameServer;
use tracing::{error, info};

/// Main application struct.
///
/// The `Application` manages the complete lifecycle of the Waypoint
/// server: banner and configuration summary, server startup in a
/// background task, and termination on signal.
pub struct Application {
    /// Resolved application configuration
    config: AppConfig,
    /// Game server instance
    server: GameServer,
}

impl Application {
    /// Creates a new application instance from a resolved configuration.
    ///
    /// The caller has already merged CLI overrides into the configuration
    /// and validated it.
    pub fn new(config: AppConfig) -> Self {
        let server = GameServer::new(config.to_server_config());
        Self { config, server }
    }

    /// Runs the application until a termination signal arrives.
    ///
    /// The server runs in a background task; a fatal server error (such
    /// as a bind failure) exits the process with a nonzero status before
    /// any connection is served.
    pub async fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        let Application { config, server } = self;

        display_banner();
        log_configuration_summary(&config);

        let server_handle = tokio::spawn(async move {
            if let Err(e) = server.start().await {
                error!("❌ Server error: {e}");
                std::process::exit(1);
            }
        });

        info!("🛑 Press Ctrl+C to stop");
        wait_for_shutdown_signal().await?;
        info!("🛑 Shutdown signal received, stopping server");

        server_handle.abort();

        info!("✅ Waypoint server shutdown complete");
        Ok(())
    }
}

/// Logs the configuration summary at startup.
fn log_configuration_summary(config: &AppConfig) {
    info!("📋 Configuration Summary:");
    info!("  🌐 Listen port: {}", config.server.port);
    info!("  📝 Log level: {}", config.logging.level);
    info!(
        "  🗒  Log format: {}",
        if config.logging.json_format {
            "json"
        } else {
            "human-readable"
        }
    );
}
