//! Core game server implementation.
//!
//! This module contains the main `GameServer` struct and its
//! implementation: binding the listening socket and running the accept
//! loop that spawns one session handler per connection.

use crate::{
    config::ServerConfig,
    error::ServerError,
    registry::PlayerRegistry,
    server::handlers::handle_session,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

/// The core game server structure.
///
/// `GameServer` owns the server configuration and the shared player
/// registry, and drives the accept loop. Each accepted connection runs in
/// its own tokio task with a handle to the registry, so sessions never
/// block each other and a failing session cannot take down its peers or
/// the acceptor.
pub struct GameServer {
    /// Server configuration settings
    config: ServerConfig,

    /// Shared registry of joined players, handed to every session
    registry: Arc<PlayerRegistry>,
}

impl GameServer {
    /// Creates a new game server with the specified configuration.
    ///
    /// The registry is created here, once per process, and injected into
    /// every session handler the accept loop spawns. The server is ready
    /// to start after construction.
    ///
    /// # Arguments
    ///
    /// * `config` - Configuration parameters for server behavior
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            registry: Arc::new(PlayerRegistry::new()),
        }
    }

    /// Gets a handle to the shared player registry.
    ///
    /// Useful for observability and tests; sessions receive their handle
    /// from the accept loop directly.
    pub fn registry(&self) -> Arc<PlayerRegistry> {
        self.registry.clone()
    }

    /// Starts the game server and begins accepting connections.
    ///
    /// Binds the configured address, announces the active port, and runs
    /// the accept loop until the process terminates.
    ///
    /// # Errors
    ///
    /// A bind or listen failure at startup is fatal and returned as
    /// `ServerError::Network` before any connection is accepted. Once
    /// serving, a transient accept failure is logged and the loop
    /// continues unaffected.
    pub async fn start(&self) -> Result<(), ServerError> {
        info!("🚀 Starting server on {}", self.config.bind_address);

        let listener = TcpListener::bind(self.config.bind_address)
            .await
            .map_err(|e| {
                ServerError::Network(format!("Failed to bind {}: {e}", self.config.bind_address))
            })?;
        let local_addr = listener
            .local_addr()
            .map_err(|e| ServerError::Network(format!("Failed to read local address: {e}")))?;

        info!("✅ Server listening on port {}", local_addr.port());

        self.accept_loop(listener).await
    }

    /// Accepts connections forever, spawning one session task per client.
    async fn accept_loop(&self, listener: TcpListener) -> Result<(), ServerError> {
        loop {
            match listener.accept().await {
                Ok((stream, addr)) => {
                    let registry = self.registry.clone();
                    tokio::spawn(async move {
                        if let Err(e) = handle_session(stream, addr, registry).await {
                            error!("Session error for {}: {}", addr, e);
                        }
                    });
                }
                Err(e) => {
                    warn!("Failed to accept connection: {}", e);
                }
            }
        }
    }
}
