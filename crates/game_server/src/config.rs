//! Server configuration types and defaults.
//!
//! This module contains the server configuration structure and default
//! values used to initialize the game server.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Configuration structure for the game server.
///
/// The server keeps no state beyond the in-memory registry, accepts on a
/// single address, and applies no connection limits or idle timeouts, so
/// the bind address is the only parameter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The socket address to bind the server to
    pub bind_address: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:4000"
                .parse()
                .expect("Invalid default bind address"),
        }
    }
}
