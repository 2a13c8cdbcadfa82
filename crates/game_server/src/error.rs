//! Error types and handling for the game server.
//!
//! This module defines the error types that can occur during server
//! operations, providing clear categorization of different failure modes.
//! Protocol-level rejections are not errors in this sense - they are
//! replies to the offending client and live in [`crate::protocol`].

/// Enumeration of possible server errors.
///
/// Categorizes errors into network-level failures (binding, listening)
/// and per-connection failures (read/write on an established session)
/// to help with debugging and error handling.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Network-related errors such as binding or listening failures
    #[error("Network error: {0}")]
    Network(String),

    /// Failures on one established connection (read, write, peer reset)
    #[error("Connection error: {0}")]
    Connection(String),
}
