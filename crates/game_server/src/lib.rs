//! # Game Server - Session-Oriented Position Tracking
//!
//! A small multiplayer game server core that tracks connected players
//! over a line-oriented TCP text protocol. Each client joins under a
//! nickname, reports 3D integer positions, and leaves; the server keeps
//! one authoritative record per connection in a shared registry.
//!
//! ## Architecture Overview
//!
//! * **Player Registry** - Concurrent-safe store mapping connection
//!   identity to player record
//! * **Command Processor** - State-machine logic interpreting protocol
//!   commands against the registry
//! * **Session Handler** - Owns one connection's lifecycle: reads lines,
//!   invokes the processor, writes replies, cleans up on termination
//! * **Connection Acceptor** - Binds the listening socket and spawns one
//!   session handler per accepted connection
//!
//! ## Wire Protocol
//!
//! ASCII text, newline-terminated, one command per line:
//!
//! * `JOIN:<nickname>` → `WELCOME:<nickname>`
//! * `MOVE:<x>,<y>,<z>` → no reply on success
//! * `LEAVE:` → `GOODBYE:<nickname>`, then the session closes
//! * any rejected command → `ERROR:<reason>`, session stays open
//!
//! ## Thread Safety
//!
//! One tokio task per connection; the registry is the only shared state,
//! guarded by an async `RwLock` held for map operations only and never
//! across network I/O. A failing session tears down only itself - errors
//! never propagate to other sessions or the acceptor.

// Re-export core types and functions for easy access
pub use config::ServerConfig;
pub use error::ServerError;
pub use server::GameServer;
pub use utils::{create_server, create_server_with_config};

// Public module declarations
pub mod config;
pub mod error;
pub mod protocol;
pub mod registry;
pub mod server;
pub mod utils;

// End-to-end session tests over real TCP
mod tests;
