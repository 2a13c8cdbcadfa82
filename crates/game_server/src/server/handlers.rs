//! Session handling logic for accepted connections.
//!
//! This module contains the per-connection session loop that reads
//! protocol lines, feeds them to the command processor, writes replies,
//! and guarantees registry cleanup when the session ends for any reason.

use crate::{
    error::ServerError,
    protocol::{self, Disposition},
    registry::{PlayerKey, PlayerRegistry},
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::OwnedWriteHalf;
use tokio::net::TcpStream;
use tracing::{debug, info, trace};

/// Handles a single client session from acceptance to cleanup.
///
/// Reads newline-delimited text until end-of-stream, an I/O error, or a
/// LEAVE-acknowledged close. Each line is processed and its reply (if
/// any) is written back with a trailing newline before the next line is
/// read. A trailing carriage return before the newline is tolerated.
///
/// Whatever ends the session (LEAVE, EOF, peer reset, write failure),
/// the session's identity is unconditionally removed from the registry
/// on the way out, so a player can never outlive its connection. The
/// removal is idempotent, which covers the LEAVE path where the
/// processor already emptied the slot.
///
/// # Arguments
///
/// * `stream` - The TCP stream for the client connection
/// * `addr` - The remote address of the client
/// * `registry` - Shared player registry injected by the acceptor
///
/// # Returns
///
/// `Ok(())` if the session ended cleanly (EOF or LEAVE), or a
/// `ServerError::Connection` describing the read/write failure that
/// ended it. Either way, cleanup has already run.
pub async fn handle_session(
    stream: TcpStream,
    addr: SocketAddr,
    registry: Arc<PlayerRegistry>,
) -> Result<(), ServerError> {
    info!("🔗 Connection from {}", addr);
    let key = PlayerKey::from(addr);

    let result = session_loop(stream, key, &registry).await;

    // Covers abrupt disconnects; a no-op after a LEAVE already removed the entry.
    registry.remove(key).await;
    info!("❌ Connection from {} closed", addr);
    result
}

/// Reads, processes, and answers lines until the session ends.
async fn session_loop(
    stream: TcpStream,
    key: PlayerKey,
    registry: &PlayerRegistry,
) -> Result<(), ServerError> {
    let (reader, mut writer) = stream.into_split();
    let mut lines = BufReader::new(reader).lines();

    while let Some(line) = lines
        .next_line()
        .await
        .map_err(|e| ServerError::Connection(format!("read from {key} failed: {e}")))?
    {
        trace!("📨 {} -> {:?}", key, line);
        let outcome = protocol::process_line(&line, key, registry).await;

        if let Some(reply) = outcome.reply {
            write_reply(&mut writer, key, &reply.to_string()).await?;
        }

        if outcome.disposition == Disposition::Close {
            debug!("Session {} closing after LEAVE", key);
            break;
        }
    }

    Ok(())
}

/// Writes one newline-terminated reply to the client.
async fn write_reply(
    writer: &mut OwnedWriteHalf,
    key: PlayerKey,
    reply: &str,
) -> Result<(), ServerError> {
    trace!("📤 {} <- {:?}", key, reply);
    let mut line = String::with_capacity(reply.len() + 1);
    line.push_str(reply);
    line.push('\n');
    writer
        .write_all(line.as_bytes())
        .await
        .map_err(|e| ServerError::Connection(format!("write to {key} failed: {e}")))
}
