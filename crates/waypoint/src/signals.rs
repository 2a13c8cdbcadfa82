//! Signal handling for clean server termination.
//!
//! This module provides cross-platform signal handling so the process
//! stops cleanly when receiving termination signals. Sessions are not
//! drained - closing the process closes every connection, and the
//! registry dies with the process.

use tokio::signal;

/// Waits for a termination signal.
///
/// Returns when a signal is received.
///
/// # Platform Support
///
/// * **Unix platforms**: Handles SIGINT and SIGTERM signals
/// * **Windows**: Handles Ctrl+C signal
pub async fn wait_for_shutdown_signal() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(unix)]
    {
        use signal::unix::{signal, SignalKind};

        let mut sigint = signal(SignalKind::interrupt())?;
        let mut sigterm = signal(SignalKind::terminate())?;

        tokio::select! {
            _ = sigint.recv() => (),
            _ = sigterm.recv() => ()
        }
    }

    #[cfg(windows)]
    signal::ctrl_c().await?;

    Ok(())
}
