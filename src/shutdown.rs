//! Interrupt handling.

use std::future::Future;
use std::io;
use tokio::sync::broadcast;
use tracing::{error, info, warn};

/// Exit status used when a second Ctrl+C cuts the final flush short.
pub const FORCED_EXIT_CODE: i32 = 130;

/// Sets up a shutdown signal handler.
///
/// The returned receiver gets a message once Ctrl+C is pressed. A second
/// Ctrl+C exits the process immediately, even while the producer is still
/// flushing.
pub fn setup_shutdown_handler() -> broadcast::Receiver<()> {
    let (shutdown_tx, shutdown_rx) = broadcast::channel(1);

    tokio::spawn(async move {
        match relay_interrupts(tokio::signal::ctrl_c, shutdown_tx).await {
            Ok(()) => std::process::exit(FORCED_EXIT_CODE),
            Err(e) => error!("Failed to listen for Ctrl+C: {e}"),
        }
    });

    shutdown_rx
}

/// Broadcast a graceful shutdown on the first interrupt and return on the
/// second one.
async fn relay_interrupts<F, Fut>(
    mut next_interrupt: F,
    shutdown_tx: broadcast::Sender<()>,
) -> io::Result<()>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = io::Result<()>>,
{
    next_interrupt().await?;
    info!("Received interrupt signal (Ctrl+C)");
    let _ = shutdown_tx.send(());

    next_interrupt().await?;
    warn!("Received second interrupt signal - exiting without waiting for the flush");
    Ok(())
}
