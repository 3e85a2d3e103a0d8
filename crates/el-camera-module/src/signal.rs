//! Termination signal handling.
//!
//! The edge runtime stops modules with SIGTERM; interactive runs use
//! Ctrl-C. Either one flips the stop flag the scan loop watches.

use tokio::sync::watch;

/// Wait for a termination signal, then set the stop flag.
///
/// Intended to be spawned as a background task at startup.
pub async fn watch_for_termination(stop: watch::Sender<bool>) {
    wait_for_signal().await;
    tracing::info!("termination signal received, stopping module");
    // Receiver side may already be gone during teardown.
    let _ = stop.send(true);
}

#[cfg(unix)]
async fn wait_for_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "failed to install SIGTERM handler");
            // Fall back to Ctrl-C only.
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "failed to listen for Ctrl-C");
            }
            return;
        }
    };

    tokio::select! {
        _ = sigterm.recv() => {}
        res = tokio::signal::ctrl_c() => {
            if let Err(e) = res {
                tracing::error!(error = %e, "failed to listen for Ctrl-C");
            }
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for Ctrl-C");
    }
}
