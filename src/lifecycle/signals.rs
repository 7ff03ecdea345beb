//! OS signal handling.

/// Wait for shutdown signal (Ctrl+C).
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        return;
    }
    tracing::info!("Shutdown signal received");
}
