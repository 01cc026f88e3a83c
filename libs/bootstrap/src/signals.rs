//! Process termination signals.

use anyhow::Result;
use tokio::signal;

/// Wait until the process is asked to stop (Ctrl+C, or SIGTERM on unix).
pub async fn wait_for_shutdown() -> Result<()> {
    tokio::select! {
        result = ctrl_c() => result?,
        result = sigterm() => result?,
    }
    tracing::info!("shutdown signal received");
    Ok(())
}

async fn ctrl_c() -> Result<()> {
    signal::ctrl_c().await?;
    tracing::debug!("received Ctrl+C");
    Ok(())
}

#[cfg(unix)]
async fn sigterm() -> Result<()> {
    let mut handler = signal::unix::signal(signal::unix::SignalKind::terminate())?;
    handler.recv().await;
    tracing::debug!("received SIGTERM");
    Ok(())
}

#[cfg(not(unix))]
async fn sigterm() -> Result<()> {
    std::future::pending::<Result<()>>().await
}
