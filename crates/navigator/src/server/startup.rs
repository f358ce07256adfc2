//! Proxy server startup

use anyhow::{anyhow, Result};
use axum::serve;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;

use super::routing::create_router;
use super::AppState;

/// Serve the proxy on `addr` until interrupted
pub async fn start_server(addr: SocketAddr, state: AppState) -> Result<()> {
  let app = create_router(state);

  let listener = TcpListener::bind(addr).await?;
  info!(%addr, "proxy listening");

  serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await
    .map_err(|e| anyhow!("Server error: {e}"))?;

  info!("proxy shut down gracefully");
  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    tracing::warn!(error = %e, "could not listen for shutdown signal");
    std::future::pending::<()>().await;
  }
}
