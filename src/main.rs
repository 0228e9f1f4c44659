//! PriceFeed - Live item price demo server
//!
//! Starts the mutation loop and the HTTP/WebSocket server, then waits
//! for Ctrl+C to drive a graceful shutdown.

use std::sync::Arc;

use tokio::sync::watch;

use pricefeed::broadcast::Broadcaster;
use pricefeed::config::ServerConfig;
use pricefeed::mutator::Mutator;
use pricefeed::server::{run_server, state::AppState};
use pricefeed::store::SharedItemStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("pricefeed=info")),
        )
        .init();

    let config = ServerConfig::from_env();
    tracing::info!(
        port = config.port,
        allowed_origin = %config.allowed_origin,
        interval_ms = config.update_interval.as_millis() as u64,
        "Starting PriceFeed"
    );

    let store = SharedItemStore::with_seed_items();
    let broadcaster = Arc::new(Broadcaster::new());
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // Started exactly once; spawn consumes the mutator.
    let mutator_handle = Mutator::new(
        store.clone(),
        Arc::clone(&broadcaster),
        config.update_interval,
    )
    .spawn(shutdown_rx.clone());

    let state = Arc::new(AppState::new(store, Arc::clone(&broadcaster)));
    let server_config = config.clone();
    let server_handle =
        tokio::spawn(async move { run_server(&server_config, state, shutdown_rx).await });

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutdown signal received");

    // Stop the timer first, then drop every subscriber so their pump
    // tasks finish before the listener closes.
    let _ = shutdown_tx.send(true);
    mutator_handle.await?;
    broadcaster.drain();
    server_handle.await??;

    tracing::info!("PriceFeed stopped");
    Ok(())
}
