//! Headless raffle server binary.
//!
//! Starts the axum web server and the credential maintenance loop,
//! then waits for Ctrl+C.

use tracing_subscriber::EnvFilter;

use chat_raffle_lib::app::SharedState;
use chat_raffle_lib::background;
use chat_raffle_lib::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Step 1: Tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    tracing::info!("Starting chat-raffle server");

    // Steps 2-4: Foundation
    let (db, config, dir) = chat_raffle_lib::init_foundation()?;
    let state = SharedState::new(db, config, dir);

    // Step 5: Web server
    let server_state = state.clone();
    let server_handle = tokio::spawn(async move {
        if let Err(e) = server::start_server(server_state).await {
            tracing::error!("Server failed: {e}");
        }
    });

    // Step 6: Credential auto-refresh
    let s = state.clone();
    tokio::spawn(async move { background::credential_refresh_loop(s).await });

    tracing::info!(
        port = state.server_port(),
        "Raffle server running. Press Ctrl+C to stop."
    );

    // Wait for shutdown signal
    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutting down...");
    state.shutdown_token().cancel();

    let _ = server_handle.await;
    Ok(())
}
