//! Main entry point for the Tickdesk backend.
//!
//! Initializes tracing, loads configuration from the environment,
//! connects to the document store, runs migrations, and serves the API.
//! With `--seed`, replaces the user collection with the demo accounts
//! and exits instead.

use std::error::Error;

use tickdesk_db::DbManager;
use tickdesk_server::{AppState, ServerConfig, routes, seed};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("tickdesk=info".parse().unwrap()),
        )
        .json()
        .init();

    if let Err(err) = run().await {
        tracing::error!(error = %err, "server exited with error");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn Error>> {
    let config = ServerConfig::from_env()?;

    let db = DbManager::connect(&config.db).await?;
    tickdesk_db::run_migrations(db.client()).await?;

    let state = AppState::new(db.client().clone(), config.auth.clone());

    if std::env::args().any(|arg| arg == "--seed") {
        seed::seed_users(&state.users).await?;
        return Ok(());
    }

    let app = routes::router(state);
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "listening");

    axum::serve(listener, app).await?;
    Ok(())
}
