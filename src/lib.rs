pub mod api;
pub mod cli;
pub mod config;
pub mod db;
pub mod entities;

use tokio::signal;

use anyhow::Context;
use api::AppState;
use clap::Parser;
use cli::{Cli, Commands};
pub use config::AppConfig;
use db::Store;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::default();

    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = tracing_subscriber::fmt::layer();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    info!("sqli-demo v{} starting...", env!("CARGO_PKG_VERSION"));

    let store = Store::new(&config.database_url)
        .await
        .context("Failed to open database")?;

    store
        .seed_if_empty(&mut rand::rng(), config.random_user_count)
        .await
        .context("Failed to seed database")?;

    let state = AppState {
        store,
        config: config.clone(),
    };

    let (app, port, variant) = match cli.command {
        Commands::Vulnerable { port } => (
            api::vulnerable_router(state),
            port.unwrap_or(config.vulnerable_port),
            "vulnerable",
        ),
        Commands::Hardened { port } => (
            api::hardened_router(state),
            port.unwrap_or(config.hardened_port),
            "hardened",
        ),
    };

    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    let server_handle = tokio::spawn(async move {
        info!("Serving {variant} variant at http://{addr}");
        if let Err(e) = axum::serve(listener, app).await {
            error!("Web server error: {e}");
        }
    });

    info!("Press Ctrl+C to stop.");

    match signal::ctrl_c().await {
        Ok(()) => {
            info!("Shutdown signal received");
        }
        Err(e) => {
            error!("Error listening for shutdown: {e}");
        }
    }

    server_handle.abort();
    info!("Server stopped");

    Ok(())
}
