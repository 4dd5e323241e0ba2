mod api_doc;
mod app;
mod config;
mod error;
mod handlers;
mod models;
mod routes;
mod service;
mod state;
mod store;

use anyhow::Context;
use config::Config;
use service::ItemService;
use state::AppState;
use std::sync::Arc;
use store::MongoItemStore;
use tokio::signal;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    tracing::info!("food-items-api starting");

    let config = Config::from_env()?;
    config.log_startup();

    // A failed connection leaves the API up in a disconnected state so the
    // health endpoint can still report it.
    let items = match MongoItemStore::from_config(&config).await {
        Ok(store) => ItemService::new(Arc::new(store)),
        Err(e) => {
            tracing::error!("Failed to connect to MongoDB: {:#}", e);
            tracing::warn!("Serving without a database connection");
            ItemService::disconnected()
        }
    };

    let app = app::router(AppState {
        items: items.clone(),
    });

    let listener = tokio::net::TcpListener::bind(config.listen_addr())
        .await
        .with_context(|| format!("Failed to bind {}", config.listen_addr()))?;

    tracing::info!("Listening on {}", config.listen_addr());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    items.shutdown().await;
    tracing::info!("food-items-api stopped");

    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
