//! Token Server Binary
//!
//! Entry point for the access token endpoint and room page.

use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use neurallink_token_server::{
    api::{build_router, AppState},
    config::{Config, ENV_CONFIG_PATH},
};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    tracing::info!("Starting token server...");

    // Load configuration
    let config_path = std::env::var(ENV_CONFIG_PATH).ok();
    let config = Config::load(config_path.as_deref()).context("Failed to load configuration")?;

    let missing = config.livekit.missing();
    if !missing.is_empty() {
        tracing::warn!(
            "Missing {}; token requests will fail until set",
            missing.join(", ")
        );
    }
    tracing::info!("Configuration: {:?}", config);

    let config = Arc::new(config);
    let router = build_router(AppState::new(config.clone()));

    let bind_addr = config.bind_addr();
    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", bind_addr))?;
    tracing::info!("HTTP server listening on {}", bind_addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, stopping...");
        })
        .await?;

    tracing::info!("Token server shutdown complete");
    Ok(())
}

/// `LOG_FORMAT=json` switches to JSON lines
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=debug".into());
    let registry = tracing_subscriber::registry().with(filter);

    if std::env::var("LOG_FORMAT").as_deref() == Ok("json") {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Wait for shutdown signal (SIGTERM or SIGINT)
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
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
