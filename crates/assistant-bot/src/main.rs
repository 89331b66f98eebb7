//! Telegram assistant bot - webhook server entry point.

use anyhow::Context;
use assistant_bot::api::{create_router, AppState};
use assistant_bot::{AppResult, Config, Dispatcher};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> AppResult<()> {
    // Load configuration; missing secrets stop the process here.
    let config = Config::load().context("Failed to load configuration")?;

    // Initialize logging
    init_logging(&config.log.level, &config.log.format);

    info!("Starting assistant bot...");

    let dispatcher = Dispatcher::from_config(&config)?;

    if dispatcher.telegram().health_check().await {
        info!("Telegram API healthy");
    } else {
        warn!("Telegram getMe failed - check TELEGRAM__BOT_TOKEN");
    }

    info!(
        "OpenRouter models: chat={}, content={}",
        config.openrouter.model, config.openrouter.content_model
    );

    let app = create_router(AppState::new(dispatcher));

    let addr = SocketAddr::new(
        config
            .server
            .listen_addr
            .parse()
            .context("Invalid SERVER__LISTEN_ADDR")?,
        config.server.port,
    );

    let listener = TcpListener::bind(addr).await?;

    info!("Listening for webhook updates on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutting down...");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

fn init_logging(level: &str, format: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(filter);

    if format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
