mod auth;
mod config;
mod errors;
mod layout;
mod quota;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={},tower_http={}",
                env!("CARGO_CRATE_NAME"),
                &config.rust_log,
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Justify API v{}", env!("CARGO_PKG_VERSION"));
    info!(
        line_width = config.line_width,
        daily_word_limit = config.daily_word_limit,
        max_body_bytes = config.max_body_bytes,
        "Loaded configuration"
    );

    // Build app state (in-memory token ledger; nothing survives a restart)
    let state = AppState::new(config.clone());

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("Listening on {addr}");
    info!("POST /api/token    -> issue an access token");
    info!("POST /api/justify  -> justify text (requires token)");
    info!("GET  /api/usage    -> remaining daily words (requires token)");
    info!("GET  /api/health   -> health check");

    axum::serve(listener, app).await?;

    Ok(())
}
