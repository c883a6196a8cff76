pub mod health;
pub mod justify;
pub mod token;
pub mod usage;

use axum::{
    extract::DefaultBodyLimit,
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::errors::AppError;
use crate::state::AppState;

pub use justify::rate_limit_headers;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_body_bytes;

    Router::new()
        .route("/api/health", get(health::health_handler))
        .route("/api/token", post(token::handle_issue_token))
        .route("/api/justify", post(justify::handle_justify))
        .route("/api/usage", get(usage::handle_usage))
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
