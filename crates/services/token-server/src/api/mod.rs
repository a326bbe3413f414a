//! HTTP API for the token server
//!
//! - `GET /api/token` - Mint an access token for a room
//! - `GET /health` - Health check
//! - Everything else is the embedded room page from `neurallink-ui`

pub mod token;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use neurallink_ui::PageModel;

/// Path of the token endpoint, also handed to the page
pub const TOKEN_PATH: &str = "/api/token";

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Service configuration
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

/// Build the HTTP router, room page included
pub fn build_router(state: AppState) -> Router {
    // CORS configuration - the page may be served from another origin in dev
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let page = PageModel::new(
        state.config.livekit.url.clone().unwrap_or_default(),
        TOKEN_PATH,
    );

    Router::new()
        .route(TOKEN_PATH, get(token::issue_token))
        .route("/health", get(health_check))
        .with_state(state)
        .merge(neurallink_ui::router(page))
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Error body, `{"error": "..."}`
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Errors surfaced by API handlers
///
/// Response bodies are fixed strings; details only go to the log.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Server misconfigured")]
    Misconfigured,

    #[error("Token generation failed")]
    TokenGeneration,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
