//! Parlor server library logic.

pub mod api;
pub mod api_connection;
pub mod config;
pub mod middleware;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Extension, Router,
};
use middleware::RateLimiter;
use parlor_voice::VoiceService;
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Token minting and agent dispatch.
    pub voice_service: Arc<VoiceService>,
    /// Rate limiter state.
    pub rate_limiter: RateLimiter,
    /// Requests allowed per client IP per minute.
    pub requests_per_minute: u32,
    /// Directory of the static demo page.
    pub client_dir: String,
}

impl AppState {
    pub fn new(voice_service: VoiceService, config: &config::Config) -> Self {
        Self {
            voice_service: Arc::new(voice_service),
            rate_limiter: RateLimiter::new(),
            requests_per_minute: config.rate_limit.requests_per_minute,
            client_dir: config.client.dir.clone(),
        }
    }
}

/// Join requests are three short strings.
const MAX_REQUEST_BODY_BYTES: usize = 64 * 1024;

/// Builds the application router with all routes.
pub fn app(state: AppState) -> Router {
    let router = Router::new()
        .route("/health", get(api::health))
        .route(
            "/api/connection-details",
            post(api_connection::connection_details_handler),
        );

    let client_dir = state.client_dir.clone();
    if !Path::new(&client_dir).is_absolute() {
        tracing::debug!(
            path = %client_dir,
            "client directory is relative; static file serving depends on working directory"
        );
    }
    let router = if Path::new(&client_dir).join("index.html").exists() {
        tracing::info!(path = %client_dir, "serving client static files");
        let index = Path::new(&client_dir).join("index.html");
        router.fallback_service(ServeDir::new(&client_dir).fallback(ServeFile::new(index)))
    } else {
        tracing::info!(path = %client_dir, "client directory not found, skipping static file serving");
        router
    };

    router
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_BYTES))
        .layer(axum::middleware::from_fn(middleware::rate_limit_middleware))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .layer(Extension(Arc::new(state)))
}
