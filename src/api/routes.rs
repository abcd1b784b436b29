use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers;
use crate::config::Config;
use crate::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let upload_limit = state.config.max_upload_size as usize;
    let cors = cors_layer(&state.config);

    Router::new()
        .route("/", get(handlers::root))
        // Data endpoints
        .route(
            "/api/upload/",
            post(handlers::upload_data).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/api/query/", get(handlers::query_data))
        .route("/api/chat", post(handlers::chat_endpoint))
        // Internal
        .route("/_internal/health", get(handlers::health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(config: &Config) -> CorsLayer {
    if let Some(origins_str) = &config.cors_allowed_origins {
        // Explicit origin allowlist from configuration.
        let origins: Vec<axum::http::HeaderValue> = origins_str
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        // Mirror whatever the request sends, credentials included.
        // Development only; set CORS_ALLOWED_ORIGINS in production.
        CorsLayer::new()
            .allow_origin(AllowOrigin::mirror_request())
            .allow_methods(AllowMethods::mirror_request())
            .allow_headers(AllowHeaders::mirror_request())
            .allow_credentials(true)
    }
}
