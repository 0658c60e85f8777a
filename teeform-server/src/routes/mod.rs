use axum::{
    Json, Router,
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, post},
};
use serde_json::json;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::{AppState, handlers};

/// Headroom on top of the configured upload ceiling so the non-file
/// multipart fields never trip the transport-level body limit; the
/// ingestion service enforces the exact ceiling.
const BODY_LIMIT_SLACK: usize = 64 * 1024;

/// Build the complete application: routes, CORS, tracing, body limit.
pub fn create_app(state: AppState) -> Router {
    let cors = cors_layer(&state);
    let body_limit = state.config.max_upload_bytes as usize + BODY_LIMIT_SLACK;

    Router::new()
        .route("/health", get(health_handler))
        .route("/images", get(handlers::gallery::list_images_handler))
        .route("/upload", post(handlers::upload::upload_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(state: &AppState) -> CorsLayer {
    let origins: Vec<HeaderValue> = state
        .config
        .cors_allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    if origins.is_empty() {
        CorsLayer::permissive()
    } else {
        CorsLayer::new().allow_origin(AllowOrigin::list(origins))
    }
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}
