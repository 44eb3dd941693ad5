//! Router configuration for Web API.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, put},
    Json, Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::config::Config;

use super::handlers::{
    create_item, delete_item, download_file, list_items, update_item, AppState,
};
use super::middleware::create_cors_layer;
use super::openapi::ApiDoc;

/// Create the item API router.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/items", get(list_items).post(create_item))
        .route("/items/:id", put(update_item).delete(delete_item))
        .route("/files/:id", get(download_file))
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}

/// Serve the uploads directory read-only under `public_path`.
pub fn create_static_router(uploads_path: &str, public_path: &str) -> Router {
    Router::new().nest_service(public_path, ServeDir::new(uploads_path))
}

/// Serve the OpenAPI document as JSON.
pub fn create_openapi_router() -> Router {
    Router::new().route(
        "/api-docs/openapi.json",
        get(|| async { Json(ApiDoc::openapi()) }),
    )
}

/// Build the complete application with all routes and layers applied.
pub fn create_app(app_state: Arc<AppState>, config: &Config) -> Router {
    let body_limit = match config.web.body_limit_bytes() {
        Some(limit) => DefaultBodyLimit::max(limit),
        None => DefaultBodyLimit::disable(),
    };

    let uploads_path = app_state.storage.root().to_string_lossy().into_owned();

    create_router(app_state)
        .merge(create_health_router())
        .merge(create_openapi_router())
        .merge(create_static_router(
            &uploads_path,
            &config.storage.public_path,
        ))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(&config.web.cors_origins))
                .layer(body_limit),
        )
        .layer(CompressionLayer::new())
}
