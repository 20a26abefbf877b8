//! Router configuration for Web API.

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::get,
    Router,
};
use std::path::Path;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{services::ServeDir, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::ServerConfig;

use super::handlers::{
    create_category, create_tattoo, delete_tattoo, get_category, get_tattoo, list_categories,
    list_tattoos, update_tattoo, AppState,
};
use super::middleware::{create_cors_layer, user_extractor, JwtState};
use super::openapi::ApiDoc;

/// Create the record routes, relative to their mount point.
///
/// `/category` is registered before `/:id` so the literal segment wins.
pub fn create_tattoo_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_tattoos).post(create_tattoo))
        .route("/category", get(list_categories).post(create_category))
        .route("/category/:id", get(get_category))
        .route("/:id", get(get_tattoo).put(update_tattoo).delete(delete_tattoo))
}

/// Create the main API router.
pub fn create_router(
    app_state: Arc<AppState>,
    jwt_state: Arc<JwtState>,
    server_config: &ServerConfig,
) -> Router {
    // Clone jwt_state for the middleware closure
    let jwt_state_for_middleware = jwt_state.clone();

    Router::new()
        .nest("/records", create_tattoo_router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(&server_config.cors_origins))
                .layer(DefaultBodyLimit::max(server_config.max_body_size))
                .layer(middleware::from_fn(move |req, next| {
                    let state = jwt_state_for_middleware.clone();
                    user_extractor(state, req, next)
                })),
        )
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

/// Serve stored images under `/uploads`.
pub fn create_static_router(uploads_dir: &Path) -> Router {
    Router::new().nest_service("/uploads", ServeDir::new(uploads_dir))
}

/// Swagger UI at `/swagger-ui`, backed by `/api-docs/openapi.json`.
pub fn create_swagger_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
