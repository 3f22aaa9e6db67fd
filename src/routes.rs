//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET /{short_url}`        - Short-code redirect (public)
//! - `/api/v1/auth/*`          - Registration, login, identity, refresh
//! - `/api/v1/bookmarks/*`     - Bookmark CRUD and stats (access token required)
//!
//! Everything else falls through to a JSON 404, the same body an unknown
//! short code produces.
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Authentication** - Bearer access/refresh tokens on protected routes
//! - **Path normalization** - Trailing slash handling

use axum::routing::get;
use axum::{Router, response::IntoResponse};
use serde_json::json;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

use crate::api;
use crate::api::handlers::redirect_handler;
use crate::api::middleware::tracing;
use crate::error::AppError;
use crate::state::AppState;

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}

pub(crate) fn router(state: AppState) -> Router {
    Router::new()
        .route("/{short_url}", get(redirect_handler))
        .nest("/api/v1/auth", api::routes::auth_routes(state.clone()))
        .nest(
            "/api/v1/bookmarks",
            api::routes::bookmark_routes(state.clone()),
        )
        .fallback(fallback_handler)
        .with_state(state)
        .layer(tracing::layer())
}

/// Serves the JSON 404 for any path no route matched.
async fn fallback_handler() -> axum::response::Response {
    AppError::not_found("Page not found", json!({})).into_response()
}
