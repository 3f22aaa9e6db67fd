//! API route configuration.
//!
//! All bookmark endpoints and the identity endpoints require Bearer token
//! authentication via [`crate::api::middleware::auth`].

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::api::handlers::{
    create_bookmark_handler, delete_bookmark_handler, get_bookmark_handler,
    list_bookmarks_handler, login_handler, me_handler, refresh_handler, register_handler,
    stats_handler, update_bookmark_handler,
};
use crate::api::middleware::auth;
use crate::state::AppState;

/// Account and token routes.
///
/// # Endpoints
///
/// - `POST /register`  - Create an account (public)
/// - `POST /login`     - Verify credentials, issue token pair (public)
/// - `GET  /me`        - Identity behind the presented access token
/// - `GET  /refresh`   - New access token for a refresh token
pub fn auth_routes(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/register", post(register_handler))
        .route("/login", post(login_handler));

    let access_protected = Router::new().route("/me", get(me_handler)).route_layer(
        middleware::from_fn_with_state(state.clone(), auth::require_access),
    );

    let refresh_protected = Router::new()
        .route("/refresh", get(refresh_handler))
        .route_layer(middleware::from_fn_with_state(
            state,
            auth::require_refresh,
        ));

    public.merge(access_protected).merge(refresh_protected)
}

/// Bookmark routes, all protected by access-token authentication.
///
/// # Endpoints
///
/// - `GET    /`       - List bookmarks (paginated)
/// - `POST   /`       - Bookmark a URL, assign a short code
/// - `GET    /stats`  - Visit statistics for every owned bookmark
/// - `GET    /{id}`   - Retrieve one bookmark
/// - `PUT    /{id}`   - Overwrite URL and note (also `PATCH`)
/// - `DELETE /{id}`   - Delete a bookmark
pub fn bookmark_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list_bookmarks_handler).post(create_bookmark_handler),
        )
        .route("/stats", get(stats_handler))
        .route(
            "/{id}",
            get(get_bookmark_handler)
                .put(update_bookmark_handler)
                .patch(update_bookmark_handler)
                .delete(delete_bookmark_handler),
        )
        .route_layer(middleware::from_fn_with_state(
            state,
            auth::require_access,
        ))
}
