//! Handler for the public short-code redirect endpoint.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its bookmarked URL.
///
/// # Endpoint
///
/// `GET /{short_url}` (public, no authentication)
///
/// # Response
///
/// `302 Found` with the target in the `Location` header. Each hit increments
/// the bookmark's visit counter atomically with the lookup.
///
/// # Errors
///
/// Returns 404 `Page not found` for an unknown code, indistinguishable from
/// any other unmatched path.
pub async fn redirect_handler(
    State(state): State<AppState>,
    Path(short_url): Path<String>,
) -> Result<Response, AppError> {
    let url = state.bookmark_service.resolve(&short_url).await?;

    Ok((StatusCode::FOUND, [(header::LOCATION, url)]).into_response())
}
