//! Handlers for bookmark CRUD and stats endpoints.
//!
//! Every handler here runs behind the access-token middleware; the owning
//! user id arrives through [`CurrentUser`] and scopes all queries.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde_json::json;

use crate::api::dto::ApiEnvelope;
use crate::api::dto::bookmarks::{
    BookmarkData, BookmarkPayload, ListBookmarksResponse, StatsEntry, StatsResponse,
};
use crate::api::dto::pagination::{PageMeta, PaginationParams};
use crate::api::middleware::auth::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;

/// Bookmarks a URL and assigns it a short code.
///
/// # Endpoint
///
/// `POST /api/v1/bookmarks`
///
/// # Errors
///
/// Returns 400 for a malformed URL, 409 if the URL is already bookmarked,
/// and 503 if no free short code could be allocated.
pub async fn create_bookmark_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    Json(payload): Json<BookmarkPayload>,
) -> Result<(StatusCode, Json<ApiEnvelope<BookmarkData>>), AppError> {
    let bookmark = state
        .bookmark_service
        .create(user_id, &payload.url, &payload.body)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiEnvelope::new(201, "Bookmark created", BookmarkData::from(bookmark))),
    ))
}

/// Lists the caller's bookmarks, newest first, paginated.
///
/// # Endpoint
///
/// `GET /api/v1/bookmarks?page=1&per_page=5`
///
/// # Response
///
/// `data` is `null` and `meta` is omitted when the caller has no bookmarks
/// at all; otherwise `meta` carries the pagination cursor fields.
pub async fn list_bookmarks_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ListBookmarksResponse>, AppError> {
    let (offset, limit) = params
        .validate_and_get_offset_limit()
        .map_err(|message| AppError::bad_request(message, json!({})))?;

    let (bookmarks, total) = state.bookmark_service.list(user_id, offset, limit).await?;

    if total == 0 {
        return Ok(Json(ListBookmarksResponse {
            status: 200,
            message: "No url records yet".to_string(),
            data: None,
            meta: None,
        }));
    }

    Ok(Json(ListBookmarksResponse {
        status: 200,
        message: "Retrieve successful".to_string(),
        data: Some(bookmarks.into_iter().map(BookmarkData::from).collect()),
        meta: Some(PageMeta::new(params.page(), params.per_page(), total)),
    }))
}

/// Retrieves one bookmark owned by the caller.
///
/// # Endpoint
///
/// `GET /api/v1/bookmarks/{id}`
///
/// # Errors
///
/// Returns 404 if the id does not exist or belongs to another user.
pub async fn get_bookmark_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> Result<Json<ApiEnvelope<BookmarkData>>, AppError> {
    let bookmark = state.bookmark_service.get(id, user_id).await?;

    Ok(Json(ApiEnvelope::new(
        200,
        "Retrieve successful",
        BookmarkData::from(bookmark),
    )))
}

/// Overwrites the URL and note of a bookmark owned by the caller.
///
/// # Endpoint
///
/// `PUT /api/v1/bookmarks/{id}` (also accepts `PATCH`)
///
/// The short code and visit count are untouched by updates.
pub async fn update_bookmark_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(payload): Json<BookmarkPayload>,
) -> Result<Json<ApiEnvelope<BookmarkData>>, AppError> {
    let bookmark = state
        .bookmark_service
        .update(id, user_id, &payload.url, &payload.body)
        .await?;

    Ok(Json(ApiEnvelope::new(
        200,
        "Update successful",
        BookmarkData::from(bookmark),
    )))
}

/// Permanently deletes a bookmark owned by the caller.
///
/// # Endpoint
///
/// `DELETE /api/v1/bookmarks/{id}`
///
/// Returns `204 No Content` with an empty body on success.
pub async fn delete_bookmark_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.bookmark_service.delete(id, user_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Visit statistics for every bookmark owned by the caller, unpaginated.
///
/// # Endpoint
///
/// `GET /api/v1/bookmarks/stats`
pub async fn stats_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
) -> Result<Json<StatsResponse>, AppError> {
    let stats = state.bookmark_service.stats(user_id).await?;

    Ok(Json(StatsResponse {
        data: stats.into_iter().map(StatsEntry::from).collect(),
    }))
}
