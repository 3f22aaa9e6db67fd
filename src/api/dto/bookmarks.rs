//! DTOs for bookmark CRUD and stats endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::dto::pagination::PageMeta;
use crate::domain::entities::{Bookmark, BookmarkStats};

/// Request body shared by create (POST) and update (PUT/PATCH).
///
/// `body` is free text and may be omitted; URL well-formedness is checked in
/// the service, not here, so both paths report the same `Invalid url`.
#[derive(Debug, Deserialize)]
pub struct BookmarkPayload {
    pub url: String,
    #[serde(default)]
    pub body: String,
}

/// JSON representation of a bookmark.
#[derive(Debug, Serialize)]
pub struct BookmarkData {
    pub id: i64,
    pub url: String,
    pub short_url: String,
    pub visits: i64,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Bookmark> for BookmarkData {
    fn from(bookmark: Bookmark) -> Self {
        Self {
            id: bookmark.id,
            url: bookmark.url,
            short_url: bookmark.short_url,
            visits: bookmark.visits,
            body: bookmark.body,
            created_at: bookmark.created_at,
            updated_at: bookmark.updated_at,
        }
    }
}

/// Response body for the paginated list endpoint.
///
/// `data` is `null` (with no `meta` key) when the user has no bookmarks,
/// as an unambiguous "no records" indicator.
#[derive(Debug, Serialize)]
pub struct ListBookmarksResponse {
    pub status: u16,
    pub message: String,
    pub data: Option<Vec<BookmarkData>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<PageMeta>,
}

/// Per-bookmark entry in the stats response.
#[derive(Debug, Serialize)]
pub struct StatsEntry {
    pub id: i64,
    pub visits: i64,
    pub url: String,
    pub short_url: String,
}

impl From<BookmarkStats> for StatsEntry {
    fn from(stats: BookmarkStats) -> Self {
        Self {
            id: stats.id,
            visits: stats.visits,
            url: stats.url,
            short_url: stats.short_url,
        }
    }
}

/// Response body for the stats endpoint: every owned bookmark, unpaginated.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub data: Vec<StatsEntry>,
}
