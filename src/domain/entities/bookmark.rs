//! Bookmark entity mapping a stored URL to its short redirect code.

use chrono::{DateTime, Utc};

/// A bookmarked URL with its immutable short code and visit counter.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Bookmark {
    pub id: i64,
    pub body: String,
    pub url: String,
    pub short_url: String,
    pub visits: i64,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input data for creating a new bookmark.
///
/// The short code is assigned by the service before insert; `visits` starts
/// at 0 via the column default.
#[derive(Debug, Clone)]
pub struct NewBookmark {
    pub body: String,
    pub url: String,
    pub short_url: String,
    pub user_id: i64,
}

/// Per-bookmark visit statistics, unpaginated.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BookmarkStats {
    pub id: i64,
    pub url: String,
    pub short_url: String,
    pub visits: i64,
}
