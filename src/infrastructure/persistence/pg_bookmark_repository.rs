//! PostgreSQL implementation of the bookmark repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Bookmark, BookmarkStats, NewBookmark};
use crate::domain::repositories::BookmarkRepository;
use crate::error::AppError;

const BOOKMARK_COLUMNS: &str = "id, body, url, short_url, visits, user_id, created_at, updated_at";

/// PostgreSQL repository for bookmark storage and retrieval.
///
/// Ownership-scoped lookups filter by `(id, user_id)` in a single query, and
/// the visit counter is incremented in a single `UPDATE ... RETURNING`
/// statement so concurrent redirects are serialized by the database.
pub struct PgBookmarkRepository {
    pool: Arc<PgPool>,
}

impl PgBookmarkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookmarkRepository for PgBookmarkRepository {
    async fn create(&self, new_bookmark: NewBookmark) -> Result<Bookmark, AppError> {
        let bookmark = sqlx::query_as::<_, Bookmark>(&format!(
            r#"
            INSERT INTO bookmarks (body, url, short_url, user_id)
            VALUES ($1, $2, $3, $4)
            RETURNING {BOOKMARK_COLUMNS}
            "#,
        ))
        .bind(&new_bookmark.body)
        .bind(&new_bookmark.url)
        .bind(&new_bookmark.short_url)
        .bind(new_bookmark.user_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(bookmark)
    }

    async fn find_by_id_and_user(
        &self,
        id: i64,
        user_id: i64,
    ) -> Result<Option<Bookmark>, AppError> {
        let bookmark = sqlx::query_as::<_, Bookmark>(&format!(
            r#"
            SELECT {BOOKMARK_COLUMNS}
            FROM bookmarks
            WHERE id = $1 AND user_id = $2
            "#,
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(bookmark)
    }

    async fn find_by_url(&self, url: &str) -> Result<Option<Bookmark>, AppError> {
        let bookmark = sqlx::query_as::<_, Bookmark>(&format!(
            r#"
            SELECT {BOOKMARK_COLUMNS}
            FROM bookmarks
            WHERE url = $1
            "#,
        ))
        .bind(url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(bookmark)
    }

    async fn short_url_exists(&self, short_url: &str) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM bookmarks WHERE short_url = $1)",
        )
        .bind(short_url)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(exists)
    }

    async fn list_for_user(
        &self,
        user_id: i64,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Bookmark>, AppError> {
        let bookmarks = sqlx::query_as::<_, Bookmark>(&format!(
            r#"
            SELECT {BOOKMARK_COLUMNS}
            FROM bookmarks
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2 OFFSET $3
            "#,
        ))
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(bookmarks)
    }

    async fn count_for_user(&self, user_id: i64) -> Result<i64, AppError> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM bookmarks WHERE user_id = $1")
                .bind(user_id)
                .fetch_one(self.pool.as_ref())
                .await?;

        Ok(count)
    }

    async fn update(
        &self,
        id: i64,
        user_id: i64,
        url: &str,
        body: &str,
    ) -> Result<Option<Bookmark>, AppError> {
        let bookmark = sqlx::query_as::<_, Bookmark>(&format!(
            r#"
            UPDATE bookmarks
            SET url = $3, body = $4, updated_at = now()
            WHERE id = $1 AND user_id = $2
            RETURNING {BOOKMARK_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(user_id)
        .bind(url)
        .bind(body)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(bookmark)
    }

    async fn delete(&self, id: i64, user_id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM bookmarks WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn stats_for_user(&self, user_id: i64) -> Result<Vec<BookmarkStats>, AppError> {
        let stats = sqlx::query_as::<_, BookmarkStats>(
            r#"
            SELECT id, url, short_url, visits
            FROM bookmarks
            WHERE user_id = $1
            ORDER BY id
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(stats)
    }

    async fn resolve_and_increment(&self, short_url: &str) -> Result<Option<String>, AppError> {
        // Single-statement increment-and-read; Postgres serializes writes to
        // the row, so N concurrent redirects yield exactly N visits.
        let url = sqlx::query_scalar::<_, String>(
            r#"
            UPDATE bookmarks
            SET visits = visits + 1
            WHERE short_url = $1
            RETURNING url
            "#,
        )
        .bind(short_url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(url)
    }
}
