//! Repository trait for bookmark data access.

use crate::domain::entities::{Bookmark, BookmarkStats, NewBookmark};
use crate::error::AppError;
use async_trait::async_trait;

/// Name of the unique index on `bookmarks.short_url`.
///
/// The create path inspects conflict errors for this constraint to decide
/// whether a failed insert should retry with a fresh short code.
pub const SHORT_URL_CONSTRAINT: &str = "bookmarks_short_url_key";

/// Name of the unique index on `bookmarks.url`.
pub const URL_CONSTRAINT: &str = "bookmarks_url_key";

/// Repository interface for bookmark storage.
///
/// All read and mutate operations that act on a single bookmark are scoped
/// by `(id, user_id)` in one lookup, so a foreign id is indistinguishable
/// from a missing one.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgBookmarkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookmarkRepository: Send + Sync {
    /// Inserts a new bookmark.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] on a unique violation; the violated
    /// constraint name is carried in the error details so callers can
    /// distinguish a short-code collision ([`SHORT_URL_CONSTRAINT`]) from a
    /// duplicate URL ([`URL_CONSTRAINT`]).
    /// Returns [`AppError::Internal`] on other database errors.
    async fn create(&self, new_bookmark: NewBookmark) -> Result<Bookmark, AppError>;

    /// Finds a bookmark owned by `user_id` with the given `id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id_and_user(
        &self,
        id: i64,
        user_id: i64,
    ) -> Result<Option<Bookmark>, AppError>;

    /// Finds a bookmark by its URL, across all users.
    ///
    /// Used to enforce system-wide URL uniqueness before insert.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_url(&self, url: &str) -> Result<Option<Bookmark>, AppError>;

    /// Returns whether any bookmark currently holds the given short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn short_url_exists(&self, short_url: &str) -> Result<bool, AppError>;

    /// Lists bookmarks owned by `user_id`, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_for_user(
        &self,
        user_id: i64,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Bookmark>, AppError>;

    /// Counts bookmarks owned by `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count_for_user(&self, user_id: i64) -> Result<i64, AppError>;

    /// Overwrites `url` and `body` and bumps `updated_at` for a bookmark
    /// owned by `user_id`.
    ///
    /// Returns `Ok(None)` if no bookmark matches `(id, user_id)`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the new URL violates the unique
    /// index. Returns [`AppError::Internal`] on other database errors.
    async fn update(
        &self,
        id: i64,
        user_id: i64,
        url: &str,
        body: &str,
    ) -> Result<Option<Bookmark>, AppError>;

    /// Permanently removes a bookmark owned by `user_id`.
    ///
    /// Returns `Ok(true)` if a row was deleted, `Ok(false)` otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, id: i64, user_id: i64) -> Result<bool, AppError>;

    /// Visit statistics for every bookmark owned by `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn stats_for_user(&self, user_id: i64) -> Result<Vec<BookmarkStats>, AppError>;

    /// Atomically increments the visit counter for the bookmark holding
    /// `short_url` and returns its target URL.
    ///
    /// The increment and read happen in a single statement so concurrent
    /// redirects never lose updates.
    ///
    /// Returns `Ok(None)` if no bookmark holds that code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn resolve_and_increment(&self, short_url: &str) -> Result<Option<String>, AppError>;
}
