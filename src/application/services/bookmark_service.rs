//! Bookmark CRUD, stats aggregation, short-code assignment, and redirect
//! resolution.

use std::sync::Arc;

use serde_json::json;
use url::Url;

use crate::domain::entities::{Bookmark, BookmarkStats, NewBookmark};
use crate::domain::repositories::{BookmarkRepository, SHORT_URL_CONSTRAINT, URL_CONSTRAINT};
use crate::error::AppError;
use crate::utils::code_generator::generate_code;
use crate::utils::db_error::is_conflict_on;

/// Upper bound on short-code generation attempts per create.
///
/// The code space holds 62^3 codes; once the table approaches that size,
/// collisions dominate and the create fails with `CapacityExhausted` instead
/// of looping forever.
const MAX_CODE_ATTEMPTS: usize = 20;

/// Service for bookmarks owned by authenticated users, plus the public
/// redirect resolution path.
pub struct BookmarkService {
    bookmarks: Arc<dyn BookmarkRepository>,
}

impl BookmarkService {
    /// Creates a new bookmark service.
    pub fn new(bookmarks: Arc<dyn BookmarkRepository>) -> Self {
        Self { bookmarks }
    }

    /// Creates a bookmark with a freshly assigned short code.
    ///
    /// # Short-code assignment
    ///
    /// Draws a random 3-character code, checks for an existing holder, and
    /// inserts. The pre-check leaves a race window, so an insert that still
    /// hits the `short_url` unique index is retried with a new code. Both
    /// paths share the [`MAX_CODE_ATTEMPTS`] bound.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `url` is not a well-formed
    /// http(s) URL, [`AppError::Conflict`] if the URL is already bookmarked
    /// by any user, and [`AppError::CapacityExhausted`] when no free code
    /// could be found within the retry bound.
    pub async fn create(&self, user_id: i64, url: &str, body: &str) -> Result<Bookmark, AppError> {
        validate_url(url)?;

        if self.bookmarks.find_by_url(url).await?.is_some() {
            return Err(url_already_saved());
        }

        for _ in 0..MAX_CODE_ATTEMPTS {
            let code = generate_code();

            if self.bookmarks.short_url_exists(&code).await? {
                continue;
            }

            let new_bookmark = NewBookmark {
                body: body.to_string(),
                url: url.to_string(),
                short_url: code,
                user_id,
            };

            match self.bookmarks.create(new_bookmark).await {
                Ok(bookmark) => return Ok(bookmark),
                // Lost the race for this code; draw another.
                Err(e) if is_conflict_on(&e, SHORT_URL_CONSTRAINT) => continue,
                // Lost the race for the URL itself.
                Err(e) if is_conflict_on(&e, URL_CONSTRAINT) => return Err(url_already_saved()),
                Err(e) => return Err(e),
            }
        }

        Err(AppError::capacity_exhausted(
            "Failed to allocate a unique short code",
            json!({ "attempts": MAX_CODE_ATTEMPTS }),
        ))
    }

    /// Lists bookmarks owned by `user_id` with the total count for
    /// pagination metadata.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn list(
        &self,
        user_id: i64,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Bookmark>, i64), AppError> {
        let total = self.bookmarks.count_for_user(user_id).await?;
        let items = self.bookmarks.list_for_user(user_id, offset, limit).await?;
        Ok((items, total))
    }

    /// Retrieves one bookmark owned by `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no bookmark matches `(id, user_id)`;
    /// a foreign user's bookmark id is indistinguishable from a missing one.
    pub async fn get(&self, id: i64, user_id: i64) -> Result<Bookmark, AppError> {
        self.bookmarks
            .find_by_id_and_user(id, user_id)
            .await?
            .ok_or_else(bookmark_not_found)
    }

    /// Overwrites `url` and `body` of a bookmark owned by `user_id`.
    ///
    /// The URL's global uniqueness is not re-checked here; the unique index
    /// remains the backstop and surfaces a collision as a conflict.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for a malformed URL and
    /// [`AppError::NotFound`] under the same condition as [`Self::get`].
    pub async fn update(
        &self,
        id: i64,
        user_id: i64,
        url: &str,
        body: &str,
    ) -> Result<Bookmark, AppError> {
        validate_url(url)?;

        self.bookmarks
            .update(id, user_id, url, body)
            .await?
            .ok_or_else(bookmark_not_found)
    }

    /// Permanently deletes a bookmark owned by `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] under the same condition as [`Self::get`].
    pub async fn delete(&self, id: i64, user_id: i64) -> Result<(), AppError> {
        if !self.bookmarks.delete(id, user_id).await? {
            return Err(bookmark_not_found());
        }
        Ok(())
    }

    /// Visit statistics for every bookmark owned by `user_id`, unpaginated.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn stats(&self, user_id: i64) -> Result<Vec<BookmarkStats>, AppError> {
        self.bookmarks.stats_for_user(user_id).await
    }

    /// Resolves a short code to its target URL, counting the visit.
    ///
    /// Public and unauthenticated: anyone with a code may redirect through
    /// it, and each successful resolution increments the counter by exactly
    /// one.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no bookmark holds the code.
    pub async fn resolve(&self, short_url: &str) -> Result<String, AppError> {
        self.bookmarks
            .resolve_and_increment(short_url)
            .await?
            .ok_or_else(|| AppError::not_found("Page not found", json!({})))
    }
}

/// Requires a parseable absolute http(s) URL with a host.
fn validate_url(raw: &str) -> Result<(), AppError> {
    let parsed = Url::parse(raw)
        .map_err(|_| AppError::bad_request("Invalid url", json!({ "url": raw })))?;

    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return Err(AppError::bad_request("Invalid url", json!({ "url": raw })));
    }

    Ok(())
}

fn url_already_saved() -> AppError {
    AppError::conflict("The URL has previously been saved", json!({}))
}

fn bookmark_not_found() -> AppError {
    AppError::not_found("Bookmark not found", json!({}))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockBookmarkRepository;
    use chrono::Utc;

    fn test_bookmark(id: i64, url: &str, short_url: &str, user_id: i64) -> Bookmark {
        Bookmark {
            id,
            body: "a note".to_string(),
            url: url.to_string(),
            short_url: short_url.to_string(),
            visits: 0,
            user_id,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn service(repo: MockBookmarkRepository) -> BookmarkService {
        BookmarkService::new(Arc::new(repo))
    }

    #[test]
    fn test_validate_url_accepts_http_and_https() {
        assert!(validate_url("https://example.com/path?q=1").is_ok());
        assert!(validate_url("http://example.com").is_ok());
    }

    #[test]
    fn test_validate_url_rejects_malformed_input() {
        assert!(validate_url("not-a-url").is_err());
        assert!(validate_url("ftp://example.com").is_err());
        assert!(validate_url("https://").is_err());
        assert!(validate_url("").is_err());
    }

    #[tokio::test]
    async fn test_create_invalid_url_touches_no_storage() {
        let mut repo = MockBookmarkRepository::new();
        repo.expect_find_by_url().times(0);
        repo.expect_create().times(0);

        let result = service(repo).create(1, "not-a-url", "note").await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_create_duplicate_url_is_conflict() {
        let mut repo = MockBookmarkRepository::new();
        let existing = test_bookmark(5, "https://example.com/", "abc", 2);
        repo.expect_find_by_url()
            .returning(move |_| Ok(Some(existing.clone())));
        repo.expect_create().times(0);

        let result = service(repo).create(1, "https://example.com/", "note").await;

        let err = result.unwrap_err();
        assert!(matches!(err, AppError::Conflict { .. }));
        assert_eq!(err.to_string(), "The URL has previously been saved");
    }

    #[tokio::test]
    async fn test_create_assigns_three_char_code() {
        let mut repo = MockBookmarkRepository::new();
        repo.expect_find_by_url().returning(|_| Ok(None));
        repo.expect_short_url_exists().returning(|_| Ok(false));
        repo.expect_create()
            .withf(|new_bookmark| {
                new_bookmark.short_url.len() == 3
                    && new_bookmark.short_url.chars().all(|c| c.is_ascii_alphanumeric())
            })
            .times(1)
            .returning(|new_bookmark| {
                let mut bookmark = test_bookmark(1, &new_bookmark.url, "", new_bookmark.user_id);
                bookmark.short_url = new_bookmark.short_url;
                Ok(bookmark)
            });

        let bookmark = service(repo)
            .create(1, "https://example.com/", "note")
            .await
            .unwrap();

        assert_eq!(bookmark.visits, 0);
        assert_eq!(bookmark.short_url.len(), 3);
    }

    #[tokio::test]
    async fn test_create_retries_on_existing_code() {
        let mut repo = MockBookmarkRepository::new();
        repo.expect_find_by_url().returning(|_| Ok(None));

        // First draw collides, second is free.
        let mut draws = 0;
        repo.expect_short_url_exists().times(2).returning(move |_| {
            draws += 1;
            Ok(draws == 1)
        });

        repo.expect_create().times(1).returning(|new_bookmark| {
            let mut bookmark = test_bookmark(1, &new_bookmark.url, "", new_bookmark.user_id);
            bookmark.short_url = new_bookmark.short_url;
            Ok(bookmark)
        });

        let result = service(repo).create(1, "https://example.com/", "note").await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_create_retries_when_insert_loses_code_race() {
        let mut repo = MockBookmarkRepository::new();
        repo.expect_find_by_url().returning(|_| Ok(None));
        repo.expect_short_url_exists().returning(|_| Ok(false));

        // Pre-check said the code was free, but another request committed it
        // first; the insert conflict must trigger a fresh draw.
        let mut inserts = 0;
        repo.expect_create().times(2).returning(move |new_bookmark| {
            inserts += 1;
            if inserts == 1 {
                Err(AppError::conflict(
                    "Unique constraint violation",
                    json!({ "constraint": SHORT_URL_CONSTRAINT }),
                ))
            } else {
                let mut bookmark = test_bookmark(1, &new_bookmark.url, "", new_bookmark.user_id);
                bookmark.short_url = new_bookmark.short_url;
                Ok(bookmark)
            }
        });

        let result = service(repo).create(1, "https://example.com/", "note").await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_create_url_race_is_conflict() {
        let mut repo = MockBookmarkRepository::new();
        repo.expect_find_by_url().returning(|_| Ok(None));
        repo.expect_short_url_exists().returning(|_| Ok(false));
        repo.expect_create().times(1).returning(|_| {
            Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": URL_CONSTRAINT }),
            ))
        });

        let err = service(repo)
            .create(1, "https://example.com/", "note")
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "The URL has previously been saved");
    }

    #[tokio::test]
    async fn test_create_bounded_retries_then_capacity_exhausted() {
        let mut repo = MockBookmarkRepository::new();
        repo.expect_find_by_url().returning(|_| Ok(None));
        // Every draw collides; the loop must terminate at the bound.
        repo.expect_short_url_exists()
            .times(MAX_CODE_ATTEMPTS)
            .returning(|_| Ok(true));
        repo.expect_create().times(0);

        let result = service(repo).create(1, "https://example.com/", "note").await;

        assert!(matches!(
            result.unwrap_err(),
            AppError::CapacityExhausted { .. }
        ));
    }

    #[tokio::test]
    async fn test_list_returns_items_and_total() {
        let mut repo = MockBookmarkRepository::new();
        repo.expect_count_for_user().returning(|_| Ok(12));
        repo.expect_list_for_user()
            .withf(|user_id, offset, limit| *user_id == 1 && *offset == 5 && *limit == 5)
            .returning(|_, _, _| {
                Ok(vec![test_bookmark(6, "https://example.com/6", "aa6", 1)])
            });

        let (items, total) = service(repo).list(1, 5, 5).await.unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(total, 12);
    }

    #[tokio::test]
    async fn test_get_unowned_id_is_not_found() {
        let mut repo = MockBookmarkRepository::new();
        repo.expect_find_by_id_and_user()
            .withf(|id, user_id| *id == 5 && *user_id == 1)
            .returning(|_, _| Ok(None));

        let result = service(repo).get(5, 1).await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_update_invalid_url_is_rejected() {
        let mut repo = MockBookmarkRepository::new();
        repo.expect_update().times(0);

        let result = service(repo).update(5, 1, "not-a-url", "note").await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_update_unowned_id_is_not_found() {
        let mut repo = MockBookmarkRepository::new();
        repo.expect_update().returning(|_, _, _, _| Ok(None));

        let result = service(repo)
            .update(5, 1, "https://example.com/", "note")
            .await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_unowned_id_is_not_found() {
        let mut repo = MockBookmarkRepository::new();
        repo.expect_delete().returning(|_, _| Ok(false));

        let result = service(repo).delete(5, 1).await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_success() {
        let mut repo = MockBookmarkRepository::new();
        repo.expect_delete()
            .withf(|id, user_id| *id == 5 && *user_id == 1)
            .returning(|_, _| Ok(true));

        assert!(service(repo).delete(5, 1).await.is_ok());
    }

    #[tokio::test]
    async fn test_resolve_unknown_code_is_not_found() {
        let mut repo = MockBookmarkRepository::new();
        repo.expect_resolve_and_increment().returning(|_| Ok(None));

        let result = service(repo).resolve("zzz").await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_resolve_returns_target_url() {
        let mut repo = MockBookmarkRepository::new();
        repo.expect_resolve_and_increment()
            .withf(|code| code == "aB3")
            .times(1)
            .returning(|_| Ok(Some("https://example.com/".to_string())));

        let url = service(repo).resolve("aB3").await.unwrap();

        assert_eq!(url, "https://example.com/");
    }
}
