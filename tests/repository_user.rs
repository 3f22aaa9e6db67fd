mod common;

use sqlx::PgPool;
use std::sync::Arc;

use bookmarks::domain::entities::NewUser;
use bookmarks::domain::repositories::UserRepository;
use bookmarks::error::AppError;
use bookmarks::infrastructure::persistence::PgUserRepository;

fn new_user(username: &str, email: &str) -> NewUser {
    NewUser {
        username: username.to_string(),
        email: email.to_string(),
        password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHQ$aGFzaGhhc2g".to_string(),
    }
}

#[sqlx::test]
async fn test_create_user(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));

    let user = repo
        .create(new_user("alice", "alice@example.com"))
        .await
        .unwrap();

    assert_eq!(user.username, "alice");
    assert_eq!(user.email, "alice@example.com");
    assert!(user.password_hash.starts_with("$argon2id$"));
}

#[sqlx::test]
async fn test_duplicate_email_is_conflict(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));
    repo.create(new_user("alice", "taken@example.com"))
        .await
        .unwrap();

    let err = repo
        .create(new_user("bob", "taken@example.com"))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Conflict { .. }));
}

#[sqlx::test]
async fn test_duplicate_username_is_conflict(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));
    repo.create(new_user("alice", "alice@example.com"))
        .await
        .unwrap();

    let err = repo
        .create(new_user("alice", "other@example.com"))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Conflict { .. }));
}

#[sqlx::test]
async fn test_lookups(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));
    let created = repo
        .create(new_user("alice", "alice@example.com"))
        .await
        .unwrap();

    let by_email = repo.find_by_email("alice@example.com").await.unwrap();
    assert_eq!(by_email.unwrap().id, created.id);

    let by_username = repo.find_by_username("alice").await.unwrap();
    assert_eq!(by_username.unwrap().id, created.id);

    let by_id = repo.find_by_id(created.id).await.unwrap();
    assert_eq!(by_id.unwrap().username, "alice");

    assert!(repo.find_by_email("ghost@example.com").await.unwrap().is_none());
    assert!(repo.find_by_username("ghost").await.unwrap().is_none());
    assert!(repo.find_by_id(created.id + 1000).await.unwrap().is_none());
}
