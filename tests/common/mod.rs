#![allow(dead_code)]

use sqlx::PgPool;

pub async fn create_test_user(pool: &PgPool, username: &str, email: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO users (username, email, password_hash) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(username)
    .bind(email)
    .bind("$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHQ$aGFzaGhhc2hoYXNoaGFzaA")
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_test_bookmark(
    pool: &PgPool,
    user_id: i64,
    url: &str,
    short_url: &str,
) -> i64 {
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO bookmarks (body, url, short_url, user_id) VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind("a note")
    .bind(url)
    .bind(short_url)
    .bind(user_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn visits_of(pool: &PgPool, short_url: &str) -> i64 {
    sqlx::query_scalar::<_, i64>("SELECT visits FROM bookmarks WHERE short_url = $1")
        .bind(short_url)
        .fetch_one(pool)
        .await
        .unwrap()
}
