//! PostgreSQL repository implementations.

pub mod pg_bookmark_repository;
pub mod pg_user_repository;

pub use pg_bookmark_repository::PgBookmarkRepository;
pub use pg_user_repository::PgUserRepository;
