//! Business logic services.

pub mod auth_service;
pub mod bookmark_service;

pub use auth_service::AuthService;
pub use bookmark_service::BookmarkService;
