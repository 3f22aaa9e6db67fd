//! Core business entities.

pub mod bookmark;
pub mod user;

pub use bookmark::{Bookmark, BookmarkStats, NewBookmark};
pub use user::{NewUser, User};
