//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::{AuthService, BookmarkService};

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub bookmark_service: Arc<BookmarkService>,
}
