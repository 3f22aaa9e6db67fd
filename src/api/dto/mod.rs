//! Request and response DTOs.

pub mod auth;
pub mod bookmarks;
pub mod pagination;

use serde::Serialize;

/// Standard success envelope: `{status, message, data}`.
///
/// `data` serializes as `null` when absent, which the list endpoint uses as
/// its explicit "no records" indicator.
#[derive(Debug, Serialize)]
pub struct ApiEnvelope<T> {
    pub status: u16,
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    pub fn new(status: u16, message: impl Into<String>, data: T) -> Self {
        Self {
            status,
            message: message.into(),
            data: Some(data),
        }
    }
}
