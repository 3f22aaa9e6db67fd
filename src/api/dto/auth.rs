//! DTOs for registration, login, and token endpoints.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Registration request body.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Account name: at least 3 characters, ASCII alphanumeric, no spaces.
    #[validate(
        length(min = 3, message = "Username should be more than 2 characters"),
        custom(function = validate_username)
    )]
    pub username: String,

    #[validate(
        length(min = 1, message = "Email must be passed"),
        email(message = "Email is not valid, please try again")
    )]
    pub email: String,

    #[validate(length(min = 3, message = "Password should be more than 2 characters"))]
    pub password: String,
}

/// Login request body.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Email must be passed"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password must be passed"))]
    pub password: String,
}

/// Public fields of a freshly registered account.
#[derive(Debug, Serialize)]
pub struct RegisteredUser {
    pub username: String,
    pub email: String,
}

/// Token pair and account identity returned on login.
#[derive(Debug, Serialize)]
pub struct LoginData {
    pub access_token: String,
    pub refresh_token: String,
    pub username: String,
    pub email: String,
}

/// Response body for `GET /api/v1/auth/me`.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub status: u16,
    pub username: String,
}

/// Response body for `GET /api/v1/auth/refresh`.
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub access_token: String,
}

fn validate_username(username: &str) -> Result<(), ValidationError> {
    if !username.chars().all(|c| c.is_ascii_alphanumeric()) {
        let mut err = ValidationError::new("alphanumeric");
        err.message = Some("Username must be alphanumeric with no spaces".into());
        return Err(err);
    }
    Ok(())
}
