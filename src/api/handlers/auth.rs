//! Handlers for registration, login, and token endpoints.

use axum::{Extension, Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::ApiEnvelope;
use crate::api::dto::auth::{
    LoginData, LoginRequest, MeResponse, RefreshResponse, RegisterRequest, RegisteredUser,
};
use crate::api::middleware::auth::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a new account.
///
/// # Endpoint
///
/// `POST /api/v1/auth/register`
///
/// # Request Body
///
/// ```json
/// {
///   "username": "alice",
///   "email": "alice@example.com",
///   "password": "secret"
/// }
/// ```
///
/// # Response
///
/// `201 Created` with the public account fields; the password hash never
/// leaves the service.
///
/// # Errors
///
/// Returns 400 Bad Request if validation fails and 409 Conflict if the email
/// or username is already taken.
pub async fn register_handler(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiEnvelope<RegisteredUser>>), AppError> {
    payload.validate()?;

    let user = state
        .auth_service
        .register(&payload.username, &payload.email, &payload.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiEnvelope::new(
            201,
            "User created",
            RegisteredUser {
                username: user.username,
                email: user.email,
            },
        )),
    ))
}

/// Verifies credentials and issues an access/refresh token pair.
///
/// # Endpoint
///
/// `POST /api/v1/auth/login`
///
/// # Errors
///
/// Returns the same 401 `Wrong credentials` for an unknown email and for a
/// password mismatch.
pub async fn login_handler(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<ApiEnvelope<LoginData>>, AppError> {
    payload.validate()?;

    let (user, tokens) = state
        .auth_service
        .login(&payload.email, &payload.password)
        .await?;

    Ok(Json(ApiEnvelope::new(
        200,
        "Login successful",
        LoginData {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            username: user.username,
            email: user.email,
        },
    )))
}

/// Returns the identity bound to the presented access token.
///
/// # Endpoint
///
/// `GET /api/v1/auth/me` (access token required)
pub async fn me_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
) -> Result<Json<MeResponse>, AppError> {
    let user = state.auth_service.me(user_id).await?;

    Ok(Json(MeResponse {
        status: 200,
        username: user.username,
    }))
}

/// Issues a fresh access token for the presented refresh token.
///
/// # Endpoint
///
/// `GET /api/v1/auth/refresh` (refresh token required)
pub async fn refresh_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
) -> Result<Json<RefreshResponse>, AppError> {
    let access_token = state.auth_service.refresh(user_id)?;

    Ok(Json(RefreshResponse { access_token }))
}
