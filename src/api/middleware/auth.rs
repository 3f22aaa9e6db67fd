//! Bearer token authentication middleware.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;

use crate::{error::AppError, state::AppState};

/// Identity of the authenticated caller, inserted into request extensions by
/// the auth middleware and read back by handlers via `Extension<CurrentUser>`.
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser(pub i64);

/// Authenticates requests using an access token from the Authorization header.
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <token>
/// ```
///
/// # Authentication Flow
///
/// 1. Extract token from `Authorization` header
/// 2. Verify signature, expiry, and token kind (access, not refresh)
/// 3. Insert [`CurrentUser`] into request extensions
/// 4. Continue to next middleware/handler
///
/// # Errors
///
/// Returns `401 Unauthorized` if:
/// - Authorization header is missing
/// - Token format is invalid
/// - Token is expired, has a bad signature, or is a refresh token
///
/// Adds `WWW-Authenticate: Bearer` header to 401 responses per RFC 6750.
pub async fn require_access(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let req = extract_bearer(req, |token, req| {
        let user_id = st.auth_service.verify_access(token)?;
        req.extensions_mut().insert(CurrentUser(user_id));
        Ok(())
    })
    .await?;

    Ok(next.run(req).await)
}

/// Same flow as [`require_access`], but accepts only refresh tokens.
///
/// Guards the token renewal endpoint: an access token presented there is
/// rejected, so a leaked short-lived token cannot mint replacements.
pub async fn require_refresh(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let req = extract_bearer(req, |token, req| {
        let user_id = st.auth_service.verify_refresh(token)?;
        req.extensions_mut().insert(CurrentUser(user_id));
        Ok(())
    })
    .await?;

    Ok(next.run(req).await)
}

async fn extract_bearer(
    req: Request,
    verify: impl FnOnce(&str, &mut Request) -> Result<(), AppError>,
) -> Result<Request, AppError> {
    let (mut parts, body) = req.into_parts();

    let AuthBearer(token) = AuthBearer::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            AppError::unauthorized(
                "Unauthorized",
                serde_json::json!({"reason": "Authorization header is missing or invalid"}),
            )
        })?;

    let mut req = Request::from_parts(parts, body);
    verify(&token, &mut req)?;

    Ok(req)
}
