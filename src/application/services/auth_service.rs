//! Registration, credential verification, and token issuance.

use std::sync::Arc;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::entities::{NewUser, User};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;

/// JWT claims carried by both token kinds.
///
/// `refresh` distinguishes refresh tokens from access tokens: access tokens
/// authorize normal operations, refresh tokens authorize only renewal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Owning user id.
    pub sub: String,
    /// Expiry as a Unix timestamp; validated on decode.
    pub exp: usize,
    #[serde(default)]
    pub refresh: bool,
}

/// Access and refresh tokens issued on login.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Service for account registration and bearer-token authentication.
///
/// Passwords are stored only as argon2 salted hashes. Tokens are HS256 JWTs
/// bound to the user id; their lifetime comes from the service configuration.
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_ttl: u64,
    refresh_ttl: u64,
}

impl AuthService {
    /// Creates a new authentication service.
    ///
    /// # Arguments
    ///
    /// - `users` - user repository for DB operations
    /// - `jwt_secret` - HS256 signing secret
    /// - `access_ttl` / `refresh_ttl` - token lifetimes in seconds
    pub fn new(users: Arc<dyn UserRepository>, jwt_secret: &str, access_ttl: u64, refresh_ttl: u64) -> Self {
        Self {
            users,
            encoding_key: EncodingKey::from_secret(jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(jwt_secret.as_bytes()),
            access_ttl,
            refresh_ttl,
        }
    }

    /// Registers a new account.
    ///
    /// Field-level validation (username/password/email shape) happens at the
    /// DTO boundary before this is called; this method enforces uniqueness
    /// and stores a salted hash of the password.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the email or username already exists.
    /// Returns [`AppError::Internal`] on hashing or database errors.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<User, AppError> {
        if self.users.find_by_email(email).await?.is_some() {
            return Err(AppError::conflict("Email already exists", json!({})));
        }

        if self.users.find_by_username(username).await?.is_some() {
            return Err(AppError::conflict("Username already exists", json!({})));
        }

        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| {
                tracing::error!(error = %e, "Password hashing failed");
                AppError::internal("Something went wrong, please try again", json!({}))
            })?
            .to_string();

        self.users
            .create(NewUser {
                username: username.to_string(),
                email: email.to_string(),
                password_hash,
            })
            .await
    }

    /// Verifies credentials and issues an access/refresh token pair.
    ///
    /// # Errors
    ///
    /// Returns the same generic [`AppError::Unauthorized`] for an unknown
    /// email and for a password mismatch, so callers cannot enumerate
    /// registered accounts.
    pub async fn login(&self, email: &str, password: &str) -> Result<(User, TokenPair), AppError> {
        let Some(user) = self.users.find_by_email(email).await? else {
            return Err(wrong_credentials());
        };

        let parsed_hash = PasswordHash::new(&user.password_hash).map_err(|e| {
            tracing::error!(error = %e, "Stored password hash is unparseable");
            AppError::internal("Something went wrong, please try again", json!({}))
        })?;

        if Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_err()
        {
            return Err(wrong_credentials());
        }

        let tokens = TokenPair {
            access_token: self.issue_token(user.id, self.access_ttl, false)?,
            refresh_token: self.issue_token(user.id, self.refresh_ttl, true)?,
        };

        Ok((user, tokens))
    }

    /// Resolves an access-token identity to the stored account.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the bound user no longer exists.
    pub async fn me(&self, user_id: i64) -> Result<User, AppError> {
        self.users.find_by_id(user_id).await?.ok_or_else(|| {
            AppError::unauthorized(
                "Unauthorized",
                json!({ "reason": "Token does not resolve to a user" }),
            )
        })
    }

    /// Issues a fresh access token for a refresh-token identity.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if token encoding fails.
    pub fn refresh(&self, user_id: i64) -> Result<String, AppError> {
        self.issue_token(user_id, self.access_ttl, false)
    }

    /// Verifies an access token and returns the bound user id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token is malformed, expired,
    /// or is a refresh token.
    pub fn verify_access(&self, token: &str) -> Result<i64, AppError> {
        let claims = self.decode(token)?;

        if claims.refresh {
            return Err(AppError::unauthorized(
                "Unauthorized",
                json!({ "reason": "Refresh token cannot authorize this operation" }),
            ));
        }

        parse_subject(&claims)
    }

    /// Verifies a refresh token and returns the bound user id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token is malformed, expired,
    /// or is an access token.
    pub fn verify_refresh(&self, token: &str) -> Result<i64, AppError> {
        let claims = self.decode(token)?;

        if !claims.refresh {
            return Err(AppError::unauthorized(
                "Unauthorized",
                json!({ "reason": "A refresh token is required" }),
            ));
        }

        parse_subject(&claims)
    }

    fn issue_token(&self, user_id: i64, ttl: u64, refresh: bool) -> Result<String, AppError> {
        let claims = Claims {
            sub: user_id.to_string(),
            exp: (chrono::Utc::now() + chrono::Duration::seconds(ttl as i64)).timestamp() as usize,
            refresh,
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!(error = %e, "JWT encoding failed");
            AppError::internal("Something went wrong, please try again", json!({}))
        })
    }

    fn decode(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|_| {
                AppError::unauthorized(
                    "Unauthorized",
                    json!({ "reason": "Invalid or expired token" }),
                )
            })
    }
}

fn wrong_credentials() -> AppError {
    AppError::unauthorized("Wrong credentials", json!({}))
}

fn parse_subject(claims: &Claims) -> Result<i64, AppError> {
    claims.sub.parse().map_err(|_| {
        AppError::unauthorized("Unauthorized", json!({ "reason": "Malformed subject claim" }))
    })
}
