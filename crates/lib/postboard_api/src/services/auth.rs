//! Authentication service — signup/login flows delegating to `postboard_core::auth`.

use postboard_core::auth::{password, queries};
use sqlx::PgPool;
use tracing::{debug, info};

use crate::error::{AppError, AppResult};
use crate::models::{CredentialsRequest, TokenResponse};

// Re-export from postboard_core so the API crate has a single auth entry point.
pub use postboard_core::auth::jwt::{
    generate_access_token, resolve_jwt_secret, verify_access_token,
};
pub use postboard_core::models::auth::TokenClaims;

/// Validated signup/login input.
///
/// The email is normalized (trimmed, lowercased) so that lookups and the
/// uniqueness constraint are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl TryFrom<CredentialsRequest> for Credentials {
    type Error = AppError;

    fn try_from(req: CredentialsRequest) -> AppResult<Self> {
        let email = req.email.as_deref().map(normalize_email).unwrap_or_default();
        let password = req.password.unwrap_or_default();
        if email.is_empty() || password.is_empty() {
            return Err(AppError::Validation(
                "email and password required".into(),
            ));
        }
        if email.contains('\0') || password.contains('\0') {
            return Err(AppError::Validation(
                "email and password must not contain NUL characters".into(),
            ));
        }
        Ok(Self { email, password })
    }
}

/// Trim and lowercase an email address.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

// bcrypt is CPU-bound; keep it off the async worker threads.

async fn hash_password(password: String) -> AppResult<String> {
    Ok(tokio::task::spawn_blocking(move || password::hash_password(&password)).await??)
}

async fn verify_password(password: String, hash: String) -> AppResult<bool> {
    Ok(tokio::task::spawn_blocking(move || password::verify_password(&password, &hash)).await??)
}

async fn verify_dummy(password: String) -> AppResult<()> {
    tokio::task::spawn_blocking(move || password::verify_dummy(&password)).await?;
    Ok(())
}

/// Register a new user and issue a token for it.
pub async fn signup(
    pool: &PgPool,
    credentials: Credentials,
    jwt_secret: &[u8],
) -> AppResult<TokenResponse> {
    let Credentials { email, password } = credentials;
    let pw_hash = hash_password(password).await?;

    let user = queries::create_user(pool, &email, &pw_hash).await?;
    info!(user_id = user.id, email = %user.email, "user signed up");

    let token = generate_access_token(user.id, &user.email, jwt_secret)?;
    Ok(TokenResponse { token })
}

/// Authenticate with email + password.
///
/// Unknown email and wrong password return the same error.
pub async fn login(
    pool: &PgPool,
    credentials: Credentials,
    jwt_secret: &[u8],
) -> AppResult<TokenResponse> {
    let Credentials { email, password } = credentials;

    let Some(found) = queries::find_user_by_email(pool, &email).await? else {
        verify_dummy(password).await?;
        debug!(%email, "login rejected: unknown email");
        return Err(AppError::Unauthorized("Invalid credentials".into()));
    };

    if !verify_password(password, found.password_hash).await? {
        debug!(%email, "login rejected: wrong password");
        return Err(AppError::Unauthorized("Invalid credentials".into()));
    }

    let token = generate_access_token(found.user.id, &found.user.email, jwt_secret)?;
    Ok(TokenResponse { token })
}
