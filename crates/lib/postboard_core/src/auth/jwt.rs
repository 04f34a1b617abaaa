//! JWT token generation and verification.

use std::path::PathBuf;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rand::distr::Alphanumeric;
use rand::{Rng, rng};
use tracing::{info, warn};

use super::AuthError;
use crate::models::auth::TokenClaims;

/// Access token lifetime: 24 hours.
pub const ACCESS_TOKEN_EXPIRY_SECS: i64 = 24 * 60 * 60;

/// Generate a signed JWT access token (HS256, 24 h expiry).
pub fn generate_access_token(
    user_id: i32,
    email: &str,
    secret: &[u8],
) -> Result<String, AuthError> {
    generate_access_token_at(user_id, email, secret, Utc::now())
}

/// Generate an access token as if issued at `issued_at`.
pub fn generate_access_token_at(
    user_id: i32,
    email: &str,
    secret: &[u8],
    issued_at: DateTime<Utc>,
) -> Result<String, AuthError> {
    let claims = TokenClaims {
        sub: user_id.to_string(),
        email: email.to_string(),
        exp: (issued_at + Duration::seconds(ACCESS_TOKEN_EXPIRY_SECS)).timestamp(),
        iat: issued_at.timestamp(),
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret),
    )
    .map_err(|e| AuthError::Internal(format!("jwt encode: {e}")))
}

/// Verify a JWT access token, returning the claims on success.
pub fn verify_access_token(token: &str, secret: &[u8]) -> Option<TokenClaims> {
    verify_access_token_at(token, secret, Utc::now())
}

/// Verify a JWT access token against the clock value `now`.
///
/// A token is rejected from the second its `exp` is reached; no leeway.
pub fn verify_access_token_at(
    token: &str,
    secret: &[u8],
    now: DateTime<Utc>,
) -> Option<TokenClaims> {
    let key = DecodingKey::from_secret(secret);
    // Expiry is checked below against `now`; `exp` must still be present.
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false;
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp", "sub"]);

    let claims = decode::<TokenClaims>(token, &key, &validation)
        .ok()
        .map(|data| data.claims)?;

    (now.timestamp() < claims.exp).then_some(claims)
}

/// Resolve the JWT secret: env var `JWT_SECRET` → persisted file → generated.
pub fn resolve_jwt_secret() -> String {
    if let Ok(secret) = std::env::var("JWT_SECRET")
        && !secret.is_empty()
    {
        return secret;
    }
    let secret_path = jwt_secret_path();
    if let Ok(existing) = std::fs::read_to_string(&secret_path) {
        let trimmed = existing.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }
    let secret: String = rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect();
    if let Some(parent) = secret_path.parent()
        && let Err(e) = std::fs::create_dir_all(parent)
    {
        warn!(path = %parent.display(), "cannot create JWT secret directory: {e}");
    }
    match std::fs::write(&secret_path, &secret) {
        Ok(()) => info!(path = %secret_path.display(), "generated new JWT secret"),
        Err(e) => warn!(
            path = %secret_path.display(),
            "generated JWT secret could not be persisted, tokens will not survive a restart: {e}"
        ),
    }
    secret
}

/// Path to the persisted JWT secret file.
fn jwt_secret_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("postboard")
        .join("jwt-secret")
}
