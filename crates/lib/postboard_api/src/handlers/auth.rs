//! Signup and login request handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crate::AppState;
use crate::error::AppResult;
use crate::extract::AppJson;
use crate::models::{CredentialsRequest, TokenResponse};
use crate::services::auth::{self, Credentials};

/// `POST /api/signup` — create a user account and return a token.
pub async fn signup_handler(
    State(state): State<AppState>,
    AppJson(body): AppJson<CredentialsRequest>,
) -> AppResult<(StatusCode, Json<TokenResponse>)> {
    let credentials = Credentials::try_from(body)?;
    let resp = auth::signup(&state.pool, credentials, state.config.jwt_secret.as_bytes()).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

/// `POST /api/login` — authenticate with email + password.
pub async fn login_handler(
    State(state): State<AppState>,
    AppJson(body): AppJson<CredentialsRequest>,
) -> AppResult<Json<TokenResponse>> {
    let credentials = Credentials::try_from(body)?;
    let resp = auth::login(&state.pool, credentials, state.config.jwt_secret.as_bytes()).await?;
    Ok(Json(resp))
}
