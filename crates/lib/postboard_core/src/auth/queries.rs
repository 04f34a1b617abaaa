//! Credential store queries.

use sqlx::PgPool;

use super::AuthError;
use crate::models::auth::{User, UserWithPassword};

/// Fetch a user and its password hash by email.
pub async fn find_user_by_email(
    pool: &PgPool,
    email: &str,
) -> Result<Option<UserWithPassword>, AuthError> {
    let row = sqlx::query_as::<_, (i32, String, String)>(
        "SELECT id, email, password_hash FROM users WHERE email = $1",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(|(id, email, password_hash)| UserWithPassword {
        user: User { id, email },
        password_hash,
    }))
}

/// Create a new user.
///
/// Returns [`AuthError::EmailTaken`] when the `users.email` unique
/// constraint rejects the insert; no row is written in that case.
pub async fn create_user(
    pool: &PgPool,
    email: &str,
    password_hash: &str,
) -> Result<User, AuthError> {
    let row = sqlx::query_as::<_, (i32, String)>(
        "INSERT INTO users (email, password_hash) VALUES ($1, $2) RETURNING id, email",
    )
    .bind(email)
    .bind(password_hash)
    .fetch_one(pool)
    .await;

    match row {
        Ok((id, email)) => Ok(User { id, email }),
        Err(sqlx::Error::Database(db)) if db.is_unique_violation() => Err(AuthError::EmailTaken),
        Err(e) => Err(AuthError::DbError(e)),
    }
}
