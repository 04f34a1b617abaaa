//! Post persistence.
//!
//! Every function here is a single statement; none of them opens a
//! transaction.

use sqlx::PgPool;

use crate::models::post::PostRow;

/// List all posts, most recently created first.
pub async fn list_posts(pool: &PgPool) -> Result<Vec<PostRow>, sqlx::Error> {
    sqlx::query_as::<_, PostRow>(
        r#"
        SELECT id, body, date
        FROM posts
        ORDER BY date DESC, id DESC
        "#,
    )
    .fetch_all(pool)
    .await
}

/// Get a post by ID.
pub async fn get_post(pool: &PgPool, id: i32) -> Result<Option<PostRow>, sqlx::Error> {
    sqlx::query_as::<_, PostRow>("SELECT id, body, date FROM posts WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Create a new post. The store assigns `id` and `date`.
pub async fn create_post(pool: &PgPool, body: &str) -> Result<PostRow, sqlx::Error> {
    sqlx::query_as::<_, PostRow>(
        r#"
        INSERT INTO posts (body)
        VALUES ($1)
        RETURNING id, body, date
        "#,
    )
    .bind(body)
    .fetch_one(pool)
    .await
}

/// Replace the body of a post, leaving `date` untouched.
///
/// Returns `None` when no post has the given ID.
pub async fn update_post(
    pool: &PgPool,
    id: i32,
    body: &str,
) -> Result<Option<PostRow>, sqlx::Error> {
    sqlx::query_as::<_, PostRow>(
        r#"
        UPDATE posts
        SET body = $1
        WHERE id = $2
        RETURNING id, body, date
        "#,
    )
    .bind(body)
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Delete a post by ID. Returns `true` if a row was deleted.
pub async fn delete_post(pool: &PgPool, id: i32) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM posts WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Delete every post. Returns the number of rows removed.
pub async fn delete_all_posts(pool: &PgPool) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM posts").execute(pool).await?;
    Ok(result.rows_affected())
}
