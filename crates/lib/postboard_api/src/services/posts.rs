//! Post service — input validation over `postboard_core::posts`.
//!
//! Callers must already have passed the bearer-token middleware. There is
//! no ownership check: any authenticated caller may change any post.

use postboard_core::posts;
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::models::{Post, PostRequest, SuccessResponse};

/// A post ID parsed from the request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostId(pub i32);

impl std::str::FromStr for PostId {
    type Err = AppError;

    fn from_str(raw: &str) -> AppResult<Self> {
        raw.parse::<i32>()
            .map(PostId)
            .map_err(|_| AppError::Validation("Invalid id".into()))
    }
}

/// A validated post body: non-empty and free of NUL, which Postgres `TEXT`
/// cannot store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostBody(String);

impl PostBody {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<PostRequest> for PostBody {
    type Error = AppError;

    fn try_from(req: PostRequest) -> AppResult<Self> {
        match req.body {
            Some(body) if body.contains('\0') => {
                Err(AppError::Validation("body must not contain NUL characters".into()))
            }
            Some(body) if !body.is_empty() => Ok(PostBody(body)),
            _ => Err(AppError::Validation("body required".into())),
        }
    }
}

fn not_found() -> AppError {
    AppError::NotFound("Post not found".into())
}

/// All posts, most recent first.
pub async fn list(pool: &PgPool) -> AppResult<Vec<Post>> {
    let rows = posts::list_posts(pool).await?;
    Ok(rows.into_iter().map(Post::from).collect())
}

/// One post by ID.
pub async fn get(pool: &PgPool, id: PostId) -> AppResult<Post> {
    posts::get_post(pool, id.0)
        .await?
        .map(Post::from)
        .ok_or_else(not_found)
}

/// Create a post.
pub async fn create(pool: &PgPool, body: PostBody) -> AppResult<Post> {
    let row = posts::create_post(pool, body.as_str()).await?;
    Ok(row.into())
}

/// Replace a post's body.
pub async fn update(pool: &PgPool, id: PostId, body: PostBody) -> AppResult<Post> {
    posts::update_post(pool, id.0, body.as_str())
        .await?
        .map(Post::from)
        .ok_or_else(not_found)
}

/// Delete one post.
pub async fn delete(pool: &PgPool, id: PostId) -> AppResult<SuccessResponse> {
    if !posts::delete_post(pool, id.0).await? {
        return Err(not_found());
    }
    Ok(SuccessResponse { success: true })
}

/// Delete every post. Succeeds when there is nothing to delete.
pub async fn delete_all(pool: &PgPool) -> AppResult<SuccessResponse> {
    posts::delete_all_posts(pool).await?;
    Ok(SuccessResponse { success: true })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_id_parses_integers() {
        assert_eq!("42".parse::<PostId>().unwrap(), PostId(42));
        assert_eq!("-1".parse::<PostId>().unwrap(), PostId(-1));
    }

    #[test]
    fn post_id_rejects_non_integers() {
        for raw in ["abc", "", "1.5", "12abc", " 7", "99999999999"] {
            let err = raw.parse::<PostId>().unwrap_err();
            assert!(matches!(err, AppError::Validation(_)), "{raw:?} should be rejected");
        }
    }

    #[test]
    fn post_body_must_be_non_empty() {
        assert!(PostBody::try_from(PostRequest { body: None }).is_err());
        assert!(PostBody::try_from(PostRequest { body: Some(String::new()) }).is_err());
        let body = PostBody::try_from(PostRequest { body: Some("hello".into()) }).unwrap();
        assert_eq!(body.as_str(), "hello");
    }

    #[test]
    fn post_body_rejects_nul() {
        let err = PostBody::try_from(PostRequest { body: Some("a\0b".into()) }).unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m.contains("NUL")));
    }
}
