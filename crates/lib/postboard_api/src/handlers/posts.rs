//! Post CRUD request handlers. All routes sit behind `require_auth`.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::info;

use crate::AppState;
use crate::error::AppResult;
use crate::extract::{AppJson, AppPath};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::{Post, PostRequest, SuccessResponse};
use crate::services::posts::{self, PostBody, PostId};

/// `GET /api/posts` — list posts, newest first.
pub async fn list_posts_handler(State(state): State<AppState>) -> AppResult<Json<Vec<Post>>> {
    Ok(Json(posts::list(&state.pool).await?))
}

/// `GET /api/posts/{id}` — fetch one post.
pub async fn get_post_handler(
    State(state): State<AppState>,
    AppPath(id): AppPath<String>,
) -> AppResult<Json<Post>> {
    let id: PostId = id.parse()?;
    Ok(Json(posts::get(&state.pool, id).await?))
}

/// `POST /api/posts` — create a post.
pub async fn create_post_handler(
    State(state): State<AppState>,
    axum::Extension(user): axum::Extension<AuthenticatedUser>,
    AppJson(body): AppJson<PostRequest>,
) -> AppResult<(StatusCode, Json<Post>)> {
    let body = PostBody::try_from(body)?;
    let post = posts::create(&state.pool, body).await?;
    info!(post_id = post.id, user = %user.0.email, "post created");
    Ok((StatusCode::CREATED, Json(post)))
}

/// `PUT /api/posts/{id}` — replace a post's body.
pub async fn update_post_handler(
    State(state): State<AppState>,
    AppPath(id): AppPath<String>,
    AppJson(body): AppJson<PostRequest>,
) -> AppResult<Json<Post>> {
    let id: PostId = id.parse()?;
    let body = PostBody::try_from(body)?;
    Ok(Json(posts::update(&state.pool, id, body).await?))
}

/// `DELETE /api/posts/{id}` — delete one post.
pub async fn delete_post_handler(
    State(state): State<AppState>,
    axum::Extension(user): axum::Extension<AuthenticatedUser>,
    AppPath(id): AppPath<String>,
) -> AppResult<Json<SuccessResponse>> {
    let id: PostId = id.parse()?;
    let resp = posts::delete(&state.pool, id).await?;
    info!(post_id = id.0, user = %user.0.email, "post deleted");
    Ok(Json(resp))
}

/// `DELETE /api/posts` — delete every post.
pub async fn delete_all_posts_handler(
    State(state): State<AppState>,
    axum::Extension(user): axum::Extension<AuthenticatedUser>,
) -> AppResult<Json<SuccessResponse>> {
    let resp = posts::delete_all(&state.pool).await?;
    info!(user = %user.0.email, "all posts deleted");
    Ok(Json(resp))
}
