use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::entities::post_entity::Post;
use crate::middleware::auth::AuthWithBearer;
use crate::middleware::ctx::Ctx;
use crate::middleware::error::CtxResult;
use crate::middleware::mw_ctx::CtxState;
use crate::middleware::utils::db_utils::{Pagination, QryOrder};
use crate::middleware::utils::extractor_utils::JsonValidated;
use crate::services::post_service::{CommentInput, PostInput, PostService};

pub fn routes() -> Router<Arc<CtxState>> {
    Router::new()
        .route("/api/posts", get(get_posts))
        .route("/api/posts", post(create_post))
        .route("/api/posts/like/:post_id", post(like))
        .route("/api/posts/unlike/:post_id", post(unlike))
        .route("/api/posts/comment/:post_id", post(create_comment))
        .route(
            "/api/posts/comment/:post_id/:comment_id",
            delete(remove_comment),
        )
        .route("/api/posts/:post_id", get(get_post))
        .route("/api/posts/:post_id", delete(delete_post))
}

#[derive(Debug, Deserialize)]
pub struct GetPostsQuery {
    pub order_dir: Option<QryOrder>,
    pub start: Option<u32>,
    pub count: Option<u16>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PostDeleteResponse {
    pub success: bool,
}

async fn get_posts(
    Query(query): Query<GetPostsQuery>,
    State(state): State<Arc<CtxState>>,
    ctx: Ctx,
) -> CtxResult<Json<Vec<Post>>> {
    // without query params the whole feed is returned
    let pagination = Pagination {
        order_dir: query.order_dir,
        count: query.count.unwrap_or(u16::MAX),
        start: query.start.unwrap_or_default(),
    };
    let posts = PostService::new(&state.db.client, &ctx)
        .get_all(pagination)
        .await?;

    Ok(Json(posts))
}

async fn get_post(
    Path(post_id): Path<String>,
    State(state): State<Arc<CtxState>>,
    ctx: Ctx,
) -> CtxResult<Json<Post>> {
    let post = PostService::new(&state.db.client, &ctx)
        .get_by_id(&post_id)
        .await?;

    Ok(Json(post))
}

async fn create_post(
    auth_data: AuthWithBearer,
    State(state): State<Arc<CtxState>>,
    JsonValidated(input): JsonValidated<PostInput>,
) -> CtxResult<Json<Post>> {
    let user_id = auth_data.ctx.user_id()?;
    let post = PostService::new(&state.db.client, &auth_data.ctx)
        .create(&user_id, input)
        .await?;

    Ok(Json(post))
}

async fn like(
    auth_data: AuthWithBearer,
    Path(post_id): Path<String>,
    State(state): State<Arc<CtxState>>,
) -> CtxResult<Json<Post>> {
    let user_id = auth_data.ctx.user_id()?;
    let post = PostService::new(&state.db.client, &auth_data.ctx)
        .like(&user_id, &post_id)
        .await?;

    Ok(Json(post))
}

async fn unlike(
    auth_data: AuthWithBearer,
    Path(post_id): Path<String>,
    State(state): State<Arc<CtxState>>,
) -> CtxResult<Json<Post>> {
    let user_id = auth_data.ctx.user_id()?;
    let post = PostService::new(&state.db.client, &auth_data.ctx)
        .unlike(&user_id, &post_id)
        .await?;

    Ok(Json(post))
}

async fn create_comment(
    auth_data: AuthWithBearer,
    Path(post_id): Path<String>,
    State(state): State<Arc<CtxState>>,
    JsonValidated(input): JsonValidated<CommentInput>,
) -> CtxResult<Json<Post>> {
    let user_id = auth_data.ctx.user_id()?;
    let post = PostService::new(&state.db.client, &auth_data.ctx)
        .comment(&user_id, &post_id, input)
        .await?;

    Ok(Json(post))
}

async fn remove_comment(
    auth_data: AuthWithBearer,
    Path((post_id, comment_id)): Path<(String, String)>,
    State(state): State<Arc<CtxState>>,
) -> CtxResult<Json<Post>> {
    let user_id = auth_data.ctx.user_id()?;
    let post = PostService::new(&state.db.client, &auth_data.ctx)
        .remove_comment(&user_id, &post_id, &comment_id)
        .await?;

    Ok(Json(post))
}

async fn delete_post(
    auth_data: AuthWithBearer,
    Path(post_id): Path<String>,
    State(state): State<Arc<CtxState>>,
) -> CtxResult<Json<PostDeleteResponse>> {
    let user_id = auth_data.ctx.user_id()?;
    PostService::new(&state.db.client, &auth_data.ctx)
        .delete(&user_id, &post_id)
        .await?;

    Ok(Json(PostDeleteResponse { success: true }))
}
