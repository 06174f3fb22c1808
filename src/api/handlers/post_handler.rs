//! Post handlers.

use axum::{extract::State, routing::get, Router};

use crate::api::dto::{CreatePostRequest, DeletePostRequest, UpdatePostRequest};
use crate::api::extractors::{Path, Query, ValidatedJson};
use crate::api::AppState;
use crate::domain::{PostResponse, PostSummary};
use crate::errors::{AppResult, ErrorResponse};
use crate::types::{ApiResponse, Created, NoContent, Paginated, PaginationParams, PostPage};

/// Create post routes
pub fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_posts).post(create_post))
        .route("/:id", get(get_post).put(update_post).delete(delete_post))
}

/// List posts, newest first
///
/// Returns `ApiResponse<Paginated<PostSummary>>`.
#[utoipa::path(
    get,
    path = "/api/v1/posts",
    tag = "Posts",
    params(PaginationParams),
    responses(
        (status = 200, description = "One page of posts", body = PostPage),
        (status = 400, description = "Invalid query", body = ErrorResponse)
    )
)]
pub async fn list_posts(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<ApiResponse<Paginated<PostSummary>>> {
    let page = state.post_service.list_posts(params).await?;
    Ok(ApiResponse::success(page))
}

/// Read a post (counts as a view)
#[utoipa::path(
    get,
    path = "/api/v1/posts/{id}",
    tag = "Posts",
    params(("id" = i32, Path, description = "Post ID")),
    responses(
        (status = 200, description = "Post found", body = PostResponse),
        (status = 400, description = "Invalid post ID", body = ErrorResponse),
        (status = 404, description = "Post not found", body = ErrorResponse)
    )
)]
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<ApiResponse<PostResponse>> {
    let post = state.post_service.get_post(id).await?;
    Ok(ApiResponse::success(post))
}

/// Write a new post
#[utoipa::path(
    post,
    path = "/api/v1/posts",
    tag = "Posts",
    request_body = CreatePostRequest,
    responses(
        (status = 201, description = "Post created", body = PostResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 429, description = "Too many requests", body = ErrorResponse)
    )
)]
pub async fn create_post(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreatePostRequest>,
) -> AppResult<Created<PostResponse>> {
    let post = state
        .post_service
        .create_post(payload.author, payload.password, payload.title, payload.content)
        .await?;

    Ok(Created(post))
}

/// Edit a post
#[utoipa::path(
    put,
    path = "/api/v1/posts/{id}",
    tag = "Posts",
    params(("id" = i32, Path, description = "Post ID")),
    request_body = UpdatePostRequest,
    responses(
        (status = 200, description = "Post updated", body = PostResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Password does not match", body = ErrorResponse),
        (status = 404, description = "Post not found", body = ErrorResponse)
    )
)]
pub async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdatePostRequest>,
) -> AppResult<ApiResponse<PostResponse>> {
    let post = state
        .post_service
        .update_post(id, payload.password, payload.title, payload.content)
        .await?;

    Ok(ApiResponse::success(post))
}

/// Delete a post
#[utoipa::path(
    delete,
    path = "/api/v1/posts/{id}",
    tag = "Posts",
    params(("id" = i32, Path, description = "Post ID")),
    request_body = DeletePostRequest,
    responses(
        (status = 204, description = "Post deleted"),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Password does not match", body = ErrorResponse),
        (status = 404, description = "Post not found", body = ErrorResponse)
    )
)]
pub async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<DeletePostRequest>,
) -> AppResult<NoContent> {
    state.post_service.delete_post(id, payload.password).await?;
    Ok(NoContent)
}
