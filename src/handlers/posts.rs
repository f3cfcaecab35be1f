/// Post handlers - HTTP endpoints for post operations
///
/// Reads are public. Writes require a valid token, and changing or
/// deleting a post is reserved for its author. The author of a new post
/// is always the requester, whatever the payload claims.
use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::db::post_repo;
use crate::error::{map_constraint_violation, AppError, Result};
use crate::middleware::{check_post_author, UserId};
use crate::models::Post;
use crate::pagination::{request_base_url, Page, PaginationParams};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct PostPayload {
    /// Body text. Required on create and full update.
    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub text: Option<String>,
    /// Storage key of an attached image. The outer option tracks field
    /// presence: an explicit null clears the image on update.
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub image: Option<Option<String>>,
    /// Group the post is filed under. Explicit null detaches the post.
    #[serde(default)]
    #[schema(value_type = Option<Uuid>)]
    pub group: Option<Option<Uuid>>,
}

impl PostPayload {
    fn trimmed(&self) -> Self {
        Self {
            text: self.text.as_deref().map(|t| t.trim().to_string()),
            image: self.image.clone(),
            group: self.group,
        }
    }
}

/// Fetch a post or report it missing.
pub(crate) async fn load_post(pool: &PgPool, post_id: Uuid) -> Result<Post> {
    post_repo::find_post_by_id(pool, post_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post {post_id} not found")))
}

#[utoipa::path(
    get,
    path = "/v1/posts/",
    tag = "posts",
    params(PaginationParams),
    responses(
        (status = 200, description = "All posts newest first, or one page in an envelope when `limit` is given")
    )
)]
pub async fn list_posts(
    pool: web::Data<PgPool>,
    query: web::Query<PaginationParams>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    match query.limit() {
        Some(limit) => {
            let offset = query.offset();
            let count = post_repo::count_posts(&pool).await?;
            let posts = post_repo::list_posts(&pool, Some(limit), offset).await?;
            let page = Page::new(&request_base_url(&req), limit, offset, count, posts);
            Ok(HttpResponse::Ok().json(page))
        }
        None => {
            let posts = post_repo::list_posts(&pool, None, 0).await?;
            Ok(HttpResponse::Ok().json(posts))
        }
    }
}

#[utoipa::path(
    get,
    path = "/v1/posts/{post_id}/",
    tag = "posts",
    params(("post_id" = Uuid, Path, description = "Post ID")),
    responses(
        (status = 200, description = "The post", body = Post),
        (status = 404, description = "Post not found")
    )
)]
pub async fn get_post(pool: web::Data<PgPool>, path: web::Path<Uuid>) -> Result<HttpResponse> {
    let post = load_post(&pool, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(post))
}

#[utoipa::path(
    post,
    path = "/v1/posts/",
    tag = "posts",
    request_body = PostPayload,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Post created", body = Post),
        (status = 400, description = "Validation failed"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn create_post(
    pool: web::Data<PgPool>,
    user_id: UserId,
    payload: web::Json<PostPayload>,
) -> Result<HttpResponse> {
    let req = payload.trimmed();
    req.validate()?;
    let text = req
        .text
        .ok_or_else(|| AppError::field("text", "This field is required."))?;

    let image = req.image.flatten();
    let group = req.group.flatten();
    let post = post_repo::create_post(&pool, user_id.0, &text, image.as_deref(), group)
        .await
        .map_err(map_constraint_violation)?;

    Ok(HttpResponse::Created().json(post))
}

#[utoipa::path(
    put,
    path = "/v1/posts/{post_id}/",
    tag = "posts",
    params(("post_id" = Uuid, Path, description = "Post ID")),
    request_body = PostPayload,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Post updated", body = Post),
        (status = 403, description = "Not the author"),
        (status = 404, description = "Post not found")
    )
)]
pub async fn update_post(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
    user_id: UserId,
    payload: web::Json<PostPayload>,
) -> Result<HttpResponse> {
    apply_post_update(&pool, path.into_inner(), user_id, &payload, false).await
}

#[utoipa::path(
    patch,
    path = "/v1/posts/{post_id}/",
    tag = "posts",
    params(("post_id" = Uuid, Path, description = "Post ID")),
    request_body = PostPayload,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Post updated", body = Post),
        (status = 403, description = "Not the author"),
        (status = 404, description = "Post not found")
    )
)]
pub async fn partial_update_post(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
    user_id: UserId,
    payload: web::Json<PostPayload>,
) -> Result<HttpResponse> {
    apply_post_update(&pool, path.into_inner(), user_id, &payload, true).await
}

async fn apply_post_update(
    pool: &PgPool,
    post_id: Uuid,
    user_id: UserId,
    payload: &PostPayload,
    partial: bool,
) -> Result<HttpResponse> {
    let post = load_post(pool, post_id).await?;
    check_post_author(user_id.0, &post)?;

    let req = payload.trimmed();
    req.validate()?;
    if !partial && req.text.is_none() {
        return Err(AppError::field("text", "This field is required."));
    }

    let updated = post_repo::update_post(
        pool,
        post_id,
        req.text.as_deref(),
        req.image.as_ref().map(|i| i.as_deref()),
        req.group,
    )
    .await
    .map_err(map_constraint_violation)?
    .ok_or_else(|| AppError::NotFound(format!("Post {post_id} not found")))?;

    Ok(HttpResponse::Ok().json(updated))
}

#[utoipa::path(
    delete,
    path = "/v1/posts/{post_id}/",
    tag = "posts",
    params(("post_id" = Uuid, Path, description = "Post ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Post deleted"),
        (status = 403, description = "Not the author"),
        (status = 404, description = "Post not found")
    )
)]
pub async fn delete_post(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
    user_id: UserId,
) -> Result<HttpResponse> {
    let post_id = path.into_inner();
    let post = load_post(&pool, post_id).await?;
    check_post_author(user_id.0, &post)?;

    post_repo::delete_post(&pool, post_id).await?;

    Ok(HttpResponse::NoContent().finish())
}
