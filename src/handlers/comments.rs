/// Comment handlers - HTTP endpoints for comment operations
///
/// Comments live under a post. Every operation resolves the parent post
/// first, so a bad post ID is a 404 even when the comment ID would match
/// elsewhere. Both the author and the post of a new comment come from
/// the request context, never from the payload.
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::db::comment_repo;
use crate::error::{map_constraint_violation, AppError, Result};
use crate::handlers::posts::load_post;
use crate::middleware::{check_comment_author, UserId};
use crate::models::Comment;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CommentPayload {
    /// Comment text. Required on create and full update.
    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub text: Option<String>,
}

impl CommentPayload {
    fn trimmed(&self) -> Self {
        Self {
            text: self.text.as_deref().map(|t| t.trim().to_string()),
        }
    }
}

/// Fetch a comment under a post or report it missing.
async fn load_comment(pool: &PgPool, post_id: Uuid, comment_id: Uuid) -> Result<Comment> {
    comment_repo::find_comment_by_id(pool, post_id, comment_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Comment {comment_id} not found")))
}

#[utoipa::path(
    get,
    path = "/v1/posts/{post_id}/comments/",
    tag = "comments",
    params(("post_id" = Uuid, Path, description = "Post ID")),
    responses(
        (status = 200, description = "Comments on the post, oldest first", body = [Comment]),
        (status = 404, description = "Post not found")
    )
)]
pub async fn list_comments(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let post = load_post(&pool, path.into_inner()).await?;
    let comments = comment_repo::find_comments_by_post(&pool, post.id).await?;
    Ok(HttpResponse::Ok().json(comments))
}

#[utoipa::path(
    get,
    path = "/v1/posts/{post_id}/comments/{comment_id}/",
    tag = "comments",
    params(
        ("post_id" = Uuid, Path, description = "Post ID"),
        ("comment_id" = Uuid, Path, description = "Comment ID")
    ),
    responses(
        (status = 200, description = "The comment", body = Comment),
        (status = 404, description = "Post or comment not found")
    )
)]
pub async fn get_comment(
    pool: web::Data<PgPool>,
    path: web::Path<(Uuid, Uuid)>,
) -> Result<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();
    let post = load_post(&pool, post_id).await?;
    let comment = load_comment(&pool, post.id, comment_id).await?;
    Ok(HttpResponse::Ok().json(comment))
}

#[utoipa::path(
    post,
    path = "/v1/posts/{post_id}/comments/",
    tag = "comments",
    params(("post_id" = Uuid, Path, description = "Post ID")),
    request_body = CommentPayload,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Comment created", body = Comment),
        (status = 400, description = "Validation failed"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Post not found")
    )
)]
pub async fn create_comment(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
    user_id: UserId,
    payload: web::Json<CommentPayload>,
) -> Result<HttpResponse> {
    let post = load_post(&pool, path.into_inner()).await?;

    let req = payload.trimmed();
    req.validate()?;
    let text = req
        .text
        .ok_or_else(|| AppError::field("text", "This field is required."))?;

    let comment = comment_repo::create_comment(&pool, user_id.0, post.id, &text)
        .await
        .map_err(map_constraint_violation)?;

    Ok(HttpResponse::Created().json(comment))
}

#[utoipa::path(
    put,
    path = "/v1/posts/{post_id}/comments/{comment_id}/",
    tag = "comments",
    params(
        ("post_id" = Uuid, Path, description = "Post ID"),
        ("comment_id" = Uuid, Path, description = "Comment ID")
    ),
    request_body = CommentPayload,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Comment updated", body = Comment),
        (status = 403, description = "Not the author"),
        (status = 404, description = "Post or comment not found")
    )
)]
pub async fn update_comment(
    pool: web::Data<PgPool>,
    path: web::Path<(Uuid, Uuid)>,
    user_id: UserId,
    payload: web::Json<CommentPayload>,
) -> Result<HttpResponse> {
    apply_comment_update(&pool, path.into_inner(), user_id, &payload, false).await
}

#[utoipa::path(
    patch,
    path = "/v1/posts/{post_id}/comments/{comment_id}/",
    tag = "comments",
    params(
        ("post_id" = Uuid, Path, description = "Post ID"),
        ("comment_id" = Uuid, Path, description = "Comment ID")
    ),
    request_body = CommentPayload,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Comment updated", body = Comment),
        (status = 403, description = "Not the author"),
        (status = 404, description = "Post or comment not found")
    )
)]
pub async fn partial_update_comment(
    pool: web::Data<PgPool>,
    path: web::Path<(Uuid, Uuid)>,
    user_id: UserId,
    payload: web::Json<CommentPayload>,
) -> Result<HttpResponse> {
    apply_comment_update(&pool, path.into_inner(), user_id, &payload, true).await
}

async fn apply_comment_update(
    pool: &PgPool,
    (post_id, comment_id): (Uuid, Uuid),
    user_id: UserId,
    payload: &CommentPayload,
    partial: bool,
) -> Result<HttpResponse> {
    let post = load_post(pool, post_id).await?;
    let comment = load_comment(pool, post.id, comment_id).await?;
    check_comment_author(user_id.0, &comment)?;

    let req = payload.trimmed();
    req.validate()?;

    match req.text {
        Some(text) => {
            let updated = comment_repo::update_comment(pool, comment_id, &text)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Comment {comment_id} not found")))?;
            Ok(HttpResponse::Ok().json(updated))
        }
        // PATCH without fields changes nothing
        None if partial => Ok(HttpResponse::Ok().json(comment)),
        None => Err(AppError::field("text", "This field is required.")),
    }
}

#[utoipa::path(
    delete,
    path = "/v1/posts/{post_id}/comments/{comment_id}/",
    tag = "comments",
    params(
        ("post_id" = Uuid, Path, description = "Post ID"),
        ("comment_id" = Uuid, Path, description = "Comment ID")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Comment deleted"),
        (status = 403, description = "Not the author"),
        (status = 404, description = "Post or comment not found")
    )
)]
pub async fn delete_comment(
    pool: web::Data<PgPool>,
    path: web::Path<(Uuid, Uuid)>,
    user_id: UserId,
) -> Result<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();
    let post = load_post(&pool, post_id).await?;
    let comment = load_comment(&pool, post.id, comment_id).await?;
    check_comment_author(user_id.0, &comment)?;

    comment_repo::delete_comment(&pool, comment.id).await?;

    Ok(HttpResponse::NoContent().finish())
}
