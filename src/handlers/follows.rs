/// Follow handlers - HTTP endpoints for subscriptions
///
/// Both endpoints require authentication and only ever see the
/// requester's own subscriptions. The followed user is named by username
/// in the payload; the follower is always the requester.
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::db::{follow_repo, user_repo};
use crate::error::{map_constraint_violation, AppError, Result};
use crate::middleware::UserId;

#[derive(Debug, Deserialize, IntoParams)]
pub struct FollowQuery {
    /// Substring match on the followed username
    pub search: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct FollowPayload {
    /// Username to follow
    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub following: Option<String>,
}

#[utoipa::path(
    get,
    path = "/v1/follow/",
    tag = "follows",
    params(FollowQuery),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "The requester's subscriptions", body = [crate::models::Follow]),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_follows(
    pool: web::Data<PgPool>,
    user_id: UserId,
    query: web::Query<FollowQuery>,
) -> Result<HttpResponse> {
    let follows =
        follow_repo::find_follows_by_user(&pool, user_id.0, query.search.as_deref()).await?;
    Ok(HttpResponse::Ok().json(follows))
}

#[utoipa::path(
    post,
    path = "/v1/follow/",
    tag = "follows",
    request_body = FollowPayload,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Subscription created", body = crate::models::Follow),
        (status = 400, description = "Unknown user, self-follow, or duplicate"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn create_follow(
    pool: web::Data<PgPool>,
    user_id: UserId,
    payload: web::Json<FollowPayload>,
) -> Result<HttpResponse> {
    let req = FollowPayload {
        following: payload.following.as_deref().map(|f| f.trim().to_string()),
    };
    req.validate()?;
    let following = req
        .following
        .ok_or_else(|| AppError::field("following", "This field is required."))?;

    let target = user_repo::find_user_by_username(&pool, &following)
        .await?
        .ok_or_else(|| {
            AppError::field(
                "following",
                format!("Object with username={following} does not exist."),
            )
        })?;

    if target.id == user_id.0 {
        return Err(AppError::field(
            "following",
            "Following yourself is not allowed.",
        ));
    }

    // The UNIQUE constraint decides duplicates atomically
    let follow = follow_repo::create_follow(&pool, user_id.0, target.id)
        .await
        .map_err(map_constraint_violation)?;

    Ok(HttpResponse::Created().json(follow))
}
