/// Group handlers - read-only HTTP endpoints
///
/// Groups are managed out of band; the API only lists them.
use actix_web::{web, HttpResponse};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::group_repo;
use crate::error::{AppError, Result};

#[utoipa::path(
    get,
    path = "/v1/groups/",
    tag = "groups",
    responses(
        (status = 200, description = "All groups", body = [crate::models::Group])
    )
)]
pub async fn list_groups(pool: web::Data<PgPool>) -> Result<HttpResponse> {
    let groups = group_repo::list_groups(&pool).await?;
    Ok(HttpResponse::Ok().json(groups))
}

#[utoipa::path(
    get,
    path = "/v1/groups/{group_id}/",
    tag = "groups",
    params(("group_id" = Uuid, Path, description = "Group ID")),
    responses(
        (status = 200, description = "The group", body = crate::models::Group),
        (status = 404, description = "Group not found")
    )
)]
pub async fn get_group(pool: web::Data<PgPool>, path: web::Path<Uuid>) -> Result<HttpResponse> {
    let group_id = path.into_inner();
    let group = group_repo::find_group_by_id(&pool, group_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Group {group_id} not found")))?;

    Ok(HttpResponse::Ok().json(group))
}
