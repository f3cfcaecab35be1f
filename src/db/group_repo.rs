use crate::models::Group;
use sqlx::PgPool;
use uuid::Uuid;

/// List all groups
pub async fn list_groups(pool: &PgPool) -> Result<Vec<Group>, sqlx::Error> {
    sqlx::query_as::<_, Group>(
        r#"
        SELECT id, title, slug, description
        FROM groups
        ORDER BY slug
        "#,
    )
    .fetch_all(pool)
    .await
}

/// Find a group by ID
pub async fn find_group_by_id(pool: &PgPool, group_id: Uuid) -> Result<Option<Group>, sqlx::Error> {
    sqlx::query_as::<_, Group>(
        r#"
        SELECT id, title, slug, description
        FROM groups
        WHERE id = $1
        "#,
    )
    .bind(group_id)
    .fetch_optional(pool)
    .await
}
