use crate::models::Post;
use sqlx::PgPool;
use uuid::Uuid;

/// List posts, newest first. `limit` of NULL returns everything.
pub async fn list_posts(
    pool: &PgPool,
    limit: Option<i64>,
    offset: i64,
) -> Result<Vec<Post>, sqlx::Error> {
    let posts = sqlx::query_as::<_, Post>(
        r#"
        SELECT p.id, p.author_id, u.username AS author, p.text, p.pub_date, p.image, p.group_id
        FROM posts p
        JOIN users u ON u.id = p.author_id
        ORDER BY p.pub_date DESC, p.id
        LIMIT $1 OFFSET $2
        "#,
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

/// Count all posts
pub async fn count_posts(pool: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM posts")
        .fetch_one(pool)
        .await
}

/// Find a post by ID
pub async fn find_post_by_id(pool: &PgPool, post_id: Uuid) -> Result<Option<Post>, sqlx::Error> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        SELECT p.id, p.author_id, u.username AS author, p.text, p.pub_date, p.image, p.group_id
        FROM posts p
        JOIN users u ON u.id = p.author_id
        WHERE p.id = $1
        "#,
    )
    .bind(post_id)
    .fetch_optional(pool)
    .await?;

    Ok(post)
}

/// Create a new post owned by `author_id`
pub async fn create_post(
    pool: &PgPool,
    author_id: Uuid,
    text: &str,
    image: Option<&str>,
    group_id: Option<Uuid>,
) -> Result<Post, sqlx::Error> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        WITH inserted AS (
            INSERT INTO posts (author_id, text, image, group_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, author_id, text, pub_date, image, group_id
        )
        SELECT i.id, i.author_id, u.username AS author, i.text, i.pub_date, i.image, i.group_id
        FROM inserted i
        JOIN users u ON u.id = i.author_id
        "#,
    )
    .bind(author_id)
    .bind(text)
    .bind(image)
    .bind(group_id)
    .fetch_one(pool)
    .await?;

    Ok(post)
}

/// Update the supplied fields of a post. Omitted fields keep their value;
/// the image and group set-flags distinguish "clear" from "leave alone".
pub async fn update_post(
    pool: &PgPool,
    post_id: Uuid,
    text: Option<&str>,
    image: Option<Option<&str>>,
    group_id: Option<Option<Uuid>>,
) -> Result<Option<Post>, sqlx::Error> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        WITH updated AS (
            UPDATE posts
            SET text = COALESCE($2, text),
                image = CASE WHEN $3 THEN $4 ELSE image END,
                group_id = CASE WHEN $5 THEN $6 ELSE group_id END
            WHERE id = $1
            RETURNING id, author_id, text, pub_date, image, group_id
        )
        SELECT i.id, i.author_id, u.username AS author, i.text, i.pub_date, i.image, i.group_id
        FROM updated i
        JOIN users u ON u.id = i.author_id
        "#,
    )
    .bind(post_id)
    .bind(text)
    .bind(image.is_some())
    .bind(image.flatten())
    .bind(group_id.is_some())
    .bind(group_id.flatten())
    .fetch_optional(pool)
    .await?;

    Ok(post)
}

/// Delete a post. Returns whether a row was removed.
pub async fn delete_post(pool: &PgPool, post_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM posts WHERE id = $1")
        .bind(post_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
