use crate::models::Comment;
use sqlx::PgPool;
use uuid::Uuid;

/// List comments on a post, oldest first
pub async fn find_comments_by_post(
    pool: &PgPool,
    post_id: Uuid,
) -> Result<Vec<Comment>, sqlx::Error> {
    let comments = sqlx::query_as::<_, Comment>(
        r#"
        SELECT c.id, c.author_id, u.username AS author, c.post_id, c.text, c.created
        FROM comments c
        JOIN users u ON u.id = c.author_id
        WHERE c.post_id = $1
        ORDER BY c.created, c.id
        "#,
    )
    .bind(post_id)
    .fetch_all(pool)
    .await?;

    Ok(comments)
}

/// Find a comment by ID within a post. A comment that exists under a
/// different post is not found.
pub async fn find_comment_by_id(
    pool: &PgPool,
    post_id: Uuid,
    comment_id: Uuid,
) -> Result<Option<Comment>, sqlx::Error> {
    let comment = sqlx::query_as::<_, Comment>(
        r#"
        SELECT c.id, c.author_id, u.username AS author, c.post_id, c.text, c.created
        FROM comments c
        JOIN users u ON u.id = c.author_id
        WHERE c.id = $1 AND c.post_id = $2
        "#,
    )
    .bind(comment_id)
    .bind(post_id)
    .fetch_optional(pool)
    .await?;

    Ok(comment)
}

/// Create a comment on a post owned by `author_id`
pub async fn create_comment(
    pool: &PgPool,
    author_id: Uuid,
    post_id: Uuid,
    text: &str,
) -> Result<Comment, sqlx::Error> {
    let comment = sqlx::query_as::<_, Comment>(
        r#"
        WITH inserted AS (
            INSERT INTO comments (author_id, post_id, text)
            VALUES ($1, $2, $3)
            RETURNING id, author_id, post_id, text, created
        )
        SELECT i.id, i.author_id, u.username AS author, i.post_id, i.text, i.created
        FROM inserted i
        JOIN users u ON u.id = i.author_id
        "#,
    )
    .bind(author_id)
    .bind(post_id)
    .bind(text)
    .fetch_one(pool)
    .await?;

    Ok(comment)
}

/// Update a comment's text
pub async fn update_comment(
    pool: &PgPool,
    comment_id: Uuid,
    text: &str,
) -> Result<Option<Comment>, sqlx::Error> {
    let comment = sqlx::query_as::<_, Comment>(
        r#"
        WITH updated AS (
            UPDATE comments
            SET text = $2
            WHERE id = $1
            RETURNING id, author_id, post_id, text, created
        )
        SELECT i.id, i.author_id, u.username AS author, i.post_id, i.text, i.created
        FROM updated i
        JOIN users u ON u.id = i.author_id
        "#,
    )
    .bind(comment_id)
    .bind(text)
    .fetch_optional(pool)
    .await?;

    Ok(comment)
}

/// Delete a comment. Returns whether a row was removed.
pub async fn delete_comment(pool: &PgPool, comment_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM comments WHERE id = $1")
        .bind(comment_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
