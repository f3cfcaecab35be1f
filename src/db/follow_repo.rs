use crate::models::Follow;
use sqlx::PgPool;
use uuid::Uuid;

/// Escape LIKE metacharacters so a search term only ever matches literally.
fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// List the requester's subscriptions, optionally filtered by a
/// case-insensitive substring of the followed username.
pub async fn find_follows_by_user(
    pool: &PgPool,
    user_id: Uuid,
    search: Option<&str>,
) -> Result<Vec<Follow>, sqlx::Error> {
    let pattern = search.map(|s| format!("%{}%", escape_like(s)));

    let follows = sqlx::query_as::<_, Follow>(
        r#"
        SELECT f.id, fu.username AS "user", tu.username AS following
        FROM follows f
        JOIN users fu ON fu.id = f.user_id
        JOIN users tu ON tu.id = f.following_id
        WHERE f.user_id = $1
          AND ($2::TEXT IS NULL OR tu.username ILIKE $2)
        ORDER BY tu.username
        "#,
    )
    .bind(user_id)
    .bind(pattern)
    .fetch_all(pool)
    .await?;

    Ok(follows)
}

/// Create a subscription. Duplicate and self-follow attempts are rejected
/// by the table constraints and surface as database errors carrying the
/// constraint name.
pub async fn create_follow(
    pool: &PgPool,
    user_id: Uuid,
    following_id: Uuid,
) -> Result<Follow, sqlx::Error> {
    let follow = sqlx::query_as::<_, Follow>(
        r#"
        WITH inserted AS (
            INSERT INTO follows (user_id, following_id)
            VALUES ($1, $2)
            RETURNING id, user_id, following_id
        )
        SELECT i.id, fu.username AS "user", tu.username AS following
        FROM inserted i
        JOIN users fu ON fu.id = i.user_id
        JOIN users tu ON tu.id = i.following_id
        "#,
    )
    .bind(user_id)
    .bind(following_id)
    .fetch_one(pool)
    .await?;

    Ok(follow)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like_keeps_plain_terms() {
        assert_eq!(escape_like("lev"), "lev");
    }

    #[test]
    fn test_escape_like_neutralizes_metacharacters() {
        assert_eq!(escape_like("a_b"), "a\\_b");
        assert_eq!(escape_like("50%"), "50\\%");
        assert_eq!(escape_like("back\\slash"), "back\\\\slash");
    }
}
