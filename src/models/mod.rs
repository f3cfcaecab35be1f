/// Data models for the blog service
///
/// This module defines structures for:
/// - User: registered accounts (provisioned out of band)
/// - Group: editorial groups posts can be filed under
/// - Post: blog posts
/// - Comment: comments attached to posts
/// - Follow: subscriptions between users
///
/// The API identifies people by username, so the read models carry the
/// joined username alongside the internal id where clients see one.
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// User entity. Accounts are created out of band; the HTTP surface only
/// authenticates against them.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Group entity - a curated topic posts may belong to. Read-only over HTTP.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct Group {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub description: String,
}

/// Post entity. `author` is the owner's username; the internal id stays
/// out of responses but is kept for permission checks.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct Post {
    pub id: Uuid,
    #[serde(skip_serializing)]
    pub author_id: Uuid,
    pub author: String,
    pub text: String,
    pub pub_date: DateTime<Utc>,
    pub image: Option<String>,
    #[serde(rename = "group")]
    pub group_id: Option<Uuid>,
}

/// Comment entity - a comment on a post
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct Comment {
    pub id: Uuid,
    #[serde(skip_serializing)]
    pub author_id: Uuid,
    pub author: String,
    #[serde(rename = "post")]
    pub post_id: Uuid,
    pub text: String,
    pub created: DateTime<Utc>,
}

/// Follow entity - `user` follows `following`, both as usernames
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct Follow {
    pub id: Uuid,
    pub user: String,
    pub following: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_wire_shape() {
        let post = Post {
            id: Uuid::new_v4(),
            author_id: Uuid::new_v4(),
            author: "leo".to_string(),
            text: "Все счастливые семьи похожи друг на друга".to_string(),
            pub_date: Utc::now(),
            image: None,
            group_id: None,
        };

        let value = serde_json::to_value(&post).unwrap();
        assert_eq!(value["author"], "leo");
        assert!(value.get("author_id").is_none());
        assert!(value.as_object().unwrap().contains_key("group"));
        assert!(value.as_object().unwrap().contains_key("image"));
    }

    #[test]
    fn test_comment_wire_shape() {
        let comment = Comment {
            id: Uuid::new_v4(),
            author_id: Uuid::new_v4(),
            author: "anna".to_string(),
            post_id: Uuid::new_v4(),
            text: "well said".to_string(),
            created: Utc::now(),
        };

        let value = serde_json::to_value(&comment).unwrap();
        assert_eq!(value["author"], "anna");
        assert!(value.get("author_id").is_none());
        assert!(value.get("post").is_some());
        assert!(value.get("post_id").is_none());
    }
}
