/// Authorization rules for the blog service
///
/// Implements the author-or-read-only policy: anyone may read, only the
/// author may change or delete. Checks run against an already-fetched
/// record, so a missing target surfaces as 404 before ownership is ever
/// considered.
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::{Comment, Post};

/// Check if a user authored a post
pub fn check_post_author(user_id: Uuid, post: &Post) -> Result<()> {
    if post.author_id == user_id {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "You don't have permission to modify this post".to_string(),
        ))
    }
}

/// Check if a user authored a comment
pub fn check_comment_author(user_id: Uuid, comment: &Comment) -> Result<()> {
    if comment.author_id == user_id {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "You don't have permission to modify this comment".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn post_by(author_id: Uuid) -> Post {
        Post {
            id: Uuid::new_v4(),
            author_id,
            author: "leo".to_string(),
            text: "first".to_string(),
            pub_date: Utc::now(),
            image: None,
            group_id: None,
        }
    }

    #[test]
    fn test_author_may_modify_post() {
        let author = Uuid::new_v4();
        assert!(check_post_author(author, &post_by(author)).is_ok());
    }

    #[test]
    fn test_non_author_is_forbidden() {
        let err = check_post_author(Uuid::new_v4(), &post_by(Uuid::new_v4())).unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[test]
    fn test_comment_author_check() {
        let author = Uuid::new_v4();
        let comment = Comment {
            id: Uuid::new_v4(),
            author_id: author,
            author: "anna".to_string(),
            post_id: Uuid::new_v4(),
            text: "ok".to_string(),
            created: Utc::now(),
        };

        assert!(check_comment_author(author, &comment).is_ok());
        assert!(check_comment_author(Uuid::new_v4(), &comment).is_err());
    }
}
