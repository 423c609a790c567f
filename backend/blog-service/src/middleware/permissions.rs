/// Ownership checks for mutating requests.
///
/// Reads are open; writes on an existing record are allowed only to the
/// identity that authored it. A record whose author was deleted (NULL
/// author) is owned by nobody.
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::{Comment, Follow, Post};

/// Check if a user owns a post
pub fn check_post_ownership(user_id: Uuid, post: &Post) -> Result<()> {
    if post.author_id == Some(user_id) {
        Ok(())
    } else {
        Err(AppError::Authorization(
            "You don't have permission to modify this post".to_string(),
        ))
    }
}

/// Check if a user owns a comment
pub fn check_comment_ownership(user_id: Uuid, comment: &Comment) -> Result<()> {
    if comment.author_id == Some(user_id) {
        Ok(())
    } else {
        Err(AppError::Authorization(
            "You don't have permission to modify this comment".to_string(),
        ))
    }
}

/// Check if a user is the follower side of a follow edge
pub fn check_follow_ownership(user_id: Uuid, follow: &Follow) -> Result<()> {
    if follow.user_id == user_id {
        Ok(())
    } else {
        Err(AppError::Authorization(
            "You don't have permission to delete this subscription".to_string(),
        ))
    }
}
