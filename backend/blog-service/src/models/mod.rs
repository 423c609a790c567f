use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Post {
    pub id: Uuid,
    pub text: String,
    pub pub_date: DateTime<Utc>,
    pub author_id: Option<Uuid>,
    pub group_id: Option<Uuid>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Group {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Option<Uuid>,
    pub author_id: Option<Uuid>,
    pub text: String,
    pub created: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Follow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub following_id: Uuid,
    pub created_at: DateTime<Utc>,
}

// ============================================
// Wire representations
// ============================================
// Authors and follow participants are rendered as handles, not ids.

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PostResponse {
    pub id: Uuid,
    pub text: String,
    pub author: Option<String>,
    pub pub_date: DateTime<Utc>,
    pub group: Option<Uuid>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CommentResponse {
    pub id: Uuid,
    pub author: Option<String>,
    pub post: Option<Uuid>,
    pub text: String,
    pub created: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FollowResponse {
    pub id: Uuid,
    pub user: String,
    pub following: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupResponse {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub description: String,
}

impl From<Group> for GroupResponse {
    fn from(group: Group) -> Self {
        GroupResponse {
            id: group.id,
            title: group.title,
            slug: group.slug,
            description: group.description,
        }
    }
}

/// User representation safe to expose over the wire
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        PublicUser {
            id: user.id,
            username: user.username,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_user_hides_password_hash() {
        let user = User {
            id: Uuid::new_v4(),
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: "$argon2id$...".to_string(),
            created_at: Utc::now(),
        };

        let public: PublicUser = user.clone().into();
        let body = serde_json::to_value(&public).unwrap();
        assert_eq!(body["username"], "alice");
        assert!(body.get("password_hash").is_none());
    }

    #[test]
    fn test_post_response_serializes_null_group() {
        let response = PostResponse {
            id: Uuid::new_v4(),
            text: "hello".to_string(),
            author: Some("alice".to_string()),
            pub_date: Utc::now(),
            group: None,
            image: None,
        };

        let body = serde_json::to_value(&response).unwrap();
        assert!(body["group"].is_null());
        assert_eq!(body["author"], "alice");
    }
}
