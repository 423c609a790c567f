/// Comment repository - comments are a sub-resource of posts
use crate::models::{Comment, CommentResponse};
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

pub async fn create_comment(
    pool: &PgPool,
    post_id: Uuid,
    author_id: Uuid,
    text: &str,
) -> Result<Comment, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query_as::<_, Comment>(
        r#"
        INSERT INTO comments (id, post_id, author_id, text, created)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, post_id, author_id, text, created
        "#,
    )
    .bind(id)
    .bind(post_id)
    .bind(author_id)
    .bind(text)
    .bind(now)
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Comment>, sqlx::Error> {
    sqlx::query_as::<_, Comment>(
        r#"
        SELECT id, post_id, author_id, text, created
        FROM comments
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Wire representation of one comment, author rendered as handle
pub async fn find_response_by_id(
    pool: &PgPool,
    id: Uuid,
) -> Result<Option<CommentResponse>, sqlx::Error> {
    sqlx::query_as::<_, CommentResponse>(
        r#"
        SELECT c.id, u.username AS author, c.post_id AS post, c.text, c.created
        FROM comments c
        LEFT JOIN users u ON u.id = c.author_id
        WHERE c.id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// List a post's comments in creation order (oldest first)
pub async fn list_by_post(
    pool: &PgPool,
    post_id: Uuid,
    limit: i64,
    offset: i64,
) -> Result<Vec<CommentResponse>, sqlx::Error> {
    sqlx::query_as::<_, CommentResponse>(
        r#"
        SELECT c.id, u.username AS author, c.post_id AS post, c.text, c.created
        FROM comments c
        LEFT JOIN users u ON u.id = c.author_id
        WHERE c.post_id = $1
        ORDER BY c.created
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(post_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

/// Update the text; author, post, and created are immutable
pub async fn update_comment(pool: &PgPool, id: Uuid, text: &str) -> Result<Comment, sqlx::Error> {
    sqlx::query_as::<_, Comment>(
        r#"
        UPDATE comments
        SET text = $1
        WHERE id = $2
        RETURNING id, post_id, author_id, text, created
        "#,
    )
    .bind(text)
    .bind(id)
    .fetch_one(pool)
    .await
}

pub async fn delete_comment(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM comments WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(())
}
