/// Post repository
use crate::models::{Post, PostResponse};
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

pub async fn create_post(
    pool: &PgPool,
    author_id: Uuid,
    text: &str,
    group_id: Option<Uuid>,
    image: Option<&str>,
) -> Result<Post, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query_as::<_, Post>(
        r#"
        INSERT INTO posts (id, text, pub_date, author_id, group_id, image)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, text, pub_date, author_id, group_id, image
        "#,
    )
    .bind(id)
    .bind(text)
    .bind(now)
    .bind(author_id)
    .bind(group_id)
    .bind(image)
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Post>, sqlx::Error> {
    sqlx::query_as::<_, Post>(
        r#"
        SELECT id, text, pub_date, author_id, group_id, image
        FROM posts
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Wire representation of one post, author rendered as handle
pub async fn find_response_by_id(
    pool: &PgPool,
    id: Uuid,
) -> Result<Option<PostResponse>, sqlx::Error> {
    sqlx::query_as::<_, PostResponse>(
        r#"
        SELECT p.id, p.text, u.username AS author, p.pub_date, p.group_id AS "group", p.image
        FROM posts p
        LEFT JOIN users u ON u.id = p.author_id
        WHERE p.id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// List posts in publication order (newest first), optionally restricted to
/// one group
pub async fn list(
    pool: &PgPool,
    group_id: Option<Uuid>,
    limit: i64,
    offset: i64,
) -> Result<Vec<PostResponse>, sqlx::Error> {
    sqlx::query_as::<_, PostResponse>(
        r#"
        SELECT p.id, p.text, u.username AS author, p.pub_date, p.group_id AS "group", p.image
        FROM posts p
        LEFT JOIN users u ON u.id = p.author_id
        WHERE $1::uuid IS NULL OR p.group_id = $1
        ORDER BY p.pub_date DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(group_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

/// Full update; author and pub_date are immutable
pub async fn update_post(
    pool: &PgPool,
    id: Uuid,
    text: &str,
    group_id: Option<Uuid>,
    image: Option<&str>,
) -> Result<Post, sqlx::Error> {
    sqlx::query_as::<_, Post>(
        r#"
        UPDATE posts
        SET text = $1, group_id = $2, image = $3
        WHERE id = $4
        RETURNING id, text, pub_date, author_id, group_id, image
        "#,
    )
    .bind(text)
    .bind(group_id)
    .bind(image)
    .bind(id)
    .fetch_one(pool)
    .await
}

pub async fn delete_post(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM posts WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(())
}
