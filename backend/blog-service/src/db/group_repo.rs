/// Group repository
use crate::models::Group;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

pub async fn create_group(
    pool: &PgPool,
    title: &str,
    slug: &str,
    description: &str,
) -> Result<Group, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query_as::<_, Group>(
        r#"
        INSERT INTO groups (id, title, slug, description, created_at)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, title, slug, description, created_at
        "#,
    )
    .bind(id)
    .bind(title)
    .bind(slug)
    .bind(description)
    .bind(now)
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Group>, sqlx::Error> {
    sqlx::query_as::<_, Group>(
        r#"
        SELECT id, title, slug, description, created_at
        FROM groups
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// List all groups in title order
pub async fn list(pool: &PgPool) -> Result<Vec<Group>, sqlx::Error> {
    sqlx::query_as::<_, Group>(
        r#"
        SELECT id, title, slug, description, created_at
        FROM groups
        ORDER BY title
        "#,
    )
    .fetch_all(pool)
    .await
}

/// Check if a slug is already taken
pub async fn slug_exists(pool: &PgPool, slug: &str) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS(SELECT 1 FROM groups WHERE slug = $1)
        "#,
    )
    .bind(slug)
    .fetch_one(pool)
    .await
}
