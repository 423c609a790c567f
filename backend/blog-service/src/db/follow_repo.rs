/// Follow repository - directed user -> following edges
use crate::models::{Follow, FollowResponse};
use sqlx::PgPool;
use uuid::Uuid;

/// Race-safe create. The (user_id, following_id) pair is unique at the
/// storage level, so two concurrent requests for the same edge cannot both
/// insert; the loser observes `None` exactly like a plain duplicate.
pub async fn create_follow(
    pool: &PgPool,
    user_id: Uuid,
    following_id: Uuid,
) -> Result<Option<Uuid>, sqlx::Error> {
    sqlx::query_scalar::<_, Uuid>(
        r#"
        INSERT INTO follows (id, user_id, following_id, created_at)
        VALUES ($1, $2, $3, NOW())
        ON CONFLICT (user_id, following_id) DO NOTHING
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(following_id)
    .fetch_optional(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Follow>, sqlx::Error> {
    sqlx::query_as::<_, Follow>(
        r#"
        SELECT id, user_id, following_id, created_at
        FROM follows
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Idempotent delete; returns true if a row was removed
pub async fn delete_follow(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let affected = sqlx::query("DELETE FROM follows WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?
        .rows_affected();

    Ok(affected > 0)
}

/// List follow edges as handle pairs, ordered by the followed handle.
/// An exact-match `search` restricts to edges touching that handle on
/// either side.
pub async fn list(pool: &PgPool, search: Option<&str>) -> Result<Vec<FollowResponse>, sqlx::Error> {
    sqlx::query_as::<_, FollowResponse>(
        r#"
        SELECT f.id, fu.username AS "user", tu.username AS following
        FROM follows f
        JOIN users fu ON fu.id = f.user_id
        JOIN users tu ON tu.id = f.following_id
        WHERE $1::text IS NULL OR fu.username = $1 OR tu.username = $1
        ORDER BY tu.username
        "#,
    )
    .bind(search)
    .fetch_all(pool)
    .await
}

/// Check if user A follows user B
pub async fn is_following(
    pool: &PgPool,
    user_id: Uuid,
    following_id: Uuid,
) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS(SELECT 1 FROM follows WHERE user_id = $1 AND following_id = $2)
        "#,
    )
    .bind(user_id)
    .bind(following_id)
    .fetch_one(pool)
    .await
}
