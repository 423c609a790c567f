/// Follow management: create, list with exact-handle search, delete.
///
/// Creation enforces the relationship invariants: no self-follow, no
/// duplicate edge. The duplicate check rides on the storage-level unique
/// constraint, so concurrent requests for the same edge cannot both win.
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

use crate::db::{follow_repo, user_repo};
use crate::error::{AppError, Result};
use crate::middleware::{permissions, UserId};
use crate::models::FollowResponse;

#[derive(Debug, Deserialize)]
pub struct CreateFollowRequest {
    /// Handle of the user to follow
    pub following: Option<String>,
}

/// GET /api/v1/follow?search=<handle>
/// Without a search term the full collection is returned
pub async fn list_follows(
    pool: web::Data<PgPool>,
    query: web::Query<HashMap<String, String>>,
) -> Result<HttpResponse> {
    let search = query.get("search").map(String::as_str);
    let follows = follow_repo::list(&pool, search).await?;

    Ok(HttpResponse::Ok().json(follows))
}

/// POST /api/v1/follow
/// The follower is always the authenticated caller; any caller-supplied
/// `user` value is ignored
pub async fn create_follow(
    user: UserId,
    pool: web::Data<PgPool>,
    req: web::Json<CreateFollowRequest>,
) -> Result<HttpResponse> {
    let following_name = req
        .following
        .as_deref()
        .ok_or_else(|| AppError::validation("following", "this field is required"))?;

    let caller = user_repo::find_by_id(&pool, user.0)
        .await?
        .ok_or_else(|| AppError::Authentication("Unknown user".to_string()))?;

    let target = user_repo::find_by_username(&pool, following_name)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", following_name)))?;

    if caller.id == target.id {
        return Err(AppError::validation(
            "following",
            "cannot follow yourself",
        ));
    }

    let inserted = follow_repo::create_follow(&pool, caller.id, target.id).await?;
    let follow_id = match inserted {
        Some(id) => id,
        None => {
            return Err(AppError::validation(
                "following",
                "already following this user",
            ));
        }
    };

    tracing::info!("{} now follows {}", caller.username, target.username);

    Ok(HttpResponse::Created().json(FollowResponse {
        id: follow_id,
        user: caller.username,
        following: target.username,
    }))
}

/// DELETE /api/v1/follow/{id}
/// Only the follower side of the edge may remove it
pub async fn delete_follow(
    user: UserId,
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let id = path.into_inner();

    let follow = follow_repo::find_by_id(&pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Subscription {} not found", id)))?;
    permissions::check_follow_ownership(user.0, &follow)?;

    follow_repo::delete_follow(&pool, id).await?;

    Ok(HttpResponse::NoContent().finish())
}
