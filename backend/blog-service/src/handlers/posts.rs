use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;
use validator::Validate;

use crate::db::{group_repo, post_repo, user_repo};
use crate::error::{AppError, Result};
use crate::middleware::{permissions, UserId};
use crate::models::PostResponse;

// ============================================
// Request structs
// ============================================

#[derive(Debug, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[validate(length(min = 1, message = "this field may not be blank"))]
    pub text: String,
    pub group: Option<Uuid>,
    pub image: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PatchPostRequest {
    pub text: Option<String>,
    pub group: Option<Uuid>,
    pub image: Option<String>,
}

const DEFAULT_PAGE_SIZE: i64 = 50;
const MAX_PAGE_SIZE: i64 = 100;

fn page_params(query: &HashMap<String, String>) -> (i64, i64) {
    let limit = query
        .get("limit")
        .and_then(|l| l.parse::<i64>().ok())
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .min(MAX_PAGE_SIZE);
    let offset = query
        .get("offset")
        .and_then(|o| o.parse::<i64>().ok())
        .unwrap_or(0)
        .max(0);
    (limit, offset)
}

// ============================================
// Handler functions
// ============================================

/// GET /api/v1/posts?group=<id>&limit=50&offset=0
pub async fn list_posts(
    pool: web::Data<PgPool>,
    query: web::Query<HashMap<String, String>>,
) -> Result<HttpResponse> {
    let group_id = match query.get("group") {
        Some(raw) => Some(
            Uuid::parse_str(raw).map_err(|_| AppError::validation("group", "invalid group id"))?,
        ),
        None => None,
    };

    // A dangling group reference in the filter is a 404, not an empty page
    if let Some(gid) = group_id {
        group_repo::find_by_id(&pool, gid)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Group {} not found", gid)))?;
    }

    let (limit, offset) = page_params(&query);
    let posts = post_repo::list(&pool, group_id, limit, offset).await?;

    Ok(HttpResponse::Ok().json(posts))
}

/// GET /api/v1/posts/{id}
pub async fn get_post(pool: web::Data<PgPool>, path: web::Path<Uuid>) -> Result<HttpResponse> {
    let id = path.into_inner();
    let post = post_repo::find_response_by_id(&pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post {} not found", id)))?;

    Ok(HttpResponse::Ok().json(post))
}

/// POST /api/v1/posts
/// Author is forced to the authenticated caller
pub async fn create_post(
    user: UserId,
    pool: web::Data<PgPool>,
    req: web::Json<CreatePostRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let author = user_repo::find_by_id(&pool, user.0)
        .await?
        .ok_or_else(|| AppError::Authentication("Unknown user".to_string()))?;

    if let Some(gid) = req.group {
        group_repo::find_by_id(&pool, gid)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Group {} not found", gid)))?;
    }

    let post =
        post_repo::create_post(&pool, author.id, &req.text, req.group, req.image.as_deref())
            .await?;

    tracing::info!("Post {} created by {}", post.id, author.username);

    Ok(HttpResponse::Created().json(PostResponse {
        id: post.id,
        text: post.text,
        author: Some(author.username),
        pub_date: post.pub_date,
        group: post.group_id,
        image: post.image,
    }))
}

/// PUT /api/v1/posts/{id}
/// Full update; owner only
pub async fn update_post(
    user: UserId,
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
    req: web::Json<CreatePostRequest>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    req.validate()?;

    let post = post_repo::find_by_id(&pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post {} not found", id)))?;
    permissions::check_post_ownership(user.0, &post)?;

    if let Some(gid) = req.group {
        group_repo::find_by_id(&pool, gid)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Group {} not found", gid)))?;
    }

    post_repo::update_post(&pool, id, &req.text, req.group, req.image.as_deref()).await?;

    let body = post_repo::find_response_by_id(&pool, id)
        .await?
        .ok_or_else(|| AppError::Internal("Post disappeared during update".to_string()))?;

    Ok(HttpResponse::Ok().json(body))
}

/// PATCH /api/v1/posts/{id}
/// Partial update; omitted fields keep their value
pub async fn patch_post(
    user: UserId,
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
    req: web::Json<PatchPostRequest>,
) -> Result<HttpResponse> {
    let id = path.into_inner();

    let post = post_repo::find_by_id(&pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post {} not found", id)))?;
    permissions::check_post_ownership(user.0, &post)?;

    let text = match &req.text {
        Some(t) => {
            if t.trim().is_empty() {
                return Err(AppError::validation("text", "this field may not be blank"));
            }
            t.clone()
        }
        None => post.text.clone(),
    };
    let group = req.group.or(post.group_id);
    let image = req.image.clone().or(post.image.clone());

    if let Some(gid) = req.group {
        group_repo::find_by_id(&pool, gid)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Group {} not found", gid)))?;
    }

    post_repo::update_post(&pool, id, &text, group, image.as_deref()).await?;

    let body = post_repo::find_response_by_id(&pool, id)
        .await?
        .ok_or_else(|| AppError::Internal("Post disappeared during update".to_string()))?;

    Ok(HttpResponse::Ok().json(body))
}

/// DELETE /api/v1/posts/{id}
/// Owner only
pub async fn delete_post(
    user: UserId,
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let id = path.into_inner();

    let post = post_repo::find_by_id(&pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post {} not found", id)))?;
    permissions::check_post_ownership(user.0, &post)?;

    post_repo::delete_post(&pool, id).await?;

    tracing::info!("Post {} deleted", id);

    Ok(HttpResponse::NoContent().finish())
}
