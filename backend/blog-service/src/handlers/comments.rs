use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;
use validator::Validate;

use crate::db::{comment_repo, post_repo, user_repo};
use crate::error::{AppError, Result};
use crate::middleware::{permissions, UserId};
use crate::models::{Comment, CommentResponse};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(length(min = 1, message = "this field may not be blank"))]
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct PatchCommentRequest {
    pub text: Option<String>,
}

/// 404 unless the parent post exists
async fn ensure_post_exists(pool: &PgPool, post_id: Uuid) -> Result<()> {
    post_repo::find_by_id(pool, post_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post {} not found", post_id)))?;
    Ok(())
}

/// 404 unless the comment exists under the post named in the path
async fn find_comment_under_post(
    pool: &PgPool,
    post_id: Uuid,
    comment_id: Uuid,
) -> Result<Comment> {
    ensure_post_exists(pool, post_id).await?;

    let comment = comment_repo::find_by_id(pool, comment_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Comment {} not found", comment_id)))?;

    if comment.post_id != Some(post_id) {
        return Err(AppError::NotFound(format!(
            "Comment {} not found",
            comment_id
        )));
    }

    Ok(comment)
}

/// GET /api/v1/posts/{post_id}/comments?limit=50&offset=0
pub async fn list_comments(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
    query: web::Query<HashMap<String, String>>,
) -> Result<HttpResponse> {
    let post_id = path.into_inner();
    ensure_post_exists(&pool, post_id).await?;

    let limit = query
        .get("limit")
        .and_then(|l| l.parse::<i64>().ok())
        .unwrap_or(50)
        .min(100);
    let offset = query
        .get("offset")
        .and_then(|o| o.parse::<i64>().ok())
        .unwrap_or(0)
        .max(0);

    let comments = comment_repo::list_by_post(&pool, post_id, limit, offset).await?;

    Ok(HttpResponse::Ok().json(comments))
}

/// GET /api/v1/posts/{post_id}/comments/{id}
pub async fn get_comment(
    pool: web::Data<PgPool>,
    path: web::Path<(Uuid, Uuid)>,
) -> Result<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();
    find_comment_under_post(&pool, post_id, comment_id).await?;

    let body = comment_repo::find_response_by_id(&pool, comment_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Comment {} not found", comment_id)))?;

    Ok(HttpResponse::Ok().json(body))
}

/// POST /api/v1/posts/{post_id}/comments
/// Author is forced to the caller, post to the path parameter
pub async fn create_comment(
    user: UserId,
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
    req: web::Json<CreateCommentRequest>,
) -> Result<HttpResponse> {
    let post_id = path.into_inner();
    req.validate()?;
    ensure_post_exists(&pool, post_id).await?;

    let author = user_repo::find_by_id(&pool, user.0)
        .await?
        .ok_or_else(|| AppError::Authentication("Unknown user".to_string()))?;

    let comment = comment_repo::create_comment(&pool, post_id, author.id, &req.text).await?;

    Ok(HttpResponse::Created().json(CommentResponse {
        id: comment.id,
        author: Some(author.username),
        post: comment.post_id,
        text: comment.text,
        created: comment.created,
    }))
}

/// PUT /api/v1/posts/{post_id}/comments/{id}
/// Owner only; text required
pub async fn update_comment(
    user: UserId,
    pool: web::Data<PgPool>,
    path: web::Path<(Uuid, Uuid)>,
    req: web::Json<CreateCommentRequest>,
) -> Result<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();
    req.validate()?;

    let comment = find_comment_under_post(&pool, post_id, comment_id).await?;
    permissions::check_comment_ownership(user.0, &comment)?;

    comment_repo::update_comment(&pool, comment_id, &req.text).await?;

    let body = comment_repo::find_response_by_id(&pool, comment_id)
        .await?
        .ok_or_else(|| AppError::Internal("Comment disappeared during update".to_string()))?;

    Ok(HttpResponse::Ok().json(body))
}

/// PATCH /api/v1/posts/{post_id}/comments/{id}
/// Owner only; omitted text keeps its value
pub async fn patch_comment(
    user: UserId,
    pool: web::Data<PgPool>,
    path: web::Path<(Uuid, Uuid)>,
    req: web::Json<PatchCommentRequest>,
) -> Result<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();

    let comment = find_comment_under_post(&pool, post_id, comment_id).await?;
    permissions::check_comment_ownership(user.0, &comment)?;

    let text = match &req.text {
        Some(t) => {
            if t.trim().is_empty() {
                return Err(AppError::validation("text", "this field may not be blank"));
            }
            t.clone()
        }
        None => comment.text.clone(),
    };

    comment_repo::update_comment(&pool, comment_id, &text).await?;

    let body = comment_repo::find_response_by_id(&pool, comment_id)
        .await?
        .ok_or_else(|| AppError::Internal("Comment disappeared during update".to_string()))?;

    Ok(HttpResponse::Ok().json(body))
}

/// DELETE /api/v1/posts/{post_id}/comments/{id}
/// Owner only
pub async fn delete_comment(
    user: UserId,
    pool: web::Data<PgPool>,
    path: web::Path<(Uuid, Uuid)>,
) -> Result<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();

    let comment = find_comment_under_post(&pool, post_id, comment_id).await?;
    permissions::check_comment_ownership(user.0, &comment)?;

    comment_repo::delete_comment(&pool, comment_id).await?;

    Ok(HttpResponse::NoContent().finish())
}
