use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::db::group_repo;
use crate::error::{AppError, Result};
use crate::middleware::UserId;
use crate::models::GroupResponse;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateGroupRequest {
    #[validate(length(min = 1, max = 200, message = "title must be 1-200 characters"))]
    pub title: String,

    #[validate(length(min = 1, max = 200, message = "slug must be 1-200 characters"))]
    pub slug: String,

    #[validate(length(min = 1, message = "this field may not be blank"))]
    pub description: String,
}

/// GET /api/v1/group
pub async fn list_groups(pool: web::Data<PgPool>) -> Result<HttpResponse> {
    let groups = group_repo::list(&pool).await?;
    let body: Vec<GroupResponse> = groups.into_iter().map(GroupResponse::from).collect();

    Ok(HttpResponse::Ok().json(body))
}

/// GET /api/v1/group/{id}
pub async fn get_group(pool: web::Data<PgPool>, path: web::Path<Uuid>) -> Result<HttpResponse> {
    let id = path.into_inner();
    let group = group_repo::find_by_id(&pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Group {} not found", id)))?;

    Ok(HttpResponse::Ok().json(GroupResponse::from(group)))
}

/// POST /api/v1/group
pub async fn create_group(
    _user: UserId,
    pool: web::Data<PgPool>,
    req: web::Json<CreateGroupRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    if group_repo::slug_exists(&pool, &req.slug).await? {
        return Err(AppError::validation(
            "slug",
            "a group with that slug already exists",
        ));
    }

    let group = group_repo::create_group(&pool, &req.title, &req.slug, &req.description).await?;

    tracing::info!("Group {} created ({})", group.title, group.slug);

    Ok(HttpResponse::Created().json(GroupResponse::from(group)))
}
