/// Token issuance, refresh, and registration
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::db::user_repo;
use crate::error::{AppError, Result};
use crate::models::PublicUser;
use crate::security::{jwt, password};

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 150, message = "username must be 3-150 characters"))]
    pub username: String,

    #[validate(email(message = "enter a valid email address"))]
    pub email: String,

    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct TokenRequest {
    #[validate(length(min = 1, message = "this field may not be blank"))]
    pub username: String,

    #[validate(length(min = 1, message = "this field may not be blank"))]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct TokenRefreshRequest {
    pub refresh: String,
}

/// POST /api/v1/users
pub async fn register(
    pool: web::Data<PgPool>,
    req: web::Json<RegisterRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    if user_repo::username_exists(&pool, &req.username).await? {
        return Err(AppError::validation(
            "username",
            "a user with that username already exists",
        ));
    }
    if user_repo::email_exists(&pool, &req.email).await? {
        return Err(AppError::validation(
            "email",
            "a user with that email already exists",
        ));
    }

    let password_hash =
        password::hash_password(&req.password).map_err(|e| AppError::Internal(e.to_string()))?;
    let user = user_repo::create_user(&pool, &req.username, &req.email, &password_hash).await?;

    tracing::info!("User registered: {}", user.username);

    Ok(HttpResponse::Created().json(PublicUser::from(user)))
}

/// POST /api/v1/token
/// Obtain an access/refresh pair from username + password
pub async fn obtain_token(
    pool: web::Data<PgPool>,
    req: web::Json<TokenRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let user = user_repo::find_by_username(&pool, &req.username)
        .await?
        .ok_or_else(|| AppError::Authentication("Invalid username or password".to_string()))?;

    let valid = password::verify_password(&req.password, &user.password_hash)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    if !valid {
        return Err(AppError::Authentication(
            "Invalid username or password".to_string(),
        ));
    }

    let tokens = jwt::generate_token_pair(user.id, &user.username)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    tracing::info!("Token pair issued for {}", user.username);

    Ok(HttpResponse::Ok().json(tokens))
}

/// POST /api/v1/token/refresh
/// Stateless rotation: a valid refresh token buys a fresh pair
pub async fn refresh_token(
    pool: web::Data<PgPool>,
    req: web::Json<TokenRefreshRequest>,
) -> Result<HttpResponse> {
    let token_data = jwt::validate_refresh_token(&req.refresh)
        .map_err(|_| AppError::Authentication("Invalid or expired refresh token".to_string()))?;

    let user_id = Uuid::parse_str(&token_data.claims.sub)
        .map_err(|_| AppError::Authentication("Invalid subject in token".to_string()))?;

    // The account may have been deleted since the token was issued
    let user = user_repo::find_by_id(&pool, user_id)
        .await?
        .ok_or_else(|| AppError::Authentication("Unknown user".to_string()))?;

    let tokens = jwt::generate_token_pair(user.id, &user.username)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(HttpResponse::Ok().json(tokens))
}
