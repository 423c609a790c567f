pub mod jwt_auth;
pub mod permissions;

// Middleware modules:
// - jwt_auth: JWT Bearer token validation and user_id extraction
// - permissions: ownership checks for mutating requests
// - Request logging: handled by actix_web::middleware::Logger
// - CORS: handled by actix_cors::Cors

pub use jwt_auth::{JwtAuthMiddleware, UserId};
