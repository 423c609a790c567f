use anyhow::{anyhow, Result};
/// JWT token generation and validation using HS256
/// Access tokens: 1-hour expiry
/// Refresh tokens: 30-day expiry
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, TokenData, Validation};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::sync::RwLock;
use uuid::Uuid;

const ACCESS_TOKEN_EXPIRY_HOURS: i64 = 1;
const REFRESH_TOKEN_EXPIRY_DAYS: i64 = 30;

/// JWT Claims structure
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Token type: "access" or "refresh"
    pub token_type: String,
    /// Handle of the user the token was issued to
    pub username: String,
}

/// Token pair response, matching the obtain/refresh endpoint wire format
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access: String,
    pub refresh: String,
    pub token_type: String,
    pub expires_in: i64,
}

// Thread-safe mutable storage for JWT keys loaded from configuration
lazy_static! {
    static ref JWT_KEYS: RwLock<Option<(EncodingKey, DecodingKey)>> = RwLock::new(None);
}

/// Initialize JWT keys from the configured signing secret
/// Must be called during application startup before any JWT operations
pub fn initialize_keys(secret: &str) -> Result<()> {
    if secret.is_empty() {
        return Err(anyhow!("JWT secret must not be empty"));
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    let decoding_key = DecodingKey::from_secret(secret.as_bytes());

    let mut keys = JWT_KEYS
        .write()
        .map_err(|e| anyhow!("Failed to acquire write lock on JWT keys: {}", e))?;
    *keys = Some((encoding_key, decoding_key));

    Ok(())
}

fn get_encoding_key() -> Result<EncodingKey> {
    let keys = JWT_KEYS
        .read()
        .map_err(|e| anyhow!("Failed to acquire read lock on JWT keys: {}", e))?;

    keys.as_ref()
        .map(|(enc, _)| enc.clone())
        .ok_or_else(|| anyhow!("JWT keys not initialized. Call initialize_keys() during startup"))
}

fn get_decoding_key() -> Result<DecodingKey> {
    let keys = JWT_KEYS
        .read()
        .map_err(|e| anyhow!("Failed to acquire read lock on JWT keys: {}", e))?;

    keys.as_ref()
        .map(|(_, dec)| dec.clone())
        .ok_or_else(|| anyhow!("JWT keys not initialized. Call initialize_keys() during startup"))
}

/// Generate a new access token
pub fn generate_access_token(user_id: Uuid, username: &str) -> Result<String> {
    let now = Utc::now();
    let expiry = now + Duration::hours(ACCESS_TOKEN_EXPIRY_HOURS);

    let claims = Claims {
        sub: user_id.to_string(),
        iat: now.timestamp(),
        exp: expiry.timestamp(),
        token_type: "access".to_string(),
        username: username.to_string(),
    };

    let encoding_key = get_encoding_key()?;
    encode(&Header::default(), &claims, &encoding_key)
        .map_err(|e| anyhow!("Failed to generate access token: {}", e))
}

/// Generate a new refresh token
pub fn generate_refresh_token(user_id: Uuid, username: &str) -> Result<String> {
    let now = Utc::now();
    let expiry = now + Duration::days(REFRESH_TOKEN_EXPIRY_DAYS);

    let claims = Claims {
        sub: user_id.to_string(),
        iat: now.timestamp(),
        exp: expiry.timestamp(),
        token_type: "refresh".to_string(),
        username: username.to_string(),
    };

    let encoding_key = get_encoding_key()?;
    encode(&Header::default(), &claims, &encoding_key)
        .map_err(|e| anyhow!("Failed to generate refresh token: {}", e))
}

/// Generate both access and refresh tokens
pub fn generate_token_pair(user_id: Uuid, username: &str) -> Result<TokenResponse> {
    let access = generate_access_token(user_id, username)?;
    let refresh = generate_refresh_token(user_id, username)?;

    Ok(TokenResponse {
        access,
        refresh,
        token_type: "Bearer".to_string(),
        expires_in: ACCESS_TOKEN_EXPIRY_HOURS * 3600,
    })
}

/// Validate and decode a token
pub fn validate_token(token: &str) -> Result<TokenData<Claims>> {
    let decoding_key = get_decoding_key()?;
    decode::<Claims>(
        token,
        &decoding_key,
        &Validation::new(jsonwebtoken::Algorithm::HS256),
    )
    .map_err(|e| anyhow!("Token validation failed: {}", e))
}

/// Validate a token presented as a Bearer credential; refresh tokens are
/// not accepted here
pub fn validate_access_token(token: &str) -> Result<TokenData<Claims>> {
    let token_data = validate_token(token)?;
    if token_data.claims.token_type != "access" {
        return Err(anyhow!("Not an access token"));
    }
    Ok(token_data)
}

/// Validate a token presented to the refresh endpoint
pub fn validate_refresh_token(token: &str) -> Result<TokenData<Claims>> {
    let token_data = validate_token(token)?;
    if token_data.claims.token_type != "refresh" {
        return Err(anyhow!("Not a refresh token"));
    }
    Ok(token_data)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init_test_keys() {
        initialize_keys("test-signing-secret").expect("Failed to initialize test keys");
    }

    #[test]
    fn test_generate_access_token() {
        init_test_keys();
        let user_id = Uuid::new_v4();

        let token = generate_access_token(user_id, "testuser");
        assert!(token.is_ok());

        let token_str = token.unwrap();
        assert!(!token_str.is_empty());
        // JWT tokens have 3 parts separated by dots
        assert_eq!(token_str.matches('.').count(), 2);
    }

    #[test]
    fn test_generate_token_pair() {
        init_test_keys();
        let user_id = Uuid::new_v4();

        let response = generate_token_pair(user_id, "testuser");
        assert!(response.is_ok());

        let tokens = response.unwrap();
        assert!(!tokens.access.is_empty());
        assert!(!tokens.refresh.is_empty());
        assert_eq!(tokens.token_type, "Bearer");
        assert_eq!(tokens.expires_in, 3600);
    }

    #[test]
    fn test_validate_valid_token() {
        init_test_keys();
        let user_id = Uuid::new_v4();

        let token =
            generate_access_token(user_id, "testuser").expect("Failed to generate token");

        let token_data = validate_token(&token).expect("Failed to validate token");
        assert_eq!(token_data.claims.sub, user_id.to_string());
        assert_eq!(token_data.claims.username, "testuser");
        assert_eq!(token_data.claims.token_type, "access");
    }

    #[test]
    fn test_validate_invalid_token() {
        init_test_keys();
        let result = validate_token("not.a.valid.token");
        assert!(result.is_err());
    }

    #[test]
    fn test_refresh_token_rejected_as_access_token() {
        init_test_keys();
        let user_id = Uuid::new_v4();

        let refresh =
            generate_refresh_token(user_id, "testuser").expect("Failed to generate token");

        assert!(validate_access_token(&refresh).is_err());
        assert!(validate_refresh_token(&refresh).is_ok());
    }

    #[test]
    fn test_access_token_rejected_as_refresh_token() {
        init_test_keys();
        let user_id = Uuid::new_v4();

        let access =
            generate_access_token(user_id, "testuser").expect("Failed to generate token");

        assert!(validate_refresh_token(&access).is_err());
        assert!(validate_access_token(&access).is_ok());
    }

    #[test]
    fn test_refresh_token_has_longer_expiry() {
        init_test_keys();
        let user_id = Uuid::new_v4();

        let access =
            generate_access_token(user_id, "testuser").expect("Failed to generate access token");
        let refresh =
            generate_refresh_token(user_id, "testuser").expect("Failed to generate refresh token");

        let access_claims = validate_token(&access).expect("valid access token").claims;
        let refresh_claims = validate_token(&refresh).expect("valid refresh token").claims;

        assert!(refresh_claims.exp > access_claims.exp);
    }

    #[test]
    fn test_tampered_token_fails_validation() {
        init_test_keys();
        let user_id = Uuid::new_v4();

        let token =
            generate_access_token(user_id, "testuser").expect("Failed to generate token");
        let mut tampered = token.clone();
        tampered.pop();

        assert!(validate_token(&tampered).is_err());
    }
}
