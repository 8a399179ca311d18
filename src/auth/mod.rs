use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::SecurityConfig;

pub mod password;

/// Token claims; `sub` is the user id
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(user_id: i64, expiry_hours: u64) -> Self {
        let now = Utc::now();
        let exp = (now + Duration::hours(expiry_hours as i64)).timestamp();

        Self {
            sub: user_id,
            exp,
            iat: now.timestamp(),
        }
    }
}

#[derive(Debug, Error)]
pub enum JwtError {
    #[error("JWT generation error: {0}")]
    TokenGeneration(String),

    #[error("{0}")]
    Invalid(String),

    #[error("Invalid JWT secret")]
    InvalidSecret,
}

/// Issue a signed access token for `user_id`
pub fn generate_jwt(user_id: i64, security: &SecurityConfig) -> Result<String, JwtError> {
    let secret = &security.jwt_secret;

    if secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let claims = Claims::new(user_id, security.jwt_expiry_hours);
    let encoding_key = EncodingKey::from_secret(secret.as_bytes());

    encode(&Header::default(), &claims, &encoding_key)
        .map_err(|e| JwtError::TokenGeneration(e.to_string()))
}

/// Validate signature and expiry, returning the claims
pub fn validate_jwt(token: &str, security: &SecurityConfig) -> Result<Claims, JwtError> {
    let secret = &security.jwt_secret;

    if secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let validation = Validation::default();

    let token_data = decode::<Claims>(token, &decoding_key, &validation)
        .map_err(|e| JwtError::Invalid(format!("Invalid JWT token: {}", e)))?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    #[test]
    fn issued_tokens_validate() {
        let security = AppConfig::test().security;
        let token = generate_jwt(7, &security).unwrap();

        let claims = validate_jwt(&token, &security).unwrap();
        assert_eq!(claims.sub, 7);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn tokens_from_another_secret_are_rejected() {
        let security = AppConfig::test().security;
        let mut other = security.clone();
        other.jwt_secret = "another-secret".to_string();

        let token = generate_jwt(7, &other).unwrap();
        assert!(matches!(validate_jwt(&token, &security), Err(JwtError::Invalid(_))));
    }

    #[test]
    fn expired_tokens_are_rejected() {
        let security = AppConfig::test().security;
        let claims = Claims {
            sub: 7,
            iat: 0,
            exp: 1,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(security.jwt_secret.as_bytes()),
        )
        .unwrap();

        assert!(validate_jwt(&token, &security).is_err());
    }

    #[test]
    fn empty_secret_is_refused() {
        let mut security = AppConfig::test().security;
        security.jwt_secret.clear();
        assert!(matches!(generate_jwt(1, &security), Err(JwtError::InvalidSecret)));
    }

    #[test]
    fn errors_render_their_messages() {
        assert_eq!(JwtError::InvalidSecret.to_string(), "Invalid JWT secret");
        assert_eq!(JwtError::TokenGeneration("bad key".into()).to_string(), "JWT generation error: bad key");
        let security = AppConfig::test().security;
        let err = validate_jwt("not-a-token", &security).unwrap_err();
        assert!(err.to_string().starts_with("Invalid JWT token"), "got {err}");
        let _: &dyn std::error::Error = &err;
    }
}
