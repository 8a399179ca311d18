use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};

use crate::app::AppState;
use crate::auth::validate_jwt;
use crate::database::models::{Profile, User};
use crate::error::ApiError;

/// Authenticated caller, resolved from the token on every request
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user: User,
    pub profile_id: i64,
    /// The raw token the caller presented
    pub token: String,
}

/// Caller identity for routes where a token is optional.
///
/// No `Authorization` header means an anonymous caller; a header that is
/// present but invalid is still rejected.
#[derive(Clone, Debug)]
pub struct MaybeAuthUser(pub Option<AuthUser>);

impl MaybeAuthUser {
    pub fn profile_id(&self) -> Option<i64> {
        self.0.as_ref().map(|auth| auth.profile_id)
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = extract_token_from_headers(&parts.headers)
            .map_err(ApiError::unauthorized)?
            .ok_or_else(|| ApiError::unauthorized("Missing Authorization header"))?;

        resolve(token, state).await
    }
}

#[async_trait]
impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        match extract_token_from_headers(&parts.headers).map_err(ApiError::unauthorized)? {
            Some(token) => Ok(MaybeAuthUser(Some(resolve(token, state).await?))),
            None => Ok(MaybeAuthUser(None)),
        }
    }
}

/// Validate the token and load the user and profile it names
async fn resolve(token: String, state: &AppState) -> Result<AuthUser, ApiError> {
    let claims = validate_jwt(&token, &state.config.security).map_err(|e| {
        tracing::warn!("Rejected token: {}", e);
        ApiError::from(e)
    })?;

    let user = User::find_by_id(&state.db, claims.sub).await?.ok_or_else(|| {
        tracing::warn!("Token subject {} no longer exists", claims.sub);
        ApiError::unauthorized("User for this token no longer exists")
    })?;

    let profile = Profile::find_by_user_id(&state.db, user.id)
        .await?
        .ok_or_else(|| ApiError::internal_server_error("User has no profile"))?;

    Ok(AuthUser {
        user,
        profile_id: profile.id,
        token,
    })
}

/// Pull the token out of `Authorization: Token <jwt>` (or `Bearer <jwt>`).
/// `Ok(None)` when the header is absent.
fn extract_token_from_headers(headers: &HeaderMap) -> Result<Option<String>, String> {
    let Some(auth_header) = headers.get("authorization") else {
        return Ok(None);
    };

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format".to_string())?;

    let token = auth_str
        .strip_prefix("Token ")
        .or_else(|| auth_str.strip_prefix("Bearer "))
        .ok_or_else(|| "Authorization header must use Token format".to_string())?;

    if token.trim().is_empty() {
        return Err("Empty JWT token".to_string());
    }
    Ok(Some(token.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("Authorization", HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn accepts_token_and_bearer_schemes() {
        assert_eq!(extract_token_from_headers(&headers("Token abc")).unwrap(), Some("abc".to_string()));
        assert_eq!(extract_token_from_headers(&headers("Bearer abc")).unwrap(), Some("abc".to_string()));
    }

    #[test]
    fn missing_header_is_anonymous() {
        assert_eq!(extract_token_from_headers(&HeaderMap::new()).unwrap(), None);
    }

    #[test]
    fn rejects_other_schemes_and_empty_tokens() {
        assert!(extract_token_from_headers(&headers("Basic abc")).is_err());
        assert!(extract_token_from_headers(&headers("Token  ")).is_err());
    }
}
