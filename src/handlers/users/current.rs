// handlers/users/current.rs - GET /api/user

use crate::api::UserBody;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};

/// Echo the caller back with the token they presented
pub async fn get(auth: AuthUser) -> ApiResult<UserBody> {
    Ok(ApiResponse::success(UserBody::from_user(auth.user, auth.token)))
}
