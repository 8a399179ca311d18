// handlers/users/login.rs - POST /api/users/login

use axum::extract::State;

use crate::api::{LoginUser, UserBody, UserEnvelope};
use crate::app::AppState;
use crate::auth::{generate_jwt, password::verify_password};
use crate::database::models::User;
use crate::error::ApiError;
use crate::middleware::{ApiJson, ApiResponse, ApiResult};

/// Unknown email and wrong password both answer "User not found"
pub async fn post(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<UserEnvelope<LoginUser>>,
) -> ApiResult<UserBody> {
    let credentials = body.user;

    let user = User::find_by_email(&state.db, &credentials.email)
        .await?
        .ok_or_else(ApiError::user_not_found)?;

    if !verify_password(credentials.password, user.password.clone()).await? {
        tracing::warn!("Failed login for {}", user.email);
        return Err(ApiError::user_not_found());
    }

    let token = generate_jwt(user.id, &state.config.security)?;
    Ok(ApiResponse::success(UserBody::from_user(user, token)))
}
