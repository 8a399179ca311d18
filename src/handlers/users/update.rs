// handlers/users/update.rs - PUT /api/user

use axum::extract::State;

use crate::api::{UpdateUser, UserBody, UserEnvelope};
use crate::app::AppState;
use crate::auth::password::hash_password;
use crate::database::models::{User, UserChanges};
use crate::database::DatabaseError;
use crate::error::ApiError;
use crate::middleware::{ApiJson, ApiResponse, ApiResult, AuthUser};

pub async fn put(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(body): ApiJson<UserEnvelope<UpdateUser>>,
) -> ApiResult<UserBody> {
    let update = body.user;
    update.validate()?;

    let password = match update.password {
        Some(plain) => Some(hash_password(plain, state.config.security.bcrypt_cost).await?),
        None => None,
    };

    let changes = UserChanges {
        username: update.username,
        email: update.email,
        password,
        bio: update.bio,
        image: update.image,
    };

    let user = User::update(&state.db, auth.user.id, changes)
        .await
        .map_err(|e| match e {
            DatabaseError::UniqueViolation(_) => ApiError::conflict("Username or email already taken"),
            other => other.into(),
        })?;

    Ok(ApiResponse::success(UserBody::from_user(user, auth.token)))
}
