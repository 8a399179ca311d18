// handlers/users/register.rs - POST /api/users

use axum::extract::State;
use sqlx::SqlitePool;

use crate::api::{NewUser, UserBody, UserEnvelope};
use crate::app::AppState;
use crate::auth::{generate_jwt, password::hash_password};
use crate::config::SecurityConfig;
use crate::database::models::{Profile, User};
use crate::database::DatabaseError;
use crate::error::ApiError;
use crate::middleware::{ApiJson, ApiResponse, ApiResult};

/// Create the account and hand back a token
pub async fn post(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<UserEnvelope<NewUser>>,
) -> ApiResult<UserBody> {
    let user = create_account(&state.db, &state.config.security, body.user).await?;
    let token = generate_jwt(user.id, &state.config.security)?;
    Ok(ApiResponse::created(UserBody::from_user(user, token)))
}

/// Validate, hash the password and insert the user and its profile in one
/// transaction. A taken username or email is a 409.
pub async fn create_account(
    pool: &SqlitePool,
    security: &SecurityConfig,
    new_user: NewUser,
) -> Result<User, ApiError> {
    new_user.validate()?;
    let hashed = hash_password(new_user.password, security.bcrypt_cost).await?;

    let mut tx = pool.begin().await?;
    let user_id = User::create(&mut *tx, &new_user.username, &new_user.email, &hashed)
        .await
        .map_err(already_registered)?;
    Profile::create(&mut *tx, user_id).await?;
    tx.commit().await?;

    let user = User::find_by_id(pool, user_id)
        .await?
        .ok_or_else(ApiError::user_not_found)?;

    tracing::info!("Registered user {}", user.username);
    Ok(user)
}

fn already_registered(err: DatabaseError) -> ApiError {
    match err {
        DatabaseError::UniqueViolation(_) => ApiError::user_already_registered(),
        other => other.into(),
    }
}
