// handlers/profiles/follow.rs - POST|DELETE /api/profiles/:username/follow

use axum::extract::State;

use super::load_profile;
use crate::api::{ProfileBody, ProfileView};
use crate::app::AppState;
use crate::database::models::Profile;
use crate::middleware::{ApiPath, ApiResponse, ApiResult, AuthUser};

/// Following twice is a no-op
pub async fn post(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(username): ApiPath<String>,
) -> ApiResult<ProfileBody> {
    let profile = load_profile(&state.db, &username).await?;
    Profile::follow(&state.db, auth.profile_id, profile.id).await?;

    let view = ProfileView::load(&state.db, profile, Some(auth.profile_id)).await?;
    Ok(ApiResponse::success(ProfileBody::new(view)))
}

pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(username): ApiPath<String>,
) -> ApiResult<ProfileBody> {
    let profile = load_profile(&state.db, &username).await?;
    Profile::unfollow(&state.db, auth.profile_id, profile.id).await?;

    let view = ProfileView::load(&state.db, profile, Some(auth.profile_id)).await?;
    Ok(ApiResponse::success(ProfileBody::new(view)))
}
