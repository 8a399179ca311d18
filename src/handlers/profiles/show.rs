// handlers/profiles/show.rs - GET /api/profiles/:username

use axum::extract::State;

use super::load_profile;
use crate::api::{ProfileBody, ProfileView};
use crate::app::AppState;
use crate::middleware::{ApiPath, ApiResponse, ApiResult, MaybeAuthUser};

pub async fn get(
    State(state): State<AppState>,
    viewer: MaybeAuthUser,
    ApiPath(username): ApiPath<String>,
) -> ApiResult<ProfileBody> {
    let profile = load_profile(&state.db, &username).await?;
    let view = ProfileView::load(&state.db, profile, viewer.profile_id()).await?;
    Ok(ApiResponse::success(ProfileBody::new(view)))
}
