// handlers/articles/show.rs - GET /api/articles/:slug

use axum::extract::State;

use super::load_article;
use crate::api::ArticleBody;
use crate::app::AppState;
use crate::middleware::{ApiPath, ApiResponse, ApiResult, MaybeAuthUser};

pub async fn get(
    State(state): State<AppState>,
    viewer: MaybeAuthUser,
    ApiPath(slug): ApiPath<String>,
) -> ApiResult<ArticleBody> {
    let article = load_article(&state.db, &slug).await?;
    let body = ArticleBody::load(&state.db, article, viewer.profile_id()).await?;
    Ok(ApiResponse::success(body))
}
