// handlers/articles/list.rs - GET /api/articles

use axum::extract::State;

use super::ListQuery;
use crate::api::ArticlesBody;
use crate::app::AppState;
use crate::database::models::Article;
use crate::middleware::{ApiQuery, ApiResponse, ApiResult, MaybeAuthUser};

pub async fn get(
    State(state): State<AppState>,
    viewer: MaybeAuthUser,
    ApiQuery(query): ApiQuery<ListQuery>,
) -> ApiResult<ArticlesBody> {
    let filter = query.into_filter(&state.config.api);
    let articles = Article::list(&state.db, &filter).await?;
    let body = ArticlesBody::load(&state.db, articles, viewer.profile_id()).await?;
    Ok(ApiResponse::success(body))
}
