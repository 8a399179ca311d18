// handlers/articles/feed.rs - GET /api/articles/feed

use axum::extract::State;

use super::ListQuery;
use crate::api::ArticlesBody;
use crate::app::AppState;
use crate::database::models::Article;
use crate::middleware::{ApiQuery, ApiResponse, ApiResult, AuthUser};

/// Articles by authors the caller follows. Only `limit` and `offset` apply.
pub async fn get(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiQuery(query): ApiQuery<ListQuery>,
) -> ApiResult<ArticlesBody> {
    let filter = query.into_filter(&state.config.api);
    let articles = Article::feed(&state.db, auth.profile_id, filter.limit, filter.offset).await?;
    let body = ArticlesBody::load(&state.db, articles, Some(auth.profile_id)).await?;
    Ok(ApiResponse::success(body))
}
