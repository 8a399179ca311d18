// handlers/articles/favorite.rs - POST|DELETE /api/articles/:slug/favorite

use axum::extract::State;

use super::load_article;
use crate::api::ArticleBody;
use crate::app::AppState;
use crate::database::models::Article;
use crate::middleware::{ApiPath, ApiResponse, ApiResult, AuthUser};

pub async fn post(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(slug): ApiPath<String>,
) -> ApiResult<ArticleBody> {
    let article = load_article(&state.db, &slug).await?;
    Article::favorite(&state.db, article.id, auth.profile_id).await?;

    let body = ArticleBody::load(&state.db, article, Some(auth.profile_id)).await?;
    Ok(ApiResponse::success(body))
}

pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(slug): ApiPath<String>,
) -> ApiResult<ArticleBody> {
    let article = load_article(&state.db, &slug).await?;
    Article::unfavorite(&state.db, article.id, auth.profile_id).await?;

    let body = ArticleBody::load(&state.db, article, Some(auth.profile_id)).await?;
    Ok(ApiResponse::success(body))
}
