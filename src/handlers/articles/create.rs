// handlers/articles/create.rs - POST /api/articles

use axum::extract::State;

use crate::api::{ArticleBody, ArticleEnvelope, NewArticle};
use crate::app::AppState;
use crate::database::models::{Article, Tag};
use crate::database::DatabaseError;
use crate::error::ApiError;
use crate::middleware::{ApiJson, ApiResponse, ApiResult, AuthUser};

/// The slug is derived from the title, so two articles with the same title
/// collide with a 409
pub async fn post(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(body): ApiJson<ArticleEnvelope<NewArticle>>,
) -> ApiResult<ArticleBody> {
    let new_article = body.article;
    new_article.validate()?;
    let slug = new_article.slug();

    let mut tx = state.db.begin().await?;
    let article_id = Article::create(
        &mut *tx,
        &slug,
        &new_article.title,
        &new_article.description,
        &new_article.body,
        auth.profile_id,
    )
    .await
    .map_err(|e| match e {
        DatabaseError::UniqueViolation(_) => ApiError::article_already_exists(),
        other => other.into(),
    })?;

    if let Some(tags) = &new_article.tag_list {
        Tag::set_for_article(&mut tx, article_id, tags).await?;
    }
    tx.commit().await?;

    let article = Article::find_by_id(&state.db, article_id)
        .await?
        .ok_or_else(ApiError::article_not_found)?;

    tracing::info!("Profile {} published {}", auth.profile_id, article.slug);
    let body = ArticleBody::load(&state.db, article, Some(auth.profile_id)).await?;
    Ok(ApiResponse::created(body))
}
