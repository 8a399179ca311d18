// handlers/articles/update.rs - PUT /api/articles/:slug

use axum::extract::State;

use super::{ensure_author, load_article};
use crate::api::{ArticleBody, ArticleEnvelope, UpdateArticle};
use crate::app::AppState;
use crate::database::models::{Article, ArticleChanges, Tag};
use crate::error::ApiError;
use crate::middleware::{ApiJson, ApiPath, ApiResponse, ApiResult, AuthUser};

/// Author only. The slug keeps its original value even when the title changes.
pub async fn put(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(slug): ApiPath<String>,
    ApiJson(body): ApiJson<ArticleEnvelope<UpdateArticle>>,
) -> ApiResult<ArticleBody> {
    let article = load_article(&state.db, &slug).await?;
    ensure_author(&article, &auth)?;

    let update = body.article;
    if matches!(&update.title, Some(title) if title.trim().is_empty()) {
        return Err(ApiError::unprocessable_entity(
            "Invalid article",
            [("title".to_string(), "Title cannot be empty".to_string())].into_iter().collect(),
        ));
    }

    let changes = ArticleChanges {
        title: update.title,
        description: update.description,
        body: update.body,
    };

    let mut tx = state.db.begin().await?;
    Article::update(&mut *tx, article.id, changes).await?;
    if let Some(tags) = &update.tag_list {
        Tag::set_for_article(&mut tx, article.id, tags).await?;
    }
    tx.commit().await?;

    let article = Article::find_by_id(&state.db, article.id)
        .await?
        .ok_or_else(ApiError::article_not_found)?;
    let body = ArticleBody::load(&state.db, article, Some(auth.profile_id)).await?;
    Ok(ApiResponse::success(body))
}
