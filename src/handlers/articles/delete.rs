// handlers/articles/delete.rs - DELETE /api/articles/:slug

use axum::{extract::State, http::StatusCode};

use super::{ensure_author, load_article};
use crate::app::AppState;
use crate::database::models::Article;
use crate::error::ApiError;
use crate::middleware::{ApiPath, AuthUser};

/// Author only; comments, tags and favorites go with the article
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(slug): ApiPath<String>,
) -> Result<StatusCode, ApiError> {
    let article = load_article(&state.db, &slug).await?;
    ensure_author(&article, &auth)?;

    Article::delete(&state.db, article.id).await?;
    tracing::info!("Profile {} deleted {}", auth.profile_id, slug);
    Ok(StatusCode::OK)
}
