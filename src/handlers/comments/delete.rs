// handlers/comments/delete.rs - DELETE /api/articles/:slug/comments/:id

use axum::{extract::State, http::StatusCode};

use crate::app::AppState;
use crate::database::models::Comment;
use crate::error::ApiError;
use crate::handlers::articles::load_article;
use crate::middleware::{ApiPath, AuthUser};

/// Only the comment's author may delete it
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath((slug, id)): ApiPath<(String, i64)>,
) -> Result<StatusCode, ApiError> {
    let article = load_article(&state.db, &slug).await?;
    let comment = Comment::find(&state.db, article.id, id)
        .await?
        .ok_or_else(ApiError::comment_not_found)?;

    if comment.author_id != auth.profile_id {
        return Err(ApiError::forbidden("Not your comment"));
    }

    Comment::delete(&state.db, comment.id).await?;
    Ok(StatusCode::OK)
}
