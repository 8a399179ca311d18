// handlers/comments/list.rs - GET /api/articles/:slug/comments

use axum::extract::State;

use crate::api::CommentsBody;
use crate::app::AppState;
use crate::database::models::Comment;
use crate::handlers::articles::load_article;
use crate::middleware::{ApiPath, ApiResponse, ApiResult, MaybeAuthUser};

/// Oldest first
pub async fn get(
    State(state): State<AppState>,
    viewer: MaybeAuthUser,
    ApiPath(slug): ApiPath<String>,
) -> ApiResult<CommentsBody> {
    let article = load_article(&state.db, &slug).await?;
    let comments = Comment::for_article(&state.db, article.id).await?;
    let body = CommentsBody::load(&state.db, comments, viewer.profile_id()).await?;
    Ok(ApiResponse::success(body))
}
