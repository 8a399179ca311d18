// handlers/comments/create.rs - POST /api/articles/:slug/comments

use axum::extract::State;
use std::collections::HashMap;

use crate::api::{CommentBody, CommentEnvelope, CommentView, NewComment};
use crate::app::AppState;
use crate::database::models::Comment;
use crate::error::ApiError;
use crate::handlers::articles::load_article;
use crate::middleware::{ApiJson, ApiPath, ApiResponse, ApiResult, AuthUser};

pub async fn post(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(slug): ApiPath<String>,
    ApiJson(body): ApiJson<CommentEnvelope<NewComment>>,
) -> ApiResult<CommentBody> {
    let new_comment = body.comment;
    if new_comment.body.trim().is_empty() {
        let field_errors = HashMap::from([("body".to_string(), "Comment cannot be empty".to_string())]);
        return Err(ApiError::unprocessable_entity("Invalid comment", field_errors));
    }

    let article = load_article(&state.db, &slug).await?;
    let comment = Comment::create(&state.db, article.id, auth.profile_id, &new_comment.body).await?;

    let view = CommentView::load(&state.db, comment, Some(auth.profile_id)).await?;
    Ok(ApiResponse::created(CommentEnvelope { comment: view }))
}
