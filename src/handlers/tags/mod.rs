// handlers/tags/mod.rs - GET /api/tags

use axum::extract::State;
use serde::Serialize;

use crate::app::AppState;
use crate::database::models::Tag;
use crate::middleware::{ApiResponse, ApiResult};

#[derive(Debug, Serialize)]
pub struct TagsBody {
    pub tags: Vec<String>,
}

pub async fn list(State(state): State<AppState>) -> ApiResult<TagsBody> {
    let tags = Tag::all(&state.db).await?;
    Ok(ApiResponse::success(TagsBody { tags }))
}
