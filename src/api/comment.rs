use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use super::profile::ProfileView;
use crate::database::models::Comment;
use crate::database::DatabaseError;

#[derive(Debug, Serialize, Deserialize)]
pub struct CommentEnvelope<T> {
    pub comment: T,
}

pub type CommentBody = CommentEnvelope<CommentView>;

#[derive(Debug, Deserialize)]
pub struct NewComment {
    pub body: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub body: String,
    pub author: ProfileView,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CommentsBody {
    pub comments: Vec<CommentView>,
}

impl CommentView {
    pub async fn load(pool: &SqlitePool, comment: Comment, viewer: Option<i64>) -> Result<Self, DatabaseError> {
        let author = ProfileView::load_by_id(pool, comment.author_id, viewer).await?;
        Ok(Self {
            id: comment.id,
            created_at: comment.created_at,
            updated_at: comment.updated_at,
            body: comment.body,
            author,
        })
    }
}

impl CommentsBody {
    pub async fn load(pool: &SqlitePool, comments: Vec<Comment>, viewer: Option<i64>) -> Result<Self, DatabaseError> {
        let mut views = Vec::with_capacity(comments.len());
        for comment in comments {
            views.push(CommentView::load(pool, comment, viewer).await?);
        }
        Ok(Self { comments: views })
    }
}
