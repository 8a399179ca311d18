use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Executor, FromRow, Sqlite};

use crate::database::DatabaseError;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Comment {
    pub id: i64,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub author_id: i64,
    pub article_id: i64,
}

const COMMENT_COLUMNS: &str = "id, body, created_at, updated_at, author_id, article_id";

impl Comment {
    pub async fn create<'e, E>(executor: E, article_id: i64, author_id: i64, body: &str) -> Result<Comment, DatabaseError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let now = Utc::now();
        let comment = sqlx::query_as::<_, Comment>(&format!(
            "INSERT INTO comment (body, created_at, updated_at, author_id, article_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COMMENT_COLUMNS}"
        ))
        .bind(body)
        .bind(now)
        .bind(now)
        .bind(author_id)
        .bind(article_id)
        .fetch_one(executor)
        .await?;
        Ok(comment)
    }

    /// Oldest first
    pub async fn for_article<'e, E>(executor: E, article_id: i64) -> Result<Vec<Comment>, DatabaseError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let comments = sqlx::query_as::<_, Comment>(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comment WHERE article_id = $1 ORDER BY created_at, id"
        ))
        .bind(article_id)
        .fetch_all(executor)
        .await?;
        Ok(comments)
    }

    pub async fn find<'e, E>(executor: E, article_id: i64, id: i64) -> Result<Option<Comment>, DatabaseError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let comment = sqlx::query_as::<_, Comment>(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comment WHERE article_id = $1 AND id = $2"
        ))
        .bind(article_id)
        .bind(id)
        .fetch_optional(executor)
        .await?;
        Ok(comment)
    }

    pub async fn delete<'e, E>(executor: E, id: i64) -> Result<(), DatabaseError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query("DELETE FROM comment WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(())
    }
}
