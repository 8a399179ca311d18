use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Executor, FromRow, QueryBuilder, Sqlite, SqlitePool};

use crate::database::DatabaseError;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Article {
    pub id: i64,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub author_id: i64,
}

/// Listing filters for `GET /api/articles`
#[derive(Debug, Default, Clone)]
pub struct ArticleFilter {
    pub tag: Option<String>,
    pub author: Option<String>,
    pub favorited: Option<String>,
    pub limit: i64,
    pub offset: i64,
}

#[derive(Debug, Default, Clone)]
pub struct ArticleChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub body: Option<String>,
}

const ARTICLE_COLUMNS: &str = "a.id, a.slug, a.title, a.description, a.body, a.created_at, a.updated_at, a.author_id";

impl Article {
    pub async fn create<'e, E>(
        executor: E,
        slug: &str,
        title: &str,
        description: &str,
        body: &str,
        author_id: i64,
    ) -> Result<i64, DatabaseError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO article (slug, title, description, body, created_at, updated_at, author_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(slug)
        .bind(title)
        .bind(description)
        .bind(body)
        .bind(now)
        .bind(now)
        .bind(author_id)
        .execute(executor)
        .await?;
        Ok(result.last_insert_rowid())
    }

    pub async fn find_by_id<'e, E>(executor: E, id: i64) -> Result<Option<Article>, DatabaseError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let article = sqlx::query_as::<_, Article>(&format!("SELECT {ARTICLE_COLUMNS} FROM article a WHERE a.id = $1"))
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(article)
    }

    pub async fn find_by_slug<'e, E>(executor: E, slug: &str) -> Result<Option<Article>, DatabaseError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let article = sqlx::query_as::<_, Article>(&format!("SELECT {ARTICLE_COLUMNS} FROM article a WHERE a.slug = $1"))
            .bind(slug)
            .fetch_optional(executor)
            .await?;
        Ok(article)
    }

    /// Newest first, narrowed by any combination of tag, author and favoriter
    pub async fn list(pool: &SqlitePool, filter: &ArticleFilter) -> Result<Vec<Article>, DatabaseError> {
        let mut query: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("SELECT {ARTICLE_COLUMNS} FROM article a WHERE 1 = 1"));

        if let Some(tag) = &filter.tag {
            query
                .push(
                    " AND EXISTS (SELECT 1 FROM tag_assoc ta JOIN tags t ON t.id = ta.tag
                      WHERE ta.article = a.id AND t.tagname = ",
                )
                .push_bind(tag.clone())
                .push(")");
        }

        if let Some(author) = &filter.author {
            query
                .push(
                    " AND a.author_id IN (SELECT p.id FROM userprofile p JOIN users u ON u.id = p.user_id
                      WHERE u.username = ",
                )
                .push_bind(author.clone())
                .push(")");
        }

        if let Some(favorited) = &filter.favorited {
            query
                .push(
                    " AND EXISTS (SELECT 1 FROM favoritor_assoc f
                      JOIN userprofile p ON p.id = f.favoriter
                      JOIN users u ON u.id = p.user_id
                      WHERE f.favorited_article = a.id AND u.username = ",
                )
                .push_bind(favorited.clone())
                .push(")");
        }

        query
            .push(" ORDER BY a.created_at DESC, a.id DESC LIMIT ")
            .push_bind(filter.limit)
            .push(" OFFSET ")
            .push_bind(filter.offset);

        let articles = query.build_query_as::<Article>().fetch_all(pool).await?;
        Ok(articles)
    }

    /// Articles written by profiles that `follower` follows, newest first
    pub async fn feed(pool: &SqlitePool, follower: i64, limit: i64, offset: i64) -> Result<Vec<Article>, DatabaseError> {
        let articles = sqlx::query_as::<_, Article>(&format!(
            "SELECT {ARTICLE_COLUMNS} FROM article a
             JOIN followers_assoc fa ON fa.followed_by = a.author_id
             WHERE fa.follower = $1
             ORDER BY a.created_at DESC, a.id DESC
             LIMIT $2 OFFSET $3"
        ))
        .bind(follower)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;
        Ok(articles)
    }

    pub async fn update<'e, E>(executor: E, id: i64, changes: ArticleChanges) -> Result<(), DatabaseError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query(
            "UPDATE article SET
                title = COALESCE($1, title),
                description = COALESCE($2, description),
                body = COALESCE($3, body),
                updated_at = $4
             WHERE id = $5",
        )
        .bind(changes.title)
        .bind(changes.description)
        .bind(changes.body)
        .bind(Utc::now())
        .bind(id)
        .execute(executor)
        .await?;
        Ok(())
    }

    pub async fn delete<'e, E>(executor: E, id: i64) -> Result<(), DatabaseError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query("DELETE FROM article WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(())
    }

    pub async fn favorite<'e, E>(executor: E, article_id: i64, profile_id: i64) -> Result<(), DatabaseError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query("INSERT OR IGNORE INTO favoritor_assoc (favoriter, favorited_article) VALUES ($1, $2)")
            .bind(profile_id)
            .bind(article_id)
            .execute(executor)
            .await?;
        Ok(())
    }

    pub async fn unfavorite<'e, E>(executor: E, article_id: i64, profile_id: i64) -> Result<(), DatabaseError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query("DELETE FROM favoritor_assoc WHERE favoriter = $1 AND favorited_article = $2")
            .bind(profile_id)
            .bind(article_id)
            .execute(executor)
            .await?;
        Ok(())
    }

    pub async fn favorites_count<'e, E>(executor: E, article_id: i64) -> Result<i64, DatabaseError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM favoritor_assoc WHERE favorited_article = $1")
            .bind(article_id)
            .fetch_one(executor)
            .await?;
        Ok(count)
    }

    pub async fn is_favorited_by<'e, E>(executor: E, article_id: i64, profile_id: i64) -> Result<bool, DatabaseError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let found: Option<i64> = sqlx::query_scalar(
            "SELECT 1 FROM favoritor_assoc WHERE favoriter = $1 AND favorited_article = $2",
        )
        .bind(profile_id)
        .bind(article_id)
        .fetch_optional(executor)
        .await?;
        Ok(found.is_some())
    }
}
