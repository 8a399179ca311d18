use sqlx::{Sqlite, SqliteConnection, SqlitePool};

use crate::database::DatabaseError;

pub struct Tag;

impl Tag {
    /// Look up a tag by name, creating it on first use
    pub async fn get_or_create(conn: &mut SqliteConnection, name: &str) -> Result<i64, DatabaseError> {
        sqlx::query("INSERT OR IGNORE INTO tags (tagname) VALUES ($1)")
            .bind(name)
            .execute(&mut *conn)
            .await?;

        let id: i64 = sqlx::query_scalar("SELECT id FROM tags WHERE tagname = $1")
            .bind(name)
            .fetch_one(&mut *conn)
            .await?;
        Ok(id)
    }

    /// Replace the tag set of an article
    pub async fn set_for_article(
        conn: &mut SqliteConnection,
        article_id: i64,
        names: &[String],
    ) -> Result<(), DatabaseError> {
        sqlx::query("DELETE FROM tag_assoc WHERE article = $1")
            .bind(article_id)
            .execute(&mut *conn)
            .await?;

        for name in names {
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            let tag_id = Self::get_or_create(conn, name).await?;
            sqlx::query("INSERT OR IGNORE INTO tag_assoc (tag, article) VALUES ($1, $2)")
                .bind(tag_id)
                .bind(article_id)
                .execute(&mut *conn)
                .await?;
        }
        Ok(())
    }

    pub async fn for_article<'e, E>(executor: E, article_id: i64) -> Result<Vec<String>, DatabaseError>
    where
        E: sqlx::Executor<'e, Database = Sqlite>,
    {
        let names = sqlx::query_scalar(
            "SELECT t.tagname FROM tags t
             JOIN tag_assoc ta ON ta.tag = t.id
             WHERE ta.article = $1
             ORDER BY t.tagname",
        )
        .bind(article_id)
        .fetch_all(executor)
        .await?;
        Ok(names)
    }

    pub async fn all(pool: &SqlitePool) -> Result<Vec<String>, DatabaseError> {
        let names = sqlx::query_scalar("SELECT tagname FROM tags ORDER BY tagname")
            .fetch_all(pool)
            .await?;
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::test_pool;

    #[tokio::test]
    async fn get_or_create_reuses_existing_tags() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();

        let first = Tag::get_or_create(&mut conn, "dragons").await.unwrap();
        let second = Tag::get_or_create(&mut conn, "dragons").await.unwrap();
        assert_eq!(first, second);
        drop(conn);

        assert_eq!(Tag::all(&pool).await.unwrap(), vec!["dragons".to_string()]);
    }
}
