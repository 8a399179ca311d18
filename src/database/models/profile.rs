use serde::{Deserialize, Serialize};
use sqlx::{Executor, FromRow, Sqlite};

use crate::database::DatabaseError;

/// A user's public face: the row every article, comment and follow points at
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Profile {
    pub id: i64,
    pub user_id: i64,
    pub username: String,
    pub bio: Option<String>,
    pub image: Option<String>,
}

const PROFILE_SELECT: &str = "SELECT p.id, p.user_id, u.username, u.bio, u.image
     FROM userprofile p
     JOIN users u ON u.id = p.user_id";

impl Profile {
    pub async fn create<'e, E>(executor: E, user_id: i64) -> Result<i64, DatabaseError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("INSERT INTO userprofile (user_id) VALUES ($1)")
            .bind(user_id)
            .execute(executor)
            .await?;
        Ok(result.last_insert_rowid())
    }

    pub async fn find_by_id<'e, E>(executor: E, id: i64) -> Result<Option<Profile>, DatabaseError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let profile = sqlx::query_as::<_, Profile>(&format!("{PROFILE_SELECT} WHERE p.id = $1"))
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(profile)
    }

    pub async fn find_by_user_id<'e, E>(executor: E, user_id: i64) -> Result<Option<Profile>, DatabaseError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let profile = sqlx::query_as::<_, Profile>(&format!("{PROFILE_SELECT} WHERE p.user_id = $1"))
            .bind(user_id)
            .fetch_optional(executor)
            .await?;
        Ok(profile)
    }

    pub async fn find_by_username<'e, E>(executor: E, username: &str) -> Result<Option<Profile>, DatabaseError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let profile = sqlx::query_as::<_, Profile>(&format!("{PROFILE_SELECT} WHERE u.username = $1"))
            .bind(username)
            .fetch_optional(executor)
            .await?;
        Ok(profile)
    }

    /// `follower` starts following `followed`; following twice is a no-op
    pub async fn follow<'e, E>(executor: E, follower: i64, followed: i64) -> Result<(), DatabaseError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query("INSERT OR IGNORE INTO followers_assoc (follower, followed_by) VALUES ($1, $2)")
            .bind(follower)
            .bind(followed)
            .execute(executor)
            .await?;
        Ok(())
    }

    pub async fn unfollow<'e, E>(executor: E, follower: i64, followed: i64) -> Result<(), DatabaseError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query("DELETE FROM followers_assoc WHERE follower = $1 AND followed_by = $2")
            .bind(follower)
            .bind(followed)
            .execute(executor)
            .await?;
        Ok(())
    }

    pub async fn is_following<'e, E>(executor: E, follower: i64, followed: i64) -> Result<bool, DatabaseError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let found: Option<i64> = sqlx::query_scalar(
            "SELECT 1 FROM followers_assoc WHERE follower = $1 AND followed_by = $2",
        )
        .bind(follower)
        .bind(followed)
        .fetch_optional(executor)
        .await?;
        Ok(found.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{create_profile, test_pool};

    #[tokio::test]
    async fn follow_is_idempotent_and_directed() {
        let pool = test_pool().await;
        let jake = create_profile(&pool, "jake").await;
        let celeb = create_profile(&pool, "celeb").await;

        Profile::follow(&pool, jake.id, celeb.id).await.unwrap();
        Profile::follow(&pool, jake.id, celeb.id).await.unwrap();

        assert!(Profile::is_following(&pool, jake.id, celeb.id).await.unwrap());
        assert!(!Profile::is_following(&pool, celeb.id, jake.id).await.unwrap());

        Profile::unfollow(&pool, jake.id, celeb.id).await.unwrap();
        assert!(!Profile::is_following(&pool, jake.id, celeb.id).await.unwrap());
    }

    #[tokio::test]
    async fn finds_profile_by_username() {
        let pool = test_pool().await;
        let jake = create_profile(&pool, "jake").await;

        let found = Profile::find_by_username(&pool, "jake").await.unwrap().unwrap();
        assert_eq!(found.id, jake.id);
        assert!(Profile::find_by_username(&pool, "nobody").await.unwrap().is_none());
    }
}
