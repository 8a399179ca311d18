use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Executor, FromRow, Sqlite};

use crate::database::DatabaseError;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub bio: Option<String>,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Column changes for `User::update`; `None` leaves a column untouched
#[derive(Debug, Default, Clone)]
pub struct UserChanges {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub bio: Option<String>,
    pub image: Option<String>,
}

const USER_COLUMNS: &str = "id, username, email, password, bio, image, created_at, updated_at";

impl User {
    /// Insert a user row and return its id. `password` must already be hashed.
    pub async fn create<'e, E>(
        executor: E,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<i64, DatabaseError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO users (username, email, password, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(username)
        .bind(email)
        .bind(password)
        .bind(now)
        .bind(now)
        .execute(executor)
        .await?;

        Ok(result.last_insert_rowid())
    }

    pub async fn find_by_id<'e, E>(executor: E, id: i64) -> Result<Option<User>, DatabaseError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let user = sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(user)
    }

    pub async fn find_by_email<'e, E>(executor: E, email: &str) -> Result<Option<User>, DatabaseError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let user = sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1"))
            .bind(email)
            .fetch_optional(executor)
            .await?;
        Ok(user)
    }

    pub async fn find_by_username<'e, E>(executor: E, username: &str) -> Result<Option<User>, DatabaseError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let user = sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE username = $1"))
            .bind(username)
            .fetch_optional(executor)
            .await?;
        Ok(user)
    }

    /// Apply `changes` and bump `updated_at`, returning the stored row
    pub async fn update<'e, E>(executor: E, id: i64, changes: UserChanges) -> Result<User, DatabaseError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let user = sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET
                username = COALESCE($1, username),
                email = COALESCE($2, email),
                password = COALESCE($3, password),
                bio = COALESCE($4, bio),
                image = COALESCE($5, image),
                updated_at = $6
             WHERE id = $7
             RETURNING {USER_COLUMNS}"
        ))
        .bind(changes.username)
        .bind(changes.email)
        .bind(changes.password)
        .bind(changes.bio)
        .bind(changes.image)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(executor)
        .await?;

        user.ok_or_else(|| DatabaseError::NotFound(format!("user {id}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::test_pool;

    #[tokio::test]
    async fn duplicate_email_is_a_unique_violation() {
        let pool = test_pool().await;
        User::create(&pool, "jake", "jake@jake.jake", "hash").await.unwrap();

        let err = User::create(&pool, "jacob", "jake@jake.jake", "hash").await.unwrap_err();
        assert!(matches!(err, DatabaseError::UniqueViolation(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn duplicate_username_is_a_unique_violation() {
        let pool = test_pool().await;
        User::create(&pool, "jake", "jake@jake.jake", "hash").await.unwrap();

        let err = User::create(&pool, "jake", "other@jake.jake", "hash").await.unwrap_err();
        assert!(matches!(err, DatabaseError::UniqueViolation(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn update_keeps_untouched_columns() {
        let pool = test_pool().await;
        let id = User::create(&pool, "jake", "jake@jake.jake", "hash").await.unwrap();

        let changes = UserChanges {
            bio: Some("I work at statefarm".to_string()),
            ..Default::default()
        };
        let user = User::update(&pool, id, changes).await.unwrap();

        assert_eq!(user.username, "jake");
        assert_eq!(user.email, "jake@jake.jake");
        assert_eq!(user.bio.as_deref(), Some("I work at statefarm"));
        assert!(user.updated_at >= user.created_at);
    }

    #[tokio::test]
    async fn update_missing_user_is_not_found() {
        let pool = test_pool().await;
        let err = User::update(&pool, 42, UserChanges::default()).await.unwrap_err();
        assert!(matches!(err, DatabaseError::NotFound(_)));
    }
}
