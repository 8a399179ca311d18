use sqlx::SqlitePool;

use crate::config::AppConfig;
use crate::database::models::{Profile, User};
use crate::database::DatabaseManager;

/// Fresh in-memory database with the schema applied
pub async fn test_pool() -> SqlitePool {
    DatabaseManager::setup(&AppConfig::test().database)
        .await
        .expect("in-memory database")
}

/// Insert a user plus profile named `username`; the password column holds a
/// placeholder rather than a real hash
pub async fn create_profile(pool: &SqlitePool, username: &str) -> Profile {
    let user_id = User::create(pool, username, &format!("{username}@example.com"), "not-a-hash")
        .await
        .expect("insert user");
    Profile::create(pool, user_id).await.expect("insert profile");
    Profile::find_by_user_id(pool, user_id)
        .await
        .expect("select profile")
        .expect("profile exists")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn pools_are_isolated() {
        let first = test_pool().await;
        let second = test_pool().await;
        create_profile(&first, "jake").await;

        assert!(Profile::find_by_username(&second, "jake").await.unwrap().is_none());
    }
}
