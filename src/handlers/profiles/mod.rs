pub mod follow;
pub mod show;

pub use follow::{delete as unfollow, post as follow};
pub use show::get as get_profile;

use sqlx::SqlitePool;

use crate::database::models::Profile;
use crate::error::ApiError;

/// Profile named in the path, or "User not found"
pub(crate) async fn load_profile(pool: &SqlitePool, username: &str) -> Result<Profile, ApiError> {
    Profile::find_by_username(pool, username)
        .await?
        .ok_or_else(ApiError::user_not_found)
}
