use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::database::models::Profile;
use crate::database::DatabaseError;

#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileBody {
    pub profile: ProfileView,
}

/// A profile as seen by a particular caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileView {
    pub username: String,
    pub bio: Option<String>,
    pub image: Option<String>,
    pub following: bool,
}

impl ProfileView {
    /// `viewer` is the caller's profile id; anonymous callers follow nobody
    pub async fn load(pool: &SqlitePool, profile: Profile, viewer: Option<i64>) -> Result<Self, DatabaseError> {
        let following = match viewer {
            Some(viewer) => Profile::is_following(pool, viewer, profile.id).await?,
            None => false,
        };

        Ok(Self {
            username: profile.username,
            bio: profile.bio,
            image: profile.image,
            following,
        })
    }

    /// Load by profile id; a dangling id is a not-found error
    pub async fn load_by_id(pool: &SqlitePool, profile_id: i64, viewer: Option<i64>) -> Result<Self, DatabaseError> {
        let profile = Profile::find_by_id(pool, profile_id)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("profile {profile_id}")))?;
        Self::load(pool, profile, viewer).await
    }
}

impl ProfileBody {
    pub fn new(profile: ProfileView) -> Self {
        Self { profile }
    }
}
