pub mod create;
pub mod delete;
pub mod favorite;
pub mod feed;
pub mod list;
pub mod show;
pub mod update;

pub use create::post as create;
pub use delete::delete;
pub use favorite::{delete as unfavorite, post as favorite};
pub use feed::get as feed;
pub use list::get as list;
pub use show::get as get_article;
pub use update::put as update;

use serde::Deserialize;
use sqlx::SqlitePool;

use crate::config::ApiConfig;
use crate::database::models::{Article, ArticleFilter};
use crate::error::ApiError;
use crate::middleware::AuthUser;

/// Query string shared by the article listings
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub tag: Option<String>,
    pub author: Option<String>,
    pub favorited: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl ListQuery {
    /// Apply the configured page size defaults; `limit` is capped, negatives become zero
    pub fn into_filter(self, api: &ApiConfig) -> ArticleFilter {
        ArticleFilter {
            tag: self.tag,
            author: self.author,
            favorited: self.favorited,
            limit: self.limit.unwrap_or(api.default_page_size).clamp(0, api.max_page_size),
            offset: self.offset.unwrap_or(0).max(0),
        }
    }
}

pub(crate) async fn load_article(pool: &SqlitePool, slug: &str) -> Result<Article, ApiError> {
    Article::find_by_slug(pool, slug)
        .await?
        .ok_or_else(ApiError::article_not_found)
}

pub(crate) fn ensure_author(article: &Article, auth: &AuthUser) -> Result<(), ApiError> {
    if article.author_id == auth.profile_id {
        Ok(())
    } else {
        tracing::warn!("Profile {} tried to modify article {}", auth.profile_id, article.slug);
        Err(ApiError::not_owned())
    }
}
