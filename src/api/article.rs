use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use std::collections::HashMap;

use super::profile::ProfileView;
use crate::database::models::{Article, Tag};
use crate::database::DatabaseError;
use crate::error::ApiError;

/// `{"article": ...}` in both directions
#[derive(Debug, Serialize, Deserialize)]
pub struct ArticleEnvelope<T> {
    pub article: T,
}

pub type ArticleBody = ArticleEnvelope<ArticleView>;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewArticle {
    pub title: String,
    pub description: String,
    pub body: String,
    #[serde(default)]
    pub tag_list: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateArticle {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub tag_list: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleView {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub body: String,
    pub tag_list: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub favorited: bool,
    pub favorites_count: i64,
    pub author: ProfileView,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticlesBody {
    pub articles: Vec<ArticleView>,
    pub articles_count: usize,
}

impl ArticleView {
    /// Assemble the wire shape: tags, favorite state and author as seen by `viewer`
    pub async fn load(pool: &SqlitePool, article: Article, viewer: Option<i64>) -> Result<Self, DatabaseError> {
        let tag_list = Tag::for_article(pool, article.id).await?;
        let favorites_count = Article::favorites_count(pool, article.id).await?;
        let favorited = match viewer {
            Some(viewer) => Article::is_favorited_by(pool, article.id, viewer).await?,
            None => false,
        };
        let author = ProfileView::load_by_id(pool, article.author_id, viewer).await?;

        Ok(Self {
            slug: article.slug,
            title: article.title,
            description: article.description,
            body: article.body,
            tag_list,
            created_at: article.created_at,
            updated_at: article.updated_at,
            favorited,
            favorites_count,
            author,
        })
    }
}

impl ArticleBody {
    pub async fn load(pool: &SqlitePool, article: Article, viewer: Option<i64>) -> Result<Self, DatabaseError> {
        Ok(ArticleEnvelope {
            article: ArticleView::load(pool, article, viewer).await?,
        })
    }
}

impl ArticlesBody {
    /// `articlesCount` is the size of this page
    pub async fn load(pool: &SqlitePool, articles: Vec<Article>, viewer: Option<i64>) -> Result<Self, DatabaseError> {
        let mut views = Vec::with_capacity(articles.len());
        for article in articles {
            views.push(ArticleView::load(pool, article, viewer).await?);
        }
        Ok(Self {
            articles_count: views.len(),
            articles: views,
        })
    }
}

impl NewArticle {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut field_errors = HashMap::new();
        if self.title.trim().is_empty() {
            field_errors.insert("title".to_string(), "Title cannot be empty".to_string());
        } else if slug::slugify(&self.title).is_empty() {
            field_errors.insert("title".to_string(), "Title must contain letters or digits".to_string());
        }
        if self.body.trim().is_empty() {
            field_errors.insert("body".to_string(), "Body cannot be empty".to_string());
        }

        if field_errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::unprocessable_entity("Invalid article", field_errors))
        }
    }

    pub fn slug(&self) -> String {
        slug::slugify(&self.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{create_profile, test_pool};

    fn new_article(title: &str) -> NewArticle {
        NewArticle {
            title: title.to_string(),
            description: "Ever wonder how?".to_string(),
            body: "You have to believe".to_string(),
            tag_list: None,
        }
    }

    #[test]
    fn slug_comes_from_the_title() {
        assert_eq!(new_article("How to train your dragon").slug(), "how-to-train-your-dragon");
    }

    #[test]
    fn blank_title_is_rejected() {
        let err = new_article("  ").validate().unwrap_err();
        assert_eq!(err.status_code(), 422);
        assert!(new_article("???").validate().is_err());
    }

    #[test]
    fn new_article_reads_tag_list() {
        let body: ArticleEnvelope<NewArticle> = serde_json::from_str(
            r#"{"article": {"title": "t", "description": "d", "body": "b", "tagList": ["dragons"]}}"#,
        )
        .unwrap();
        assert_eq!(body.article.tag_list, Some(vec!["dragons".to_string()]));
    }

    #[tokio::test]
    async fn view_uses_camel_case_keys() {
        let pool = test_pool().await;
        let jake = create_profile(&pool, "jake").await;
        let id = Article::create(&pool, "dragon", "Dragon", "d", "b", jake.id).await.unwrap();
        let article = Article::find_by_id(&pool, id).await.unwrap().unwrap();

        let body = ArticleBody::load(&pool, article, None).await.unwrap();
        let value = serde_json::to_value(&body).unwrap();

        assert_eq!(value["article"]["slug"], "dragon");
        assert_eq!(value["article"]["favoritesCount"], 0);
        assert_eq!(value["article"]["tagList"], serde_json::json!([]));
        assert!(value["article"]["createdAt"].is_string());
        assert_eq!(value["article"]["author"]["username"], "jake");
    }
}
