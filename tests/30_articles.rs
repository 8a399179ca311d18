mod common;

use anyhow::Result;
use common::TestServer;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn create_article_returns_full_shape() -> Result<()> {
    let server = TestServer::spawn().await?;
    let author = server.create_user().await?;

    let article = server
        .create_article(&author, "How to train your dragon", &["dragons", "training"])
        .await?;

    assert_eq!(article["slug"], "how-to-train-your-dragon");
    assert_eq!(article["title"], "How to train your dragon");
    assert_eq!(article["tagList"], json!(["dragons", "training"]));
    assert_eq!(article["favorited"], false);
    assert_eq!(article["favoritesCount"], 0);
    assert_eq!(article["author"]["username"], author.username.as_str());
    assert!(article["createdAt"].is_string());
    assert!(article["updatedAt"].is_string());
    Ok(())
}

#[tokio::test]
async fn duplicate_title_conflicts() -> Result<()> {
    let server = TestServer::spawn().await?;
    let author = server.create_user().await?;
    server.create_article(&author, "Dragons", &[]).await?;

    let res = server
        .client
        .post(server.url("/api/articles"))
        .header("Authorization", author.auth())
        .json(&json!({ "article": { "title": "Dragons", "description": "d", "body": "b" } }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    Ok(())
}

#[tokio::test]
async fn missing_article_is_not_found() -> Result<()> {
    let server = TestServer::spawn().await?;

    let res = server.client.get(server.url("/api/articles/nope")).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = res.json().await?;
    assert_eq!(body["errors"]["body"][0], "Article not found");
    Ok(())
}

#[tokio::test]
async fn list_filters_by_tag_author_and_favorited() -> Result<()> {
    let server = TestServer::spawn().await?;
    let jake = server.create_user().await?;
    let jane = server.create_user().await?;
    server.create_article(&jake, "First", &["dragons"]).await?;
    server.create_article(&jane, "Second", &["cats"]).await?;
    server.create_article(&jane, "Third", &["dragons"]).await?;

    let all: Value = server.client.get(server.url("/api/articles")).send().await?.json().await?;
    assert_eq!(all["articlesCount"], 3);
    assert_eq!(all["articles"][0]["slug"], "third");

    let tagged: Value = server
        .client
        .get(server.url("/api/articles?tag=dragons"))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(tagged["articlesCount"], 2);

    let by_jane: Value = server
        .client
        .get(server.url(&format!("/api/articles?author={}", jane.username)))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(by_jane["articlesCount"], 2);

    server
        .client
        .post(server.url("/api/articles/first/favorite"))
        .header("Authorization", jane.auth())
        .send()
        .await?;
    let favorited: Value = server
        .client
        .get(server.url(&format!("/api/articles?favorited={}", jane.username)))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(favorited["articlesCount"], 1);
    assert_eq!(favorited["articles"][0]["slug"], "first");

    let paged: Value = server
        .client
        .get(server.url("/api/articles?limit=1&offset=1"))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(paged["articlesCount"], 1);
    assert_eq!(paged["articles"][0]["slug"], "second");
    Ok(())
}

#[tokio::test]
async fn feed_shows_followed_authors() -> Result<()> {
    let server = TestServer::spawn().await?;
    let reader = server.create_user().await?;
    let followed = server.create_user().await?;
    let stranger = server.create_user().await?;
    server.create_article(&followed, "Followed post", &[]).await?;
    server.create_article(&stranger, "Stranger post", &[]).await?;

    server
        .client
        .post(server.url(&format!("/api/profiles/{}/follow", followed.username)))
        .header("Authorization", reader.auth())
        .send()
        .await?;

    let res = server
        .client
        .get(server.url("/api/articles/feed"))
        .header("Authorization", reader.auth())
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let feed: Value = res.json().await?;
    assert_eq!(feed["articlesCount"], 1);
    assert_eq!(feed["articles"][0]["slug"], "followed-post");
    assert_eq!(feed["articles"][0]["author"]["following"], true);

    let res = server.client.get(server.url("/api/articles/feed")).send().await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn only_the_author_can_update_or_delete() -> Result<()> {
    let server = TestServer::spawn().await?;
    let author = server.create_user().await?;
    let other = server.create_user().await?;
    server.create_article(&author, "Mine", &["a"]).await?;

    let update = json!({ "article": { "body": "Rewritten", "tagList": ["b", "c"] } });

    let res = server
        .client
        .put(server.url("/api/articles/mine"))
        .header("Authorization", other.auth())
        .json(&update)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = server
        .client
        .put(server.url("/api/articles/mine"))
        .header("Authorization", author.auth())
        .json(&update)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["article"]["body"], "Rewritten");
    assert_eq!(body["article"]["title"], "Mine");
    assert_eq!(body["article"]["tagList"], json!(["b", "c"]));

    let res = server
        .client
        .delete(server.url("/api/articles/mine"))
        .header("Authorization", other.auth())
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = server
        .client
        .delete(server.url("/api/articles/mine"))
        .header("Authorization", author.auth())
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.text().await?.is_empty());

    let res = server.client.get(server.url("/api/articles/mine")).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn favorite_counts_and_flags() -> Result<()> {
    let server = TestServer::spawn().await?;
    let author = server.create_user().await?;
    let fan = server.create_user().await?;
    server.create_article(&author, "Loved", &[]).await?;
    let url = server.url("/api/articles/loved/favorite");

    for _ in 0..2 {
        let body: Value = server
            .client
            .post(&url)
            .header("Authorization", fan.auth())
            .send()
            .await?
            .json()
            .await?;
        assert_eq!(body["article"]["favorited"], true);
        assert_eq!(body["article"]["favoritesCount"], 1);
    }

    let anonymous: Value = server.client.get(server.url("/api/articles/loved")).send().await?.json().await?;
    assert_eq!(anonymous["article"]["favorited"], false);
    assert_eq!(anonymous["article"]["favoritesCount"], 1);

    let body: Value = server
        .client
        .delete(&url)
        .header("Authorization", fan.auth())
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(body["article"]["favorited"], false);
    assert_eq!(body["article"]["favoritesCount"], 0);
    Ok(())
}

#[tokio::test]
async fn tags_are_listed_once() -> Result<()> {
    let server = TestServer::spawn().await?;
    let author = server.create_user().await?;
    server.create_article(&author, "One", &["dragons", "cats"]).await?;
    server.create_article(&author, "Two", &["dragons"]).await?;

    let body: Value = server.client.get(server.url("/api/tags")).send().await?.json().await?;
    let mut tags: Vec<String> = serde_json::from_value(body["tags"].clone())?;
    tags.sort();
    assert_eq!(tags, vec!["cats", "dragons"]);
    Ok(())
}

#[tokio::test]
async fn trailing_slash_and_bad_paging() -> Result<()> {
    let server = TestServer::spawn().await?;
    let author = server.create_user().await?;
    server.create_article(&author, "Slashed", &[]).await?;

    let body: Value = server.client.get(server.url("/api/articles/")).send().await?.json().await?;
    assert_eq!(body["articlesCount"], 1);

    let body: Value = server.client.get(server.url("/api/articles/slashed/")).send().await?.json().await?;
    assert_eq!(body["article"]["slug"], "slashed");

    let res = server.client.get(server.url("/api/articles?limit=abc")).send().await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await?;
    assert!(body["errors"]["body"].is_array());
    Ok(())
}
