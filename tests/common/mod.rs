#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use conduit_api::app::{self, AppState};
use conduit_api::config::AppConfig;
use conduit_api::database::DatabaseManager;
use reqwest::StatusCode;
use serde_json::{json, Value};

pub const PASSWORD: &str = "myprecious";

static USER_SEQ: AtomicUsize = AtomicUsize::new(0);

/// The app served in-process over a fresh in-memory database
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub client: reqwest::Client,
}

pub struct TestUser {
    pub username: String,
    pub email: String,
    pub token: String,
}

impl TestUser {
    pub fn auth(&self) -> String {
        format!("Token {}", self.token)
    }
}

impl TestServer {
    pub async fn spawn() -> Result<Self> {
        Self::spawn_with(AppConfig::test()).await
    }

    pub async fn spawn_with(config: AppConfig) -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let pool = DatabaseManager::setup(&config.database).await?;
        let router = app::router(AppState::new(pool, config));
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .context("failed to bind test port")?;
        tokio::spawn(async move {
            app::serve(listener, router).await.expect("test server");
        });

        let server = Self {
            port,
            base_url,
            client: reqwest::Client::new(),
        };
        server.wait_ready(Duration::from_secs(5)).await?;
        Ok(server)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if let Ok(resp) = self.client.get(self.url("/health")).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn register(&self, username: &str, email: &str, password: &str) -> Result<reqwest::Response> {
        let res = self
            .client
            .post(self.url("/api/users"))
            .json(&json!({ "user": { "username": username, "email": email, "password": password } }))
            .send()
            .await?;
        Ok(res)
    }

    /// Register the next `userN` / `userN@example.com`
    pub async fn create_user(&self) -> Result<TestUser> {
        let n = USER_SEQ.fetch_add(1, Ordering::SeqCst);
        let username = format!("user{n}");
        let email = format!("user{n}@example.com");

        let res = self.register(&username, &email, PASSWORD).await?;
        anyhow::ensure!(res.status() == StatusCode::CREATED, "register returned {}", res.status());
        let body: Value = res.json().await?;
        let token = body["user"]["token"].as_str().context("token in response")?.to_string();

        Ok(TestUser { username, email, token })
    }

    pub async fn create_article(&self, author: &TestUser, title: &str, tags: &[&str]) -> Result<Value> {
        let res = self
            .client
            .post(self.url("/api/articles"))
            .header("Authorization", author.auth())
            .json(&json!({ "article": {
                "title": title,
                "description": "Ever wonder how?",
                "body": "You have to believe",
                "tagList": tags,
            }}))
            .send()
            .await?;
        anyhow::ensure!(res.status() == StatusCode::CREATED, "create article returned {}", res.status());
        let body: Value = res.json().await?;
        Ok(body["article"].clone())
    }
}
