use axum::{
    extract::{Request, State},
    http::{HeaderValue, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::json;
use sqlx::SqlitePool;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::Layer;
use tower_http::{
    cors::{Any, CorsLayer},
    normalize_path::{NormalizePath, NormalizePathLayer},
    trace::TraceLayer,
};

use crate::config::{AppConfig, Environment};
use crate::database::DatabaseManager;
use crate::handlers;

/// Everything a handler can reach
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Arc<AppConfig>,
    /// Outbound client used by the SSRF demo
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(db: SqlitePool, config: AppConfig) -> Self {
        Self {
            db,
            config: Arc::new(config),
            http: reqwest::Client::new(),
        }
    }

    pub fn outbound_timeout(&self) -> Duration {
        Duration::from_millis(self.config.iast.outbound_timeout_ms)
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct RouteInfo {
    pub method: &'static str,
    pub path: &'static str,
    pub auth: Auth,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Auth {
    None,
    Optional,
    Required,
}

const fn route(method: &'static str, path: &'static str, auth: Auth, description: &'static str) -> RouteInfo {
    RouteInfo {
        method,
        path,
        auth,
        description,
    }
}

/// Every route [`router`] mounts; `/iast` entries only when IAST is enabled.
/// Each also answers with a trailing slash.
pub const ROUTES: &[RouteInfo] = &[
    route("GET", "/", Auth::None, "Greeting"),
    route("GET", "/index", Auth::None, "Greeting"),
    route("GET", "/health", Auth::None, "Database liveness"),
    route("POST", "/api/users", Auth::None, "Register"),
    route("POST", "/api/users/login", Auth::None, "Log in"),
    route("GET", "/api/user", Auth::Required, "Current user"),
    route("PUT", "/api/user", Auth::Required, "Update current user"),
    route("GET", "/api/profiles/:username", Auth::Optional, "Show profile"),
    route("POST", "/api/profiles/:username/follow", Auth::Required, "Follow"),
    route("DELETE", "/api/profiles/:username/follow", Auth::Required, "Unfollow"),
    route("GET", "/api/articles", Auth::Optional, "List articles"),
    route("GET", "/api/articles/feed", Auth::Required, "Articles by followed authors"),
    route("POST", "/api/articles", Auth::Required, "Create article"),
    route("GET", "/api/articles/:slug", Auth::Optional, "Show article"),
    route("PUT", "/api/articles/:slug", Auth::Required, "Update own article"),
    route("DELETE", "/api/articles/:slug", Auth::Required, "Delete own article"),
    route("POST", "/api/articles/:slug/favorite", Auth::Required, "Favorite"),
    route("DELETE", "/api/articles/:slug/favorite", Auth::Required, "Unfavorite"),
    route("GET", "/api/tags", Auth::None, "All tags"),
    route("GET", "/api/articles/:slug/comments", Auth::Optional, "List comments"),
    route("POST", "/api/articles/:slug/comments", Auth::Required, "Add comment"),
    route("DELETE", "/api/articles/:slug/comments/:id", Auth::Required, "Delete own comment"),
    route("GET", "/iast/propagation", Auth::None, "Taint propagation chain"),
    route("GET", "/iast/weak_hash", Auth::None, "MD5 of q"),
    route("GET", "/iast/sqli", Auth::None, "Concatenated SQL with q"),
    route("GET", "/iast/articles", Auth::Optional, "Article list plus propagation"),
];

/// The router behind trailing-slash trimming, so `/api/articles/` and
/// `/api/articles` reach the same handler
pub type App = NormalizePath<Router>;

pub fn router(state: AppState) -> App {
    let mut app = Router::new()
        .route("/", get(root))
        .route("/index", get(root))
        .route("/health", get(health))
        .merge(user_routes())
        .merge(profile_routes())
        .merge(article_routes())
        .merge(comment_routes());

    if state.config.iast.enabled {
        app = app.merge(iast_routes());
    }

    if let Some(cors) = cors_layer(&state.config) {
        app = app.layer(cors);
    }
    if state.config.api.enable_request_logging {
        app = app.layer(TraceLayer::new_for_http());
    }

    NormalizePathLayer::trim_trailing_slash().layer(app.with_state(state))
}

/// Serve `app` on an already bound listener
pub async fn serve(listener: TcpListener, app: App) -> std::io::Result<()> {
    axum::serve(listener, axum::ServiceExt::<Request>::into_make_service(app)).await
}

fn user_routes() -> Router<AppState> {
    use handlers::users;

    Router::new()
        .route("/api/users", post(users::register))
        .route("/api/users/login", post(users::login))
        .route("/api/user", get(users::current_user).put(users::update_user))
}

fn profile_routes() -> Router<AppState> {
    use handlers::profiles;

    Router::new()
        .route("/api/profiles/:username", get(profiles::get_profile))
        .route(
            "/api/profiles/:username/follow",
            post(profiles::follow).delete(profiles::unfollow),
        )
}

fn article_routes() -> Router<AppState> {
    use handlers::{articles, tags};

    Router::new()
        .route("/api/articles", get(articles::list).post(articles::create))
        .route("/api/articles/feed", get(articles::feed))
        .route(
            "/api/articles/:slug",
            get(articles::get_article)
                .put(articles::update)
                .delete(articles::delete),
        )
        .route(
            "/api/articles/:slug/favorite",
            post(articles::favorite).delete(articles::unfavorite),
        )
        .route("/api/tags", get(tags::list))
}

fn comment_routes() -> Router<AppState> {
    use handlers::comments;

    Router::new()
        .route(
            "/api/articles/:slug/comments",
            get(comments::list).post(comments::create),
        )
        .route("/api/articles/:slug/comments/:id", axum::routing::delete(comments::delete))
}

fn iast_routes() -> Router<AppState> {
    use handlers::iast;

    Router::new()
        .route("/iast/propagation", get(iast::propagation))
        .route("/iast/weak_hash", get(iast::weak_hash))
        .route("/iast/sqli", get(iast::sqli))
        .route("/iast/articles", get(iast::articles))
}

/// Permissive in development, the configured origins elsewhere
fn cors_layer(config: &AppConfig) -> Option<CorsLayer> {
    if !config.security.enable_cors {
        return None;
    }

    if config.environment == Environment::Development {
        return Some(CorsLayer::permissive());
    }

    let origins: Vec<HeaderValue> = config
        .security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    Some(
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any),
    )
}

async fn root() -> &'static str {
    "HELLO"
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    match DatabaseManager::health_check(&state.db).await {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "ok", "database": "ok" }))),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "degraded", "database": e.to_string() })),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::test_pool;
    use axum::{body::Body, http::Request};
    use std::collections::HashSet;
    use tower::ServiceExt;

    #[test]
    fn route_table_has_no_duplicates() {
        let mut seen = HashSet::new();
        for route in ROUTES {
            assert!(seen.insert((route.method, route.path)), "duplicate {} {}", route.method, route.path);
        }
    }

    #[test]
    fn write_routes_require_auth() {
        for route in ROUTES.iter().filter(|r| r.path.starts_with("/api/") && r.method != "GET") {
            if route.path.starts_with("/api/users") {
                assert_eq!(route.auth, Auth::None);
            } else {
                assert_eq!(route.auth, Auth::Required, "{} {}", route.method, route.path);
            }
        }
    }

    #[test]
    fn cors_follows_config() {
        let mut config = AppConfig::test();
        assert!(cors_layer(&config).is_none());

        config.security.enable_cors = true;
        config.security.cors_origins = vec!["http://localhost:4100".to_string()];
        assert!(cors_layer(&config).is_some());
    }

    async fn send(app: App, uri: &str) -> (StatusCode, String) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn index_says_hello() {
        let state = AppState::new(test_pool().await, AppConfig::test());
        assert_eq!(send(router(state.clone()), "/").await, (StatusCode::OK, "HELLO".to_string()));
        assert_eq!(send(router(state), "/index").await.1, "HELLO");
    }

    #[tokio::test]
    async fn health_reports_database() {
        let state = AppState::new(test_pool().await, AppConfig::test());
        let (status, body) = send(router(state), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#""database":"ok""#));
    }

    #[tokio::test]
    async fn trailing_slashes_are_ignored() {
        let state = AppState::new(test_pool().await, AppConfig::test());
        let (status, body) = send(router(state.clone()), "/api/articles/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#""articlesCount":0"#), "got {body}");
        assert_eq!(send(router(state.clone()), "/api/tags/").await.0, StatusCode::OK);
        assert_eq!(send(router(state), "/iast/sqli/?q=test").await.0, StatusCode::OK);
    }

    #[tokio::test]
    async fn query_rejections_use_the_error_envelope() {
        let state = AppState::new(test_pool().await, AppConfig::test());
        let (status, body) = send(router(state), "/api/articles?limit=abc").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert!(json["errors"]["body"].is_array(), "got {body}");
    }

    #[tokio::test]
    async fn iast_tree_can_be_switched_off() {
        let mut config = AppConfig::test();
        config.iast.enabled = false;
        let state = AppState::new(test_pool().await, config);
        let (status, _) = send(router(state), "/iast/weak_hash?q=test").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
