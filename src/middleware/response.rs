use async_trait::async_trait;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        FromRequest, FromRequestParts, Path, Query, Request,
    },
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::json;

use crate::error::ApiError;

/// Serialized response body plus status. Bodies carry their own envelope
/// (`{"user": ...}`, `{"articles": ...}`), so nothing is wrapped here.
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub status_code: Option<StatusCode>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a successful API response with default 200 status
    pub fn success(data: T) -> Self {
        Self {
            data,
            status_code: None,
        }
    }

    pub fn with_status(data: T, status_code: StatusCode) -> Self {
        Self {
            data,
            status_code: Some(status_code),
        }
    }

    /// Create a 201 Created response
    pub fn created(data: T) -> Self {
        Self::with_status(data, StatusCode::CREATED)
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = self.status_code.unwrap_or(StatusCode::OK);

        let data_value = match serde_json::to_value(&self.data) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!("Failed to serialize response data: {}", e);
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "errors": { "body": ["Failed to serialize response data"] }
                    })),
                )
                    .into_response();
            }
        };

        (status, Json(data_value)).into_response()
    }
}

pub type ApiResult<T> = Result<ApiResponse<T>, ApiError>;

/// `Json` extractor whose rejections use the API error envelope
#[derive(Debug)]
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => Err(json_rejection_to_error(rejection)),
        }
    }
}

fn json_rejection_to_error(rejection: JsonRejection) -> ApiError {
    match rejection {
        JsonRejection::JsonDataError(e) => ApiError::unprocessable_entity(
            "Request body does not match the expected shape",
            [("body".to_string(), e.body_text())].into_iter().collect(),
        ),
        other => ApiError::invalid_json(other.body_text()),
    }
}

/// `Query` extractor whose rejections use the API error envelope
#[derive(Debug)]
pub struct ApiQuery<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(ApiQuery(value)),
            Err(rejection) => Err(ApiError::bad_request(rejection.body_text())),
        }
    }
}

/// `Path` extractor whose rejections use the API error envelope
#[derive(Debug)]
pub struct ApiPath<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(ApiPath(value)),
            Err(rejection) => Err(path_rejection_to_error(rejection)),
        }
    }
}

fn path_rejection_to_error(rejection: PathRejection) -> ApiError {
    match rejection {
        PathRejection::FailedToDeserializePathParams(e) => ApiError::bad_request(e.body_text()),
        other => {
            tracing::error!("Path extraction failed: {}", other.body_text());
            ApiError::internal_server_error("Route parameters unavailable")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Payload {
        #[allow(dead_code)]
        name: String,
    }

    fn json_request(body: &'static str) -> Request {
        Request::builder()
            .method("POST")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn malformed_json_is_a_bad_request() {
        let err = ApiJson::<Payload>::from_request(json_request("{not json"), &()).await.unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[tokio::test]
    async fn wrong_shape_is_unprocessable() {
        let err = ApiJson::<Payload>::from_request(json_request(r#"{"other": 1}"#), &()).await.unwrap_err();
        assert_eq!(err.status_code(), 422);
    }

    #[derive(Debug, Deserialize)]
    struct Page {
        limit: Option<i64>,
    }

    #[tokio::test]
    async fn bad_query_uses_the_error_envelope() {
        let (mut parts, _) = Request::builder().uri("/api/articles?limit=abc").body(Body::empty()).unwrap().into_parts();
        let err = ApiQuery::<Page>::from_request_parts(&mut parts, &()).await.unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert!(err.to_json()["errors"]["body"][0].as_str().is_some_and(|msg| !msg.is_empty()));
    }

    #[tokio::test]
    async fn good_query_deserializes() {
        let (mut parts, _) = Request::builder().uri("/api/articles?limit=5").body(Body::empty()).unwrap().into_parts();
        let ApiQuery(page) = ApiQuery::<Page>::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(page.limit, Some(5));
    }

    #[test]
    fn created_sets_status() {
        let resp = ApiResponse::created(json!({"ok": true})).into_response();
        assert_eq!(resp.status(), StatusCode::CREATED);
    }
}
