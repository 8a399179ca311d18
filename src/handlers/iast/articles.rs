// handlers/iast/articles.rs - GET /iast/articles

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};

use super::{insecure_response, PropagationQuery};
use crate::api::ArticlesBody;
use crate::app::AppState;
use crate::database::models::Article;
use crate::error::ApiError;
use crate::handlers::articles::ListQuery;
use crate::iast;
use crate::middleware::{ApiQuery, MaybeAuthUser};

/// Same listing as `/api/articles`, then the propagation chain over the
/// same query string
pub async fn get(
    State(state): State<AppState>,
    viewer: MaybeAuthUser,
    ApiQuery(list): ApiQuery<ListQuery>,
    ApiQuery(taint): ApiQuery<PropagationQuery>,
) -> Result<Response, ApiError> {
    let filter = list.into_filter(&state.config.api);
    let articles = Article::list(&state.db, &filter).await?;
    let body = ArticlesBody::load(&state.db, articles, viewer.profile_id()).await?;

    let result = iast::run_sinks(&state.http, state.outbound_timeout(), &taint.string1, &taint.password).await?;
    insecure_response(Json(body).into_response(), &result)
}
