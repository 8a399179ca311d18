// handlers/iast/propagation.rs - GET /iast/propagation?string1=&password=

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use super::{insecure_response, PropagationQuery};
use crate::app::AppState;
use crate::error::ApiError;
use crate::iast;
use crate::middleware::ApiQuery;

#[derive(Debug, Serialize)]
pub struct PropagationBody {
    pub string_result: String,
    /// No taint tracker is attached in-process
    pub tainted: bool,
    pub ranges: String,
}

pub async fn get(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<PropagationQuery>,
) -> Result<Response, ApiError> {
    let result = iast::run_sinks(&state.http, state.outbound_timeout(), &query.string1, &query.password).await?;

    let body = PropagationBody {
        string_result: result.clone(),
        tainted: false,
        ranges: "[]".to_string(),
    };
    insecure_response(Json(body).into_response(), &result)
}
