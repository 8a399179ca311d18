// handlers/iast/sqli.rs - GET /iast/sqli/?q=

use axum::{extract::State, http::StatusCode};
use serde::Deserialize;

use crate::app::AppState;
use crate::iast::sinks;
use crate::middleware::ApiQuery;

#[derive(Debug, Deserialize)]
pub struct SqliQuery {
    #[serde(default)]
    pub q: String,
}

/// Runs `q` through concatenated SQL; always 200 with an empty body
pub async fn get(State(state): State<AppState>, ApiQuery(query): ApiQuery<SqliQuery>) -> StatusCode {
    sinks::sql_injection(&state.db, &query.q).await;
    StatusCode::OK
}
