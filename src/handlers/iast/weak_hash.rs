// handlers/iast/weak_hash.rs - GET /iast/weak_hash?q=

use serde::Deserialize;

use crate::iast::sinks;
use crate::middleware::ApiQuery;

#[derive(Debug, Deserialize)]
pub struct HashQuery {
    #[serde(default)]
    pub q: String,
}

/// MD5 hex digest of `q` as plain text
pub async fn get(ApiQuery(query): ApiQuery<HashQuery>) -> String {
    sinks::weak_hash(&query.q)
}
