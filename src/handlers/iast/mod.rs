// handlers/iast/mod.rs - /iast/* vulnerability demo endpoints
//
// Mounted only when `iast.enabled` is set. Every response here is
// intentionally unsafe: an insecure cookie, reflected headers, and sinks
// fed straight from the query string.

pub mod articles;
pub mod propagation;
pub mod sqli;
pub mod weak_hash;

pub use articles::get as articles;
pub use propagation::get as propagation;
pub use sqli::get as sqli;
pub use weak_hash::get as weak_hash;

use axum::{
    http::{header, HeaderValue},
    response::Response,
};
use serde::Deserialize;

use crate::error::ApiError;

/// Cookie without Secure or HttpOnly
pub const INSECURE_COOKIE: &str = "insecure=cookie; SameSite=None; Path=/";

/// The two tainted inputs. A missing parameter reads as `None`.
#[derive(Debug, Deserialize)]
pub struct PropagationQuery {
    #[serde(default = "absent")]
    pub string1: String,
    #[serde(default = "absent")]
    pub password: String,
}

fn absent() -> String {
    "None".to_string()
}

/// Attach the insecure cookie and reflect `result` into `Vary` and `Header-Injection`
pub(crate) fn insecure_response(mut response: Response, result: &str) -> Result<Response, ApiError> {
    let value = HeaderValue::from_str(result)
        .map_err(|_| ApiError::internal_server_error("Result is not a valid header value"))?;

    let headers = response.headers_mut();
    headers.append(header::SET_COOKIE, HeaderValue::from_static(INSECURE_COOKIE));
    headers.insert(header::VARY, value.clone());
    headers.insert("header-injection", value);
    Ok(response)
}
