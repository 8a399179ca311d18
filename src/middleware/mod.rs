pub mod auth;
pub mod response;

pub use auth::{AuthUser, MaybeAuthUser};
pub use response::{ApiJson, ApiPath, ApiQuery, ApiResponse, ApiResult};
