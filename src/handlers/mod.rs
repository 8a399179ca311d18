// handlers/mod.rs - one module per resource, one file per endpoint
//
// Handlers extract what they need (state, caller, path, body), delegate to
// the models in crate::database, and serialize through crate::api.

pub mod articles;
pub mod comments;
pub mod iast;
pub mod profiles;
pub mod tags;
pub mod users;
