pub mod migrate;
pub mod urls;
pub mod user;
