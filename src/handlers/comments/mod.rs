pub mod create;
pub mod delete;
pub mod list;

pub use create::post as create;
pub use delete::delete;
pub use list::get as list;
