pub mod article;
pub mod comment;
pub mod profile;
pub mod tag;
pub mod user;

pub use article::{Article, ArticleChanges, ArticleFilter};
pub use comment::Comment;
pub use profile::Profile;
pub use tag::Tag;
pub use user::{User, UserChanges};
