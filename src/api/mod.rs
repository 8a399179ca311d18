//! Wire shapes for the Conduit API.
//!
//! Every resource travels inside a single-key envelope (`{"user": {...}}`,
//! `{"article": {...}}`). Request envelopes are generic over their payload so
//! one struct covers register, login and update bodies.

use serde::{Deserialize, Deserializer};

pub mod article;
pub mod comment;
pub mod profile;
pub mod user;

pub use article::{ArticleBody, ArticleEnvelope, ArticleView, ArticlesBody, NewArticle, UpdateArticle};
pub use comment::{CommentBody, CommentEnvelope, CommentView, CommentsBody, NewComment};
pub use profile::{ProfileBody, ProfileView};
pub use user::{LoginUser, NewUser, UpdateUser, UserBody, UserEnvelope, UserView};

/// Treat `""` and `null` the same as a missing field. Some frontends send
/// one, some the other.
pub(crate) fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}
