//! Typed references used by error values.

use crate::model::article::ArticleId;
use crate::model::comment::CommentId;
use crate::model::tag::TagId;
use crate::model::user::UserId;
use std::fmt::{Display, Formatter};

/// Identifies the entity an operation failed on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    Article(ArticleId),
    Comment(CommentId),
    Tag(TagId),
    User(UserId),
    Like {
        user_id: UserId,
        article_id: ArticleId,
    },
    /// Email/username pair rejected by the user uniqueness constraint.
    UserHandle(String),
}

impl Display for Resource {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Article(id) => write!(f, "article {id}"),
            Self::Comment(id) => write!(f, "comment {id}"),
            Self::Tag(id) => write!(f, "tag {id}"),
            Self::User(id) => write!(f, "user {id}"),
            Self::Like {
                user_id,
                article_id,
            } => write!(f, "like by user {user_id} on article {article_id}"),
            Self::UserHandle(username) => write!(f, "user handle `{username}`"),
        }
    }
}
