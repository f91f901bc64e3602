//! Comment model.
//!
//! # Invariants
//! - `article_id` never changes after creation.
//! - Only `author_id` may edit or delete the comment, regardless of who
//!   wrote the parent article.

use crate::model::article::ArticleId;
use crate::model::user::{Author, UserId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type CommentId = Uuid;

/// Stored comment row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub article_id: ArticleId,
    pub author_id: UserId,
    pub content: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Comment {
    /// Builds a comment with a fresh id, stamped at `now_ms`.
    pub fn new(
        article_id: ArticleId,
        author_id: UserId,
        content: impl Into<String>,
        now_ms: i64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            article_id,
            author_id,
            content: content.into(),
            created_at: now_ms,
            updated_at: now_ms,
        }
    }
}

/// Comment enriched with its author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentView {
    #[serde(flatten)]
    pub comment: Comment,
    pub author: Author,
}
