//! Article domain model.
//!
//! # Responsibility
//! - Define the stored article row and its enriched read models.
//! - Define create input and partial-update patch shapes.
//!
//! # Invariants
//! - `id` and `author_id` are immutable after creation.
//! - `published` defaults to `false`.
//! - In `ArticlePatch`, `None` means "leave unchanged"; for `tag_ids`,
//!   `Some(vec![])` means "remove every tag".

use crate::model::comment::CommentView;
use crate::model::like::Like;
use crate::model::tag::{Tag, TagId};
use crate::model::user::{Author, UserId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

pub type ArticleId = Uuid;

/// Stored article row without relations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub id: ArticleId,
    pub title: String,
    pub content: String,
    pub published: bool,
    pub author_id: UserId,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Article {
    /// Builds a new article row for `author_id` from create input.
    pub fn new(author_id: UserId, input: &NewArticle, now_ms: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: input.title.clone(),
            content: input.content.clone(),
            published: input.published.unwrap_or(false),
            author_id,
            created_at: now_ms,
            updated_at: now_ms,
        }
    }
}

/// Create input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewArticle {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub published: Option<bool>,
    #[serde(default)]
    pub tag_ids: Option<Vec<TagId>>,
}

impl NewArticle {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            published: None,
            tag_ids: None,
        }
    }

    pub fn published(mut self, published: bool) -> Self {
        self.published = Some(published);
        self
    }

    pub fn with_tags(mut self, tag_ids: impl IntoIterator<Item = TagId>) -> Self {
        self.tag_ids = Some(tag_ids.into_iter().collect());
        self
    }

    /// Requested tag ids, deduplicated. Omitted tags mean an empty set.
    pub fn tag_set(&self) -> Vec<TagId> {
        dedup_tag_ids(self.tag_ids.as_deref().unwrap_or_default())
    }
}

/// Partial update. Every field is optional and independently applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticlePatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub published: Option<bool>,
    /// Replaces the whole tag set when present.
    #[serde(default)]
    pub tag_ids: Option<Vec<TagId>>,
}

impl ArticlePatch {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn published(mut self, published: bool) -> Self {
        self.published = Some(published);
        self
    }

    pub fn tag_ids(mut self, tag_ids: impl IntoIterator<Item = TagId>) -> Self {
        self.tag_ids = Some(tag_ids.into_iter().collect());
        self
    }

    /// Returns whether no field is present.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.published.is_none()
            && self.tag_ids.is_none()
    }

    /// Replacement tag set, deduplicated, when present.
    pub fn tag_set(&self) -> Option<Vec<TagId>> {
        self.tag_ids.as_deref().map(dedup_tag_ids)
    }
}

/// Search filters. Both are optional and combine with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleSearch {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub tag_ids: Vec<TagId>,
}

impl ArticleSearch {
    pub fn text(query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
            tag_ids: Vec::new(),
        }
    }

    pub fn tags(tag_ids: impl IntoIterator<Item = TagId>) -> Self {
        Self {
            query: None,
            tag_ids: tag_ids.into_iter().collect(),
        }
    }
}

/// Aggregate relation counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ArticleCounts {
    pub comments: u64,
    pub likes: u64,
}

/// Article enriched with author, tags and counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleView {
    #[serde(flatten)]
    pub article: Article,
    pub author: Author,
    pub tags: Vec<Tag>,
    pub counts: ArticleCounts,
}

/// Single-article read model with every relation loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleDetail {
    #[serde(flatten)]
    pub article: Article,
    pub author: Author,
    pub tags: Vec<Tag>,
    /// Newest first.
    pub comments: Vec<CommentView>,
    pub likes: Vec<Like>,
    pub counts: ArticleCounts,
}

fn dedup_tag_ids(tag_ids: &[TagId]) -> Vec<TagId> {
    tag_ids
        .iter()
        .copied()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{Article, ArticlePatch, NewArticle};
    use uuid::Uuid;

    #[test]
    fn new_article_defaults_to_unpublished_without_tags() {
        let input = NewArticle::new("title", "body");
        let article = Article::new(Uuid::new_v4(), &input, 10);
        assert!(!article.published);
        assert_eq!(article.created_at, article.updated_at);
        assert!(input.tag_set().is_empty());
    }

    #[test]
    fn tag_set_collapses_duplicates() {
        let tag = Uuid::new_v4();
        let input = NewArticle::new("t", "c").with_tags([tag, tag]);
        assert_eq!(input.tag_set(), vec![tag]);
    }

    #[test]
    fn patch_distinguishes_omitted_from_cleared_tags() {
        let omitted = ArticlePatch::default().title("x");
        assert_eq!(omitted.tag_set(), None);

        let cleared = ArticlePatch::default().tag_ids(Vec::<Uuid>::new());
        assert_eq!(cleared.tag_set(), Some(Vec::new()));
        assert!(!cleared.is_empty());
        assert!(ArticlePatch::default().is_empty());
    }
}
